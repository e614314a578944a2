use clap::Args;
use ribbon_app::{
    authority::{AdminApiClient, AuthorityAccess, AuthorityConfig, DEFAULT_API_VERSION, NewGiftCard},
    database,
    domain::shops::ShopDomain,
    sessions::{PgSessionsRepository, SessionsRepository},
};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CreateGiftCardArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain the card belongs to
    #[arg(long)]
    shop: String,

    /// Full gift-card code to store
    #[arg(long)]
    code: String,

    /// Opening balance, e.g. 50.00
    #[arg(long)]
    amount: Decimal,

    /// Admin API version to address
    #[arg(long, env = "AUTHORITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,
}

pub(crate) async fn run(args: CreateGiftCardArgs) -> Result<(), String> {
    if args.amount <= Decimal::ZERO {
        return Err("amount must be positive".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let shop = ShopDomain::new(args.shop);

    let session = PgSessionsRepository::new(pool)
        .find_offline_session(&shop)
        .await
        .map_err(|error| format!("failed to read the session store: {error}"))?
        .ok_or_else(|| format!("no offline session stored for {shop}"))?;

    let client = AdminApiClient::new(
        reqwest::Client::new(),
        AuthorityConfig {
            api_version: args.api_version,
        },
    );

    let created = client
        .create_gift_card(
            &AuthorityAccess::from(session),
            &NewGiftCard {
                code: args.code,
                initial_value: args.amount,
            },
        )
        .await
        .map_err(|error| format!("failed to create gift card: {error}"))?;

    println!("gift_card_id: {}", created.external_id);
    println!("last_characters: {}", created.suffix);
    println!("store the full code now; only its last characters are shown again");

    Ok(())
}
