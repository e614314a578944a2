use clap::Args;
use ribbon_app::{
    authority::{AdminApiClient, AuthorityAccess, AuthorityConfig, DEFAULT_API_VERSION},
    database,
    domain::shops::ShopDomain,
    sessions::{PgSessionsRepository, SessionsRepository},
};

#[derive(Debug, Args)]
pub(crate) struct ListGiftCardsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain whose gift cards should be listed
    #[arg(long)]
    shop: String,

    /// How many cards to list, newest first
    #[arg(long, default_value_t = 20)]
    first: u32,

    /// Admin API version to address
    #[arg(long, env = "AUTHORITY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,
}

pub(crate) async fn run(args: ListGiftCardsArgs) -> Result<(), String> {
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

    let cards = client
        .list_gift_cards(&AuthorityAccess::from(session), args.first)
        .await
        .map_err(|error| format!("failed to list gift cards: {error}"))?;

    if cards.is_empty() {
        println!("no gift cards found for {shop}");
        return Ok(());
    }

    for card in cards {
        println!("last_characters: {}", card.suffix);
        println!("balance: {} {}", card.balance, card.currency);
        println!("initial_value: {} {}", card.initial_value, card.currency);
        println!("enabled: {}", card.enabled);
        println!();
    }

    Ok(())
}
