use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct GiftCardCommand {
    #[command(subcommand)]
    command: GiftCardSubcommand,
}

#[derive(Debug, Subcommand)]
enum GiftCardSubcommand {
    Create(create::CreateGiftCardArgs),
    List(list::ListGiftCardsArgs),
}

pub(crate) async fn run(command: GiftCardCommand) -> Result<(), String> {
    match command.command {
        GiftCardSubcommand::Create(args) => create::run(args).await,
        GiftCardSubcommand::List(args) => list::run(args).await,
    }
}
