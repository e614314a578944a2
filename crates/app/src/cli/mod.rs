use clap::{Parser, Subcommand};

mod gift_card;

#[derive(Debug, Parser)]
#[command(name = "ribbon-app", about = "Ribbon CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    GiftCard(gift_card::GiftCardCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::GiftCard(command) => gift_card::run(command).await,
        }
    }
}
