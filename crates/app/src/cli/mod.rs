use clap::{Parser, Subcommand};
use storefront_app::config::{ClientConfig, LoggingConfig};

mod cart;
mod checkout;
mod console;
mod token;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront cart and checkout client",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) client: ClientConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart(cart::CartCommand),

    /// Place an order for the current cart
    Checkout(checkout::CheckoutArgs),

    /// Manage the stored API token
    Token(token::TokenCommand),
}

impl Cli {
    /// Parse arguments, falling back to the environment and a `.env` file.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(&self.client, command).await,
            Commands::Checkout(args) => checkout::run(&self.client, args).await,
            Commands::Token(command) => token::run(&self.client, command).await,
        }
    }
}
