use clap::{Args, Subcommand};
use storefront_app::{
    auth::{BearerToken, forget_token, store_token},
    config::ClientConfig,
    storage::FileStorage,
};

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Store a bearer token for later requests
    Set(SetTokenArgs),

    /// Forget the stored token and continue as a guest
    Clear,
}

#[derive(Debug, Args)]
struct SetTokenArgs {
    /// Raw bearer token
    token: String,
}

pub(crate) async fn run(config: &ClientConfig, command: TokenCommand) -> Result<(), String> {
    let storage = FileStorage::new(&config.storage_dir);

    match command.command {
        TokenSubcommand::Set(args) => {
            let token = BearerToken::parse(&args.token)
                .map_err(|error| error.to_string())?;

            store_token(&storage, &token)
                .await
                .map_err(|error| format!("failed to store token: {error}"))?;

            println!("token stored in {}", storage.dir().display());
        }
        TokenSubcommand::Clear => {
            forget_token(&storage)
                .await
                .map_err(|error| format!("failed to clear token: {error}"))?;

            println!("token cleared");
        }
    }

    Ok(())
}
