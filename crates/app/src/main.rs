//! Storefront CLI

use std::process::ExitCode;

use storefront_app::observability;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = match cli::Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();

            return ExitCode::from(2);
        }
    };

    if let Err(error) = observability::init_logging(&cli.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
