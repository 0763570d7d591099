use clap::Parser;
use infra_check::Cli;
use shared::utils::install_panic_hook;
use shared::utils::logging::setup_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {e}. Using default logging.");
    }
    install_panic_hook();

    if cli.run().await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
