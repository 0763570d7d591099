use clap::Parser;
use netgen::Cli;
use shared::utils::install_panic_hook;
use shared::utils::logging::setup_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {e}. Using default logging.");
    }
    install_panic_hook();

    cli.run()
}
