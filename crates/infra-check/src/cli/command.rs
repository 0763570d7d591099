use crate::checks::issue::IssueReport;
use crate::checks::{default_checks, run_checks, CheckContext};
use crate::config::ValidatorConfig;
use crate::runner::{CommandRunner, SystemCommandRunner};
use crate::summary::ValidationSummary;
use chrono::Local;
use clap::Parser;
use log::info;
use shared::Console;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "End-to-end validation of a Warnet deployment", long_about = None)]
pub struct Cli {
    /// Optional TOML config file; defaults apply when absent
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Runs every check; `Ok(true)` when all of them passed.
    pub async fn run(&self) -> anyhow::Result<bool> {
        let config = ValidatorConfig::load(self.config.as_deref())?;
        info!("Validator config: {config:?}");
        Ok(validate(&config, &SystemCommandRunner).await)
    }
}

pub async fn validate(config: &ValidatorConfig, runner: &dyn CommandRunner) -> bool {
    Console::section("WARNET INFRASTRUCTURE VALIDATION");
    Console::plain(&format!(
        "Started: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    let ctx = CheckContext { config, runner };
    let mut issues = IssueReport::new();
    let results = run_checks(&default_checks(), &ctx, &mut issues).await;

    issues.print_issues();
    ValidationSummary::new(&results).print()
}
