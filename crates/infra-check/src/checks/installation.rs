use super::issue::{IssueReport, IssueType};
use super::{Check, CheckContext};
use async_trait::async_trait;
use shared::Console;

pub struct WarnetInstalledCheck;

#[async_trait]
impl Check for WarnetInstalledCheck {
    fn name(&self) -> &'static str {
        "Warnet Installation"
    }

    fn title(&self) -> &'static str {
        "Warnet Installation Check"
    }

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool {
        let timeout = ctx.config.command_timeout();

        if let Err(e) = ctx.runner.run("which", &["warnet"], timeout).await {
            Console::error("Warnet CLI not found in PATH");
            issues.add_issue(IssueType::WarnetNotInstalled, e.summary());
            return false;
        }
        Console::success("Warnet CLI found");

        // Version output is informational only
        if let Ok(output) = ctx.runner.run("warnet", &["--version"], timeout).await {
            Console::progress(&format!("Version: {}", output.stdout.trim()));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::runner::ScriptedCommandRunner;

    #[tokio::test]
    async fn test_installed() {
        let config = ValidatorConfig::default();
        let runner = ScriptedCommandRunner::new()
            .succeed("which warnet", "/usr/local/bin/warnet\n")
            .succeed("warnet --version", "warnet, version 1.1.11\n");
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let mut issues = IssueReport::new();

        assert!(WarnetInstalledCheck.run(&ctx, &mut issues).await);
        assert!(issues.issues().is_empty());
    }

    #[tokio::test]
    async fn test_version_failure_still_passes() {
        let config = ValidatorConfig::default();
        let runner = ScriptedCommandRunner::new().succeed("which warnet", "/usr/local/bin/warnet\n");
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };

        assert!(WarnetInstalledCheck.run(&ctx, &mut IssueReport::new()).await);
    }

    #[tokio::test]
    async fn test_missing() {
        let config = ValidatorConfig::default();
        let runner = ScriptedCommandRunner::new().fail("which warnet", "");
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let mut issues = IssueReport::new();

        assert!(!WarnetInstalledCheck.run(&ctx, &mut issues).await);
        assert!(issues.contains(IssueType::WarnetNotInstalled));
        assert_eq!(runner.calls(), vec!["which warnet"]);
    }
}
