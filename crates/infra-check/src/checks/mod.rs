pub mod data_logging;
pub mod economic;
pub mod fork;
pub mod installation;
pub mod issue;
pub mod network;
pub mod pods;
pub mod rpc;

use crate::config::ValidatorConfig;
use crate::runner::CommandRunner;
use async_trait::async_trait;
use issue::IssueReport;
use shared::Console;

/// Everything a check may touch. Checks share nothing else.
pub struct CheckContext<'a> {
    pub config: &'a ValidatorConfig,
    pub runner: &'a dyn CommandRunner,
}

/// One pass/fail validation step. Failures are reported through the console
/// and the issue report, never returned as errors.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    fn title(&self) -> &'static str;

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
}

pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(installation::WarnetInstalledCheck),
        Box::new(network::NetworkStatusCheck),
        Box::new(economic::EconomicWeightCheck),
        Box::new(fork::ForkDetectionCheck),
        Box::new(data_logging::DataLoggingCheck),
        Box::new(rpc::RpcConnectivityCheck),
    ]
}

/// Runs every check in order, regardless of earlier failures.
pub async fn run_checks(
    checks: &[Box<dyn Check>],
    ctx: &CheckContext<'_>,
    issues: &mut IssueReport,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(checks.len());
    for (index, check) in checks.iter().enumerate() {
        Console::section(&format!("TEST {}: {}", index + 1, check.title()));
        let passed = check.run(ctx, issues).await;
        log::info!("{} finished: {}", check.name(), if passed { "pass" } else { "fail" });
        results.push(CheckResult {
            name: check.name(),
            passed,
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ScriptedCommandRunner;

    struct Fixed(&'static str, bool);

    #[async_trait]
    impl Check for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn title(&self) -> &'static str {
            self.0
        }

        async fn run(&self, _ctx: &CheckContext<'_>, _issues: &mut IssueReport) -> bool {
            self.1
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_checks() {
        let config = ValidatorConfig::default();
        let runner = ScriptedCommandRunner::new();
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(Fixed("first", false)),
            Box::new(Fixed("second", true)),
            Box::new(Fixed("third", false)),
        ];

        let results = run_checks(&checks, &ctx, &mut IssueReport::new()).await;
        assert_eq!(
            results,
            vec![
                CheckResult { name: "first", passed: false },
                CheckResult { name: "second", passed: true },
                CheckResult { name: "third", passed: false },
            ]
        );
    }

    #[test]
    fn test_default_check_order() {
        let names: Vec<_> = default_checks().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Warnet Installation",
                "Network Running",
                "Economic Weight Access",
                "Fork Detection",
                "Data Logging",
                "RPC Connectivity",
            ]
        );
    }
}
