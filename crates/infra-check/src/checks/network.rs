use super::issue::{IssueReport, IssueType};
use super::pods::{running_pods_in_default, running_pods_in_namespace};
use super::{Check, CheckContext};
use async_trait::async_trait;
use log::debug;
use shared::Console;

pub struct NetworkStatusCheck;

#[async_trait]
impl Check for NetworkStatusCheck {
    fn name(&self) -> &'static str {
        "Network Running"
    }

    fn title(&self) -> &'static str {
        "Network Status Check"
    }

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool {
        let namespace = &ctx.config.namespace;
        Console::progress("Checking for running pods...");

        let namespaced = running_pods_in_namespace(ctx).await;
        match &namespaced {
            Ok(count) if *count > 0 => {
                Console::success(&format!(
                    "Found {count} running pods in {namespace} namespace"
                ));
                return true;
            }
            Ok(_) => {}
            Err(e) => debug!("Pod query in {namespace} namespace failed: {e}"),
        }

        match running_pods_in_default(ctx).await {
            Ok(count) if count > 0 => {
                Console::success(&format!(
                    "Found {count} running pods in default namespace"
                ));
                return true;
            }
            Ok(_) => {}
            Err(e) => {
                debug!("Pod query in default namespace failed: {e}");
                if let Err(first) = namespaced {
                    Console::error("Failed to query Kubernetes");
                    Console::progress("Is kubectl configured correctly?");
                    issues.add_issue(
                        IssueType::KubernetesUnavailable,
                        format!("{namespace}: {}; default: {}", first.summary(), e.summary()),
                    );
                    return false;
                }
            }
        }

        Console::error("No running Warnet pods found");
        Console::progress("You may need to deploy a network first");
        issues.add_issue(
            IssueType::NoRunningPods,
            format!("no running pods in {namespace} or default namespace"),
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::runner::ScriptedCommandRunner;

    const NAMESPACED: &str = "kubectl get pods -n warnet --field-selector=status.phase=Running";
    const DEFAULT: &str = "kubectl get pods --field-selector=status.phase=Running";

    async fn run_with(runner: ScriptedCommandRunner) -> (bool, IssueReport) {
        let config = ValidatorConfig::default();
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let mut issues = IssueReport::new();
        let passed = NetworkStatusCheck.run(&ctx, &mut issues).await;
        (passed, issues)
    }

    #[tokio::test]
    async fn test_pods_in_namespace() {
        let runner = ScriptedCommandRunner::new().succeed(
            NAMESPACED,
            "NAME READY STATUS\ntank-0000 1/1 Running\ntank-0001 1/1 Running\n",
        );
        let (passed, issues) = run_with(runner).await;
        assert!(passed);
        assert!(issues.issues().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_default_namespace() {
        let runner = ScriptedCommandRunner::new()
            .succeed(NAMESPACED, "")
            .succeed(DEFAULT, "NAME READY STATUS\ntank-0000 1/1 Running\nother 1/1 Running\n");
        let (passed, _) = run_with(runner).await;
        assert!(passed);
    }

    #[tokio::test]
    async fn test_no_pods_anywhere() {
        let runner = ScriptedCommandRunner::new()
            .succeed(NAMESPACED, "")
            .succeed(DEFAULT, "NAME READY STATUS\nother 1/1 Running\n");
        let (passed, issues) = run_with(runner).await;
        assert!(!passed);
        assert!(issues.contains(IssueType::NoRunningPods));
    }

    #[tokio::test]
    async fn test_kubectl_failure() {
        let runner = ScriptedCommandRunner::new()
            .fail(NAMESPACED, "connection refused")
            .fail(DEFAULT, "connection refused");
        let (passed, issues) = run_with(runner).await;
        assert!(!passed);
        assert!(issues.contains(IssueType::KubernetesUnavailable));
        assert!(!issues.contains(IssueType::NoRunningPods));
    }

    #[tokio::test]
    async fn test_forbidden_namespace_falls_back_to_default() {
        let runner = ScriptedCommandRunner::new()
            .fail(NAMESPACED, "Forbidden")
            .succeed(DEFAULT, "NAME READY STATUS\ntank-0000 1/1 Running\n");
        let config = ValidatorConfig::default();
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let mut issues = IssueReport::new();

        assert!(NetworkStatusCheck.run(&ctx, &mut issues).await);
        assert!(issues.issues().is_empty());
        assert_eq!(runner.calls(), vec![NAMESPACED.to_string(), DEFAULT.to_string()]);
    }

    #[tokio::test]
    async fn test_forbidden_namespace_and_empty_default() {
        let runner = ScriptedCommandRunner::new()
            .fail(NAMESPACED, "Forbidden")
            .succeed(DEFAULT, "NAME READY STATUS\n");
        let (passed, issues) = run_with(runner).await;
        assert!(!passed);
        assert!(issues.contains(IssueType::NoRunningPods));
    }
}
