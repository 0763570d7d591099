use super::issue::{IssueReport, IssueType};
use super::{Check, CheckContext};
use async_trait::async_trait;
use shared::models::NetworkDescriptor;
use shared::Console;

/// Weight totals for a network file, as the check reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSummary {
    pub economic_nodes: usize,
    pub total_weight: f64,
    pub economic_weight: f64,
}

impl WeightSummary {
    pub fn of(network: &NetworkDescriptor) -> Self {
        Self {
            economic_nodes: network.economic_nodes().count(),
            total_weight: network.total_weight(),
            economic_weight: network.economic_nodes().map(|n| n.weight()).sum(),
        }
    }

    pub fn economic_percentage(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.economic_weight / self.total_weight * 100.0)
    }
}

pub struct EconomicWeightCheck;

#[async_trait]
impl Check for EconomicWeightCheck {
    fn name(&self) -> &'static str {
        "Economic Weight Access"
    }

    fn title(&self) -> &'static str {
        "Economic Weight Accessibility"
    }

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool {
        let path = &ctx.config.economic_config;
        if !path.exists() {
            Console::error(&format!("Economic config not found at {}", path.display()));
            issues.add_issue(IssueType::EconomicConfigMissing, path.display().to_string());
            return false;
        }
        Console::success(&format!("Economic config found: {}", path.display()));

        let network = match NetworkDescriptor::load(path) {
            Ok(network) => network,
            Err(e) => {
                Console::error(&format!("Failed to parse economic config: {e}"));
                issues.add_issue(IssueType::EconomicConfigInvalid, e.to_string());
                return false;
            }
        };

        // Readable but inconsistent files still let weights be inspected
        if let Err(e) = network.validate() {
            Console::warning(&format!("Economic config has problems: {e}"));
            issues.add_issue(IssueType::EconomicConfigInvalid, e.to_string());
        }

        let summary = WeightSummary::of(&network);
        Console::success(&format!(
            "Found {} economic nodes in config",
            summary.economic_nodes
        ));
        Console::progress(&format!("Total network weight: {}", summary.total_weight));
        Console::progress(&format!("Economic node weight: {}", summary.economic_weight));
        match summary.economic_percentage() {
            Some(pct) => Console::progress(&format!("Economic weight percentage: {pct:.1}%")),
            None => Console::progress(
                "Economic weight percentage: N/A (no weights defined in current network)",
            ),
        }

        Console::progress("Economic Node Types:");
        for node in network.economic_nodes() {
            Console::plain(&format!(
                "    {:30} weight={:<4} type={}",
                node.name,
                node.weight(),
                node.node_type_label()
            ));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::runner::ScriptedCommandRunner;
    use std::path::Path;
    use tempfile::tempdir;

    const FLAT_NETWORK: &str = r#"
nodes:
  - name: economic-exchange_tier1-0
    image: bitcoindevproject/bitcoin:27.0
    tags: [economic_node, exchange_tier1, high_volume]
    metadata:
      weight: 15
      node_type: exchange_tier1
  - name: economic-custody-0
    tags: [economic_node]
    metadata:
      weight: 10
      node_type: custody
  - name: relay-node-0
    tags: [relay_node]
    metadata:
      weight: 1
      node_type: relay
"#;

    async fn run_on(path: &Path) -> (bool, IssueReport) {
        let config = ValidatorConfig {
            economic_config: path.to_path_buf(),
            ..Default::default()
        };
        let runner = ScriptedCommandRunner::new();
        let ctx = CheckContext {
            config: &config,
            runner: &runner,
        };
        let mut issues = IssueReport::new();
        let passed = EconomicWeightCheck.run(&ctx, &mut issues).await;
        (passed, issues)
    }

    #[test]
    fn test_weight_summary() {
        let network = NetworkDescriptor::from_yaml_str(FLAT_NETWORK).unwrap();
        let summary = WeightSummary::of(&network);
        assert_eq!(summary.economic_nodes, 2);
        assert_eq!(summary.total_weight, 26.0);
        assert_eq!(summary.economic_weight, 25.0);
        assert_eq!(format!("{:.1}", summary.economic_percentage().unwrap()), "96.2");
    }

    #[test]
    fn test_zero_weight_has_no_percentage() {
        let network = NetworkDescriptor::from_yaml_str("nodes:\n  - name: a\n").unwrap();
        assert_eq!(WeightSummary::of(&network).economic_percentage(), None);
    }

    #[tokio::test]
    async fn test_valid_file_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.yaml");
        std::fs::write(&path, FLAT_NETWORK).unwrap();

        let (passed, issues) = run_on(&path).await;
        assert!(passed);
        assert!(issues.issues().is_empty());
    }

    #[tokio::test]
    async fn test_inconsistent_file_passes_with_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.yaml");
        std::fs::write(
            &path,
            "network:\n  nodes:\n    - name: a\n      connections: [ghost]\n",
        )
        .unwrap();

        let (passed, issues) = run_on(&path).await;
        assert!(passed);
        assert!(issues.contains(IssueType::EconomicConfigInvalid));
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let (passed, issues) = run_on(&dir.path().join("absent.yaml")).await;
        assert!(!passed);
        assert!(issues.contains(IssueType::EconomicConfigMissing));
    }

    #[tokio::test]
    async fn test_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.yaml");
        std::fs::write(&path, "nodes: [unclosed").unwrap();

        let (passed, issues) = run_on(&path).await;
        assert!(!passed);
        assert!(issues.contains(IssueType::EconomicConfigInvalid));
    }
}
