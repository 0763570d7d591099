use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ECONOMIC_CONFIG: &str =
    "warnet-economic-implementation/warnet-economic-examples/networks/economic-30-nodes.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringPath {
    pub label: String,
    pub path: PathBuf,
}

impl MonitoringPath {
    fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: PathBuf::from(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub namespace: String,
    /// Substring that marks a Bitcoin node pod.
    pub pod_filter: String,
    pub economic_config: PathBuf,
    pub monitoring_paths: Vec<MonitoringPath>,
    pub output_dir: PathBuf,
    pub command_timeout_secs: u64,
    pub rpc_timeout_secs: u64,
    pub max_fork_nodes: usize,
    pub min_rpc_successes: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            namespace: "warnet".to_string(),
            pod_filter: "tank".to_string(),
            economic_config: PathBuf::from(DEFAULT_ECONOMIC_CONFIG),
            monitoring_paths: vec![
                MonitoringPath::new(
                    "Persistent monitoring script",
                    "warnetScenarioDiscovery/tools/persistent_monitor.sh",
                ),
                MonitoringPath::new(
                    "Test framework",
                    "warnetScenarioDiscovery/warnet_test_framework.py",
                ),
            ],
            output_dir: PathBuf::from("test_results/validation_test"),
            command_timeout_secs: 30,
            rpc_timeout_secs: 10,
            max_fork_nodes: 8,
            min_rpc_successes: 3,
        }
    }
}

impl ValidatorConfig {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.load_from_env();
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ValidatorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(namespace) = lookup("WARNET_NAMESPACE") {
            self.namespace = namespace;
        }
        if let Some(path) = lookup("WARNET_ECONOMIC_CONFIG") {
            self.economic_config = PathBuf::from(path);
        }
        if let Some(path) = lookup("WARNET_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(path);
        }
    }

    pub const fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub const fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = ValidatorConfig::load_from_file(Path::new("/nonexistent/validator.toml")).unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.command_timeout(), Duration::from_secs(30));
        assert_eq!(config.rpc_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("validator.toml");
        std::fs::write(
            &path,
            "namespace = \"signet\"\nmax_fork_nodes = 4\n\n[[monitoring_paths]]\nlabel = \"Monitor\"\npath = \"tools/monitor.sh\"\n",
        )
        .unwrap();

        let config = ValidatorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.namespace, "signet");
        assert_eq!(config.max_fork_nodes, 4);
        assert_eq!(config.monitoring_paths.len(), 1);
        assert_eq!(config.pod_filter, "tank");
        assert_eq!(config.min_rpc_successes, 3);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("validator.toml");
        std::fs::write(&path, "namespace = [").unwrap();
        assert!(ValidatorConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WARNET_NAMESPACE", "regtest"),
            ("WARNET_OUTPUT_DIR", "/tmp/validation"),
        ]
        .into_iter()
        .collect();

        let mut config = ValidatorConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.namespace, "regtest");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/validation"));
        assert_eq!(config.economic_config, PathBuf::from(DEFAULT_ECONOMIC_CONFIG));
    }
}
