use super::node::Tier;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed network YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("network document has neither `network.nodes` nor top-level `nodes`")]
    MissingNodes,
    #[error("duplicate node name: {0}")]
    DuplicateNode(String),
    #[error("node {node} has negative weight {weight}")]
    NegativeWeight { node: String, weight: f64 },
    #[error("node {0} lists itself as a peer")]
    SelfConnection(String),
    #[error("node {node} connects to unknown peer {peer}")]
    DanglingConnection { node: String, peer: String },
    #[error("node {node} is typed as {by_type} but tagged as {by_tag}")]
    TierMismatch {
        node: String,
        by_type: Tier,
        by_tag: Tier,
    },
}
