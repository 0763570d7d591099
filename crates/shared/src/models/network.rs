use super::error::ModelError;
use super::node::{NodeDescriptor, Tier};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
}

#[derive(Serialize)]
struct NetworkDocument<'a> {
    network: &'a NetworkDescriptor,
}

impl NetworkDescriptor {
    /// Parse a network document. Accepts both the `network: {nodes: ...}`
    /// layout written by the generator and a flat top-level `nodes` list.
    pub fn from_yaml_str(content: &str) -> Result<Self, ModelError> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;

        let wrapped = document
            .get("network")
            .is_some_and(|network| network.get("nodes").is_some());
        let body = if wrapped {
            document
                .get("network")
                .cloned()
                .ok_or(ModelError::MissingNodes)?
        } else if document.get("nodes").is_some() {
            document
        } else {
            return Err(ModelError::MissingNodes);
        };

        Ok(serde_yaml::from_value(body)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ModelError> {
        Ok(serde_yaml::to_string(&NetworkDocument { network: self })?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        debug!("Reading network from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let content = self.to_yaml_string()?;
        std::fs::write(path, content).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote {} nodes to {}", self.nodes.len(), path.display());
        Ok(())
    }

    /// Referential and tier integrity. Stops at the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut names = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(ModelError::DuplicateNode(node.name.clone()));
            }
            if node.weight().is_nan() || node.weight() < 0.0 {
                return Err(ModelError::NegativeWeight {
                    node: node.name.clone(),
                    weight: node.weight(),
                });
            }
            node.check_tier_consistency()?;
        }

        for node in &self.nodes {
            for peer in &node.connections {
                if *peer == node.name {
                    return Err(ModelError::SelfConnection(node.name.clone()));
                }
                if !names.contains(peer.as_str()) {
                    return Err(ModelError::DanglingConnection {
                        node: node.name.clone(),
                        peer: peer.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn nodes_in_tier(&self, tier: Tier) -> impl Iterator<Item = &NodeDescriptor> + '_ {
        self.nodes
            .iter()
            .filter(move |node| node.tier() == Some(tier))
    }

    pub fn economic_nodes(&self) -> impl Iterator<Item = &NodeDescriptor> + '_ {
        self.nodes_in_tier(Tier::Economic)
    }

    pub fn total_weight(&self) -> f64 {
        self.nodes.iter().map(NodeDescriptor::weight).sum()
    }
}
