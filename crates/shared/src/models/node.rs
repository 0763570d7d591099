use super::error::ModelError;
use super::quantity::{CpuQuantity, MemoryQuantity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse fleet classification. Derived from [`NodeType`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Economic,
    Relay,
    Constrained,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Economic, Tier::Relay, Tier::Constrained];

    /// Tag marking tier membership in the YAML `tags` list.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Economic => "economic_node",
            Self::Relay => "relay_node",
            Self::Constrained => "constrained_node",
        }
    }

    pub fn from_tags(tags: &[String]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tags.iter().any(|tag| tag == tier.tag()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Economic => "economic",
            Self::Relay => "relay",
            Self::Constrained => "constrained",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    ExchangeTier1,
    ExchangeTier2,
    PaymentProcessor,
    Custody,
    Relay,
    Constrained,
}

impl NodeType {
    pub const ECONOMIC: [NodeType; 4] = [
        NodeType::ExchangeTier1,
        NodeType::ExchangeTier2,
        NodeType::PaymentProcessor,
        NodeType::Custody,
    ];

    pub const fn tier(&self) -> Tier {
        match self {
            Self::ExchangeTier1 | Self::ExchangeTier2 | Self::PaymentProcessor | Self::Custody => {
                Tier::Economic
            }
            Self::Relay => Tier::Relay,
            Self::Constrained => Tier::Constrained,
        }
    }

    pub const fn is_exchange(&self) -> bool {
        matches!(self, Self::ExchangeTier1 | Self::ExchangeTier2)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExchangeTier1 => "exchange_tier1",
            Self::ExchangeTier2 => "exchange_tier2",
            Self::PaymentProcessor => "payment_processor",
            Self::Custody => "custody",
            Self::Relay => "relay",
            Self::Constrained => "constrained",
        }
    }

    /// Display tags for a node of this type running `version`.
    pub fn tags(&self, version: &str, latest_version: &str) -> Vec<String> {
        let version_tag = if version == latest_version {
            "version_latest".to_string()
        } else {
            format!("version_{}", version.replace('.', "_"))
        };
        match self.tier() {
            Tier::Economic => vec![
                Tier::Economic.tag().to_string(),
                self.as_str().to_string(),
                "high_volume".to_string(),
            ],
            Tier::Relay => vec![
                Tier::Relay.tag().to_string(),
                "standard".to_string(),
                version_tag,
            ],
            Tier::Constrained => vec![
                Tier::Constrained.tag().to_string(),
                "resource_limited".to_string(),
                version_tag,
            ],
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionSpeed {
    Fast,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adoption_speed: Option<AdoptionSpeed>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BitcoinConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxconnections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxmempool: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpcthreads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txindex: Option<u8>,
    // Options we don't model are kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuQuantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryQuantity>,
}

impl Resources {
    pub const fn new(cpu: CpuQuantity, memory: MemoryQuantity) -> Self {
        Self {
            cpu: Some(cpu),
            memory: Some(memory),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default)]
    pub requests: Resources,
    #[serde(default)]
    pub limits: Resources,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: NodeMetadata,
    #[serde(default)]
    pub bitcoin_config: BitcoinConfig,
    #[serde(default)]
    pub resources: ResourceSpec,
    #[serde(default)]
    pub connections: Vec<String>,
}

impl NodeDescriptor {
    /// Tier by `metadata.node_type`, falling back to tier tags for
    /// hand-written files that omit the type.
    pub fn tier(&self) -> Option<Tier> {
        self.metadata
            .node_type
            .map(|node_type| node_type.tier())
            .or_else(|| Tier::from_tags(&self.tags))
    }

    pub fn is_economic(&self) -> bool {
        self.tier() == Some(Tier::Economic)
    }

    pub const fn weight(&self) -> f64 {
        self.metadata.weight
    }

    pub fn node_type_label(&self) -> &'static str {
        self.metadata
            .node_type
            .map_or("unknown", |node_type| node_type.as_str())
    }

    /// Version part of the image reference (`bitcoindevproject/bitcoin:27.0`).
    pub fn version(&self) -> Option<&str> {
        self.image
            .rsplit_once(':')
            .map(|(_, version)| version)
            .filter(|version| !version.is_empty())
    }

    pub fn check_tier_consistency(&self) -> Result<(), ModelError> {
        let (Some(node_type), Some(by_tag)) = (self.metadata.node_type, Tier::from_tags(&self.tags))
        else {
            return Ok(());
        };
        if node_type.tier() != by_tag {
            return Err(ModelError::TierMismatch {
                node: self.name.clone(),
                by_type: node_type.tier(),
                by_tag,
            });
        }
        Ok(())
    }
}
