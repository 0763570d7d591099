use shared::models::node::{
    AdoptionSpeed, BitcoinConfig, NodeMetadata, ResourceSpec, Resources,
};
use shared::models::{CpuQuantity, MemoryQuantity, NodeDescriptor, NodeType};

pub const IMAGE_REPOSITORY: &str = "bitcoindevproject/bitcoin";
pub const LATEST_VERSION: &str = "27.0";

pub const ECONOMIC_TYPE_DISTRIBUTION: [(NodeType, f64); 4] = [
    (NodeType::ExchangeTier1, 0.20),
    (NodeType::ExchangeTier2, 0.30),
    (NodeType::PaymentProcessor, 0.30),
    (NodeType::Custody, 0.20),
];

// Mirrors real-world upgrade lag
pub const RELAY_VERSION_DISTRIBUTION: [(&str, f64); 4] =
    [("27.0", 0.50), ("26.0", 0.30), ("25.0", 0.15), ("24.0", 0.05)];

pub const CONSTRAINED_VERSIONS: [&str; 3] = ["25.0", "24.0", "23.0"];

pub const RELAY_WEIGHT: f64 = 1.0;
pub const CONSTRAINED_WEIGHT: f64 = 0.5;

/// Fixed per-type template for economic nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicProfile {
    pub weight: f64,
    pub max_connections: u32,
    pub max_mempool: u32,
    pub cpu: CpuQuantity,
    pub memory: MemoryQuantity,
    pub rpc_threads: u32,
    pub txindex: bool,
}

impl EconomicProfile {
    pub const fn for_type(node_type: NodeType) -> Option<Self> {
        let profile = match node_type {
            NodeType::ExchangeTier1 => Self {
                weight: 15.0,
                max_connections: 2000,
                max_mempool: 10000,
                cpu: CpuQuantity::from_millicores(8000),
                memory: MemoryQuantity::from_gib(32),
                rpc_threads: 32,
                txindex: true,
            },
            NodeType::ExchangeTier2 => Self {
                weight: 10.0,
                max_connections: 1000,
                max_mempool: 5000,
                cpu: CpuQuantity::from_millicores(4000),
                memory: MemoryQuantity::from_gib(16),
                rpc_threads: 16,
                txindex: true,
            },
            NodeType::PaymentProcessor => Self {
                weight: 8.0,
                max_connections: 500,
                max_mempool: 2000,
                cpu: CpuQuantity::from_millicores(4000),
                memory: MemoryQuantity::from_gib(8),
                rpc_threads: 16,
                txindex: false,
            },
            NodeType::Custody => Self {
                weight: 7.0,
                max_connections: 300,
                max_mempool: 3000,
                cpu: CpuQuantity::from_millicores(2000),
                memory: MemoryQuantity::from_gib(12),
                rpc_threads: 16,
                txindex: false,
            },
            NodeType::Relay | NodeType::Constrained => return None,
        };
        Some(profile)
    }
}

/// Cumulative-threshold pick: the first entry whose running total exceeds
/// `draw`. Draws past the last threshold land on the last entry.
pub fn pick_weighted<T: Copy>(table: &[(T, f64)], draw: f64) -> Option<T> {
    let mut cumulative = 0.0;
    for (value, share) in table {
        cumulative += share;
        if draw < cumulative {
            return Some(*value);
        }
    }
    table.last().map(|(value, _)| *value)
}

fn image(version: &str) -> String {
    format!("{IMAGE_REPOSITORY}:{version}")
}

pub fn economic_node(index: usize, node_type: NodeType, profile: &EconomicProfile) -> NodeDescriptor {
    let adoption_speed = if node_type.is_exchange() {
        AdoptionSpeed::Fast
    } else {
        AdoptionSpeed::Medium
    };

    NodeDescriptor {
        name: format!("economic-{node_type}-{index}"),
        image: image(LATEST_VERSION),
        tags: node_type.tags(LATEST_VERSION, LATEST_VERSION),
        metadata: NodeMetadata {
            weight: profile.weight,
            node_type: Some(node_type),
            adoption_speed: Some(adoption_speed),
        },
        bitcoin_config: BitcoinConfig {
            maxconnections: Some(profile.max_connections),
            maxmempool: Some(profile.max_mempool),
            rpcthreads: Some(profile.rpc_threads),
            txindex: Some(u8::from(profile.txindex)),
            ..Default::default()
        },
        resources: ResourceSpec {
            requests: Resources::new(profile.cpu, profile.memory),
            limits: Resources::new(profile.cpu.scaled(2), profile.memory),
        },
        connections: Vec::new(),
    }
}

pub fn relay_node(index: usize, version: &str) -> NodeDescriptor {
    NodeDescriptor {
        name: format!("relay-node-{index}"),
        image: image(version),
        tags: NodeType::Relay.tags(version, LATEST_VERSION),
        metadata: NodeMetadata {
            weight: RELAY_WEIGHT,
            node_type: Some(NodeType::Relay),
            adoption_speed: None,
        },
        bitcoin_config: BitcoinConfig {
            maxconnections: Some(125),
            maxmempool: Some(300),
            ..Default::default()
        },
        resources: ResourceSpec {
            requests: Resources::new(CpuQuantity::from_millicores(500), MemoryQuantity::from_gib(2)),
            limits: Resources::new(CpuQuantity::from_millicores(1000), MemoryQuantity::from_gib(4)),
        },
        connections: Vec::new(),
    }
}

pub fn constrained_node(index: usize, version: &str) -> NodeDescriptor {
    NodeDescriptor {
        name: format!("constrained-node-{index}"),
        image: image(version),
        tags: NodeType::Constrained.tags(version, LATEST_VERSION),
        metadata: NodeMetadata {
            weight: CONSTRAINED_WEIGHT,
            node_type: Some(NodeType::Constrained),
            adoption_speed: None,
        },
        bitcoin_config: BitcoinConfig {
            maxconnections: Some(8),
            maxmempool: Some(50),
            ..Default::default()
        },
        resources: ResourceSpec {
            requests: Resources::new(CpuQuantity::from_millicores(125), MemoryQuantity::from_mib(512)),
            limits: Resources::new(CpuQuantity::from_millicores(250), MemoryQuantity::from_gib(1)),
        },
        connections: Vec::new(),
    }
}
