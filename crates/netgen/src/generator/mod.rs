pub mod templates;
pub mod topology;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use shared::models::{NetworkDescriptor, NodeType};
use templates::{
    constrained_node, economic_node, pick_weighted, relay_node, EconomicProfile,
    CONSTRAINED_VERSIONS, ECONOMIC_TYPE_DISTRIBUTION, LATEST_VERSION, RELAY_VERSION_DISTRIBUTION,
};

pub const DEFAULT_ECONOMIC_PCT: f64 = 0.15;
pub const RELAY_PCT: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCounts {
    pub economic: usize,
    pub relay: usize,
    pub constrained: usize,
}

impl TierCounts {
    /// Economic and relay shares are floored; constrained takes the rest.
    /// Relay is capped by what economic leaves over so the counts always
    /// sum to `total`.
    pub fn split(total: usize, economic_pct: f64) -> Self {
        let share = |pct: f64| ((total as f64) * pct).floor().max(0.0) as usize;
        let economic = share(economic_pct).min(total);
        let relay = share(RELAY_PCT).min(total - economic);
        Self {
            economic,
            relay,
            constrained: total - economic - relay,
        }
    }

    pub const fn total(&self) -> usize {
        self.economic + self.relay + self.constrained
    }
}

pub struct NetworkGenerator {
    total_nodes: usize,
    counts: TierCounts,
    rng: StdRng,
}

impl NetworkGenerator {
    /// Unseeded: every run yields a different topology.
    pub fn new(total_nodes: usize, economic_pct: f64) -> Self {
        Self::with_rng(total_nodes, economic_pct, StdRng::from_os_rng())
    }

    pub fn with_seed(total_nodes: usize, economic_pct: f64, seed: u64) -> Self {
        Self::with_rng(total_nodes, economic_pct, StdRng::seed_from_u64(seed))
    }

    fn with_rng(total_nodes: usize, economic_pct: f64, rng: StdRng) -> Self {
        Self {
            total_nodes,
            counts: TierCounts::split(total_nodes, economic_pct),
            rng,
        }
    }

    pub const fn counts(&self) -> TierCounts {
        self.counts
    }

    pub fn generate(&mut self) -> NetworkDescriptor {
        info!(
            "Generating {} nodes: {} economic, {} relay, {} constrained",
            self.total_nodes, self.counts.economic, self.counts.relay, self.counts.constrained
        );

        let mut nodes = Vec::with_capacity(self.total_nodes);

        for index in 0..self.counts.economic {
            let node_type = pick_weighted(&ECONOMIC_TYPE_DISTRIBUTION, self.rng.random())
                .unwrap_or(NodeType::Custody);
            if let Some(profile) = EconomicProfile::for_type(node_type) {
                nodes.push(economic_node(index, node_type, &profile));
            }
        }

        for index in 0..self.counts.relay {
            let version = pick_weighted(&RELAY_VERSION_DISTRIBUTION, self.rng.random())
                .unwrap_or(LATEST_VERSION);
            nodes.push(relay_node(index, version));
        }

        for index in 0..self.counts.constrained {
            let version = CONSTRAINED_VERSIONS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(LATEST_VERSION);
            nodes.push(constrained_node(index, version));
        }

        topology::assign_connections(&mut nodes, &mut self.rng);
        debug!(
            "Assigned {} directed connections",
            nodes.iter().map(|n| n.connections.len()).sum::<usize>()
        );

        NetworkDescriptor {
            name: format!("economic-network-{}", self.total_nodes),
            description: format!("Network with {} Economic Nodes", self.counts.economic),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Tier;
    use std::collections::HashSet;
    use topology::connection_range;

    #[test]
    fn test_tier_counts_default_split() {
        let counts = TierCounts::split(30, DEFAULT_ECONOMIC_PCT);
        assert_eq!(
            counts,
            TierCounts {
                economic: 4,
                relay: 19,
                constrained: 7
            }
        );

        let counts = TierCounts::split(100, DEFAULT_ECONOMIC_PCT);
        assert_eq!((counts.economic, counts.relay, counts.constrained), (15, 65, 20));
    }

    #[test]
    fn test_tier_counts_always_sum_to_total() {
        for total in 10..=250 {
            for step in 0..=20 {
                let pct = step as f64 / 20.0;
                let counts = TierCounts::split(total, pct);
                assert_eq!(counts.total(), total, "total={total} pct={pct}");
            }
        }
    }

    #[test]
    fn test_generated_network_shape() {
        let mut generator = NetworkGenerator::with_seed(60, 0.2, 42);
        let counts = generator.counts();
        let network = generator.generate();

        assert_eq!(network.name, "economic-network-60");
        assert_eq!(network.description, "Network with 12 Economic Nodes");
        assert_eq!(network.nodes.len(), 60);
        assert_eq!(network.nodes_in_tier(Tier::Economic).count(), counts.economic);
        assert_eq!(network.nodes_in_tier(Tier::Relay).count(), counts.relay);
        assert_eq!(
            network.nodes_in_tier(Tier::Constrained).count(),
            counts.constrained
        );
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_connections_respect_bounds() {
        for (total, seed) in [(10, 1), (30, 2), (75, 3), (200, 4)] {
            let network = NetworkGenerator::with_seed(total, DEFAULT_ECONOMIC_PCT, seed).generate();
            let eligible = network.nodes.len() - 1;

            for node in &network.nodes {
                let unique: HashSet<&String> = node.connections.iter().collect();
                assert_eq!(unique.len(), node.connections.len(), "duplicate peer on {}", node.name);
                assert!(!node.connections.contains(&node.name), "self-loop on {}", node.name);

                let range = connection_range(node.tier().unwrap());
                assert!(node.connections.len() <= *range.end());
                assert!(node.connections.len() >= (*range.start()).min(eligible));
            }
        }
    }

    #[test]
    fn test_seed_reproduces_network() {
        let first = NetworkGenerator::with_seed(40, DEFAULT_ECONOMIC_PCT, 99).generate();
        let second = NetworkGenerator::with_seed(40, DEFAULT_ECONOMIC_PCT, 99).generate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_versions_come_from_tier_tables() {
        let network = NetworkGenerator::with_seed(120, DEFAULT_ECONOMIC_PCT, 8).generate();
        let relay_versions: Vec<&str> = RELAY_VERSION_DISTRIBUTION.iter().map(|(v, _)| *v).collect();

        for node in &network.nodes {
            let version = node.version().unwrap();
            match node.tier().unwrap() {
                Tier::Economic => assert_eq!(version, LATEST_VERSION),
                Tier::Relay => assert!(relay_versions.contains(&version)),
                Tier::Constrained => assert!(CONSTRAINED_VERSIONS.contains(&version)),
            }
        }
    }

    #[test]
    fn test_zero_economic_share() {
        let network = NetworkGenerator::with_seed(20, 0.0, 5).generate();
        assert_eq!(network.economic_nodes().count(), 0);
        assert_eq!(network.nodes.len(), 20);
    }
}
