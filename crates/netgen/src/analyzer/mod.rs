pub mod topology;

use serde::Serialize;
use shared::models::{NetworkDescriptor, Tier};
use std::collections::BTreeMap;
use topology::Adjacency;

pub const MOST_CONNECTED_LIMIT: usize = 10;
pub const CONSENSUS_THRESHOLDS: [f64; 2] = [0.6, 0.8];

/// `part / whole` as a percentage; `None` when `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> Option<f64> {
    (whole != 0.0).then(|| part / whole * 100.0)
}

fn average(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub total_nodes: usize,
    pub economic_nodes: usize,
    pub relay_nodes: usize,
    pub constrained_nodes: usize,
    pub economic_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceUsage {
    pub total_cpu_millicores: u64,
    pub total_memory_gi: f64,
    pub avg_cpu_per_node: u64,
    pub avg_memory_per_node_gi: f64,
    pub node_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDegree {
    pub name: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyAnalysis {
    /// Empty tiers have no entry.
    pub avg_connections_by_tier: BTreeMap<Tier, f64>,
    pub most_connected_nodes: Vec<NodeDegree>,
    pub average_degree: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicMetrics {
    pub total_network_weight: f64,
    pub economic_node_weight: f64,
    pub economic_weight_percentage: Option<f64>,
    pub economic_version_uniformity: Option<f64>,
    pub most_common_economic_version: Option<String>,
    pub economic_consensus_threshold_60pct: f64,
    pub economic_consensus_threshold_80pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAnalysis {
    pub network_summary: NetworkSummary,
    pub economic_distribution: BTreeMap<String, usize>,
    pub version_distribution: BTreeMap<String, usize>,
    pub resource_distribution: BTreeMap<String, ResourceUsage>,
    pub topology_analysis: TopologyAnalysis,
    pub economic_metrics: EconomicMetrics,
}

/// Read-only aggregation over a loaded network.
pub struct NetworkAnalyzer<'a> {
    network: &'a NetworkDescriptor,
}

impl<'a> NetworkAnalyzer<'a> {
    pub const fn new(network: &'a NetworkDescriptor) -> Self {
        Self { network }
    }

    pub fn analyze(&self) -> NetworkAnalysis {
        NetworkAnalysis {
            network_summary: self.summary(),
            economic_distribution: self.economic_distribution(),
            version_distribution: self.version_distribution(),
            resource_distribution: self.resource_distribution(),
            topology_analysis: self.topology(),
            economic_metrics: self.economic_metrics(),
        }
    }

    fn tier_count(&self, tier: Tier) -> usize {
        self.network.nodes_in_tier(tier).count()
    }

    fn summary(&self) -> NetworkSummary {
        let total_nodes = self.network.nodes.len();
        let economic_nodes = self.tier_count(Tier::Economic);
        NetworkSummary {
            total_nodes,
            economic_nodes,
            relay_nodes: self.tier_count(Tier::Relay),
            constrained_nodes: self.tier_count(Tier::Constrained),
            economic_percentage: percentage(economic_nodes as f64, total_nodes as f64),
        }
    }

    fn economic_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.network.economic_nodes() {
            *counts.entry(node.node_type_label().to_string()).or_default() += 1;
        }
        counts
    }

    fn version_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for version in self.network.nodes.iter().filter_map(|node| node.version()) {
            *counts.entry(version.to_string()).or_default() += 1;
        }
        counts
    }

    fn resource_distribution(&self) -> BTreeMap<String, ResourceUsage> {
        let mut totals: BTreeMap<String, (u64, f64, usize)> = BTreeMap::new();
        for node in &self.network.nodes {
            let requests = &node.resources.requests;
            let entry = totals
                .entry(node.node_type_label().to_string())
                .or_default();
            entry.0 = entry
                .0
                .saturating_add(requests.cpu.map_or(0, |cpu| cpu.millicores()));
            entry.1 += requests.memory.map_or(0.0, |memory| memory.as_gib());
            entry.2 += 1;
        }

        totals
            .into_iter()
            .map(|(label, (cpu, memory, count))| {
                let usage = ResourceUsage {
                    total_cpu_millicores: cpu,
                    total_memory_gi: round_to(memory, 2),
                    avg_cpu_per_node: (cpu as f64 / count as f64).round() as u64,
                    avg_memory_per_node_gi: round_to(memory / count as f64, 2),
                    node_count: count,
                };
                (label, usage)
            })
            .collect()
    }

    fn topology(&self) -> TopologyAnalysis {
        let avg_connections_by_tier = Tier::ALL
            .into_iter()
            .filter_map(|tier| {
                let (sum, count) = self
                    .network
                    .nodes_in_tier(tier)
                    .fold((0usize, 0usize), |(sum, count), node| {
                        (sum + node.connections.len(), count + 1)
                    });
                average(sum as f64, count).map(|avg| (tier, avg))
            })
            .collect();

        let adjacency = Adjacency::build(&self.network.nodes);
        let most_connected_nodes = adjacency
            .most_connected(MOST_CONNECTED_LIMIT)
            .into_iter()
            .map(|(name, degree)| NodeDegree {
                name: name.to_string(),
                degree,
            })
            .collect();

        TopologyAnalysis {
            avg_connections_by_tier,
            most_connected_nodes,
            average_degree: adjacency.average_degree(),
        }
    }

    fn economic_metrics(&self) -> EconomicMetrics {
        let total_weight = self.network.total_weight();
        let economic_weight: f64 = self.network.economic_nodes().map(|n| n.weight()).sum();
        let economic_count = self.tier_count(Tier::Economic);

        // Insertion order so the first-seen version wins a tie
        let mut versions: Vec<(&str, usize)> = Vec::new();
        for version in self.network.economic_nodes().filter_map(|n| n.version()) {
            match versions.iter_mut().find(|(seen, _)| *seen == version) {
                Some((_, count)) => *count += 1,
                None => versions.push((version, 1)),
            }
        }
        let most_common = versions
            .iter()
            .fold(None, |best: Option<(&str, usize)>, &(version, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((version, count)),
            });

        EconomicMetrics {
            total_network_weight: total_weight,
            economic_node_weight: economic_weight,
            economic_weight_percentage: percentage(economic_weight, total_weight),
            economic_version_uniformity: most_common
                .and_then(|(_, count)| percentage(count as f64, economic_count as f64)),
            most_common_economic_version: most_common.map(|(version, _)| version.to_string()),
            economic_consensus_threshold_60pct: economic_weight * CONSENSUS_THRESHOLDS[0],
            economic_consensus_threshold_80pct: economic_weight * CONSENSUS_THRESHOLDS[1],
        }
    }
}
