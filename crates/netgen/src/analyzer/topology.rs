use shared::models::NodeDescriptor;
use std::collections::{BTreeSet, HashMap};

/// Undirected view of the peer graph: an edge in either direction counts
/// for both ends. Peers that name no node in the fleet are dropped.
pub struct Adjacency<'a> {
    names: Vec<&'a str>,
    neighbours: Vec<BTreeSet<usize>>,
}

impl<'a> Adjacency<'a> {
    pub fn build(nodes: &'a [NodeDescriptor]) -> Self {
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name.as_str(), i))
            .collect();

        let mut neighbours = vec![BTreeSet::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            for peer in &node.connections {
                match index.get(peer.as_str()) {
                    Some(&j) if j != i => {
                        neighbours[i].insert(j);
                        neighbours[j].insert(i);
                    }
                    Some(_) => {}
                    None => log::debug!("Dropping dangling peer {peer} of {}", node.name),
                }
            }
        }

        Self {
            names: nodes.iter().map(|node| node.name.as_str()).collect(),
            neighbours,
        }
    }

    /// Degree per node, in fleet order.
    pub fn degrees(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.names
            .iter()
            .zip(&self.neighbours)
            .map(|(name, peers)| (*name, peers.len()))
    }

    /// Mean degree over nodes with at least one edge.
    pub fn average_degree(&self) -> Option<f64> {
        let (total, connected) = self
            .neighbours
            .iter()
            .map(BTreeSet::len)
            .filter(|degree| *degree > 0)
            .fold((0usize, 0usize), |(total, connected), degree| {
                (total + degree, connected + 1)
            });
        (connected > 0).then(|| total as f64 / connected as f64)
    }

    /// Highest-degree nodes first. The sort is stable, so equal degrees keep
    /// fleet order. Isolated nodes are left out.
    pub fn most_connected(&self, limit: usize) -> Vec<(&'a str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.degrees().filter(|(_, degree)| *degree > 0).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}
