use rand::seq::IndexedRandom;
use rand::Rng;
use shared::models::{NodeDescriptor, Tier};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Economic nodes link to this many fellow economic nodes before random fill.
pub const ECONOMIC_HUB_PEERS: usize = 5;

pub const fn connection_range(tier: Tier) -> RangeInclusive<usize> {
    match tier {
        Tier::Economic => 15..=30,
        Tier::Relay => 8..=15,
        Tier::Constrained => 2..=5,
    }
}

/// Fill `chosen` up to `target` with a uniform sample of the other nodes.
fn fill_uniform<R: Rng + ?Sized>(
    all_names: &[&str],
    own_name: &str,
    chosen: &mut Vec<String>,
    target: usize,
    rng: &mut R,
) {
    let remaining = target.saturating_sub(chosen.len());
    if remaining == 0 {
        return;
    }
    let taken: HashSet<&str> = chosen.iter().map(String::as_str).collect();
    let available: Vec<&str> = all_names
        .iter()
        .copied()
        .filter(|name| *name != own_name && !taken.contains(name))
        .collect();
    chosen.extend(
        available
            .choose_multiple(rng, remaining)
            .map(|name| name.to_string()),
    );
}

/// Draw peer lists for every node. Runs once, after the whole fleet exists.
pub fn assign_connections<R: Rng + ?Sized>(nodes: &mut [NodeDescriptor], rng: &mut R) {
    let plans: Vec<Vec<String>> = {
        let all_names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
        let economic_names: Vec<&str> = nodes
            .iter()
            .filter(|node| node.is_economic())
            .map(|node| node.name.as_str())
            .collect();

        nodes
            .iter()
            .map(|node| {
                // Untyped nodes get the minimal treatment
                let tier = node.tier().unwrap_or(Tier::Constrained);
                let target = rng.random_range(connection_range(tier));
                let own_name = node.name.as_str();

                let mut chosen: Vec<String> = match tier {
                    Tier::Economic => economic_names
                        .iter()
                        .filter(|name| **name != own_name)
                        .take(ECONOMIC_HUB_PEERS)
                        .map(|name| name.to_string())
                        .collect(),
                    Tier::Relay => economic_names
                        .choose(&mut *rng)
                        .map(|name| vec![name.to_string()])
                        .unwrap_or_default(),
                    Tier::Constrained => Vec::new(),
                };

                fill_uniform(&all_names, own_name, &mut chosen, target, &mut *rng);
                chosen
            })
            .collect()
    };

    for (node, connections) in nodes.iter_mut().zip(plans) {
        node.connections = connections;
    }
}
