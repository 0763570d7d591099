use crate::analyzer::NetworkAnalysis;
use shared::Console;

const LABEL_WIDTH: usize = 25;
const METRIC_WIDTH: usize = 35;

pub fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |pct| format!("{pct:.1}%"))
}

pub fn format_decimal(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

pub fn print_analysis(analysis: &NetworkAnalysis) {
    Console::section("WARNET ECONOMIC NODE NETWORK ANALYSIS");

    let summary = &analysis.network_summary;
    Console::title("NETWORK SUMMARY");
    Console::row(2, "total_nodes", LABEL_WIDTH, &summary.total_nodes.to_string());
    Console::row(2, "economic_nodes", LABEL_WIDTH, &summary.economic_nodes.to_string());
    Console::row(2, "relay_nodes", LABEL_WIDTH, &summary.relay_nodes.to_string());
    Console::row(2, "constrained_nodes", LABEL_WIDTH, &summary.constrained_nodes.to_string());
    Console::row(
        2,
        "economic_percentage",
        LABEL_WIDTH,
        &format_percentage(summary.economic_percentage),
    );

    Console::title("ECONOMIC NODE DISTRIBUTION");
    for (node_type, count) in &analysis.economic_distribution {
        Console::row(2, node_type, LABEL_WIDTH, &count.to_string());
    }

    Console::title("VERSION DISTRIBUTION");
    for (version, count) in &analysis.version_distribution {
        Console::row(2, &format!("Bitcoin Core {version}"), LABEL_WIDTH, &format!("{count} nodes"));
    }

    Console::title("RESOURCE ALLOCATION");
    for (node_type, usage) in &analysis.resource_distribution {
        Console::plain(&format!("\n  {node_type}:"));
        let rows = [
            ("total_cpu_millicores", usage.total_cpu_millicores.to_string()),
            ("total_memory_gi", format!("{:.2}", usage.total_memory_gi)),
            ("avg_cpu_per_node", usage.avg_cpu_per_node.to_string()),
            ("avg_memory_per_node_gi", format!("{:.2}", usage.avg_memory_per_node_gi)),
            ("node_count", usage.node_count.to_string()),
        ];
        for (metric, value) in rows {
            Console::row(4, metric, 30, &value);
        }
    }

    let topology = &analysis.topology_analysis;
    Console::title("TOPOLOGY ANALYSIS");
    Console::row(2, "Average degree", LABEL_WIDTH, &format_decimal(topology.average_degree));
    for (tier, avg) in &topology.avg_connections_by_tier {
        Console::row(2, &format!("Avg connections ({tier})"), LABEL_WIDTH, &format!("{avg:.2}"));
    }
    Console::plain("\n  Most connected nodes:");
    for entry in &topology.most_connected_nodes {
        Console::row(4, &entry.name, 30, &format!("{} connections", entry.degree));
    }

    let metrics = &analysis.economic_metrics;
    Console::title("ECONOMIC METRICS");
    let rows = [
        ("total_network_weight", format!("{}", metrics.total_network_weight)),
        ("economic_node_weight", format!("{}", metrics.economic_node_weight)),
        (
            "economic_weight_percentage",
            format_percentage(metrics.economic_weight_percentage),
        ),
        (
            "economic_version_uniformity",
            format_percentage(metrics.economic_version_uniformity),
        ),
        (
            "most_common_economic_version",
            metrics
                .most_common_economic_version
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        ),
        (
            "economic_consensus_threshold_60pct",
            format!("{:.2}", metrics.economic_consensus_threshold_60pct),
        ),
        (
            "economic_consensus_threshold_80pct",
            format!("{:.2}", metrics.economic_consensus_threshold_80pct),
        ),
    ];
    for (metric, value) in rows {
        Console::row(2, metric, METRIC_WIDTH, &value);
    }
    Console::plain("");
}
