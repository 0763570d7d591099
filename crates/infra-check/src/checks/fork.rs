use super::issue::{IssueReport, IssueType};
use super::pods::list_node_pods;
use super::{Check, CheckContext};
use async_trait::async_trait;
use log::debug;
use shared::Console;

/// What one node reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTip {
    pub node: String,
    pub tip: String,
    pub height: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkReport {
    pub nodes_answered: usize,
    /// Distinct tips with the number of nodes on each, in first-seen order.
    pub tips: Vec<(String, usize)>,
    pub fork_detected: bool,
    pub height_range: Option<(u64, u64)>,
    pub height_variance: bool,
}

/// Fork and height-spread signals are independent of each other.
pub fn analyze_tips(observations: &[NodeTip]) -> ForkReport {
    let mut tips: Vec<(String, usize)> = Vec::new();
    for observation in observations {
        match tips.iter_mut().find(|(tip, _)| *tip == observation.tip) {
            Some((_, count)) => *count += 1,
            None => tips.push((observation.tip.clone(), 1)),
        }
    }

    let heights = observations.iter().filter_map(|o| o.height);
    let height_range = heights
        .clone()
        .min()
        .zip(heights.max());

    ForkReport {
        nodes_answered: observations.len(),
        fork_detected: tips.len() > 1,
        tips,
        height_range,
        height_variance: height_range.is_some_and(|(min, max)| max - min > 1),
    }
}

fn short(tip: &str) -> &str {
    tip.get(..16).unwrap_or(tip)
}

fn clean_rpc_output(stdout: &str) -> &str {
    stdout.trim().trim_matches('"')
}

pub struct ForkDetectionCheck;

impl ForkDetectionCheck {
    async fn query(ctx: &CheckContext<'_>, node: &str) -> Option<NodeTip> {
        let timeout = ctx.config.rpc_timeout();
        let tip = match ctx
            .runner
            .run("warnet", &["bitcoin", "rpc", node, "getbestblockhash"], timeout)
            .await
        {
            Ok(output) if !clean_rpc_output(&output.stdout).is_empty() => {
                clean_rpc_output(&output.stdout).to_string()
            }
            Ok(_) => return None,
            Err(e) => {
                debug!("getbestblockhash on {node} failed: {e}");
                return None;
            }
        };

        let height = match ctx
            .runner
            .run("warnet", &["bitcoin", "rpc", node, "getblockcount"], timeout)
            .await
        {
            Ok(output) => clean_rpc_output(&output.stdout).parse().ok(),
            Err(e) => {
                debug!("getblockcount on {node} failed: {e}");
                None
            }
        };

        Some(NodeTip {
            node: node.to_string(),
            tip,
            height,
        })
    }
}

#[async_trait]
impl Check for ForkDetectionCheck {
    fn name(&self) -> &'static str {
        "Fork Detection"
    }

    fn title(&self) -> &'static str {
        "Fork Detection Capability"
    }

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool {
        let nodes = list_node_pods(ctx).await;
        if nodes.is_empty() {
            Console::error("No nodes available for testing");
            Console::progress("Fork detection requires running network");
            issues.add_issue(IssueType::NoNodesAvailable, "fork detection found no node pods");
            return false;
        }
        Console::success(&format!("Found {} nodes to test", nodes.len()));

        Console::progress("Querying node chain tips...");
        let mut observations = Vec::new();
        for node in nodes.iter().take(ctx.config.max_fork_nodes) {
            match Self::query(ctx, node).await {
                Some(observation) => {
                    let height = observation
                        .height
                        .map_or_else(|| "?".to_string(), |h| h.to_string());
                    Console::plain(&format!(
                        "    {}: height={height} tip={}...",
                        observation.node,
                        short(&observation.tip)
                    ));
                    observations.push(observation);
                }
                None => issues.add_issue(
                    IssueType::NodeQueryFailed,
                    format!("{node} did not report a chain tip"),
                ),
            }
        }

        if observations.is_empty() {
            Console::error("Failed to query any nodes");
            return false;
        }

        let report = analyze_tips(&observations);
        if report.fork_detected {
            Console::error(&format!(
                "FORK DETECTED! {} different tips across {} nodes",
                report.tips.len(),
                report.nodes_answered
            ));
            for (tip, count) in &report.tips {
                Console::progress(&format!("Tip {}...: {count} nodes", short(tip)));
            }
            issues.add_issue(
                IssueType::ForkDetected,
                format!("{} distinct tips", report.tips.len()),
            );
        } else if let Some((tip, _)) = report.tips.first() {
            Console::success(&format!(
                "Network is synchronized - all {} nodes on same tip",
                report.nodes_answered
            ));
            Console::progress(&format!("Common tip: {}...", short(tip)));
        }

        if let Some((min, max)) = report.height_range {
            let diff = max - min;
            if report.height_variance {
                Console::error(&format!(
                    "Height variance detected: {min} - {max} (diff: {diff})"
                ));
                issues.add_issue(IssueType::HeightVariance, format!("{min} - {max}"));
            } else {
                Console::success(&format!("Height consensus: {min} - {max} (diff: {diff})"));
            }
        }

        Console::success("Fork detection mechanism is functional");
        true
    }
}
