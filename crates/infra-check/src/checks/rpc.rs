use super::issue::{IssueReport, IssueType};
use super::pods::list_node_pods;
use super::{Check, CheckContext};
use async_trait::async_trait;
use shared::Console;

pub const RPC_SWEEP: [(&str, &str); 5] = [
    ("getblockcount", "Get block height"),
    ("getbestblockhash", "Get best block hash"),
    ("getblockchaininfo", "Get blockchain info"),
    ("getnetworkinfo", "Get network info"),
    ("getpeerinfo", "Get peer info"),
];

pub struct RpcConnectivityCheck;

#[async_trait]
impl Check for RpcConnectivityCheck {
    fn name(&self) -> &'static str {
        "RPC Connectivity"
    }

    fn title(&self) -> &'static str {
        "RPC Connectivity Test"
    }

    async fn run(&self, ctx: &CheckContext<'_>, issues: &mut IssueReport) -> bool {
        let nodes = list_node_pods(ctx).await;
        let Some(node) = nodes.first() else {
            Console::error("No nodes available for RPC testing");
            issues.add_issue(IssueType::NoNodesAvailable, "RPC sweep found no node pods");
            return false;
        };
        Console::progress(&format!("Testing RPC on node: {node}"));

        let mut passed = 0;
        for (command, description) in RPC_SWEEP {
            match ctx
                .runner
                .run(
                    "warnet",
                    &["bitcoin", "rpc", node.as_str(), command],
                    ctx.config.rpc_timeout(),
                )
                .await
            {
                Ok(_) => {
                    Console::success(&format!("{description}: {command}"));
                    passed += 1;
                }
                Err(e) => {
                    Console::error(&format!("{description}: {command} - {}", e.summary()));
                    issues.add_issue(IssueType::RpcCommandFailed, format!("{command} on {node}"));
                }
            }
        }

        Console::progress(&format!("RPC tests passed: {passed}/{}", RPC_SWEEP.len()));
        passed >= ctx.config.min_rpc_successes
    }
}
