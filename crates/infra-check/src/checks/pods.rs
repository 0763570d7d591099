use super::CheckContext;
use crate::runner::CommandError;
use log::debug;

/// Data lines of a `kubectl get pods` table, header excluded.
pub fn count_table_rows(stdout: &str) -> usize {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}

pub fn count_matching_lines(stdout: &str, filter: &str) -> usize {
    stdout.lines().filter(|line| line.contains(filter)).count()
}

/// Pod names from `kubectl get pods -o name`, keeping those matching `filter`.
pub fn parse_pod_names(stdout: &str, filter: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.contains(filter))
        .map(|line| line.strip_prefix("pod/").unwrap_or(line).to_string())
        .collect()
}

/// Running pods in the configured namespace.
pub async fn running_pods_in_namespace(ctx: &CheckContext<'_>) -> Result<usize, CommandError> {
    let output = ctx
        .runner
        .run(
            "kubectl",
            &[
                "get",
                "pods",
                "-n",
                ctx.config.namespace.as_str(),
                "--field-selector=status.phase=Running",
            ],
            ctx.config.command_timeout(),
        )
        .await?;
    Ok(count_table_rows(&output.stdout))
}

/// Running node pods in the default namespace.
pub async fn running_pods_in_default(ctx: &CheckContext<'_>) -> Result<usize, CommandError> {
    let output = ctx
        .runner
        .run(
            "kubectl",
            &["get", "pods", "--field-selector=status.phase=Running"],
            ctx.config.command_timeout(),
        )
        .await?;
    Ok(count_matching_lines(&output.stdout, &ctx.config.pod_filter))
}

/// Node pods in the configured namespace, else in the default one.
pub async fn list_node_pods(ctx: &CheckContext<'_>) -> Vec<String> {
    let timeout = ctx.config.command_timeout();
    let filter = &ctx.config.pod_filter;

    let namespaced = ctx
        .runner
        .run(
            "kubectl",
            &["get", "pods", "-n", ctx.config.namespace.as_str(), "-o", "name"],
            timeout,
        )
        .await;
    match namespaced {
        Ok(output) => {
            let pods = parse_pod_names(&output.stdout, filter);
            if !pods.is_empty() {
                return pods;
            }
        }
        Err(e) => debug!("Namespaced pod listing failed: {e}"),
    }

    match ctx
        .runner
        .run("kubectl", &["get", "pods", "-o", "name"], timeout)
        .await
    {
        Ok(output) => parse_pod_names(&output.stdout, filter),
        Err(e) => {
            debug!("Default namespace pod listing failed: {e}");
            Vec::new()
        }
    }
}
