use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
    #[error("`{command}` exited with status {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandError {
    /// Short reason for console lines.
    pub fn summary(&self) -> String {
        match self {
            Self::Spawn { source, .. } => source.to_string(),
            Self::Timeout { timeout, .. } => format!("timed out after {}s", timeout.as_secs()),
            Self::Failed { stderr, code, .. } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    format!("exit status {code:?}")
                } else {
                    stderr.chars().take(100).collect()
                }
            }
        }
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs an external program to completion. A non-zero exit is an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError>;
}

pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let command = display_command(program, args);
        let started = Instant::now();

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the child
        let output = match tokio::time::timeout(timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(CommandError::Spawn { command, source }),
            Err(_) => return Err(CommandError::Timeout { command, timeout }),
        };
        debug!(
            "`{command}` finished with {} in {:?}",
            output.status,
            started.elapsed()
        );

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(CommandError::Failed {
                command,
                code: output.status.code(),
                stderr,
            });
        }
        Ok(CommandOutput { stdout, stderr })
    }
}

/// Canned responses keyed by the full command line. Unscripted commands
/// fail as if the program exited with status 1.
#[derive(Default)]
pub struct ScriptedCommandRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    pub fn fail(mut self, command: &str, stderr: &str) -> Self {
        self.responses
            .insert(command.to_string(), Err(stderr.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for ScriptedCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let command = display_command(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        match self.responses.get(&command) {
            Some(Ok(stdout)) => Ok(CommandOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(Err(stderr)) => Err(CommandError::Failed {
                command,
                code: Some(1),
                stderr: stderr.clone(),
            }),
            None => Err(CommandError::Failed {
                command,
                code: Some(1),
                stderr: String::from("not scripted"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_runner_captures_stdout() {
        let output = SystemCommandRunner
            .run("echo", &["hello"], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_system_runner_non_zero_exit() {
        let err = SystemCommandRunner
            .run("false", &[], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_system_runner_timeout() {
        let started = Instant::now();
        let err = SystemCommandRunner
            .run("sleep", &["5"], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let err = SystemCommandRunner
            .run("definitely-not-a-real-binary-4821", &[], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_scripted_runner() {
        let runner = ScriptedCommandRunner::new()
            .succeed("warnet --version", "warnet 1.1.0\n")
            .fail("which warnet", "");

        let output = runner
            .run("warnet", &["--version"], Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(output.stdout, "warnet 1.1.0\n");
        assert!(runner.run("which", &["warnet"], Duration::from_secs(1)).await.is_err());
        assert!(runner.run("kubectl", &[], Duration::from_secs(1)).await.is_err());
        assert_eq!(
            runner.calls(),
            vec!["warnet --version", "which warnet", "kubectl"]
        );
    }

    #[test]
    fn test_error_summary_truncates_stderr() {
        let err = CommandError::Failed {
            command: "warnet".to_string(),
            code: Some(2),
            stderr: "x".repeat(300),
        };
        assert_eq!(err.summary().len(), 100);

        let err = CommandError::Failed {
            command: "warnet".to_string(),
            code: Some(2),
            stderr: String::new(),
        };
        assert_eq!(err.summary(), "exit status Some(2)");
    }
}
