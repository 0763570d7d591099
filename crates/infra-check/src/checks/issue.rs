use shared::Console;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    WarnetNotInstalled,     // warnet CLI missing from PATH
    KubernetesUnavailable,  // kubectl failed or timed out
    NoRunningPods,          // nothing deployed
    EconomicConfigMissing,  // network YAML not found
    EconomicConfigInvalid,  // unreadable or inconsistent network YAML
    NoNodesAvailable,       // no tank pods to query
    NodeQueryFailed,        // a single node did not answer
    ForkDetected,           // more than one chain tip
    HeightVariance,         // heights spread by more than one block
    MonitoringToolMissing,  // optional tooling absent
    OutputNotWritable,      // result directory or file failed
    RpcCommandFailed,       // one RPC call in the sweep failed
}

impl IssueType {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::NodeQueryFailed
            | Self::ForkDetected
            | Self::HeightVariance
            | Self::MonitoringToolMissing
            | Self::RpcCommandFailed => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Issue {
    issue_type: IssueType,
    message: String,
}

impl Issue {
    pub fn new(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            message: message.into(),
        }
    }

    pub const fn severity(&self) -> Severity {
        self.issue_type.severity()
    }

    pub fn print(&self) {
        match self.severity() {
            Severity::Error => Console::error(&format!("{self}")),
            Severity::Warning => Console::warning(&format!("{self}")),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.issue_type, self.message)
    }
}

/// Problems collected across all checks, printed once at the end.
#[derive(Debug, Default, Clone)]
pub struct IssueReport {
    issues: Vec<Issue>,
}

impl IssueReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue_type: IssueType, message: impl Into<String>) {
        let issue = Issue::new(issue_type, message);
        log::debug!("Recorded issue {issue}");
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn contains(&self, issue_type: IssueType) -> bool {
        self.issues.iter().any(|issue| issue.issue_type == issue_type)
    }

    pub fn print_issues(&self) {
        if self.issues.is_empty() {
            Console::success("No issues found");
            return;
        }

        Console::section("VALIDATION ISSUES");

        for issue in self.issues.iter().filter(|i| i.severity() == Severity::Error) {
            issue.print();
        }

        for issue in self.issues.iter().filter(|i| i.severity() == Severity::Warning) {
            issue.print();
        }
    }
}
