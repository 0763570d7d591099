use crate::checks::CheckResult;
use shared::Console;

pub struct ValidationSummary<'a> {
    results: &'a [CheckResult],
}

impl<'a> ValidationSummary<'a> {
    pub const fn new(results: &'a [CheckResult]) -> Self {
        Self { results }
    }

    pub const fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn success_rate(&self) -> Option<f64> {
        (self.total() > 0).then(|| self.passed() as f64 / self.total() as f64 * 100.0)
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Prints the totals and per-check lines; returns the verdict.
    pub fn print(&self) -> bool {
        Console::section("VALIDATION SUMMARY");

        Console::info("Total Tests", &self.total().to_string());
        Console::info("Passed", &self.passed().to_string());
        Console::info("Failed", &self.failed().to_string());
        let rate = self
            .success_rate()
            .map_or_else(|| "N/A".to_string(), |rate| format!("{rate:.1}%"));
        Console::info("Success Rate", &rate);
        Console::plain("");

        for result in self.results {
            Console::pass_fail(result.passed, result.name);
        }
        Console::plain("");

        if self.all_passed() {
            Console::success("ALL VALIDATION TESTS PASSED!");
            Console::progress("Infrastructure is ready");
        } else {
            Console::error(&format!("{} tests failed", self.failed()));
            Console::progress("Please address failures before proceeding");
        }
        self.all_passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_rate() {
        let results = [
            CheckResult { name: "Warnet Installation", passed: true },
            CheckResult { name: "Network Running", passed: true },
            CheckResult { name: "Economic Weight Access", passed: false },
            CheckResult { name: "Fork Detection", passed: true },
            CheckResult { name: "Data Logging", passed: true },
            CheckResult { name: "RPC Connectivity", passed: true },
        ];
        let summary = ValidationSummary::new(&results);

        assert_eq!(summary.total(), 6);
        assert_eq!(summary.passed(), 5);
        assert_eq!(summary.failed(), 1);
        assert_eq!(format!("{:.1}", summary.success_rate().unwrap()), "83.3");
        assert!(!summary.all_passed());
        assert!(!summary.print());
    }

    #[test]
    fn test_all_passed() {
        let results = [CheckResult { name: "Data Logging", passed: true }];
        let summary = ValidationSummary::new(&results);
        assert!(summary.all_passed());
        assert_eq!(summary.success_rate(), Some(100.0));
    }

    #[test]
    fn test_empty_run() {
        let summary = ValidationSummary::new(&[]);
        assert_eq!(summary.success_rate(), None);
        assert!(summary.all_passed());
    }
}
