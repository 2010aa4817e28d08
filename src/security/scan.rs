//! Security scanner result handling.
//!
//! Reads Bandit and Semgrep JSON reports from a CI results directory and
//! normalises them into [`Finding`]s.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

pub const BANDIT_RESULTS: &str = "python-security-results/bandit-results.json";
pub const SEMGREP_PYTHON_RESULTS: &str = "python-security-results/semgrep-python-results.json";
pub const SEMGREP_TYPESCRIPT_RESULTS: &str =
    "typescript-security-results/semgrep-typescript-results.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BanditReport {
    results: Vec<BanditResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BanditResult {
    issue_severity: String,
    test_id: String,
    filename: String,
    line_number: Option<u64>,
    issue_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SemgrepReport {
    results: Vec<SemgrepResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SemgrepResult {
    check_id: String,
    path: String,
    start: SemgrepPosition,
    extra: SemgrepExtra,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SemgrepPosition {
    line: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SemgrepExtra {
    severity: String,
    message: String,
}

/// Scanner that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Bandit,
    Semgrep,
}

/// One normalised scanner finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub tool: Tool,
    pub severity: String,
    pub rule: String,
    pub file: String,
    pub line: Option<u64>,
    pub message: String,
}

impl Finding {
    /// Whether the finding must block a merge.
    pub fn is_critical(&self) -> bool {
        let severity = self.severity.to_uppercase();
        match self.tool {
            Tool::Bandit => matches!(severity.as_str(), "HIGH" | "CRITICAL"),
            Tool::Semgrep => matches!(severity.as_str(), "ERROR" | "HIGH" | "CRITICAL"),
        }
    }
}

impl From<BanditResult> for Finding {
    fn from(result: BanditResult) -> Self {
        Self {
            tool: Tool::Bandit,
            severity: result.issue_severity,
            rule: result.test_id,
            file: result.filename,
            line: result.line_number,
            message: result.issue_text,
        }
    }
}

impl From<SemgrepResult> for Finding {
    fn from(result: SemgrepResult) -> Self {
        // check ids are dotted paths; the last segment is the rule name
        let rule = result.check_id.rsplit('.').next().unwrap_or_default().to_string();
        Self {
            tool: Tool::Semgrep,
            severity: result.extra.severity.to_uppercase(),
            rule,
            file: result.path,
            line: result.start.line,
            message: result.extra.message,
        }
    }
}

/// Missing or malformed reports read as empty.
fn load_report<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No results at {}: {e}", path.display());
            return T::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("Ignoring malformed results in {}: {e}", path.display());
        T::default()
    })
}

/// Findings from one CI security run.
#[derive(Debug, Clone, Default)]
pub struct ScanResults {
    pub bandit: Vec<Finding>,
    pub semgrep_python: Vec<Finding>,
    pub semgrep_typescript: Vec<Finding>,
}

impl ScanResults {
    /// Loads the three known report files under `results_dir`.
    pub fn load<P: AsRef<Path>>(results_dir: P) -> Self {
        let dir = results_dir.as_ref();
        let bandit: BanditReport = load_report(&dir.join(BANDIT_RESULTS));
        let semgrep_python: SemgrepReport = load_report(&dir.join(SEMGREP_PYTHON_RESULTS));
        let semgrep_typescript: SemgrepReport = load_report(&dir.join(SEMGREP_TYPESCRIPT_RESULTS));

        Self {
            bandit: bandit.results.into_iter().map(Finding::from).collect(),
            semgrep_python: semgrep_python.results.into_iter().map(Finding::from).collect(),
            semgrep_typescript: semgrep_typescript.results.into_iter().map(Finding::from).collect(),
        }
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.bandit
            .iter()
            .chain(&self.semgrep_python)
            .chain(&self.semgrep_typescript)
    }

    pub fn total(&self) -> usize {
        self.findings().count()
    }

    pub fn critical_count(&self) -> usize {
        self.findings().filter(|finding| finding.is_critical()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semgrep_rule_uses_last_segment() {
        let result: SemgrepResult = serde_json::from_str(
            r#"{"check_id": "rules.python.sql-injection", "extra": {"severity": "error"}}"#,
        )
        .unwrap();
        let finding = Finding::from(result);
        assert_eq!(finding.rule, "sql-injection");
        assert_eq!(finding.severity, "ERROR");
        assert!(finding.is_critical());
    }

    #[test]
    fn test_bandit_medium_is_not_critical() {
        let finding = Finding::from(BanditResult {
            issue_severity: "MEDIUM".to_string(),
            ..BanditResult::default()
        });
        assert!(!finding.is_critical());
    }
}
