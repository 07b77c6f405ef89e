//! Experiment report artifacts.
//!
//! One machine-readable report per run (serializable to JSON) plus a
//! human-readable Markdown rendering for terminal output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ctxprobe_core::DocSnapshot;

use crate::runner::AgentOutcome;

/// Aggregated result of one experiment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub target: PathBuf,
    pub backup: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<AgentOutcome>,
    pub passed: usize,
    pub failed: usize,
    pub before_len: usize,
    pub after_len: usize,
    pub size_delta: i64,
    pub changed: bool,
    pub before_digest: String,
    pub after_digest: String,
}

impl ExperimentReport {
    /// Assemble the report from per-agent outcomes and the two snapshots.
    pub fn new(
        target: &Path,
        backup: &Path,
        started_at: DateTime<Utc>,
        outcomes: Vec<AgentOutcome>,
        before: &DocSnapshot,
        after: &DocSnapshot,
    ) -> Self {
        let passed = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.len() - passed;
        Self {
            target: target.to_path_buf(),
            backup: backup.to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            outcomes,
            passed,
            failed,
            before_len: before.len(),
            after_len: after.len(),
            size_delta: before.size_delta(after),
            changed: before.changed(after),
            before_digest: before.digest(),
            after_digest: after.digest(),
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Render the report as a Markdown string.
    pub fn render_markdown(&self) -> String {
        let mut md = format!("# Experiment Summary: {}\n", self.target.display());

        md.push_str("\n## Agents\n\n");
        for outcome in &self.outcomes {
            if outcome.success {
                md.push_str(&format!(
                    "- `{}`: ok ({} ms)\n",
                    outcome.agent, outcome.duration_ms
                ));
            } else {
                let detail = outcome.error.as_deref().unwrap_or("unknown error");
                md.push_str(&format!(
                    "- `{}`: FAILED ({} ms): {}\n",
                    outcome.agent,
                    outcome.duration_ms,
                    excerpt(detail)
                ));
            }
        }
        md.push_str(&format!(
            "\n{}/{} agents succeeded.\n",
            self.passed,
            self.total()
        ));

        md.push_str("\n## Document\n\n");
        md.push_str(&format!(
            "- before: {} bytes (sha256 {})\n",
            self.before_len,
            short_digest(&self.before_digest)
        ));
        md.push_str(&format!(
            "- after: {} bytes (sha256 {})\n",
            self.after_len,
            short_digest(&self.after_digest)
        ));
        if self.changed {
            md.push_str(&format!(
                "- changed: yes ({:+} bytes)\n",
                self.size_delta
            ));
        } else {
            md.push_str("- changed: no\n");
        }
        md.push_str(&format!("- backup: {}\n", self.backup.display()));

        md
    }
}

/// First line of an error, clipped for the summary listing.
fn excerpt(detail: &str) -> String {
    let line = detail.lines().next().unwrap_or(detail);
    if line.chars().count() > 120 {
        let head: String = line.chars().take(120).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(agent: &str, success: bool) -> AgentOutcome {
        AgentOutcome {
            agent: agent.to_string(),
            success,
            error: if success {
                None
            } else {
                Some("exit code 1: boom".to_string())
            },
            duration_ms: 42,
        }
    }

    fn report(outcomes: Vec<AgentOutcome>) -> ExperimentReport {
        let before = DocSnapshot::from_bytes(b"Hello".to_vec());
        let after = DocSnapshot::from_bytes(b"Hello\n## New".to_vec());
        ExperimentReport::new(
            Path::new("/docs/Test Doc.md"),
            Path::new("/docs/Test Doc.backup.md"),
            Utc::now(),
            outcomes,
            &before,
            &after,
        )
    }

    #[test]
    fn counts_follow_the_outcomes() {
        let report = report(vec![
            outcome("direct-path", true),
            outcome("pipe-content", false),
            outcome("continue-chain", true),
        ]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn change_detection_carries_the_byte_delta() {
        let report = report(vec![outcome("direct-path", true)]);
        assert!(report.changed);
        assert_eq!(report.size_delta, 7);
        assert_eq!(report.before_len, 5);
        assert_eq!(report.after_len, 12);
    }

    #[test]
    fn markdown_lists_failures_with_detail() {
        let md = report(vec![
            outcome("direct-path", true),
            outcome("pipe-content", false),
        ])
        .render_markdown();
        assert!(md.contains("`direct-path`: ok"));
        assert!(md.contains("`pipe-content`: FAILED"));
        assert!(md.contains("exit code 1: boom"));
        assert!(md.contains("1/2 agents succeeded."));
        assert!(md.contains("changed: yes (+7 bytes)"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = report(vec![outcome("direct-path", true)]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"passed\":1"));
        assert!(json.contains("direct-path"));
    }
}
