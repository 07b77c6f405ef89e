//! Integration tests driving the orchestrator against a stub claude binary.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ctxprobe_agents::{agents_by_name, backup_path_for, default_agents, Experiment, ExperimentConfig};
use ctxprobe_core::{Model, Settings};

const SEARCH_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Write an executable stub that records its argument list, drains stdin,
/// and exits with the given status.
fn write_stub(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
    let path = dir.join("claude-stub");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\ncat >/dev/null\nexit {}\n",
        log.display(),
        exit_code
    );
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn settings_for(stub: &Path) -> Settings {
    Settings {
        claude_path: stub.display().to_string(),
        search_path: SEARCH_PATH.to_string(),
        model: Model::Sonnet,
    }
}

fn zero_delays() -> ExperimentConfig {
    ExperimentConfig {
        agent_delay: Duration::ZERO,
        step_delay: Duration::ZERO,
    }
}

fn read_log(log: &Path) -> Vec<String> {
    match fs::read_to_string(log) {
        Ok(text) => text.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn full_run_with_a_passing_stub_reports_all_agents_ok() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 0);

    let target = dir.path().join("Test Doc.md");
    fs::write(&target, "# Test Doc\n\nOriginal content.\n").unwrap();

    let report = Experiment::run(&settings_for(&stub), &target, default_agents(), &zero_delays())
        .await
        .expect("experiment failed");

    assert_eq!(report.total(), 8);
    assert_eq!(report.passed, 8);
    assert_eq!(report.failed, 0);

    // The stub never edits the document.
    assert!(!report.changed);
    assert_eq!(report.size_delta, 0);
    assert_eq!(report.before_digest, report.after_digest);

    // Backup carries the original content at the sibling path.
    let backup = backup_path_for(&target);
    assert_eq!(backup, dir.path().join("Test Doc.backup.md"));
    assert_eq!(
        fs::read_to_string(&backup).unwrap(),
        "# Test Doc\n\nOriginal content.\n"
    );

    // Five single-call strategies plus three three-call strategies.
    assert_eq!(read_log(&log).len(), 5 + 3 * 3);
}

#[tokio::test]
async fn failing_stub_fails_every_agent_but_never_halts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 1);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let report = Experiment::run(&settings_for(&stub), &target, default_agents(), &zero_delays())
        .await
        .expect("experiment failed");

    assert_eq!(report.total(), 8);
    assert_eq!(report.passed, 0);
    assert_eq!(report.failed, 8);
    for outcome in &report.outcomes {
        let error = outcome.error.as_deref().expect("failed outcome has detail");
        assert!(error.contains("exit code 1"), "unexpected error: {error}");
    }
}

#[tokio::test]
async fn outcomes_preserve_declared_agent_order() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 0);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&[
        "continue-chain".to_string(),
        "direct-path".to_string(),
        "pipe-content".to_string(),
    ])
    .unwrap();

    let report = Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    let order: Vec<&str> = report.outcomes.iter().map(|o| o.agent.as_str()).collect();
    assert_eq!(order, ["continue-chain", "direct-path", "pipe-content"]);
}

#[tokio::test]
async fn inter_agent_delay_separates_runners() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 0);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&["direct-path".to_string(), "pipe-content".to_string()]).unwrap();
    let config = ExperimentConfig {
        agent_delay: Duration::from_millis(250),
        step_delay: Duration::ZERO,
    };

    let start = std::time::Instant::now();
    let report = Experiment::run(&settings_for(&stub), &target, agents, &config)
        .await
        .expect("experiment failed");

    // One delay between the two runners; none after the last.
    assert!(start.elapsed() >= Duration::from_millis(250));
    assert_eq!(report.passed, 2);
    assert_eq!(read_log(&log).len(), 2);
}

#[tokio::test]
async fn multi_step_agent_stops_at_its_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 1);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&["explicit-session".to_string()]).unwrap();
    let report = Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    assert_eq!(report.failed, 1);
    // The first invocation failed, so steps two and three never ran.
    assert_eq!(read_log(&log).len(), 1);
}

#[tokio::test]
async fn resume_probe_swallows_the_probe_failure_but_not_later_ones() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 1);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&["resume-probe".to_string()]).unwrap();
    let report = Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    assert_eq!(report.failed, 1);
    // Probe call plus the first real step; the continue step never ran.
    let calls = read_log(&log);
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("--resume"));
    assert!(!calls[1].contains("--resume"));
    assert!(!calls[1].contains("--continue"));
}

#[tokio::test]
async fn scratch_files_are_removed_even_when_the_agent_fails() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 1);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&[
        "instruction-file".to_string(),
        "script-context".to_string(),
        "markdown-context".to_string(),
    ])
    .unwrap();
    let report = Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    assert_eq!(report.failed, 3);
    assert!(!dir.path().join(".ctxprobe-instructions.md").exists());
    assert!(!dir.path().join(".ctxprobe-steps.sh").exists());
    assert!(!dir.path().join(".ctxprobe-context.md").exists());
}

#[tokio::test]
async fn explicit_session_reuses_one_token_across_all_three_calls() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 0);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&["explicit-session".to_string()]).unwrap();
    Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    let calls = read_log(&log);
    assert_eq!(calls.len(), 3);

    let tokens: Vec<&str> = calls
        .iter()
        .map(|line| {
            let mut words = line.split_whitespace();
            while let Some(word) = words.next() {
                if word == "--session-id" {
                    return words.next().expect("flag carries a value");
                }
            }
            panic!("call missing --session-id: {line}");
        })
        .collect();
    assert_eq!(tokens[0], tokens[1]);
    assert_eq!(tokens[1], tokens[2]);
}

#[tokio::test]
async fn continue_chain_flags_only_the_later_calls() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let stub = write_stub(dir.path(), &log, 0);

    let target = dir.path().join("doc.md");
    fs::write(&target, "body\n").unwrap();

    let agents = agents_by_name(&["continue-chain".to_string()]).unwrap();
    Experiment::run(&settings_for(&stub), &target, agents, &zero_delays())
        .await
        .expect("experiment failed");

    let calls = read_log(&log);
    assert_eq!(calls.len(), 3);
    assert!(!calls[0].contains("--continue"));
    assert!(calls[1].contains("--continue"));
    assert!(calls[2].contains("--continue"));
}
