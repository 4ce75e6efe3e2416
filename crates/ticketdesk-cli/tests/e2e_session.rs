//! E2E tests for the `td` binary.
//!
//! Each test runs `td` as a subprocess in an isolated temp directory, so the
//! built-in seed list is used unless the test writes a project config.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn td_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("td"));
    cmd.current_dir(dir);
    cmd.env("TICKETDESK_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = td_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("td should not crash");
    assert!(
        output.status.success(),
        "td {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn ids(tickets: &Value) -> Vec<u64> {
    tickets
        .as_array()
        .expect("ticket array")
        .iter()
        .map(|t| t["id"].as_u64().expect("numeric id"))
        .collect()
}

/// Run a session script and parse every stdout line as one JSON event.
fn session_events(dir: &Path, script: &str) -> (bool, Vec<Value>, String) {
    let output = td_cmd(dir)
        .args(["session", "--json"])
        .write_stdin(script)
        .output()
        .expect("td session should not crash");
    let events = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("event line is JSON"))
        .collect();
    (
        output.status.success(),
        events,
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

#[test]
fn list_returns_full_seed() {
    let dir = TempDir::new().expect("temp dir");
    let tickets = run_json(dir.path(), &["list"]);
    assert_eq!(ids(&tickets), (1..=15).collect::<Vec<_>>());
    assert_eq!(tickets[5]["status"], "In Progress");
    assert_eq!(tickets[0]["dateCreated"], "2025-01-15");
}

#[test]
fn list_filters_by_status() {
    let dir = TempDir::new().expect("temp dir");
    let tickets = run_json(dir.path(), &["list", "--status", "Closed"]);
    assert_eq!(ids(&tickets), vec![11, 12, 13, 14, 15]);
}

#[test]
fn list_rejects_unknown_status() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["list", "--status", "Pending"])
        .assert()
        .failure();
}

#[test]
fn list_text_mode_prints_header() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["list", "--format", "text", "--status", "Open"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ID\tSTATUS\tPRIORITY\tASSIGNEE\tCREATED\tTITLE\n",
        ));
}

#[test]
fn show_existing_ticket() {
    let dir = TempDir::new().expect("temp dir");
    let ticket = run_json(dir.path(), &["show", "7"]);
    assert_eq!(ticket["id"], 7);
    assert_eq!(ticket["assignedTo"], "Charlie");
}

#[test]
fn show_missing_ticket_fails_with_code() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["show", "99", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn summary_counts_seed() {
    let dir = TempDir::new().expect("temp dir");
    let summary = run_json(dir.path(), &["summary"]);
    assert_eq!(summary["total"], 15);
    assert_eq!(summary["open"], 5);
    assert_eq!(summary["inProgress"], 5);
    assert_eq!(summary["closed"], 5);
}

#[test]
fn route_redirects_when_logged_out() {
    let dir = TempDir::new().expect("temp dir");
    let decision = run_json(dir.path(), &["route", "/tickets"]);
    assert_eq!(decision["decision"], "redirected");
    assert_eq!(decision["from"], "/tickets");
    assert_eq!(decision["to"], "/auth/login");
}

#[test]
fn route_allows_when_authenticated() {
    let dir = TempDir::new().expect("temp dir");
    let decision = run_json(dir.path(), &["route", "/tickets/3", "--authenticated"]);
    assert_eq!(decision["decision"], "allowed");
    assert_eq!(decision["to"], "/tickets/3");
}

#[test]
fn route_public_pages_allowed_when_logged_out() {
    let dir = TempDir::new().expect("temp dir");
    for path in ["/", "/auth/login", "/auth/signup"] {
        let decision = run_json(dir.path(), &["route", path]);
        assert_eq!(decision["decision"], "allowed", "path {path}");
    }
}

#[test]
fn route_unknown_path_fails() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["route", "/settings", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"));
}

#[test]
fn completions_generate_script() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("td"));
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[test]
fn session_delete_under_closed_filter() {
    let dir = TempDir::new().expect("temp dir");
    let script = "login\nfilter Closed\ndelete 13\nlist\nfilter All\nlist\n";
    let (ok, events, stderr) = session_events(dir.path(), script);
    assert!(ok, "session failed: {stderr}");

    let lists: Vec<&Value> = events.iter().filter(|e| e["event"] == "tickets").collect();
    assert_eq!(lists.len(), 2);
    assert_eq!(ids(&lists[0]["tickets"]), vec![11, 12, 14, 15]);
    assert_eq!(lists[1]["tickets"].as_array().map(Vec::len), Some(14));

    let deleted = events
        .iter()
        .find(|e| e["event"] == "deleted")
        .expect("deleted event");
    assert_eq!(deleted["id"], 13);
    assert_eq!(deleted["removed"], true);
}

#[test]
fn session_requires_login_for_ticket_commands() {
    let dir = TempDir::new().expect("temp dir");
    let (ok, events, stderr) = session_events(dir.path(), "list\nlogin\nlist\n");
    assert!(ok, "session failed: {stderr}");

    assert_eq!(events[0]["event"], "navigation");
    assert_eq!(events[0]["decision"], "redirected");
    assert_eq!(events[0]["to"], "/auth/login");
    assert_eq!(events[1]["event"], "auth");
    assert_eq!(events[2]["event"], "tickets");
}

#[test]
fn session_logout_locks_tickets_again() {
    let dir = TempDir::new().expect("temp dir");
    let (ok, events, _) = session_events(dir.path(), "login\nlogout\nnav /dashboard\n");
    assert!(ok);
    let last = events.last().expect("events");
    assert_eq!(last["decision"], "redirected");
    assert_eq!(last["from"], "/dashboard");
}

#[test]
fn session_save_and_create() {
    let dir = TempDir::new().expect("temp dir");
    let script = "login\n\
                  save 2 --status Closed --assignee 'Dana Q'\n\
                  save 42 --title ghost\n\
                  create --title \"New ticket\" --priority High\n\
                  show 16\n";
    let (ok, events, stderr) = session_events(dir.path(), script);
    assert!(ok, "session failed: {stderr}");

    let saved: Vec<&Value> = events.iter().filter(|e| e["event"] == "saved").collect();
    assert_eq!(saved[0]["outcome"], "replaced");
    assert_eq!(saved[1]["outcome"], "ignored");

    let created = events
        .iter()
        .find(|e| e["event"] == "created")
        .expect("created event");
    assert_eq!(created["ticket"]["id"], 16);
    assert_eq!(created["ticket"]["priority"], "High");
    assert_eq!(created["ticket"]["assignedTo"], "Unassigned");

    let shown = events.last().expect("events");
    assert_eq!(shown["event"], "ticket");
    assert_eq!(shown["ticket"]["title"], "New ticket");
}

#[test]
fn session_bad_line_reports_and_fails() {
    let dir = TempDir::new().expect("temp dir");
    let (ok, events, stderr) =
        session_events(dir.path(), "login\nfrobnicate\nfilter Pending\nsummary\n");
    assert!(!ok);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
    // Later lines still run.
    assert_eq!(events.last().expect("events")["event"], "summary");
}

#[test]
fn session_quit_stops_reading() {
    let dir = TempDir::new().expect("temp dir");
    let (ok, events, _) = session_events(dir.path(), "login\nquit\nlist\n");
    assert!(ok);
    assert!(events.iter().all(|e| e["event"] != "tickets"));
}

#[test]
fn session_script_file() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("demo.td"), "# demo\nlogin\nsummary\n").expect("write script");
    let output = td_cmd(dir.path())
        .args(["session", "--script", "demo.td", "--json"])
        .output()
        .expect("td session should not crash");
    assert!(output.status.success());
    let last: Value = serde_json::from_str(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .last()
            .expect("output line"),
    )
    .expect("json");
    assert_eq!(last["summary"]["total"], 15);
}

#[test]
fn session_missing_script_fails() {
    let dir = TempDir::new().expect("temp dir");
    td_cmd(dir.path())
        .args(["session", "--script", "nope.td"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open script"));
}

#[test]
fn sessions_do_not_share_state() {
    let dir = TempDir::new().expect("temp dir");
    let (ok, _, _) = session_events(dir.path(), "login\ndelete 1\n");
    assert!(ok);
    let tickets = run_json(dir.path(), &["list"]);
    assert_eq!(ids(&tickets).len(), 15);
}

// ---------------------------------------------------------------------------
// Project config
// ---------------------------------------------------------------------------

#[test]
fn project_config_default_filter_applies() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir_all(dir.path().join(".ticketdesk")).expect("mkdir");
    std::fs::write(
        dir.path().join(".ticketdesk/config.toml"),
        "[store]\ndefault_filter = \"In Progress\"\n",
    )
    .expect("write config");

    let tickets = run_json(dir.path(), &["list"]);
    assert_eq!(ids(&tickets), vec![6, 7, 8, 9, 10]);
}

#[test]
fn project_config_seed_file_replaces_builtin_list() {
    let dir = TempDir::new().expect("temp dir");
    let full = run_json(dir.path(), &["list"]);
    let subset: Vec<Value> = full
        .as_array()
        .expect("array")
        .iter()
        .filter(|t| t["priority"] == "High")
        .cloned()
        .collect();
    std::fs::write(
        dir.path().join("seed.json"),
        serde_json::to_string(&subset).expect("serialize"),
    )
    .expect("write seed");
    std::fs::create_dir_all(dir.path().join(".ticketdesk")).expect("mkdir");
    std::fs::write(
        dir.path().join(".ticketdesk/config.toml"),
        "[store]\nseed = \"seed.json\"\n",
    )
    .expect("write config");

    let summary = run_json(dir.path(), &["summary"]);
    assert_eq!(summary["total"], subset.len());
}

/// Parse the JSON error envelope written to stderr.
fn stderr_error(stderr: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stderr);
    let line = text
        .lines()
        .find(|line| line.starts_with('{'))
        .unwrap_or_else(|| panic!("no JSON error on stderr: {text}"));
    serde_json::from_str::<Value>(line).expect("error line is JSON")["error"].clone()
}

fn write_project_config(dir: &Path, body: &str) {
    std::fs::create_dir_all(dir.join(".ticketdesk")).expect("mkdir");
    std::fs::write(dir.join(".ticketdesk/config.toml"), body).expect("write config");
}

#[test]
fn malformed_project_config_reports_config_code() {
    let dir = TempDir::new().expect("temp dir");
    write_project_config(dir.path(), "[store\n");
    let output = td_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("td should not crash");
    assert!(!output.status.success());
    let error = stderr_error(&output.stderr);
    assert_eq!(error["error_code"], "E1001");
    assert!(
        error["message"]
            .as_str()
            .is_some_and(|m| m.contains("config.toml"))
    );
}

#[test]
fn unreadable_seed_file_reports_seed_code() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("seed.json"), "{not a list").expect("write seed");
    write_project_config(dir.path(), "[store]\nseed = \"seed.json\"\n");
    let cases: [&[&str]; 3] = [
        &["list", "--json"],
        &["summary", "--json"],
        &["show", "1", "--json"],
    ];
    for args in cases {
        let output = td_cmd(dir.path())
            .args(args)
            .output()
            .expect("td should not crash");
        assert!(!output.status.success(), "td {args:?} should fail");
        assert_eq!(stderr_error(&output.stderr)["error_code"], "E1002", "td {args:?}");
    }
}

#[test]
fn missing_seed_file_reports_seed_code_in_session() {
    let dir = TempDir::new().expect("temp dir");
    write_project_config(dir.path(), "[store]\nseed = \"absent.json\"\n");
    let output = td_cmd(dir.path())
        .args(["session", "--json"])
        .write_stdin("login\nlist\n")
        .output()
        .expect("td should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(stderr_error(&output.stderr)["error_code"], "E1002");
}

#[test]
fn duplicate_seed_ids_report_duplicate_code() {
    let dir = TempDir::new().expect("temp dir");
    let full = run_json(dir.path(), &["list"]);
    let first = full[0].clone();
    std::fs::write(
        dir.path().join("seed.json"),
        serde_json::to_string(&vec![first.clone(), first]).expect("serialize"),
    )
    .expect("write seed");
    write_project_config(dir.path(), "[store]\nseed = \"seed.json\"\n");

    let output = td_cmd(dir.path())
        .args(["summary", "--json"])
        .output()
        .expect("td should not crash");
    assert!(!output.status.success());
    assert_eq!(stderr_error(&output.stderr)["error_code"], "E2002");
}

#[test]
fn malformed_project_config_text_mode_has_suggestion() {
    let dir = TempDir::new().expect("temp dir");
    write_project_config(dir.path(), "[store\n");
    td_cmd(dir.path())
        .args(["list", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suggestion: Fix syntax in .ticketdesk/config.toml"));
}
