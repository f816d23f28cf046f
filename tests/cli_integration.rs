#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    /// Environment with a config written up front and no sample data.
    fn empty(use_database: bool) -> Self {
        let env = Self::new();
        env.write_config(json!({ "useDatabase": use_database, "useSampleData": false }));
        env.run_ok(&["init"]);
        env
    }

    fn write_config(&self, config: Value) {
        fs::write(self.dir.path().join("config.json"), config.to_string()).expect("write config");
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").expect("binary");
        cmd.current_dir(self.dir.path())
            .env_remove("PORT")
            .env_remove("TASKBOARD_DATABASE")
            .env_remove("RUST_LOG")
            .args(["--config", "config.json"]);
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn titles(&self, args: &[&str]) -> Vec<String> {
        self.run_ok(args)["data"]
            .as_array()
            .expect("list data")
            .iter()
            .map(|t| t["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init_writes_config_and_seeds_files() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["configCreated"], true);
    assert_eq!(v["data"]["mode"], "files");
    assert!(v["data"]["seeded"]["tasks"].as_u64().unwrap() > 0);
    assert!(env.dir.path().join("config.json").exists());
    assert!(env.dir.path().join("data/tasks.json").exists());
    assert!(env.dir.path().join("data/calendar.json").exists());
}

#[test]
fn test_init_database_mode() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init", "--database"]);
    assert_eq!(v["data"]["mode"], "database");
    assert!(v["data"]["path"].as_str().unwrap().ends_with("taskboard.db"));
    assert!(env.dir.path().join("data/taskboard.db").exists());

    let tasks = env.run_ok(&["task", "list"]);
    assert_eq!(
        tasks["data"].as_array().unwrap().len() as u64,
        v["data"]["seeded"]["tasks"].as_u64().unwrap()
    );
}

#[test]
fn test_init_idempotent() {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    let v = env.run_ok(&["init"]);
    assert_eq!(v["data"]["configCreated"], false);
    assert_eq!(v["data"]["seeded"]["tasks"], 0);
}

#[test]
fn test_init_required_before_commands() {
    for use_database in [false, true] {
        let env = TestEnv::new();
        env.write_config(json!({ "useDatabase": use_database }));
        let v = env.run_err(&["task", "list"]);
        assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
    }
}

#[test]
fn test_malformed_config_is_reported() {
    let env = TestEnv::new();
    fs::write(env.dir.path().join("config.json"), "{ broken").unwrap();
    let v = env.run_err(&["status"]);
    assert_eq!(v["error"]["code"], "CONFIG_ERROR");
}

// ─── 2. task CRUD ──────────────────────────────────────────────────

#[test]
fn test_task_crud_both_backends() {
    for use_database in [false, true] {
        let env = TestEnv::empty(use_database);

        let v = env.run_ok(&[
            "task", "add", "Write report", "--priority", "높음", "--due", "2025-04-20",
            "--tag", "docs", "--tag", "q2", "--assignee", "Kim",
        ]);
        let id = v["data"]["id"].as_i64().unwrap();
        assert_eq!(id, 1);
        assert_eq!(v["data"]["priority"], "high");
        assert_eq!(v["data"]["status"], "pending");
        assert_eq!(v["data"]["tags"], json!(["docs", "q2"]));

        let v = env.run_ok(&["task", "show", "1"]);
        assert_eq!(v["data"]["title"], "Write report");
        assert_eq!(v["data"]["dueDate"], "2025-04-20");

        let v = env.run_ok(&["task", "update", "1", "--status", "in-progress", "--clear", "due"]);
        assert_eq!(v["data"]["status"], "in-progress");
        assert_eq!(v["data"]["dueDate"], Value::Null);
        assert_eq!(v["data"]["title"], "Write report");

        let v = env.run_ok(&["task", "delete", "1"]);
        assert_eq!(v["data"]["message"], "Task deleted");
        assert_eq!(v["data"]["id"], 1);

        let v = env.run_ok(&["task", "list"]);
        assert!(v["data"].as_array().unwrap().is_empty());
    }
}

#[test]
fn test_task_ids_are_sequential() {
    let env = TestEnv::empty(false);
    for (i, title) in ["a", "b", "c"].iter().enumerate() {
        let v = env.run_ok(&["task", "add", title]);
        assert_eq!(v["data"]["id"], i as i64 + 1);
    }
    env.run_ok(&["task", "delete", "2"]);
    let v = env.run_ok(&["task", "add", "d"]);
    assert_eq!(v["data"]["id"], 4);
}

#[test]
fn test_task_not_found() {
    let env = TestEnv::empty(false);
    let v = env.run_err(&["task", "show", "42"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    assert_eq!(v["error"]["message"], "Task not found: 42");
    let v = env.run_err(&["task", "update", "42", "--title", "x"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
    let v = env.run_err(&["task", "delete", "42"]);
    assert_eq!(v["error"]["code"], "NOT_FOUND");
}

#[test]
fn test_task_validation() {
    let env = TestEnv::empty(true);
    let v = env.run_err(&["task", "add", "   "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "x", "--status", "bogus"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "add", "x", "--due", "April 20"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    env.run_ok(&["task", "add", "keep"]);
    let v = env.run_err(&["task", "update", "1", "--title", ""]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["task", "update", "1", "--clear", "title"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(env.run_ok(&["task", "show", "1"])["data"]["title"], "keep");
}

// ─── 3. filtering and sorting ──────────────────────────────────────

fn filter_fixture() -> TestEnv {
    let env = TestEnv::empty(false);
    env.run_ok(&["task", "add", "Plan sprint", "--priority", "low", "--due", "2025-04-22", "--tag", "meeting"]);
    env.run_ok(&["task", "add", "Fix login", "--priority", "high", "--status", "done", "--tag", "bug"]);
    env.run_ok(&[
        "task", "add", "Agenda", "--priority", "medium", "--due", "2025-04-18",
        "--description", "weekly meeting agenda", "--tag", "meeting",
    ]);
    env
}

#[test]
fn test_task_list_filters() {
    let env = filter_fixture();
    assert_eq!(env.titles(&["task", "list", "--tag", "meeting", "--sort", "title"]), vec!["Agenda", "Plan sprint"]);
    assert_eq!(env.titles(&["task", "list", "--status", "완료"]), vec!["Fix login"]);
    assert_eq!(env.titles(&["task", "list", "--search", "MEETING"]), vec!["Agenda"]);
    assert!(env.titles(&["task", "list", "--priority", "high", "--status", "pending"]).is_empty());
    assert_eq!(env.titles(&["task", "list", "--filter", "assignee=nobody"]).len(), 0);
}

#[test]
fn test_task_list_sorting() {
    let env = filter_fixture();
    assert_eq!(
        env.titles(&["task", "list", "--sort", "priority"]),
        vec!["Fix login", "Agenda", "Plan sprint"]
    );
    // undated tasks stay last in both directions
    assert_eq!(
        env.titles(&["task", "list", "--sort", "dueDate"]),
        vec!["Agenda", "Plan sprint", "Fix login"]
    );
    assert_eq!(
        env.titles(&["task", "list", "--sort", "dueDate", "--desc"]),
        vec!["Plan sprint", "Agenda", "Fix login"]
    );
    // default listing is newest first
    assert_eq!(env.titles(&["task", "list"]), vec!["Agenda", "Fix login", "Plan sprint"]);

    let v = env.run_err(&["task", "list", "--sort", "colour"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_priority_aliases_sort_by_rank() {
    let env = TestEnv::empty(false);
    env.run_ok(&["task", "add", "B", "--priority", "낮음"]);
    env.run_ok(&["task", "add", "A", "--priority", "높음"]);
    assert_eq!(env.titles(&["task", "list", "--sort", "priority"]), vec!["A", "B"]);
}

// ─── 4. projects, events, members ──────────────────────────────────

#[test]
fn test_project_commands() {
    let env = TestEnv::empty(true);
    let v = env.run_ok(&[
        "project", "add", "Website", "--start", "2025-04-01", "--end", "2025-06-30",
        "--budget", "5000", "--progress", "140", "--member", "Kim", "--member", "Lee",
    ]);
    assert_eq!(v["data"]["progress"], 100);
    assert_eq!(v["data"]["team"], json!(["Kim", "Lee"]));

    let v = env.run_err(&["project", "add", "Broken", "--start", "2025-05-01", "--end", "2025-04-01"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["project", "add", "Broke", "--budget=-1"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    env.run_ok(&["project", "add", "App", "--progress", "-20"]);
    let v = env.run_ok(&["project", "list", "--sort", "name"]);
    let names: Vec<_> = v["data"].as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, vec![json!("App"), json!("Website")]);
    assert_eq!(env.run_ok(&["project", "show", "2"])["data"]["progress"], 0);
    env.run_ok(&["project", "delete", "2"]);
    assert_eq!(env.run_err(&["project", "show", "2"])["error"]["message"], "Project not found: 2");
}

#[test]
fn test_event_commands() {
    let env = TestEnv::empty(false);
    let v = env.run_ok(&["event", "add", "Standup", "--start", "2025-04-18T10:00", "--type", "미팅"]);
    assert_eq!(v["data"]["type"], "meeting");
    assert_eq!(v["data"]["allDay"], false);
    assert_eq!(v["data"]["end"], v["data"]["start"]);

    let v = env.run_ok(&["event", "add", "Holiday", "--start", "2025-05-05", "--type", "vacation"]);
    assert_eq!(v["data"]["allDay"], true);

    let v = env.run_err(&["event", "add", "Bad", "--start", "2025-04-18T10:00", "--end", "2025-04-18T09:00"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_ok(&["event", "list", "--filter", "type=vacation"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 1);
    assert_eq!(v["data"][0]["title"], "Holiday");
}

#[test]
fn test_member_commands() {
    let env = TestEnv::empty(false);
    env.run_ok(&["member", "add", "Kim", "--email", "kim@example.com", "--department", "Dev"]);
    env.run_ok(&["member", "add", "Lee", "--email", "lee@example.com", "--department", "Design"]);
    let v = env.run_err(&["member", "add", "Park", "--email", "not-an-email"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");

    let v = env.run_ok(&["member", "list", "--filter", "department=dev"]);
    assert_eq!(v["data"].as_array().unwrap().len(), 1);
    assert_eq!(v["data"][0]["name"], "Kim");
    assert_eq!(v["data"][0]["status"], "active");
}

// ─── 5. status and text output ─────────────────────────────────────

#[test]
fn test_status_dashboard() {
    let env = TestEnv::empty(false);
    env.run_ok(&["task", "add", "a", "--status", "done"]);
    env.run_ok(&["task", "add", "b"]);
    env.run_ok(&["member", "add", "Kim", "--email", "kim@example.com"]);
    let v = env.run_ok(&["status"]);
    assert_eq!(v["data"]["tasks"]["total"], 2);
    assert_eq!(v["data"]["tasks"]["byStatus"]["done"], 1);
    assert_eq!(v["data"]["tasks"]["completion"], 50);
    assert_eq!(v["data"]["memberCount"], 1);
}

#[test]
fn test_text_output() {
    let env = TestEnv::empty(false);
    env.cmd()
        .args(["task", "add", "Invoices", "--assignee", "Kim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Task"));
    env.cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 [pending] Invoices (medium)"));
    env.cmd()
        .args(["task", "show", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Task not found: 9"));
    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}
