//! Integration tests for the `td` CLI.
//!
//! Each test starts the reference server on a loopback port, runs `td` as a
//! subprocess against it, and verifies stdout, stderr and the exit status.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;
use tokio::runtime::Runtime;

use taskdeck::server::{self, TaskStore};

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

/// A server running on its own runtime for the duration of a test
struct TestServer {
    _runtime: Runtime,
    url: String,
    /// Holds an empty config dir so the user's config is never read
    home: TempDir,
}

impl TestServer {
    fn start(store: TaskStore) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (url, _) = runtime.block_on(server::spawn_local(store)).unwrap();
        TestServer {
            _runtime: runtime,
            url,
            home: TempDir::new().unwrap(),
        }
    }

    fn td(&self, args: &[&str]) -> Output {
        run_td(&self.url, self.home.path().join("config.toml"), args)
    }
}

fn run_td(url: &str, config: PathBuf, args: &[&str]) -> Output {
    Command::new(td_bin())
        .arg("--url")
        .arg(url)
        .args(args)
        .env("TASKDECK_CONFIG", config)
        .env_remove("TASKDECK_URL")
        .env_remove("TASKDECK_LOG")
        .env("NO_PROXY", "127.0.0.1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_prints_seeded_tasks() {
    let server = TestServer::start(TaskStore::seeded());
    let output = server.td(&["list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "[ ]   1  Read the API docs\n[x]   2  Try the terminal client\n\n1 open, 1 done\n"
    );
}

#[test]
fn add_then_list_json() {
    let server = TestServer::start(TaskStore::default());
    let output = server.td(&["add", "Buy milk"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "[ ]   1  Buy milk\n");

    let output = server.td(&["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["title"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn toggle_and_rename() {
    let server = TestServer::start(TaskStore::seeded());

    let output = server.td(&["toggle", "1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "[x]   1  Read the API docs\n");

    let output = server.td(&["title", "1", "Read the docs twice"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "[x]   1  Read the docs twice\n");
}

#[test]
fn delete_and_missing_id() {
    let server = TestServer::start(TaskStore::seeded());

    let output = server.td(&["delete", "2", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body, serde_json::json!({"deleted": 2}));

    let output = server.td(&["delete", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("error: Failed to delete task: 404 Not Found"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn toggle_unknown_id_fails() {
    let server = TestServer::start(TaskStore::seeded());
    let output = server.td(&["toggle", "77"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("task not found: 77"));
}

#[test]
fn unreachable_server() {
    let home = TempDir::new().unwrap();
    // Port 9 (discard) on loopback is essentially never served
    let output = run_td("http://127.0.0.1:9", home.path().join("config.toml"), &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Failed to fetch tasks: could not reach server"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn malformed_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    std::fs::write(&config, "[server\n").unwrap();
    let output = run_td("http://127.0.0.1:9", config, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not parse"));
}
