//! Integration tests for importgraph


use assert_cmd::Command;
use harness::{TestTree, run_importgraph};
use predicates::prelude::*;

fn importgraph() -> Command {
    let mut cmd = Command::cargo_bin("importgraph").expect("binary should be built");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_shared_import_report() {
    let tree = TestTree::new();
    tree.add_file("a.py", "import os\nimport mymod\n");
    tree.add_file("b.py", "from mymod import x\n");

    let (stdout, _stderr, success) = run_importgraph(tree.path(), &[".", "--render", "none"]);
    assert!(success, "importgraph should succeed");
    assert_eq!(
        stdout,
        "Import Map:\na.py: mymod, os\nb.py: mymod\n\nDependency Graph:\n\
         a.py depends on b.py\nb.py depends on a.py\n"
    );
}

#[test]
fn test_root_given_as_argument() {
    let tree = TestTree::new();
    tree.add_file("project/a.py", "import json\n");
    tree.add_file("project/b.py", "import json\n");

    importgraph()
        .current_dir(tree.path())
        .args(["project", "--render", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.py depends on b.py"));
}

#[test]
fn test_comment_after_module_name() {
    let tree = TestTree::new();
    tree.add_file("c.py", "import os  # comment\nprint(\"import sys\")\n");

    importgraph()
        .arg(tree.path())
        .args(["--render", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c.py: os\n"));
}

#[test]
fn test_path_is_required() {
    let tree = TestTree::new();
    tree.add_file("a.py", "import os\n");

    importgraph()
        .current_dir(tree.path())
        .args(["--render", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PATH>"));
}

/// Put a stand-in `xdg-open` first on PATH that runs `body` with the file as `$1`.
#[cfg(target_os = "linux")]
fn fake_viewer(tree: &TestTree, body: &str) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = tree.path().join("bin");
    let script = tree.add_file("bin/xdg-open", &format!("#!/bin/sh\n{}\n", body));
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut paths = vec![bin];
    paths.extend(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default()));
    std::env::join_paths(paths).unwrap()
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_shows_graph_without_writing_output() {
    let tree = TestTree::new();
    tree.add_file("src/a.py", "import mymod\n");
    tree.add_file("src/b.py", "import mymod\n");
    let seen = tree.path().join("seen.svg");
    let path = fake_viewer(&tree, &format!("cp \"$1\" '{}'", seen.display()));

    importgraph()
        .current_dir(tree.path())
        .env("PATH", path)
        .arg("src")
        .assert()
        .success();

    let svg = std::fs::read_to_string(&seen).expect("viewer should receive the drawing");
    assert!(svg.contains(">a.py</text>"));
    assert!(svg.contains(">b.py</text>"));
    assert!(!tree.path().join("dependency_graph.svg").exists());
    assert!(!tree.path().join("src").join("dependency_graph.svg").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_failing_viewer_is_reported() {
    let tree = TestTree::new();
    tree.add_file("a.py", "import mymod\n");
    let path = fake_viewer(&tree, "exit 3");

    importgraph()
        .env("PATH", path)
        .arg(tree.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("importgraph:"));
}

#[test]
fn test_open_requires_output() {
    let tree = TestTree::new();

    importgraph()
        .arg(tree.path())
        .arg("--open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn test_dot_output_path() {
    let tree = TestTree::new();
    tree.add_file("a.py", "import mymod\n");
    tree.add_file("b.py", "import mymod\n");
    let out = tree.path().join("graph.dot");

    importgraph()
        .arg(tree.path())
        .args(["--render", "dot", "-o"])
        .arg(&out)
        .assert()
        .success();

    let dot = std::fs::read_to_string(&out).unwrap();
    assert!(dot.contains("\"a.py\" -> \"b.py\";"));
    assert!(dot.contains("\"b.py\" -> \"a.py\";"));
}

#[test]
fn test_json_output() {
    let tree = TestTree::new();
    tree.add_file("a.py", "import os\nimport mymod\n");
    tree.add_file("b.py", "from mymod import x\n");

    let output = importgraph()
        .arg(tree.path())
        .args(["--json", "--render", "none"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["import_map"]["a.py"], serde_json::json!(["mymod", "os"]));
    assert_eq!(value["dependency_graph"]["a.py"], serde_json::json!(["b.py"]));
    assert_eq!(value["skipped"], serde_json::json!([]));
}

#[test]
fn test_default_exclusion() {
    let tree = TestTree::new();
    tree.add_file("app.py", "import requests\n");
    tree.add_file(".venv/lib/requests/api.py", "import requests\n");

    let (stdout, _stderr, success) = run_importgraph(tree.path(), &[".", "--render", "none"]);
    assert!(success);
    assert!(stdout.contains("app.py: requests"));
    assert!(!stdout.contains("api.py"), "excluded dir leaked: {}", stdout);
}

#[test]
fn test_custom_exclusion_replaces_default() {
    let tree = TestTree::new();
    tree.add_file("app.py", "import requests\n");
    tree.add_file(".venv/api.py", "import requests\n");
    tree.add_file("vendor/lib.py", "import requests\n");

    let (stdout, _stderr, success) =
        run_importgraph(tree.path(), &[".", "-x", "vendor", "--render", "none"]);
    assert!(success);
    assert!(stdout.contains("api.py"), "default exclusion should be replaced");
    assert!(!stdout.contains("lib.py"), "vendor should be excluded: {}", stdout);
}

#[test]
fn test_custom_extension() {
    let tree = TestTree::new();
    tree.add_file("a.pyi", "import typing\n");
    tree.add_file("b.py", "import typing\n");

    let (stdout, _stderr, success) =
        run_importgraph(tree.path(), &[".", "--ext", "pyi", "--render", "none"]);
    assert!(success);
    assert!(stdout.contains("a.pyi: typing"));
    assert!(!stdout.contains("b.py"));
}

#[test]
fn test_missing_root_fails() {
    importgraph()
        .args(["/nonexistent/project/root", "--render", "none"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("importgraph: cannot access"));
}

#[test]
fn test_repeated_runs_identical() {
    let tree = TestTree::new();
    tree.populate(30, 4);

    let (first, _, ok1) = run_importgraph(tree.path(), &[".", "--render", "none"]);
    let (second, _, ok2) = run_importgraph(tree.path(), &[".", "--render", "none"]);
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}
