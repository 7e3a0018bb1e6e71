use std::process::Command;

fn run_skein(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_skein"))
        .args(args)
        .output()
        .expect("failed to run skein binary")
}

#[test]
fn cli_help_succeeds() {
    let out = run_skein(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Skein"));
    assert!(stdout.contains("tool"));
}

#[test]
fn cli_tool_list_json_succeeds() {
    let out = run_skein(&["--json", "tool", "list"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.trim_start().starts_with('['));
    assert!(stdout.contains("\"name\""));
    assert!(stdout.contains("search"));
}

#[test]
fn cli_tool_show_existing_json_succeeds() {
    let out = run_skein(&["--json", "tool", "show", "get_temp"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"name\""));
    assert!(stdout.contains("get_temp"));
}

#[test]
fn cli_tool_show_missing_fails() {
    let out = run_skein(&["tool", "show", "no_such_tool"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("tool not found"));
}

#[test]
fn cli_no_message_fails() {
    let out = run_skein(&[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("provide a message"));
}
