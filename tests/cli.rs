use std::process::{Command, Output, Stdio};

fn syscall(arguments: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_syscall"))
        .args(arguments)
        .env_remove("SYSCALL_LOG")
        .output()
        .expect("could not run syscall")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn echo_sees_the_previous_result() {
    let output = syscall(&["echo", "hello", ",", "echo", "$0"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "hello\n0\n");
}

#[test]
fn bare_invocation_prints_usage() {
    let output = syscall(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("usage: syscall [-<n>] name"));
}

#[test]
fn repeat_count_without_a_chain_is_a_usage_error() {
    let output = syscall(&["-3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("usage:"));
}

#[test]
fn help_and_version_exit_cleanly() {
    for flag in ["-h", "--help"] {
        let output = syscall(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
        assert!(stdout(&output).contains("syscall [-<n>] name"));
    }
    for flag in ["-v", "--version"] {
        let output = syscall(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
        assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn writes_to_stdout() {
    let output = syscall(&["write", "1", "hi\\n", "3"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "hi\n");
}

#[test]
fn chain_threads_a_descriptor_through_a_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("out.txt");
    let path = path.to_str().unwrap();
    // O_WRONLY | O_CREAT | O_TRUNC relative to AT_FDCWD
    let output = syscall(&[
        "openat", "-100", path, "0x241", "0644", ",", "write", "$0", "hello", "#hello", ",",
        "write", "$0", "hi\\n", "3", ",", "close", "$0",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "hellohi\n");
}

#[test]
fn unknown_call_fails_with_its_name() {
    let output = syscall(&["echo", "before", ",", "frobnicate", ",", "echo", "after"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "before\n");
    assert!(stderr(&output).contains("unknown system call: frobnicate"));
    assert_eq!(stderr(&output).lines().count(), 1);
}

#[test]
fn failed_call_reports_the_platform_error() {
    let output = syscall(&["close", "987654"]);
    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(message.contains("close failed: "), "{message}");
    assert!(message.contains(&errno::Errno(nix::libc::EBADF).to_string()), "{message}");
}

#[test]
fn too_many_arguments() {
    let output = syscall(&["mmap", "0", "4096", "3", "0x22", "-1", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too many arguments for mmap"));
}

#[test]
fn too_many_commands() {
    let mut arguments = vec!["getpid"];
    for _ in 0..20 {
        arguments.extend([",", "getpid"]);
    }
    let output = syscall(&arguments);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too many commands (21 > 20)"));
}

#[test]
fn zero_repeat_count_fails() {
    let output = syscall(&["-0", "getpid"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("must be between 1"));

    let output = syscall(&["-n", "-2", "getpid"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("must be between 1"), "{}", stderr(&output));
}

#[test]
fn results_carry_over_between_passes() {
    let child = Command::new(env!("CARGO_BIN_EXE_syscall"))
        .args(["-3", "echo", "$1", ",", "getpid"])
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let pid = child.id().to_string();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, ["-1", pid.as_str(), pid.as_str()]);
}

#[test]
fn dump_results_prints_the_register() {
    let output = syscall(&["--dump-results", "echo", "x", ",", "getppid"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("x\n"));
    assert!(out.contains("command"));
    assert!(out.contains("result"));
}

#[test]
fn list_shows_host_calls() {
    let output = syscall(&["--list"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.lines().any(|line| line.split_whitespace().next() == Some("getpid")));
    let names: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
