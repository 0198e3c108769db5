use crate::*;
use assert_cmd::Command;
use filegate::error::Result;
use libtest_mimic::Trial;
use predicates::prelude::*;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_driver_lists_directory,
        test_driver_denies_without_flags,
        test_driver_ignores_unknown_commands,
        test_driver_reports_unknown_commands_when_strict,
        test_driver_removes_with_flag,
    ));
}

fn driver(sandbox: &Sandbox) -> Command {
    let mut cmd = Command::cargo_bin("filegate").unwrap();
    cmd.env_clear()
        .arg("--root")
        .arg(&sandbox.root)
        .arg("--temp-dir")
        .arg(&sandbox.temp);
    cmd
}

async fn test_driver_lists_directory() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("hello.txt", b"hi");

    driver(&sandbox)
        .write_stdin("{\"command\":\"GetDirContents\",\"arguments\":{\"pathInfo\":[]}}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello.txt"))
        .stdout(predicate::str::contains("\"success\":true"));
    Ok(())
}

async fn test_driver_denies_without_flags() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("keep.txt", b"keep");

    driver(&sandbox)
        .write_stdin(
            "{\"command\":\"Remove\",\"arguments\":{\"pathInfo\":[{\"name\":\"keep.txt\"}],\"isDirectory\":false}}\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":false"));
    assert!(sandbox.exists("keep.txt"));
    Ok(())
}

async fn test_driver_ignores_unknown_commands() -> Result<()> {
    let sandbox = Sandbox::new();

    driver(&sandbox)
        .write_stdin("{\"command\":\"SelfDestruct\",\"arguments\":{}}\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

async fn test_driver_reports_unknown_commands_when_strict() -> Result<()> {
    let sandbox = Sandbox::new();

    driver(&sandbox)
        .arg("--strict-commands")
        .write_stdin("{\"command\":\"SelfDestruct\",\"arguments\":{}}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":false"));
    Ok(())
}

async fn test_driver_removes_with_flag() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("gone.txt", b"gone");

    driver(&sandbox)
        .arg("--allow-delete")
        .write_stdin(
            "{\"command\":\"Remove\",\"arguments\":{\"pathInfo\":[{\"name\":\"gone.txt\"}],\"isDirectory\":false}}\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"));
    assert!(!sandbox.exists("gone.txt"));
    Ok(())
}
