//! # scriptrun CLI Run Integration Tests
//!
//! File: cli/tests/run.rs
//!
//! ## Overview
//!
//! End-to-end tests for `scriptrun run`. A stub shell script stands in for the
//! Python script, and `sh` for the interpreter, so the tests only need a
//! POSIX shell. The home directory is replaced with a temporary working
//! directory via `--workdir`.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_run_reports_exit_code_and_combined_output() {
    let home = tempdir().unwrap();
    let project = tempdir().unwrap();
    let config = write_empty_config(home.path());
    write_script(
        home.path(),
        "report.sh",
        "echo \"input=$1\"\necho \"output=$2\"\necho \"warning on stderr\" >&2\nexit 4\n",
    );
    let project_dir = project.path().to_str().unwrap();

    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "sh", "--script", "report.sh"])
        .arg("--workdir")
        .arg(home.path())
        .args(["--project", project_dir])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process exited with code: 4"))
        .stdout(predicate::str::contains("Process output:\n"))
        .stdout(predicate::str::contains(format!("input={project_dir}\n")))
        .stdout(predicate::str::contains(format!("output={project_dir}\n")))
        .stdout(predicate::str::contains("warning on stderr\n"));
}

#[test]
fn test_run_uses_workdir_not_project_as_cwd() {
    let home = tempdir().unwrap();
    let project = tempdir().unwrap();
    let config = write_empty_config(home.path());
    write_script(home.path(), "cwd.sh", "echo \"cwd=$(pwd -P)\"\n");
    let expected = home.path().canonicalize().unwrap();

    scriptrun_cmd()
        .current_dir(project.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "sh", "--script", "cwd.sh"])
        .arg("--workdir")
        .arg(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Process exited with code: 0"))
        .stdout(predicate::str::contains(format!(
            "cwd={}\n",
            expected.display()
        )));
}

#[test]
fn test_run_explicit_input_and_output() {
    let home = tempdir().unwrap();
    let config = write_empty_config(home.path());
    write_script(home.path(), "args.sh", "echo \"$# $1 $2\"\n");

    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "sh", "--script", "args.sh"])
        .arg("--workdir")
        .arg(home.path())
        .args(["--input", "/java/src", "--output", "/graphs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 /java/src /graphs\n"));
}

#[test]
fn test_run_relative_folders_resolve_from_invoking_dir() {
    let home = tempdir().unwrap();
    let invoked_from = tempdir().unwrap();
    std::fs::create_dir(invoked_from.path().join("src")).unwrap();
    std::fs::write(invoked_from.path().join("src/Main.java"), "class Main {}\n").unwrap();
    let config = write_empty_config(home.path());
    write_script(
        home.path(),
        "ls.sh",
        "echo \"in=$1\"\necho \"out=$2\"\ncd \"$1\" || exit 9\nls\n",
    );
    let base = invoked_from.path().canonicalize().unwrap();

    scriptrun_cmd()
        .current_dir(invoked_from.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "sh", "--script", "ls.sh"])
        .arg("--workdir")
        .arg(home.path())
        .args(["--input", "./src", "--output", "graphs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process exited with code: 0"))
        .stdout(predicate::str::contains(format!(
            "in={}\n",
            base.join("src").display()
        )))
        .stdout(predicate::str::contains(format!(
            "out={}\n",
            base.join("graphs").display()
        )))
        .stdout(predicate::str::contains("Main.java\n"));
}

#[test]
fn test_run_skips_when_output_folder_is_empty() {
    let home = tempdir().unwrap();
    let config = write_empty_config(home.path());

    // If anything were spawned, the missing interpreter would make this fail.
    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "scriptrun-no-such-interpreter"])
        .arg("--workdir")
        .arg(home.path())
        .args(["--output", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process exited").not())
        .stderr(predicate::str::contains(
            "No output folder is available for the project",
        ));
}

#[test]
fn test_run_missing_interpreter_fails() {
    let home = tempdir().unwrap();
    let config = write_empty_config(home.path());

    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "scriptrun-no-such-interpreter"])
        .arg("--workdir")
        .arg(home.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Process exited").not())
        .stderr(predicate::str::contains(
            "Failed to launch 'scriptrun-no-such-interpreter'",
        ));
}

#[test]
fn test_run_timeout_kills_script() {
    let home = tempdir().unwrap();
    let config = write_empty_config(home.path());
    write_script(home.path(), "hang.sh", "exec sleep 30\n");

    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--interpreter", "sh", "--script", "hang.sh", "--timeout", "1"])
        .arg("--workdir")
        .arg(home.path())
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not exit within 1s"));
}

#[test]
fn test_run_rejects_zero_timeout() {
    let home = tempdir().unwrap();
    let config = write_empty_config(home.path());

    scriptrun_cmd()
        .arg("--config")
        .arg(&config)
        .args(["run", "--timeout", "0"])
        .arg("--workdir")
        .arg(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeout must be at least 1 second"));
}
