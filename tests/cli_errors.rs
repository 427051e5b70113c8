use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("polygon-batch-cli-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn precondition_failure_is_reported_on_stderr() {
    let root = scratch("precondition");
    let input = root.join("in");
    std::fs::create_dir_all(&input).unwrap();

    // An empty EPSG code fails validation before logging is initialized;
    // the message must still reach the user.
    let out = Command::new(env!("CARGO_BIN_EXE_polygon-batch"))
        .args([
            "run",
            input.to_str().unwrap(),
            "-e",
            "",
            "-m",
            "K",
            "-o",
            root.join("out").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("EPSG code not specified"),
        "stderr was: {stderr:?}"
    );
}

#[test]
fn log_file_defaults_to_output_root_not_a_unit_directory() {
    let root = scratch("log-path");
    let input = root.join("in");
    let output = root.join("out");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("A.gml"), "<gml/>").unwrap();

    // Empty PATH makes converter resolution fail after logging is set up,
    // so the default log location is observable without the real binary.
    let out = Command::new(env!("CARGO_BIN_EXE_polygon-batch"))
        .args([
            "run",
            input.to_str().unwrap(),
            "-e",
            "4326",
            "-m",
            "K",
            "-o",
            output.to_str().unwrap(),
        ])
        .env("PATH", "")
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("converter not found"),
        "stderr was: {stderr:?}"
    );

    // The log file is a plain file at the output root, so the unit listing
    // never mistakes it for an output unit.
    assert!(output.join("polygon-batch.log").is_file());
    assert!(!output.join("logs").exists());
}
