use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "grindstone-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_grindstone-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("smoke"));
}

#[test]
fn cli_runs_smoke_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_grindstone-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--scenarios",
            "smoke",
            "--seeds",
            "11",
            "--days",
            "3",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("scenario_name"));
    assert!(content.contains("\"passed\": true"));
}

#[test]
fn cli_reports_unknown_scenarios_without_failing() {
    let exe = env!("CARGO_BIN_EXE_grindstone-tester");
    let output_path = temp_path("unknown");
    let output = Command::new(exe)
        .args(["--scenarios", "ghost", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("[]"));
}

#[test]
fn cli_save_dir_leaves_saves_on_disk() {
    let exe = env!("CARGO_BIN_EXE_grindstone-tester");
    let save_dir = temp_path("saves");
    let status = Command::new(exe)
        .args(["--scenarios", "smoke", "--seeds", "1337", "--save-dir"])
        .arg(&save_dir)
        .status()
        .expect("run cli");
    assert!(status.success());

    let save_file = save_dir
        .join("smoke")
        .join("seed-1337")
        .join("grindstone.save");
    let blob = std::fs::read_to_string(save_file).expect("read save blob");
    assert!(blob.contains("\"xp\""));
}
