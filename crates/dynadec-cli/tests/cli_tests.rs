//! End-to-end tests of the `dynadec` binary.
//!
//! Each test writes a sequence file into a temporary directory and runs the
//! compiled binary against it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const ECHO_YAML: &str = "\
sequence:
  name: spin echo
  duration: 2.0e-5
  pulses:
    - offset: 0.0
      rabi_rotation: 1.5707963267948966
    - offset: 1.0e-5
      rabi_rotation: 3.141592653589793
    - offset: 2.0e-5
      rabi_rotation: 1.5707963267948966
conversion:
  gate_time: 4.0e-7
";

const CONFLICT_JSON: &str = r#"{
    "sequence": {
        "duration": 1.0,
        "pulses": [{"offset": 0.5, "rabi_rotation": 0.3, "detuning_rotation": 0.2}]
    }
}"#;

fn dynadec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dynadec"))
        .args(args)
        .env_remove("DYNADEC_GATE_TIME")
        .output()
        .expect("failed to run dynadec")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// ============================================================================
// circuit
// ============================================================================

#[test]
fn circuit_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = dynadec(&["circuit", "-i", &input, "--format", "json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let circuit: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(circuit["name"], "spin echo");
    assert_eq!(circuit["moments"].as_array().map(Vec::len), Some(51));
}

#[test]
fn circuit_with_measurement_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);
    let output = dir.path().join("circuit.json");

    let out = dynadec(&[
        "circuit",
        "-i",
        &input,
        "--qubits",
        "0,1",
        "--measure",
        "-f",
        "json",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let circuit: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let moments = circuit["moments"].as_array().unwrap();
    assert_eq!(moments.len(), 52);
    let last = moments.last().unwrap()["instructions"].as_array().unwrap();
    assert_eq!(last.len(), 2);
}

#[test]
fn gate_time_flag_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = dynadec(&["circuit", "-i", &input, "--gate-time", "1e-6", "-f", "json"]);
    assert!(out.status.success());

    let circuit: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(circuit["moments"].as_array().map(Vec::len), Some(21));
}

#[test]
fn gate_time_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = Command::new(env!("CARGO_BIN_EXE_dynadec"))
        .args(["circuit", "-i", &input, "-f", "json"])
        .env("DYNADEC_GATE_TIME", "2e-6")
        .output()
        .unwrap();
    assert!(out.status.success());

    let circuit: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(circuit["moments"].as_array().map(Vec::len), Some(11));
}

// ============================================================================
// schedule
// ============================================================================

#[test]
fn schedule_text_lists_rotations() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = dynadec(&["schedule", "-i", &input]);
    assert!(out.status.success());

    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.starts_with("schedule with 3 operations"));
    assert!(text.contains("rx"));
}

#[test]
fn schedule_rejects_qubits_outside_device() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = dynadec(&["schedule", "-i", &input, "--qubits", "3", "--device-qubits", "2"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn conflicting_pulse_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "conflict.json", CONFLICT_JSON);

    let out = dynadec(&["circuit", "-i", &input]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("specifies both rabi_rotation"), "{stderr}");
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let out = dynadec(&["circuit", "-i", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
}

#[test]
fn duplicate_qubits_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "echo.yaml", ECHO_YAML);

    let out = dynadec(&["circuit", "-i", &input, "--qubits", "1,1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("more than once"));
}

#[test]
fn version_prints_package_version() {
    let out = dynadec(&["version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}
