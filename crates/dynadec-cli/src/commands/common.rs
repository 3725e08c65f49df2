//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use dynadec_dds::{ConversionConfig, DynamicDecouplingSequence};
use dynadec_ir::QubitId;

/// A sequence together with default conversion settings.
///
/// ```yaml
/// sequence:
///   name: spin echo
///   duration: 1.0e-5
///   pulses:
///     - { offset: 0.0, rabi_rotation: 1.5707963267948966 }
///     - { offset: 5.0e-6, rabi_rotation: 3.141592653589793 }
/// conversion:
///   gate_time: 5.0e-7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceFile {
    /// The sequence to convert.
    pub sequence: DynamicDecouplingSequence,
    /// Defaults for settings not given on the command line.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// How converted output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Load a sequence file, choosing YAML or JSON by extension.
pub fn load_sequence_file(path: &str) -> Result<SequenceFile> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid sequence file: {path}")),
        _ => serde_json::from_str(&source).with_context(|| format!("Invalid sequence file: {path}")),
    }
}

/// Apply command-line overrides to the settings from a sequence file.
pub fn resolve_config(
    file: ConversionConfig,
    gate_time: Option<f64>,
    measure: bool,
) -> ConversionConfig {
    let mut config = file;
    if let Some(gate_time) = gate_time {
        config = config.with_gate_time(gate_time);
    }
    if measure {
        config = config.with_measurement(true);
    }
    config
}

/// Target qubits from `--qubits`, `q0` when none are given.
pub fn target_qubits(qubits: &[u32]) -> Vec<QubitId> {
    if qubits.is_empty() {
        vec![QubitId(0)]
    } else {
        qubits.iter().copied().map(QubitId).collect()
    }
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}
