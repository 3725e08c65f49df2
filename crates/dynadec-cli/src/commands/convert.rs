//! Circuit and schedule command implementations.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::info;

use dynadec_dds::{PulseSequence, convert_to_circuit, convert_to_schedule_on};
use dynadec_ir::Device;

use super::common::{
    OutputFormat, load_sequence_file, resolve_config, target_qubits, write_output,
};

/// Arguments shared by the `circuit` and `schedule` commands.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input sequence file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Gate slot duration in seconds (overrides the file)
    #[arg(long, env = "DYNADEC_GATE_TIME")]
    pub gate_time: Option<f64>,

    /// Comma-separated target qubit indices (default: 0)
    #[arg(short, long, value_delimiter = ',')]
    pub qubits: Vec<u32>,

    /// Append a measurement of every target qubit
    #[arg(short, long)]
    pub measure: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the circuit command.
pub fn execute_circuit(args: &ConvertArgs) -> Result<()> {
    let file = load_sequence_file(&args.input)?;
    let config = resolve_config(file.conversion, args.gate_time, args.measure);
    let qubits = target_qubits(&args.qubits);

    eprintln!(
        "{} Converting {} ({} pulses) with gate time {} s",
        style("→").cyan().bold(),
        style(&args.input).green(),
        file.sequence.pulses().len(),
        style(config.gate_time).yellow()
    );

    let circuit = convert_to_circuit(&file.sequence, &qubits, &config)
        .with_context(|| format!("Failed to convert {}", args.input))?;
    info!(
        depth = circuit.depth(),
        operations = circuit.num_operations(),
        "circuit ready"
    );

    let rendered = match args.format {
        OutputFormat::Text => circuit.to_string(),
        OutputFormat::Json => circuit.to_json()?,
    };
    write_output(&rendered, args.output.as_deref())?;

    eprintln!(
        "{} Circuit: {} qubits, depth {}, {} ops",
        style("✓").green().bold(),
        circuit.num_qubits(),
        circuit.depth(),
        circuit.num_operations()
    );
    if let Some(path) = &args.output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}

/// Execute the schedule command.
pub fn execute_schedule(args: &ConvertArgs, device_qubits: Option<u32>) -> Result<()> {
    let file = load_sequence_file(&args.input)?;
    let config = resolve_config(file.conversion, args.gate_time, args.measure);
    let qubits = target_qubits(&args.qubits);
    let device = match device_qubits {
        Some(n) => Device::unconstrained().with_qubits(n),
        None => Device::unconstrained(),
    };

    eprintln!(
        "{} Scheduling {} ({} pulses) with gate time {} s",
        style("→").cyan().bold(),
        style(&args.input).green(),
        file.sequence.pulses().len(),
        style(config.gate_time).yellow()
    );

    let schedule = convert_to_schedule_on(&file.sequence, &qubits, &config, device)
        .with_context(|| format!("Failed to convert {}", args.input))?;
    info!(operations = schedule.len(), "schedule ready");

    let rendered = match args.format {
        OutputFormat::Text => schedule.to_string(),
        OutputFormat::Json => schedule.to_json()?,
    };
    write_output(&rendered, args.output.as_deref())?;

    eprintln!(
        "{} Schedule: {} ops, {:.3} µs total",
        style("✓").green().bold(),
        schedule.len(),
        schedule.total_duration() * 1e6
    );
    if let Some(path) = &args.output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}
