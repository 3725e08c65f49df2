//! Circuit presentation of a gate timeline.

use tracing::{debug, instrument};

use dynadec_ir::{Circuit, Instruction, QubitId};

use crate::config::ConversionConfig;
use crate::error::DdsResult;
use crate::sequence::PulseSequence;
use crate::timeline::{self, GateTimeline};

/// Name given to circuits built from unnamed sequences.
pub const DEFAULT_CIRCUIT_NAME: &str = "dds";

/// Convert a sequence into a [`Circuit`].
///
/// Every timeline entry becomes one moment holding its gate on each target
/// qubit; idle entries become `id` gates. With `add_measurement` a final
/// moment measures every target qubit.
///
/// # Example
///
/// ```rust
/// use dynadec_dds::{convert_to_circuit, ConversionConfig, DynamicDecouplingSequence, Pulse};
/// use dynadec_ir::QubitId;
/// use std::f64::consts::PI;
///
/// let echo = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.5, PI)]).unwrap();
/// let circuit = convert_to_circuit(&echo, &[QubitId(0)], &ConversionConfig::new(0.25)).unwrap();
///
/// assert_eq!(circuit.depth(), 5);
/// assert_eq!(circuit.moments()[2].instructions()[0].name(), "rx");
/// ```
#[instrument(skip_all, fields(gate_time = config.gate_time))]
pub fn convert_to_circuit<S: PulseSequence + ?Sized>(
    sequence: &S,
    target_qubits: &[QubitId],
    config: &ConversionConfig,
) -> DdsResult<Circuit> {
    let timeline = timeline::convert(sequence, target_qubits, config)?;
    timeline_to_circuit(&timeline, sequence.name().unwrap_or(DEFAULT_CIRCUIT_NAME))
}

/// Lay a timeline out as a circuit named `name`.
pub fn timeline_to_circuit(timeline: &GateTimeline, name: &str) -> DdsResult<Circuit> {
    let qubits = timeline.qubits();
    let mut circuit = Circuit::with_qubits(name, qubits.iter());

    for entry in timeline.entries() {
        circuit.broadcast(entry.gate(), qubits.iter())?;
    }
    if !timeline.measurements().is_empty() {
        circuit.append_moment(
            timeline
                .measurements()
                .iter()
                .map(|m| Instruction::measure(m.qubit, m.key.as_str())),
        )?;
    }

    debug!(
        depth = circuit.depth(),
        operations = circuit.num_operations(),
        "built circuit"
    );
    Ok(circuit)
}
