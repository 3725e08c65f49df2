//! Schedule presentation of a gate timeline.

use tracing::{debug, instrument};

use dynadec_ir::{Device, Instruction, QubitId, Schedule, ScheduledOperation};

use crate::config::ConversionConfig;
use crate::error::DdsResult;
use crate::sequence::PulseSequence;
use crate::timeline::{self, GateTimeline};

/// Convert a sequence into a [`Schedule`] on an unconstrained device.
///
/// Each rotation becomes one operation per target qubit, starting at
/// `slot * gate_time` and lasting `gate_time`. Idle entries are left out:
/// idle time shows up as gaps. Measurements start one slot after the last
/// slot.
pub fn convert_to_schedule<S: PulseSequence + ?Sized>(
    sequence: &S,
    target_qubits: &[QubitId],
    config: &ConversionConfig,
) -> DdsResult<Schedule> {
    convert_to_schedule_on(sequence, target_qubits, config, Device::unconstrained())
}

/// Like [`convert_to_schedule`], validating every operation against `device`.
///
/// Device errors are returned as [`DdsError::Ir`](crate::DdsError::Ir).
#[instrument(skip_all, fields(gate_time = config.gate_time))]
pub fn convert_to_schedule_on<S: PulseSequence + ?Sized>(
    sequence: &S,
    target_qubits: &[QubitId],
    config: &ConversionConfig,
    device: Device,
) -> DdsResult<Schedule> {
    let timeline = timeline::convert(sequence, target_qubits, config)?;
    timeline_to_schedule(&timeline, device)
}

/// Stamp the rotations and measurements of a timeline with start times.
pub fn timeline_to_schedule(timeline: &GateTimeline, device: Device) -> DdsResult<Schedule> {
    let gate_time = timeline.gate_time();
    let mut schedule = Schedule::on_device(device);

    for entry in timeline.entries().iter().filter(|e| !e.is_idle()) {
        let start = timeline.start_time(entry.slot);
        let gate = entry.gate();
        for qubit in timeline.qubits().iter() {
            schedule.push(ScheduledOperation::new(
                start,
                gate_time,
                Instruction::single_qubit_gate(gate, qubit),
            ))?;
        }
    }

    let start = timeline.measurement_time();
    for measurement in timeline.measurements() {
        schedule.push(ScheduledOperation::new(
            start,
            gate_time,
            Instruction::measure(measurement.qubit, measurement.key.as_str()),
        ))?;
    }

    debug!(
        operations = schedule.len(),
        total_duration = schedule.total_duration(),
        "built schedule"
    );
    Ok(schedule)
}
