//! Sequence-to-gate-timeline conversion.
//!
//! A [`GateTimeline`] places every pulse of a sequence on a grid of gate
//! slots of width `gate_time`. Slot `k` starts at `k * gate_time`; slots
//! `0..=slot_count` each hold at least one entry, with [`EntryKind::Idle`]
//! filling the slots no pulse lands on.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use dynadec_ir::{QubitId, StandardGate};

use crate::config::{ConversionConfig, TargetQubits};
use crate::error::{ConfigurationError, DdsResult, SequenceError};
use crate::pulse::Rotation;
use crate::sequence::PulseSequence;

/// Width of the tie window around a half-integer, in units of the quotient's
/// float resolution.
const TIE_ULPS: f64 = 16.0;

/// Largest slot index a timeline may have.
pub const MAX_SLOT_COUNT: u64 = 100_000_000;

/// Round a non-negative slot quotient to the nearest slot index.
///
/// Half-integer quotients round toward the lower slot. Quotients within a
/// few ULPs of a half-integer are treated as ties, so rounding noise in
/// `offset / gate_time` cannot push a tie up a slot. Negative or NaN
/// quotients map to slot 0.
pub fn nearest_slot(quotient: f64) -> u64 {
    let quotient = quotient.max(0.0);
    let lower = quotient.floor();
    let slack = TIE_ULPS * f64::EPSILON * quotient.max(1.0);
    if quotient - lower > 0.5 + slack {
        (lower + 1.0) as u64
    } else {
        lower as u64
    }
}

/// What a timeline entry does during its slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// A rotation derived from one pulse.
    Rotation(Rotation),
    /// Identity for one slot.
    Idle,
}

/// One slot-anchored entry of a [`GateTimeline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// Slot index; the entry starts at `slot * gate_time`.
    pub slot: u64,
    /// Index of the pulse this entry came from, `None` for slot fillers.
    pub pulse_index: Option<usize>,
    /// Offset of that pulse in seconds, `None` for slot fillers.
    pub offset: Option<f64>,
    /// Rotation or idle.
    pub kind: EntryKind,
}

impl TimelineEntry {
    fn filler(slot: u64) -> Self {
        Self {
            slot,
            pulse_index: None,
            offset: None,
            kind: EntryKind::Idle,
        }
    }

    /// Whether this entry is an identity.
    pub fn is_idle(&self) -> bool {
        matches!(self.kind, EntryKind::Idle)
    }

    /// The rotation, if any.
    pub fn rotation(&self) -> Option<&Rotation> {
        match &self.kind {
            EntryKind::Rotation(rotation) => Some(rotation),
            EntryKind::Idle => None,
        }
    }

    /// The gate implementing this entry; idle entries map to `id`.
    pub fn gate(&self) -> StandardGate {
        match &self.kind {
            EntryKind::Rotation(rotation) => rotation.gate(),
            EntryKind::Idle => StandardGate::I,
        }
    }
}

/// A measurement appended after the last slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementEntry {
    /// Measured qubit.
    pub qubit: QubitId,
    /// Result key, `qubit-{i}` for the `i`-th target qubit.
    pub key: String,
}

/// A sequence discretized onto gate slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateTimeline {
    gate_time: f64,
    slot_count: u64,
    qubits: TargetQubits,
    entries: Vec<TimelineEntry>,
    measurements: Vec<MeasurementEntry>,
}

impl GateTimeline {
    /// Duration of one slot, in seconds.
    pub fn gate_time(&self) -> f64 {
        self.gate_time
    }

    /// Index of the last slot.
    pub fn slot_count(&self) -> u64 {
        self.slot_count
    }

    /// Qubits every entry applies to.
    pub fn qubits(&self) -> &TargetQubits {
        &self.qubits
    }

    /// Entries in time order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Trailing measurements, empty unless requested.
    pub fn measurements(&self) -> &[MeasurementEntry] {
        &self.measurements
    }

    /// Number of entries, measurements excluded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: slot 0 always has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start time of `slot`, in seconds.
    pub fn start_time(&self, slot: u64) -> f64 {
        slot as f64 * self.gate_time
    }

    /// Start time of the measurements: one slot after the last slot.
    pub fn measurement_time(&self) -> f64 {
        self.start_time(self.slot_count + 1)
    }

    /// Number of rotation entries.
    pub fn rotation_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_idle()).count()
    }

    /// Number of idle entries, fillers and zero pulses alike.
    pub fn idle_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_idle()).count()
    }

    /// Largest distance between a pulse's offset and the start of its slot.
    pub fn max_offset_error(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|e| e.offset.map(|offset| (offset - self.start_time(e.slot)).abs()))
            .fold(0.0, f64::max)
    }
}

struct Assignment {
    slot: u64,
    index: usize,
    offset: f64,
    rotation: Option<Rotation>,
}

/// Discretize `sequence` onto gate slots of `config.gate_time`.
///
/// All inputs are validated before anything is built:
///
/// - `gate_time` and the sequence duration must be positive and finite
/// - `duration / gate_time` must round to at most [`MAX_SLOT_COUNT`] slots
/// - `target_qubits` must be non-empty and duplicate-free
/// - every pulse must have at most one of `rabi_rotation` and
///   `detuning_rotation` non-zero
///
/// Pulses rounding to the same slot are emitted in sequence order as
/// consecutive entries of that slot.
#[instrument(skip_all, fields(pulses = sequence.pulses().len(), gate_time = config.gate_time))]
pub fn convert<S: PulseSequence + ?Sized>(
    sequence: &S,
    target_qubits: &[QubitId],
    config: &ConversionConfig,
) -> DdsResult<GateTimeline> {
    config.validate()?;
    let duration = sequence.duration();
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ConfigurationError::InvalidDuration(duration).into());
    }
    let qubits = TargetQubits::new(target_qubits)?;
    let pulses = sequence.pulses();
    if pulses.is_empty() {
        return Err(SequenceError::Empty.into());
    }

    let gate_time = config.gate_time;
    let quotient = duration / gate_time;
    if !quotient.is_finite() {
        return Err(ConfigurationError::InvalidGateTime(gate_time).into());
    }
    let slot_count = nearest_slot(quotient);
    if slot_count > MAX_SLOT_COUNT {
        return Err(ConfigurationError::TooManySlots {
            gate_time,
            slot_count,
            max: MAX_SLOT_COUNT,
        }
        .into());
    }

    let mut assignments = pulses
        .iter()
        .enumerate()
        .map(|(index, pulse)| {
            let slot = nearest_slot(pulse.offset / gate_time).min(slot_count);
            trace!(index, offset = pulse.offset, slot, "assigned pulse");
            Ok(Assignment {
                slot,
                index,
                offset: pulse.offset,
                rotation: pulse.rotation(index)?,
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;
    // Stable, so pulses sharing a slot keep their sequence order.
    assignments.sort_by_key(|a| a.slot);

    let mut entries = Vec::with_capacity(assignments.len());
    let mut pending = assignments.into_iter().peekable();
    for slot in 0..=slot_count {
        let mut claimed = false;
        while let Some(a) = pending.next_if(|a| a.slot == slot) {
            entries.push(TimelineEntry {
                slot,
                pulse_index: Some(a.index),
                offset: Some(a.offset),
                kind: a.rotation.map_or(EntryKind::Idle, EntryKind::Rotation),
            });
            claimed = true;
        }
        if !claimed {
            entries.push(TimelineEntry::filler(slot));
        }
    }

    let measurements = if config.add_measurement {
        qubits
            .iter()
            .enumerate()
            .map(|(position, qubit)| MeasurementEntry {
                qubit,
                key: TargetQubits::measurement_key(position),
            })
            .collect()
    } else {
        vec![]
    };

    let timeline = GateTimeline {
        gate_time,
        slot_count,
        qubits,
        entries,
        measurements,
    };
    debug!(
        slot_count,
        entries = timeline.len(),
        rotations = timeline.rotation_count(),
        measurements = timeline.measurements.len(),
        "built gate timeline"
    );
    Ok(timeline)
}

/// [`convert`] with the settings given as separate arguments.
pub fn build_timeline<S: PulseSequence + ?Sized>(
    sequence: &S,
    target_qubits: &[QubitId],
    gate_time: f64,
    add_measurement: bool,
) -> DdsResult<GateTimeline> {
    let config = ConversionConfig::new(gate_time).with_measurement(add_measurement);
    convert(sequence, target_qubits, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdsError;
    use crate::pulse::Pulse;
    use crate::sequence::DynamicDecouplingSequence;
    use std::f64::consts::PI;

    fn q0() -> Vec<QubitId> {
        vec![QubitId(0)]
    }

    #[test]
    fn test_nearest_slot() {
        assert_eq!(nearest_slot(0.0), 0);
        assert_eq!(nearest_slot(3.125), 3);
        assert_eq!(nearest_slot(18.75), 19);
        assert_eq!(nearest_slot(49.999_999_999_999_99), 50);
        assert_eq!(nearest_slot(-0.3), 0);
        assert_eq!(nearest_slot(f64::NAN), 0);
    }

    #[test]
    fn test_nearest_slot_ties_round_down() {
        assert_eq!(nearest_slot(0.5), 0);
        assert_eq!(nearest_slot(12.5), 12);
        assert_eq!(nearest_slot(37.5 + 4.0 * f64::EPSILON * 37.5), 37);
        assert_eq!(nearest_slot(12.5 + 1e-6), 13);
    }

    #[test]
    fn test_nearest_slot_large_quotients() {
        assert_eq!(nearest_slot(1_000_000.5009), 1_000_001);
        assert_eq!(nearest_slot(10_000_000.505), 10_000_001);
        assert_eq!(nearest_slot(99_999_999.500_001), 100_000_000);
        assert_eq!(nearest_slot(1_000_000.5), 1_000_000);
    }

    #[test]
    fn test_fillers_cover_every_slot() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.5, PI)]).unwrap();
        let timeline = build_timeline(&seq, &q0(), 0.25, false).unwrap();

        assert_eq!(timeline.slot_count(), 4);
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline.rotation_count(), 1);
        assert_eq!(timeline.idle_count(), 4);
        let slots: Vec<u64> = timeline.entries().iter().map(|e| e.slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4]);
        assert_eq!(timeline.entries()[2].pulse_index, Some(0));
        assert_eq!(timeline.entries()[2].gate(), StandardGate::rx(PI));
        assert!(timeline.measurements().is_empty());
    }

    #[test]
    fn test_shared_slot_keeps_order() {
        let seq = DynamicDecouplingSequence::new(
            1.0,
            vec![Pulse::x(0.49, PI), Pulse::y(0.51, PI)],
        )
        .unwrap();
        let timeline = build_timeline(&seq, &q0(), 0.5, false).unwrap();

        assert_eq!(timeline.slot_count(), 2);
        assert_eq!(timeline.len(), 4);
        let at_one: Vec<_> = timeline
            .entries()
            .iter()
            .filter(|e| e.slot == 1)
            .map(|e| e.pulse_index)
            .collect();
        assert_eq!(at_one, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_zero_pulse_claims_slot_as_idle() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::idle(0.5)]).unwrap();
        let timeline = build_timeline(&seq, &q0(), 0.5, false).unwrap();

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.rotation_count(), 0);
        assert!(timeline.entries()[1].is_idle());
        assert_eq!(timeline.entries()[1].pulse_index, Some(0));
    }

    #[test]
    fn test_gate_time_longer_than_duration() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.0, PI), Pulse::x(1.0, PI)])
            .unwrap();
        let timeline = build_timeline(&seq, &q0(), 5.0, false).unwrap();

        assert_eq!(timeline.slot_count(), 0);
        assert_eq!(timeline.len(), 2);
        assert!(timeline.entries().iter().all(|e| e.slot == 0));
    }

    #[test]
    fn test_measurements() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.5, PI)]).unwrap();
        let timeline = build_timeline(&seq, &[QubitId(4), QubitId(2)], 0.5, true).unwrap();

        assert_eq!(
            timeline.measurements(),
            &[
                MeasurementEntry {
                    qubit: QubitId(4),
                    key: "qubit-0".into()
                },
                MeasurementEntry {
                    qubit: QubitId(2),
                    key: "qubit-1".into()
                },
            ]
        );
        assert_eq!(timeline.measurement_time(), 1.5);
    }

    #[test]
    fn test_offset_error() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.3, PI)]).unwrap();
        let timeline = build_timeline(&seq, &q0(), 0.25, false).unwrap();
        assert!((timeline.max_offset_error() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_validation_errors() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.5, PI)]).unwrap();

        let err = build_timeline(&seq, &q0(), 0.0, false).unwrap_err();
        assert!(matches!(
            err,
            DdsError::Configuration(ConfigurationError::InvalidGateTime(_))
        ));
        assert_eq!(err.to_string(), "gate_time must be positive, got 0");

        let err = build_timeline(&seq, &[], 0.1, false).unwrap_err();
        assert!(matches!(
            err,
            DdsError::Configuration(ConfigurationError::EmptyTargetQubits)
        ));

        let err = build_timeline(&seq, &[QubitId(0), QubitId(0)], 0.1, false).unwrap_err();
        assert!(err.is_configuration());

        let err = build_timeline(&seq, &q0(), f64::MIN_POSITIVE, false).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_slot_count_is_capped() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::x(0.5, PI)]).unwrap();

        let err = build_timeline(&seq, &q0(), 1e-15, false).unwrap_err();
        assert!(matches!(
            err,
            DdsError::Configuration(ConfigurationError::TooManySlots {
                max: MAX_SLOT_COUNT,
                ..
            })
        ));
        assert!(err.to_string().contains("exceeding the limit of 100000000"));

        let err = build_timeline(&seq, &q0(), 1e-300, false).unwrap_err();
        assert!(matches!(
            err,
            DdsError::Configuration(ConfigurationError::TooManySlots { .. })
        ));
    }

    struct RawPulses {
        duration: f64,
        pulses: Vec<Pulse>,
    }

    impl PulseSequence for RawPulses {
        fn duration(&self) -> f64 {
            self.duration
        }

        fn pulses(&self) -> &[Pulse] {
            &self.pulses
        }
    }

    #[test]
    fn test_foreign_sequence_is_validated() {
        let bad_duration = RawPulses {
            duration: -1.0,
            pulses: vec![Pulse::x(0.0, PI)],
        };
        let err = build_timeline(&bad_duration, &q0(), 0.1, false).unwrap_err();
        assert!(matches!(
            err,
            DdsError::Configuration(ConfigurationError::InvalidDuration(_))
        ));

        let empty = RawPulses {
            duration: 1.0,
            pulses: vec![],
        };
        let err = build_timeline(&empty, &q0(), 0.1, false).unwrap_err();
        assert!(matches!(err, DdsError::Sequence(SequenceError::Empty)));
    }

    #[test]
    fn test_foreign_sequence_out_of_range_is_clamped() {
        let raw = RawPulses {
            duration: 1.0,
            pulses: vec![Pulse::x(3.0, PI), Pulse::y(-1.0, PI)],
        };
        let timeline = build_timeline(&raw, &q0(), 0.5, false).unwrap();

        assert_eq!(timeline.entries()[0].pulse_index, Some(1));
        assert_eq!(timeline.entries().last().map(|e| e.slot), Some(2));
        assert_eq!(timeline.entries().last().and_then(|e| e.pulse_index), Some(0));
    }

    #[test]
    fn test_serialize() {
        let seq = DynamicDecouplingSequence::new(1.0, vec![Pulse::z(1.0, PI)]).unwrap();
        let timeline = build_timeline(&seq, &q0(), 1.0, false).unwrap();
        let json = serde_json::to_value(&timeline).unwrap();

        assert_eq!(json["slot_count"], 1);
        assert_eq!(json["entries"][0]["kind"]["type"], "idle");
        assert_eq!(json["entries"][1]["kind"]["type"], "rotation");
        assert_eq!(json["entries"][1]["kind"]["axis"], "z");
    }
}
