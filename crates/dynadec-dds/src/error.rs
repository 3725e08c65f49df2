//! Error types for sequence conversion.

use dynadec_ir::{IrError, QubitId};
use thiserror::Error;

/// Invalid or contradictory conversion input.
///
/// Raised eagerly, before any part of a timeline is built.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// `gate_time` is zero, negative or not finite.
    #[error("gate_time must be positive, got {0}")]
    InvalidGateTime(f64),

    /// `gate_time` is so small that the timeline would need too many slots.
    #[error("gate_time {gate_time} gives {slot_count} slots, exceeding the limit of {max}")]
    TooManySlots {
        /// The requested slot duration.
        gate_time: f64,
        /// Index of the last slot at that duration.
        slot_count: u64,
        /// Largest slot index allowed.
        max: u64,
    },

    /// The sequence duration is zero, negative or not finite.
    #[error("duration must be positive, got {0}")]
    InvalidDuration(f64),

    /// No target qubits were given.
    #[error("target_qubits must not be empty")]
    EmptyTargetQubits,

    /// A target qubit was listed twice.
    #[error("target_qubits lists {0} more than once")]
    DuplicateTargetQubit(QubitId),

    /// A pulse asks for an X-Y rotation and a Z rotation at once.
    #[error(
        "pulse {index} specifies both rabi_rotation ({rabi_rotation}) and detuning_rotation ({detuning_rotation})"
    )]
    ConflictingRotation {
        /// Position of the pulse in the sequence.
        index: usize,
        /// The pulse's Rabi rotation.
        rabi_rotation: f64,
        /// The pulse's detuning rotation.
        detuning_rotation: f64,
    },
}

/// Errors raised while constructing a [`DynamicDecouplingSequence`].
///
/// [`DynamicDecouplingSequence`]: crate::DynamicDecouplingSequence
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SequenceError {
    /// Duration is zero, negative or not finite.
    #[error("sequence duration must be positive, got {0}")]
    InvalidDuration(f64),

    /// The sequence has no pulses.
    #[error("sequence must contain at least one pulse")]
    Empty,

    /// A pulse lies outside `[0, duration]`.
    #[error("pulse {index} has offset {offset} outside [0, {duration}]")]
    OffsetOutOfRange {
        /// Position of the pulse.
        index: usize,
        /// The offending offset.
        offset: f64,
        /// Sequence duration.
        duration: f64,
    },

    /// Offsets decrease between two consecutive pulses.
    #[error("pulse {index} has offset {offset} before the previous offset {previous}")]
    UnorderedOffsets {
        /// Position of the pulse.
        index: usize,
        /// Offset of the preceding pulse.
        previous: f64,
        /// The offending offset.
        offset: f64,
    },

    /// A Rabi rotation is negative.
    #[error("pulse {index} has negative rabi_rotation {value}")]
    NegativeRabiRotation {
        /// Position of the pulse.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A pulse field is NaN or infinite.
    #[error("pulse {index} has non-finite {field}")]
    NonFinite {
        /// Position of the pulse.
        index: usize,
        /// Name of the field.
        field: &'static str,
    },

    /// Column arrays passed to `from_arrays` differ in length.
    #[error("{field} has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the mismatched column.
        field: &'static str,
        /// Number of offsets.
        expected: usize,
        /// Length of the mismatched column.
        got: usize,
    },
}

/// Any error a conversion can return.
///
/// Errors from collaborators (sequence construction, the gate model) are
/// surfaced as they were raised.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DdsError {
    /// Invalid conversion input.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Invalid sequence.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Rejected by the circuit or schedule model.
    #[error(transparent)]
    Ir(#[from] IrError),
}

impl DdsError {
    /// Whether this error is a [`ConfigurationError`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, DdsError::Configuration(_))
    }
}

/// Result type for conversion operations.
pub type DdsResult<T> = Result<T, DdsError>;
