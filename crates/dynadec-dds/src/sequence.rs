//! Dynamical decoupling sequences.

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;
use crate::pulse::Pulse;

/// Read access to a finished pulse sequence.
///
/// This is the boundary with whatever built the sequence. Converters only
/// need the duration and the ordered pulses.
pub trait PulseSequence {
    /// Total duration in seconds.
    fn duration(&self) -> f64;

    /// Pulses ordered by non-decreasing offset.
    fn pulses(&self) -> &[Pulse];

    /// Optional human-readable name, used to label converted circuits.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// A validated dynamical decoupling sequence.
///
/// Construction guarantees a positive duration, at least one pulse, finite
/// values, offsets inside `[0, duration]` in non-decreasing order, and
/// non-negative Rabi rotations. Deserialization runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSequence")]
pub struct DynamicDecouplingSequence {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    duration: f64,
    pulses: Vec<Pulse>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSequence {
    #[serde(default)]
    name: Option<String>,
    duration: f64,
    pulses: Vec<Pulse>,
}

impl TryFrom<RawSequence> for DynamicDecouplingSequence {
    type Error = SequenceError;

    fn try_from(raw: RawSequence) -> Result<Self, Self::Error> {
        let sequence = Self::new(raw.duration, raw.pulses)?;
        Ok(match raw.name {
            Some(name) => sequence.with_name(name),
            None => sequence,
        })
    }
}

impl DynamicDecouplingSequence {
    /// Create a sequence from its duration and pulses.
    pub fn new(duration: f64, pulses: Vec<Pulse>) -> Result<Self, SequenceError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SequenceError::InvalidDuration(duration));
        }
        if pulses.is_empty() {
            return Err(SequenceError::Empty);
        }

        let mut previous = 0.0;
        for (index, pulse) in pulses.iter().enumerate() {
            let fields = [
                ("offset", pulse.offset),
                ("rabi_rotation", pulse.rabi_rotation),
                ("azimuthal_angle", pulse.azimuthal_angle),
                ("detuning_rotation", pulse.detuning_rotation),
            ];
            if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(SequenceError::NonFinite {
                    index,
                    field: *field,
                });
            }
            if pulse.offset < 0.0 || pulse.offset > duration {
                return Err(SequenceError::OffsetOutOfRange {
                    index,
                    offset: pulse.offset,
                    duration,
                });
            }
            if pulse.offset < previous {
                return Err(SequenceError::UnorderedOffsets {
                    index,
                    previous,
                    offset: pulse.offset,
                });
            }
            if pulse.rabi_rotation < 0.0 {
                return Err(SequenceError::NegativeRabiRotation {
                    index,
                    value: pulse.rabi_rotation,
                });
            }
            previous = pulse.offset;
        }

        Ok(Self {
            name: None,
            duration,
            pulses,
        })
    }

    /// Create a sequence from parallel columns, one entry per pulse.
    pub fn from_arrays(
        duration: f64,
        offsets: &[f64],
        rabi_rotations: &[f64],
        azimuthal_angles: &[f64],
        detuning_rotations: &[f64],
    ) -> Result<Self, SequenceError> {
        let expected = offsets.len();
        for (field, column) in [
            ("rabi_rotations", rabi_rotations),
            ("azimuthal_angles", azimuthal_angles),
            ("detuning_rotations", detuning_rotations),
        ] {
            if column.len() != expected {
                return Err(SequenceError::LengthMismatch {
                    field,
                    expected,
                    got: column.len(),
                });
            }
        }

        let pulses = (0..expected)
            .map(|i| {
                Pulse::new(
                    offsets[i],
                    rabi_rotations[i],
                    azimuthal_angles[i],
                    detuning_rotations[i],
                )
            })
            .collect();
        Self::new(duration, pulses)
    }

    /// Attach a name to the sequence.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of pulses.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// Always `false`: a valid sequence has at least one pulse.
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Pulse offsets in order.
    pub fn offsets(&self) -> Vec<f64> {
        self.pulses.iter().map(|p| p.offset).collect()
    }

    /// Rabi rotations in order.
    pub fn rabi_rotations(&self) -> Vec<f64> {
        self.pulses.iter().map(|p| p.rabi_rotation).collect()
    }

    /// Azimuthal angles in order.
    pub fn azimuthal_angles(&self) -> Vec<f64> {
        self.pulses.iter().map(|p| p.azimuthal_angle).collect()
    }

    /// Detuning rotations in order.
    pub fn detuning_rotations(&self) -> Vec<f64> {
        self.pulses.iter().map(|p| p.detuning_rotation).collect()
    }
}

impl PulseSequence for DynamicDecouplingSequence {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
