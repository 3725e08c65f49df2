//! Conversion settings and target qubits.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use dynadec_ir::QubitId;

use crate::error::ConfigurationError;

/// Default gate time in seconds.
pub const DEFAULT_GATE_TIME: f64 = 0.1;

/// Settings shared by the circuit and schedule conversions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Duration of every gate slot, in seconds.
    pub gate_time: f64,
    /// Append one measurement per target qubit after the last slot.
    pub add_measurement: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            gate_time: DEFAULT_GATE_TIME,
            add_measurement: false,
        }
    }
}

impl ConversionConfig {
    /// Create a config with the given gate time and no measurement.
    pub fn new(gate_time: f64) -> Self {
        Self {
            gate_time,
            ..Self::default()
        }
    }

    /// Set the gate time.
    #[must_use]
    pub fn with_gate_time(mut self, gate_time: f64) -> Self {
        self.gate_time = gate_time;
        self
    }

    /// Enable or disable trailing measurements.
    #[must_use]
    pub fn with_measurement(mut self, add_measurement: bool) -> Self {
        self.add_measurement = add_measurement;
        self
    }

    /// Check that the gate time is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.gate_time.is_finite() || self.gate_time <= 0.0 {
            return Err(ConfigurationError::InvalidGateTime(self.gate_time));
        }
        Ok(())
    }
}

/// An ordered, non-empty set of distinct qubits.
///
/// Every single-qubit gate of a conversion is applied identically to each
/// of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QubitId>", into = "Vec<QubitId>")]
pub struct TargetQubits(Vec<QubitId>);

impl TargetQubits {
    /// Validate and wrap a list of qubits.
    pub fn new(qubits: &[QubitId]) -> Result<Self, ConfigurationError> {
        if qubits.is_empty() {
            return Err(ConfigurationError::EmptyTargetQubits);
        }
        let mut seen = FxHashSet::default();
        for &qubit in qubits {
            if !seen.insert(qubit) {
                return Err(ConfigurationError::DuplicateTargetQubit(qubit));
            }
        }
        Ok(Self(qubits.to_vec()))
    }

    /// The qubits in order.
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    /// Iterate over the qubits in order.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.0.iter().copied()
    }

    /// Number of qubits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: the set is never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Measurement key for the qubit at `position`: `qubit-{position}`.
    pub fn measurement_key(position: usize) -> String {
        format!("qubit-{position}")
    }
}

impl Default for TargetQubits {
    /// A single qubit, `q0`.
    fn default() -> Self {
        Self(vec![QubitId(0)])
    }
}

impl TryFrom<Vec<QubitId>> for TargetQubits {
    type Error = ConfigurationError;

    fn try_from(qubits: Vec<QubitId>) -> Result<Self, Self::Error> {
        Self::new(&qubits)
    }
}

impl From<TargetQubits> for Vec<QubitId> {
    fn from(qubits: TargetQubits) -> Self {
        qubits.0
    }
}
