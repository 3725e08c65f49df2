//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::unitary::Unitary2x2;

/// Single-qubit gates a decoupling sequence can be expressed in.
///
/// Angles are concrete radians. A converted sequence never carries
/// symbolic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "lowercase")]
pub enum StandardGate {
    /// Identity gate, used as a one-slot idle.
    #[serde(rename = "id")]
    I,
    /// Rotation around X axis.
    Rx {
        /// Rotation angle.
        theta: f64,
    },
    /// Rotation around Y axis.
    Ry {
        /// Rotation angle.
        theta: f64,
    },
    /// Rotation around Z axis.
    Rz {
        /// Rotation angle.
        theta: f64,
    },
    /// Phased RX gate: PRX(θ, φ) = RZ(φ) · RX(θ) · RZ(-φ).
    #[serde(rename = "prx")]
    PRX {
        /// Rotation angle.
        theta: f64,
        /// Angle of the rotation axis from X in the X-Y plane.
        phi: f64,
    },
}

impl StandardGate {
    /// Rotation around X by `theta`.
    pub fn rx(theta: f64) -> Self {
        StandardGate::Rx { theta }
    }

    /// Rotation around Y by `theta`.
    pub fn ry(theta: f64) -> Self {
        StandardGate::Ry { theta }
    }

    /// Rotation around Z by `theta`.
    pub fn rz(theta: f64) -> Self {
        StandardGate::Rz { theta }
    }

    /// Rotation by `theta` about the X-Y plane axis at angle `phi`.
    pub fn prx(theta: f64, phi: f64) -> Self {
        StandardGate::PRX { theta, phi }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::Rx { .. } => "rx",
            StandardGate::Ry { .. } => "ry",
            StandardGate::Rz { .. } => "rz",
            StandardGate::PRX { .. } => "prx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        1
    }

    /// Whether this gate is the identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, StandardGate::I)
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx { theta } | StandardGate::Ry { theta } | StandardGate::Rz { theta } => {
                vec![theta]
            }
            StandardGate::PRX { theta, phi } => vec![theta, phi],
            StandardGate::I => vec![],
        }
    }

    /// The gate's unitary matrix.
    pub fn matrix(&self) -> Unitary2x2 {
        match *self {
            StandardGate::I => Unitary2x2::identity(),
            StandardGate::Rx { theta } => Unitary2x2::rx(theta),
            StandardGate::Ry { theta } => Unitary2x2::ry(theta),
            StandardGate::Rz { theta } => Unitary2x2::rz(theta),
            StandardGate::PRX { theta, phi } => Unitary2x2::prx(theta, phi),
        }
    }
}

impl std::fmt::Display for StandardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.parameters();
        if params.is_empty() {
            write!(f, "{}", self.name())
        } else {
            let params: Vec<String> = params.iter().map(|p| format!("{p:.6}")).collect();
            write!(f, "{}({})", self.name(), params.join(", "))
        }
    }
}
