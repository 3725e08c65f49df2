//! Pulses and the rotation gate each one maps to.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use dynadec_ir::StandardGate;

use crate::error::ConfigurationError;

/// Angles with magnitude at or below this are treated as zero.
pub const ANGLE_TOLERANCE: f64 = 1e-8;

fn is_zero(angle: f64) -> bool {
    angle.abs() <= ANGLE_TOLERANCE
}

/// An instantaneous control operation at a time offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Position in the sequence, in seconds.
    pub offset: f64,
    /// Rotation magnitude in the X-Y plane, in radians.
    #[serde(default)]
    pub rabi_rotation: f64,
    /// Direction of the Rabi rotation axis, measured from X.
    #[serde(default)]
    pub azimuthal_angle: f64,
    /// Rotation magnitude about Z, in radians.
    #[serde(default)]
    pub detuning_rotation: f64,
}

impl Pulse {
    /// Create a pulse from its four components.
    pub fn new(offset: f64, rabi_rotation: f64, azimuthal_angle: f64, detuning_rotation: f64) -> Self {
        Self {
            offset,
            rabi_rotation,
            azimuthal_angle,
            detuning_rotation,
        }
    }

    /// A rotation about X.
    pub fn x(offset: f64, angle: f64) -> Self {
        Self::new(offset, angle, 0.0, 0.0)
    }

    /// A rotation about Y.
    pub fn y(offset: f64, angle: f64) -> Self {
        Self::new(offset, angle, FRAC_PI_2, 0.0)
    }

    /// A rotation about Z.
    pub fn z(offset: f64, angle: f64) -> Self {
        Self::new(offset, 0.0, 0.0, angle)
    }

    /// A pulse with no rotation at all.
    pub fn idle(offset: f64) -> Self {
        Self::new(offset, 0.0, 0.0, 0.0)
    }

    /// Decide which single-axis rotation this pulse performs.
    ///
    /// | rabi | detuning | result |
    /// |------|----------|--------|
    /// | 0 | 0 | `None` (idle) |
    /// | 0 | ≠0 | `Z(detuning)` |
    /// | ≠0 | 0 | `X`, `Y` or `Phased`, by azimuthal angle |
    /// | ≠0 | ≠0 | [`ConfigurationError::ConflictingRotation`] |
    ///
    /// `index` is the pulse's position in its sequence and only feeds the
    /// error message.
    pub fn rotation(&self, index: usize) -> Result<Option<Rotation>, ConfigurationError> {
        match (is_zero(self.rabi_rotation), is_zero(self.detuning_rotation)) {
            (true, true) => Ok(None),
            (true, false) => Ok(Some(Rotation::Z {
                angle: self.detuning_rotation,
            })),
            (false, true) => Ok(Some(Rotation::in_plane(
                self.rabi_rotation,
                self.azimuthal_angle,
            ))),
            (false, false) => Err(ConfigurationError::ConflictingRotation {
                index,
                rabi_rotation: self.rabi_rotation,
                detuning_rotation: self.detuning_rotation,
            }),
        }
    }
}

/// A single-axis rotation derived from a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "axis", rename_all = "lowercase")]
pub enum Rotation {
    /// Rotation about X.
    X {
        /// Rotation angle.
        angle: f64,
    },
    /// Rotation about Y.
    Y {
        /// Rotation angle.
        angle: f64,
    },
    /// Rotation about Z.
    Z {
        /// Rotation angle.
        angle: f64,
    },
    /// Rotation about the X-Y plane axis at angle `phi` from X.
    Phased {
        /// Rotation angle.
        theta: f64,
        /// Axis direction.
        phi: f64,
    },
}

impl Rotation {
    /// Rotation by `theta` about the in-plane axis at `phi`, reduced to a
    /// pure X or Y rotation when `phi` is 0 or π/2.
    pub fn in_plane(theta: f64, phi: f64) -> Self {
        if is_zero(phi) {
            Rotation::X { angle: theta }
        } else if is_zero(phi - FRAC_PI_2) {
            Rotation::Y { angle: theta }
        } else {
            Rotation::Phased { theta, phi }
        }
    }

    /// Rotation magnitude.
    pub fn angle(&self) -> f64 {
        match *self {
            Rotation::X { angle } | Rotation::Y { angle } | Rotation::Z { angle } => angle,
            Rotation::Phased { theta, .. } => theta,
        }
    }

    /// The gate implementing this rotation.
    pub fn gate(&self) -> StandardGate {
        match *self {
            Rotation::X { angle } => StandardGate::rx(angle),
            Rotation::Y { angle } => StandardGate::ry(angle),
            Rotation::Z { angle } => StandardGate::rz(angle),
            Rotation::Phased { theta, phi } => StandardGate::prx(theta, phi),
        }
    }
}
