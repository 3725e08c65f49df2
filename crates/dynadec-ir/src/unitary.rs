//! Single-qubit unitary algebra.
//!
//! Gates in a converted sequence are all single-qubit, so their combined
//! action on one qubit is a product of 2x2 unitaries. This is enough to
//! check that a decoupling sequence returns a qubit to where it started.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-9;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        let exp_neg = Complex64::from_polar(1.0, -theta / 2.0);
        let exp_pos = Complex64::from_polar(1.0, theta / 2.0);
        Self::new(
            exp_neg,
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            exp_pos,
        )
    }

    /// Create a phased-X rotation: `RZ(phi) · RX(theta) · RZ(-phi)`.
    ///
    /// This is a rotation by `theta` about the axis in the X-Y plane at
    /// angle `phi` from X.
    pub fn prx(theta: f64, phi: f64) -> Self {
        Self::rz(phi) * Self::rx(theta) * Self::rz(-phi)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;

        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }

        (a - d).norm() < EPSILON
    }

    /// Check whether two unitaries agree up to a global phase.
    pub fn approx_eq_up_to_phase(&self, other: &Self) -> bool {
        (self.dagger() * *other).is_identity()
    }

    /// Probability of measuring |0⟩ after applying this unitary to |0⟩.
    pub fn ground_state_probability(&self) -> f64 {
        self.data[0].norm_sqr()
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identity() {
        assert!(Unitary2x2::identity().is_identity());
    }

    #[test]
    fn test_pi_rotations_squared() {
        for u in [Unitary2x2::rx(PI), Unitary2x2::ry(PI), Unitary2x2::rz(PI)] {
            assert!((u * u).is_identity());
        }
    }

    #[test]
    fn test_full_turn_is_identity_up_to_phase() {
        // RX(2π) = -I
        assert!(Unitary2x2::rx(2.0 * PI).is_identity());
        assert!(Unitary2x2::ry(2.0 * PI).is_identity());
        assert!(Unitary2x2::rz(2.0 * PI).is_identity());
    }

    #[test]
    fn test_pi_rotations_match_paulis() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let x = Unitary2x2::new(zero, one, one, zero);
        let y = Unitary2x2::new(zero, -i, i, zero);
        let z = Unitary2x2::new(one, zero, zero, -one);

        assert!(Unitary2x2::rx(PI).approx_eq_up_to_phase(&x));
        assert!(Unitary2x2::ry(PI).approx_eq_up_to_phase(&y));
        assert!(Unitary2x2::rz(PI).approx_eq_up_to_phase(&z));
    }

    #[test]
    fn test_prx_reduces_to_rx_and_ry() {
        let theta = 0.37;
        assert!(Unitary2x2::prx(theta, 0.0).approx_eq_up_to_phase(&Unitary2x2::rx(theta)));
        assert!(Unitary2x2::prx(theta, FRAC_PI_2).approx_eq_up_to_phase(&Unitary2x2::ry(theta)));
        assert!(Unitary2x2::prx(theta, PI).approx_eq_up_to_phase(&Unitary2x2::rx(-theta)));
    }

    #[test]
    fn test_ground_state_probability() {
        assert!((Unitary2x2::identity().ground_state_probability() - 1.0).abs() < EPSILON);
        assert!(Unitary2x2::rx(PI).ground_state_probability() < EPSILON);
        assert!((Unitary2x2::rx(FRAC_PI_2).ground_state_probability() - 0.5).abs() < EPSILON);
    }
}
