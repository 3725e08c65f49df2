//! Dynadec gate model
//!
//! The target representation for decoupling-sequence conversions: qubits,
//! single-qubit gates, moment-based circuits and time-tagged schedules.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit on a line
//! - **Gates**: [`StandardGate`] covers identity, Paulis, `Rx`/`Ry`/`Rz` and
//!   the phased-X rotation `PRX(θ, φ)`
//! - **Instructions**: [`Instruction`] combines a gate or a keyed measurement
//!   with its operands
//! - **Circuit**: [`Circuit`] is an ordered list of [`Moment`]s
//! - **Schedule**: [`Schedule`] holds [`ScheduledOperation`]s with absolute
//!   start times, optionally validated against a [`Device`]
//! - **Unitaries**: [`Unitary2x2`] composes single-qubit gates
//!
//! # Example
//!
//! ```rust
//! use dynadec_ir::{Circuit, Instruction, QubitId, StandardGate};
//! use std::f64::consts::PI;
//!
//! let q = QubitId(0);
//! let mut circuit = Circuit::with_qubits("echo", [q]);
//! circuit
//!     .broadcast(StandardGate::rx(PI), [q])
//!     .unwrap()
//!     .broadcast(StandardGate::I, [q])
//!     .unwrap()
//!     .broadcast(StandardGate::rx(PI), [q])
//!     .unwrap()
//!     .append(Instruction::measure(q, "qubit-0"))
//!     .unwrap();
//!
//! assert_eq!(circuit.depth(), 4);
//! assert!(circuit.unitary_for(q).unwrap().is_identity());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Description |
//! |------|-------------|
//! | `id` | Identity, one idle slot |
//! | `x`, `y`, `z` | Pauli gates |
//! | `rx`, `ry`, `rz` | Rotation gates |
//! | `prx` | Rotation about an axis in the X-Y plane |

pub mod circuit;
pub mod device;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod schedule;
pub mod unitary;

pub use circuit::{Circuit, Moment};
pub use device::{Device, GateSet};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
pub use schedule::{Schedule, ScheduledOperation};
pub use unitary::Unitary2x2;
