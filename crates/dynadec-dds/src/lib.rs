//! Dynamical decoupling sequence conversion
//!
//! Converts a sequence of instantaneous pulses at real-valued offsets into
//! finite-duration gates on a fixed time grid, and presents the result as a
//! [`dynadec_ir::Circuit`] or a [`dynadec_ir::Schedule`].
//!
//! # Overview
//!
//! - [`Pulse`] and [`DynamicDecouplingSequence`] describe the input; any type
//!   implementing [`PulseSequence`] can be converted
//! - [`timeline::convert`] places pulses on gate slots, filling the gaps with
//!   identity entries
//! - [`convert_to_circuit`] lays the timeline out moment by moment
//! - [`convert_to_schedule`] stamps each rotation with its start time
//!
//! # Slot assignment
//!
//! A pulse at `offset` lands in slot `round(offset / gate_time)`, clamped to
//! `[0, slot_count]` where `slot_count = round(duration / gate_time)`.
//! Half-integer quotients round to the lower slot.
//!
//! # Example
//!
//! ```rust
//! use dynadec_dds::{convert_to_schedule, ConversionConfig, DynamicDecouplingSequence, Pulse};
//! use dynadec_ir::QubitId;
//! use std::f64::consts::PI;
//!
//! let offsets = [0.0, 0.25, 0.75, 1.0].map(|f| f * 20e-6);
//! let sequence = DynamicDecouplingSequence::from_arrays(
//!     20e-6,
//!     &offsets,
//!     &[PI / 2.0, PI, PI, PI / 2.0],
//!     &[0.0; 4],
//!     &[0.0; 4],
//! )
//! .unwrap();
//!
//! let config = ConversionConfig::new(0.4e-6).with_measurement(true);
//! let schedule = convert_to_schedule(&sequence, &[QubitId(0)], &config).unwrap();
//!
//! assert_eq!(schedule.len(), 5);
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod pulse;
pub mod schedule;
pub mod sequence;
pub mod timeline;

pub use circuit::{DEFAULT_CIRCUIT_NAME, convert_to_circuit, timeline_to_circuit};
pub use config::{ConversionConfig, DEFAULT_GATE_TIME, TargetQubits};
pub use error::{ConfigurationError, DdsError, DdsResult, SequenceError};
pub use pulse::{ANGLE_TOLERANCE, Pulse, Rotation};
pub use schedule::{convert_to_schedule, convert_to_schedule_on, timeline_to_schedule};
pub use sequence::{DynamicDecouplingSequence, PulseSequence};
pub use timeline::{
    EntryKind, GateTimeline, MAX_SLOT_COUNT, MeasurementEntry, TimelineEntry, build_timeline,
    nearest_slot,
};
