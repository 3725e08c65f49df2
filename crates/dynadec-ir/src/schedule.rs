//! Time-tagged operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::device::Device;
use crate::error::IrResult;
use crate::instruction::Instruction;

/// An instruction with an absolute start time and a duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Start time in seconds from the beginning of the schedule.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// The operation.
    pub instruction: Instruction,
}

impl ScheduledOperation {
    /// Create a new scheduled operation.
    pub fn new(start: f64, duration: f64, instruction: Instruction) -> Self {
        Self {
            start,
            duration,
            instruction,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Check if this operation is active at time `t`.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.start <= t && t < self.end()
    }
}

impl fmt::Display for ScheduledOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}-{:.3}ns] {}",
            self.start * 1e9,
            self.end() * 1e9,
            self.instruction
        )
    }
}

/// An ordered collection of scheduled operations.
///
/// Idle time is represented by gaps between operations, not by explicit
/// identity gates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    device: Device,
    operations: Vec<ScheduledOperation>,
}

impl Schedule {
    /// Create an empty schedule on an unconstrained device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty schedule whose operations are validated against `device`.
    pub fn on_device(device: Device) -> Self {
        Self {
            device,
            operations: vec![],
        }
    }

    /// Add an operation, validating it against the schedule's device.
    pub fn push(&mut self, operation: ScheduledOperation) -> IrResult<&mut Self> {
        self.device.validate(&operation.instruction)?;
        self.operations.push(operation);
        Ok(self)
    }

    /// The device operations are validated against.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Operations in insertion order.
    pub fn operations(&self) -> &[ScheduledOperation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Latest end time over all operations, or zero if empty.
    pub fn total_duration(&self) -> f64 {
        self.operations
            .iter()
            .map(ScheduledOperation::end)
            .fold(0.0, f64::max)
    }

    /// Operations active at time `t`.
    pub fn operations_at(&self, t: f64) -> impl Iterator<Item = &ScheduledOperation> {
        self.operations.iter().filter(move |op| op.is_active_at(t))
    }

    /// Serialize the schedule to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "schedule with {} operations", self.operations.len())?;
        for op in &self.operations {
            writeln!(f, "  {op}")?;
        }
        Ok(())
    }
}
