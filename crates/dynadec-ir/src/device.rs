//! Hardware constraints an operation can be validated against.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;

/// Gate names a device accepts.
///
/// Names follow the lowercase convention used by [`StandardGate::name`]:
/// `id`, `rx`, `rz`, `prx`, ...
///
/// [`StandardGate::name`]: crate::StandardGate::name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
}

impl GateSet {
    /// Every single-qubit gate a converted sequence can contain.
    pub fn single_qubit_rotations() -> Self {
        Self {
            single_qubit: ["id", "rx", "ry", "rz", "prx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Phased-X plus Z, as found on trapped-ion and some superconducting devices.
    pub fn prx_rz() -> Self {
        Self {
            single_qubit: ["id", "prx", "rz"].into_iter().map(String::from).collect(),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
    }
}

/// A device description limiting which qubits and gates may be scheduled.
///
/// The default device is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Number of addressable qubits, `q0..q{n-1}`. `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_qubits: Option<u32>,
    /// Supported gates. `None` means every gate is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_set: Option<GateSet>,
}

impl Device {
    /// A device that accepts every operation.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Limit the device to `n` qubits.
    #[must_use]
    pub fn with_qubits(mut self, n: u32) -> Self {
        self.num_qubits = Some(n);
        self
    }

    /// Limit the device to a gate set.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.gate_set = Some(gate_set);
        self
    }

    /// Check that an instruction can run on this device.
    pub fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        if let Some(n) = self.num_qubits {
            if let Some(&qubit) = instruction.qubits.iter().find(|q| q.0 >= n) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(instruction.name().to_string()),
                });
            }
        }

        if let (Some(gate_set), Some(gate)) = (&self.gate_set, instruction.as_gate()) {
            if !gate_set.contains(gate.name()) {
                return Err(IrError::UnsupportedGate(gate.name().to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::qubit::QubitId;

    #[test]
    fn test_unconstrained_accepts_everything() {
        let device = Device::unconstrained();
        let inst = Instruction::single_qubit_gate(StandardGate::prx(1.0, 0.2), QubitId(999));
        assert!(device.validate(&inst).is_ok());
    }

    #[test]
    fn test_qubit_limit() {
        let device = Device::unconstrained().with_qubits(2);
        let ok = Instruction::single_qubit_gate(StandardGate::rx(1.0), QubitId(1));
        let bad = Instruction::measure(QubitId(2), "qubit-0");
        assert!(device.validate(&ok).is_ok());
        assert!(matches!(
            device.validate(&bad),
            Err(IrError::QubitNotFound { qubit: QubitId(2), .. })
        ));
    }

    #[test]
    fn test_rotation_gate_set_names() {
        let set = GateSet::single_qubit_rotations();
        for gate in [
            StandardGate::I,
            StandardGate::rx(1.0),
            StandardGate::ry(1.0),
            StandardGate::rz(1.0),
            StandardGate::prx(1.0, 0.5),
        ] {
            assert!(set.contains(gate.name()), "{gate}");
        }
        assert_eq!(set.single_qubit.len(), 5);
    }

    #[test]
    fn test_gate_set_limit() {
        let device = Device::unconstrained().with_gate_set(GateSet::prx_rz());
        let ok = Instruction::single_qubit_gate(StandardGate::rz(1.0), QubitId(0));
        let bad = Instruction::single_qubit_gate(StandardGate::rx(1.0), QubitId(0));
        let measure = Instruction::measure(QubitId(0), "qubit-0");
        assert!(device.validate(&ok).is_ok());
        assert!(device.validate(&measure).is_ok());
        assert!(matches!(device.validate(&bad), Err(IrError::UnsupportedGate(name)) if name == "rx"));
    }
}
