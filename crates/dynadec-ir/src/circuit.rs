//! Moment-based circuit representation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};
use crate::unitary::Unitary2x2;

/// A set of instructions applied in the same time step on disjoint qubits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    instructions: Vec<Instruction>,
}

impl Moment {
    /// Instructions in this moment.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the moment holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Whether any instruction in this moment is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }
}

/// A quantum circuit as an ordered list of moments.
///
/// Every instruction in a moment must act on qubits declared on the
/// circuit, and no two instructions in a moment may share a qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Moments in time order.
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            moments: vec![],
        }
    }

    /// Create a circuit declaring the given qubits.
    ///
    /// Repeated ids are declared once.
    pub fn with_qubits(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let mut circuit = Self::new(name);
        for id in qubits {
            circuit.add_qubit(id);
        }
        circuit
    }

    /// Declare a qubit. Returns `false` if it was already declared.
    pub fn add_qubit(&mut self, id: QubitId) -> bool {
        if self.contains_qubit(id) {
            return false;
        }
        self.qubits.push(Qubit::new(id));
        true
    }

    /// Whether the qubit is declared on this circuit.
    pub fn contains_qubit(&self, id: QubitId) -> bool {
        self.qubits.iter().any(|q| q.id == id)
    }

    /// Append a moment built from `instructions`.
    ///
    /// Fails without modifying the circuit if an instruction references an
    /// undeclared qubit, has the wrong operand count, or shares a qubit with
    /// another instruction of the same moment.
    pub fn append_moment(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        let instructions: Vec<Instruction> = instructions.into_iter().collect();
        let mut used = FxHashSet::default();

        for inst in &instructions {
            if let Some(gate) = inst.as_gate() {
                let got = inst.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
            }
            for &qubit in &inst.qubits {
                if !self.contains_qubit(qubit) {
                    return Err(IrError::QubitNotFound {
                        qubit,
                        gate_name: Some(inst.name().to_string()),
                    });
                }
                if !used.insert(qubit) {
                    return Err(IrError::DuplicateQubit {
                        qubit,
                        gate_name: Some(inst.name().to_string()),
                    });
                }
            }
        }

        self.moments.push(Moment { instructions });
        Ok(self)
    }

    /// Append a single instruction as its own moment.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.append_moment([instruction])
    }

    /// Apply a gate to every qubit in `qubits` in one moment.
    pub fn broadcast(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append_moment(
            qubits
                .into_iter()
                .map(|q| Instruction::single_qubit_gate(gate, q)),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Moments in time order.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// All instructions, moment by moment.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.moments.iter().flat_map(|m| m.instructions.iter())
    }

    /// Total number of instructions.
    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Get the circuit depth (number of moments).
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Measurement keys in the order they appear.
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.instructions()
            .filter_map(Instruction::measurement_key)
            .collect()
    }

    /// Combined unitary applied to `qubit`, in time order.
    ///
    /// Measurements are ignored.
    pub fn unitary_for(&self, qubit: QubitId) -> IrResult<Unitary2x2> {
        if !self.contains_qubit(qubit) {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: None,
            });
        }
        Ok(self
            .instructions()
            .filter(|inst| inst.qubits.contains(&qubit))
            .filter_map(Instruction::as_gate)
            .fold(Unitary2x2::identity(), |acc, gate| gate.matrix() * acc))
    }

    /// Serialize the circuit to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        writeln!(f, "circuit '{}' on [{}]", self.name, qubits.join(", "))?;
        for (idx, moment) in self.moments.iter().enumerate() {
            let ops: Vec<String> = moment.instructions.iter().map(ToString::to_string).collect();
            writeln!(f, "  {idx:>4}: {}", ops.join(" | "))?;
        }
        Ok(())
    }
}
