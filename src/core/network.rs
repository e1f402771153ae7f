//! Neural-network puzzle: neurons with defects and excitation, and the
//! condition a network must meet to count as solved.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::neuron::{DefectFlags, NeuronExcitation, SignalDirection};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A single node of the puzzle network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Neuron {
    #[serde(default)]
    defects: DefectFlags,
    #[serde(default)]
    excitation: NeuronExcitation,
    #[serde(default)]
    signal_direction: SignalDirection,
}

impl Neuron {
    /// A healthy neuron at normal excitation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defects(mut self, defects: DefectFlags) -> Self {
        self.defects = defects;
        self
    }

    pub fn with_excitation(mut self, excitation: NeuronExcitation) -> Self {
        self.excitation = excitation;
        self
    }

    pub fn with_signal_direction(mut self, direction: SignalDirection) -> Self {
        self.signal_direction = direction;
        self
    }

    pub fn defects(&self) -> DefectFlags {
        self.defects
    }

    pub fn excitation(&self) -> NeuronExcitation {
        self.excitation
    }

    pub fn signal_direction(&self) -> SignalDirection {
        self.signal_direction
    }

    pub fn set_defects(&mut self, defects: DefectFlags) {
        self.defects = defects;
    }

    pub fn set_excitation(&mut self, excitation: NeuronExcitation) {
        self.excitation = excitation;
    }

    pub fn set_signal_direction(&mut self, direction: SignalDirection) {
        self.signal_direction = direction;
    }

    pub fn add_defect(&mut self, defects: DefectFlags) {
        self.defects.insert(defects);
    }

    pub fn remove_defect(&mut self, defects: DefectFlags) {
        self.defects.remove(defects);
    }
}

/// What every neuron of a network must reach for the network to be solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionCondition {
    #[serde(default)]
    pub excitation: NeuronExcitation,
    /// Defects a neuron may carry and still count as complete.
    #[serde(default)]
    pub ignored_defects: DefectFlags,
}

impl CompletionCondition {
    pub fn new(excitation: NeuronExcitation, ignored_defects: DefectFlags) -> Self {
        Self {
            excitation,
            ignored_defects,
        }
    }

    pub fn is_satisfied_by(&self, neuron: &Neuron) -> bool {
        neuron.excitation == self.excitation
            && (neuron.defects & !self.ignored_defects).is_nothing()
    }
}

/// A group of neurons evaluated together against one condition.
///
/// Only the direct neurons are evaluated. Completion is recomputed on
/// every query, so it always reflects the current neuron state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeuralNetwork {
    #[serde(default)]
    neurons: Vec<Neuron>,
    #[serde(default)]
    condition: CompletionCondition,
}

impl NeuralNetwork {
    pub fn new(condition: CompletionCondition) -> Self {
        Self {
            neurons: Vec::new(),
            condition,
        }
    }

    pub fn with_neurons(mut self, neurons: Vec<Neuron>) -> Self {
        self.neurons = neurons;
        self
    }

    pub fn push(&mut self, neuron: Neuron) {
        self.neurons.push(neuron);
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    pub fn neuron_mut(&mut self, index: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(index)
    }

    pub fn condition(&self) -> &CompletionCondition {
        &self.condition
    }

    pub fn set_condition(&mut self, condition: CompletionCondition) {
        self.condition = condition;
    }

    /// True when every neuron satisfies the condition. A network with no
    /// neurons is complete.
    pub fn is_completed(&self) -> bool {
        self.neurons
            .iter()
            .all(|neuron| self.condition.is_satisfied_by(neuron))
    }

    pub fn load_from_ron(path: &Path) -> Result<NeuralNetwork, NetworkError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<NeuralNetwork, NetworkError> {
        Ok(ron::from_str(input)?)
    }
}
