pub mod dialogue;
pub mod neuron;
pub mod tag;
