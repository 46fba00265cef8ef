//! Core data structures for the neurodrive simulation.

pub mod genome;
pub mod history;
