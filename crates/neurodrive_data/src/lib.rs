//! Shared data types for the neurodrive workspace.
//!
//! Everything here is plain data: genomes, topology descriptors, activation
//! buffers and the records emitted once per generation. The behavior lives in
//! `neurodrive_core`.

pub mod data;

pub use data::genome::{
    Activations, Genome, Topology, CONTROL_OUTPUTS, OUTPUT_LABELS, SENSOR_INPUTS,
};
pub use data::history::{GenerationReport, LiveEvent, Termination};
