//! Self-driving controller training.
//!
//! The genetic algorithm lives in `neurodrive_core`; this crate supplies the
//! environment it is trained against (an annular track and a kinematic car)
//! and the application that runs it.

pub mod app;
pub mod model;

pub use app::{App, RunSummary, ShutdownManager};
pub use model::{Car, EpisodeOutcome, TrainingSession};
