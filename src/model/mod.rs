//! The driving environment: track geometry, the car that implements
//! [`neurodrive_core::Environment`], and the session that ties a car to an
//! evolution engine.

pub mod car;
pub mod session;
pub mod track;

pub use car::Car;
pub use session::{EpisodeOutcome, TrainingSession};
pub use track::{Pose, Track};

pub mod config {
    pub use neurodrive_core::config::*;
}
