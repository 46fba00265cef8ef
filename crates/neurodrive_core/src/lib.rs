//! # Neurodrive Core
//!
//! Evolves small feed-forward controllers with a generational genetic
//! algorithm. Fitness comes from an external environment that drives one
//! genome at a time.
//!
//! This crate contains:
//! - Fixed-topology genome networks and their deterministic forward pass
//! - The evolution engine (sort, select, crossover, mutate, repopulate)
//! - The `Environment` / `PopulationCoordinator` contract
//! - Configuration, typed errors, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use neurodrive_core::genome::GenomeLogic;
//! use neurodrive_data::{Genome, Topology};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let topology = Topology { hidden_layers: 1, hidden_neurons: 10 };
//! let genome = Genome::new_random_with_rng(&topology, &mut rng).expect("valid topology");
//!
//! let (throttle, steering) = genome.infer(0.5, 1.0, 0.5);
//! assert!(throttle > 0.0 && throttle < 1.0);
//! assert!(steering > -1.0 && steering < 1.0);
//! ```

/// Configuration management for training runs
pub mod config;
/// Environment and coordinator traits
pub mod coordinator;
/// Generational genetic algorithm
pub mod engine;
/// Typed errors
pub mod error;
/// Genome network logic: init, inference, crossover, mutation
pub mod genome;
/// Run metrics and structured logging
pub mod metrics;
/// Seedable randomness helpers
pub mod rng;

pub use config::AppConfig;
pub use coordinator::{Advance, Environment, PopulationCoordinator};
pub use engine::{EvolutionEngine, GenePool};
pub use error::{EngineError, Result};
pub use genome::GenomeLogic;
pub use metrics::{init_logging, Metrics};
pub use neurodrive_data::{GenerationReport, Genome, Termination, Topology};
