//! Configuration management for training runs.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Everything is validated once at startup; an
//! invalid configuration never reaches the engine.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags (seed and generation limit only)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [network]
//! hidden_layers = 1
//! hidden_neurons = 10
//!
//! [evolution]
//! population_size = 85
//! mutation_rate = 0.055
//! best_agent_selection_count = 8
//! worst_agent_selection_count = 3
//! number_to_crossover = 40
//!
//! [simulation]
//! seed = 42
//! ```

use crate::error::{ensure_config, EngineError, Result};
use crate::genome::topology::checked_topology;
use neurodrive_data::Topology;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of every network in the population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Configured hidden layer count `L`; the network evaluates `L + 1`.
    pub hidden_layers: usize,
    /// Hidden layer width `H`.
    pub hidden_neurons: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_layers: 1,
            hidden_neurons: 10,
        }
    }
}

impl NetworkConfig {
    /// Validates the shape and returns it as a [`Topology`].
    pub fn topology(&self) -> Result<Topology> {
        checked_topology(self.hidden_layers, self.hidden_neurons)
    }
}

/// Population size and the generational turnover parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Per-matrix mutation probability.
    pub mutation_rate: f32,
    /// Elites copied unchanged into the next generation.
    pub best_agent_selection_count: usize,
    /// Tail genomes that only feed the gene pool.
    pub worst_agent_selection_count: usize,
    /// Children bred per generation, always even.
    pub number_to_crossover: usize,
    /// Whether elite copies go through the mutation step.
    pub mutate_elites: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 85,
            mutation_rate: 0.055,
            best_agent_selection_count: 8,
            worst_agent_selection_count: 3,
            number_to_crossover: 40,
            mutate_elites: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    /// Stop after this many generations; `None` runs until shutdown.
    pub max_generations: Option<u64>,
    /// Fixed physics step in seconds.
    pub time_step: f32,
    /// Episode timeout in seconds.
    pub max_episode_seconds: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_generations: None,
            time_step: 0.02,
            max_episode_seconds: 120.0,
        }
    }
}

/// Fitness formula and the two fitness-based terminal conditions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FitnessConfig {
    pub distance_multiplier: f32,
    pub avg_speed_multiplier: f32,
    pub sensor_multiplier: f32,
    /// Episodes end once fitness reaches this value.
    pub fitness_limit: f32,
    /// Grace period before the fitness floor applies.
    pub floor_after_seconds: f32,
    pub floor_fitness: f32,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            distance_multiplier: 1.4,
            avg_speed_multiplier: 0.2,
            sensor_multiplier: 0.1,
            fitness_limit: 1000.0,
            floor_after_seconds: 20.0,
            floor_fitness: 40.0,
        }
    }
}

/// Annular track the reference environment drives on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Divisor applied to raw ray distances.
    pub sensor_scale: f32,
    /// Forward displacement per unit throttle per second.
    pub max_speed: f32,
    /// Heading change per unit steering per second, in degrees.
    pub turn_rate_degrees: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            inner_radius: 20.0,
            outer_radius: 40.0,
            sensor_scale: 20.0,
            max_speed: 11.4,
            turn_rate_degrees: 90.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub fitness: FitnessConfig,
    pub track: TrackConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or a
    /// [`EngineError::Configuration`] describing the first failure.
    ///
    /// # Validation Rules
    /// - Hidden width must be positive, layer counts bounded
    /// - Elite plus worst and elite plus crossover counts must fit the population
    /// - Crossover count must be even (children are bred in pairs)
    /// - Rates in `[0.0, 1.0]`, multipliers non-negative, radii ordered
    pub fn validate(&self) -> Result<()> {
        self.network.topology()?;

        // Evolution validation
        let evo = &self.evolution;
        ensure_config!(evo.population_size > 0, "Population size must be positive");
        ensure_config!(
            evo.population_size <= 100_000,
            "Population size too large (max 100000)"
        );
        ensure_config!(
            (0.0..=1.0).contains(&evo.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        ensure_config!(
            evo.best_agent_selection_count + evo.worst_agent_selection_count
                <= evo.population_size,
            "Best ({}) plus worst ({}) selection counts exceed population size {}",
            evo.best_agent_selection_count,
            evo.worst_agent_selection_count,
            evo.population_size
        );
        ensure_config!(
            evo.best_agent_selection_count + evo.number_to_crossover <= evo.population_size,
            "Best selection count ({}) plus crossover count ({}) exceed population size {}",
            evo.best_agent_selection_count,
            evo.number_to_crossover,
            evo.population_size
        );
        ensure_config!(
            evo.number_to_crossover % 2 == 0,
            "Crossover count must be even, got {}",
            evo.number_to_crossover
        );

        // Simulation validation
        ensure_config!(self.simulation.time_step > 0.0, "Time step must be positive");
        ensure_config!(
            self.simulation.max_episode_seconds > 0.0,
            "Episode timeout must be positive"
        );

        // Fitness validation
        let fit = &self.fitness;
        ensure_config!(
            fit.distance_multiplier >= 0.0
                && fit.avg_speed_multiplier >= 0.0
                && fit.sensor_multiplier >= 0.0,
            "Fitness multipliers must be non-negative"
        );
        ensure_config!(fit.fitness_limit > 0.0, "Fitness limit must be positive");
        ensure_config!(
            fit.floor_after_seconds >= 0.0,
            "Fitness floor grace period must be non-negative"
        );

        // Track validation
        let track = &self.track;
        ensure_config!(track.inner_radius > 0.0, "Inner radius must be positive");
        ensure_config!(
            track.outer_radius > track.inner_radius,
            "Outer radius must exceed inner radius"
        );
        ensure_config!(track.sensor_scale > 0.0, "Sensor scale must be positive");
        ensure_config!(track.max_speed >= 0.0, "Max speed must be non-negative");

        Ok(())
    }

    /// Network topology, validated.
    pub fn topology(&self) -> Result<Topology> {
        self.network.topology()
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)
            .map_err(|e| EngineError::configuration(format!("Invalid config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the validated defaults; an unreadable or invalid
    /// file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.network).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.fitness).as_bytes());
        hasher.update(format!("{:?}", self.track).as_bytes());
        hex::encode(hasher.finalize())
    }
}
