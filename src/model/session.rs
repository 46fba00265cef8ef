//! Drives a coordinator one episode at a time.

use crate::model::car::Car;
use neurodrive_core::{Advance, EngineError, PopulationCoordinator, Result, Termination};
use serde::Serialize;
use uuid::Uuid;

/// Result of driving one genome to a terminal condition.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EpisodeOutcome {
    pub genome: Uuid,
    pub generation: u64,
    pub index: usize,
    pub fitness: f32,
    pub termination: Termination,
    pub steps: u64,
    #[serde(skip)]
    pub advance: Advance,
}

/// Owns the car and the coordinator it reports to.
///
/// Construction binds the first genome, so every session is ready to run.
pub struct TrainingSession<C: PopulationCoordinator> {
    coordinator: C,
    car: Car,
}

impl<C: PopulationCoordinator> TrainingSession<C> {
    pub fn new(mut coordinator: C, mut car: Car) -> Self {
        coordinator.start(&mut car);
        Self { coordinator, car }
    }

    #[must_use]
    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    #[must_use]
    pub fn car(&self) -> &Car {
        &self.car
    }

    /// Steps the car until the episode ends, then reports its fitness.
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome> {
        let Some(genome) = self.car.handle() else {
            return Err(EngineError::protocol("No genome bound to the car"));
        };
        let generation = self.coordinator.generation();
        let index = self.coordinator.current_genome();

        let termination = loop {
            if let Some(termination) = self.car.step() {
                break termination;
            }
        };
        let fitness = self.car.fitness();
        let steps = self.car.steps();

        tracing::debug!(
            generation,
            index,
            fitness,
            steps,
            termination = %termination,
            "Episode finished"
        );

        let advance = self
            .coordinator
            .report_fitness(genome, fitness, &mut self.car)?;

        Ok(EpisodeOutcome {
            genome,
            generation,
            index,
            fitness,
            termination,
            steps,
            advance,
        })
    }

    /// Runs episodes until the current generation has been replaced.
    pub fn run_generation(&mut self) -> Result<Vec<EpisodeOutcome>> {
        let mut outcomes = Vec::new();
        loop {
            let outcome = self.run_episode()?;
            let finished = matches!(outcome.advance, Advance::NewGeneration(_));
            outcomes.push(outcome);
            if finished {
                return Ok(outcomes);
            }
        }
    }

    pub fn into_parts(self) -> (C, Car) {
        (self.coordinator, self.car)
    }
}
