//! Kinematic car driven by the bound genome.
//!
//! Each fixed step the car reads its three ray sensors, asks the network for
//! throttle and steering, moves, and rescores itself. The episode ends on the
//! first terminal condition: hitting a wall, making too little progress after
//! the grace period, reaching the fitness ceiling, or running out of time.

use crate::model::track::{Pose, Track};
use neurodrive_core::config::{AppConfig, FitnessConfig, TrackConfig};
use neurodrive_core::{Environment, Genome, GenomeLogic, Termination};
use neurodrive_data::{Activations, SENSOR_INPUTS};
use std::f32::consts::FRAC_PI_4;
use uuid::Uuid;

/// Sensor directions relative to heading: forward-right, forward, forward-left.
const SENSOR_OFFSETS: [f32; SENSOR_INPUTS] = [-FRAC_PI_4, 0.0, FRAC_PI_4];

pub struct Car {
    track: Track,
    track_config: TrackConfig,
    fitness_config: FitnessConfig,
    time_step: f32,
    max_episode_seconds: f32,

    genome: Option<Genome>,
    activations: Activations,

    pose: Pose,
    sensors: [f32; SENSOR_INPUTS],
    controls: (f32, f32),
    elapsed: f32,
    distance: f32,
    avg_speed: f32,
    fitness: f32,
    steps: u64,
}

impl Car {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let track = Track::new(&config.track);
        Self {
            track,
            track_config: config.track.clone(),
            fitness_config: config.fitness.clone(),
            time_step: config.simulation.time_step,
            max_episode_seconds: config.simulation.max_episode_seconds,
            genome: None,
            activations: Activations::default(),
            pose: track.start_pose(),
            sensors: [0.0; SENSOR_INPUTS],
            controls: (0.0, 0.0),
            elapsed: 0.0,
            distance: 0.0,
            avg_speed: 0.0,
            fitness: 0.0,
            steps: 0,
        }
    }

    /// Puts the car back on the start line and clears the episode score.
    pub fn reset(&mut self) {
        self.pose = self.track.start_pose();
        self.sensors = [0.0; SENSOR_INPUTS];
        self.controls = (0.0, 0.0);
        self.elapsed = 0.0;
        self.distance = 0.0;
        self.avg_speed = 0.0;
        self.fitness = 0.0;
        self.steps = 0;
    }

    /// Handle of the genome currently driving, if one is bound.
    #[must_use]
    pub fn handle(&self) -> Option<Uuid> {
        self.genome.as_ref().map(|g| g.id)
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn sensors(&self) -> [f32; SENSOR_INPUTS] {
        self.sensors
    }

    /// Last `(throttle, steering)` applied.
    #[must_use]
    pub fn controls(&self) -> (f32, f32) {
        self.controls
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[must_use]
    pub fn avg_speed(&self) -> f32 {
        self.avg_speed
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One fixed step under the bound genome's control. An unbound car
    /// coasts with zero throttle.
    pub fn step(&mut self) -> Option<Termination> {
        self.sense();
        let controls = match &self.genome {
            Some(genome) => genome.infer_internal(self.sensors, &mut self.activations),
            None => (0.0, 0.0),
        };
        self.advance(controls.0, controls.1)
    }

    /// One fixed step with externally supplied controls.
    pub fn step_with_controls(&mut self, throttle: f32, steering: f32) -> Option<Termination> {
        self.sense();
        self.advance(throttle, steering)
    }

    fn sense(&mut self) {
        let scale = self.track_config.sensor_scale;
        for (reading, offset) in self.sensors.iter_mut().zip(SENSOR_OFFSETS) {
            // A ray that hits nothing keeps its previous reading.
            if let Some(hit) = self
                .track
                .raycast(self.pose.x, self.pose.y, self.pose.heading + offset)
            {
                *reading = hit / scale;
            }
        }
    }

    fn advance(&mut self, throttle: f32, steering: f32) -> Option<Termination> {
        let dt = self.time_step;
        let last = self.pose;
        self.controls = (throttle, steering);

        let displacement = throttle * self.track_config.max_speed * dt;
        let (sin, cos) = self.pose.heading.sin_cos();
        self.pose.x += cos * displacement;
        self.pose.y += sin * displacement;
        // Positive steering turns clockwise.
        self.pose.heading -= (steering * self.track_config.turn_rate_degrees * dt).to_radians();

        self.elapsed += dt;
        self.steps += 1;
        self.score(&last);
        self.termination()
    }

    fn score(&mut self, last: &Pose) {
        let cfg = &self.fitness_config;
        self.distance += self.pose.distance_to(last);
        self.avg_speed = self.distance / self.elapsed;
        let sensor_sum: f32 = self.sensors.iter().sum();
        self.fitness = self.distance * cfg.distance_multiplier
            + self.avg_speed * cfg.avg_speed_multiplier
            + sensor_sum * cfg.sensor_multiplier;
    }

    fn termination(&self) -> Option<Termination> {
        let cfg = &self.fitness_config;
        if !self.track.contains(self.pose.x, self.pose.y) {
            Some(Termination::Collision)
        } else if self.fitness >= cfg.fitness_limit {
            Some(Termination::FitnessCeiling)
        } else if self.elapsed > cfg.floor_after_seconds && self.fitness < cfg.floor_fitness {
            Some(Termination::FitnessFloor)
        } else if self.elapsed >= self.max_episode_seconds {
            Some(Termination::Timeout)
        } else {
            None
        }
    }
}

impl Environment for Car {
    fn bind_active_genome(&mut self, genome: &Genome) {
        self.activations.prepare(&genome.topology());
        self.genome = Some(genome.clone());
        self.reset();
    }
}
