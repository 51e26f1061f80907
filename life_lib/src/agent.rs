use glam::f32::Vec2;
use rand::Rng;

use crate::{
    math_helpers::{distance_dyn_agent, offset_dyn, wrap_position},
    options::{Distance, RunOptions},
};

/// Guards the separation term against coincident agents
pub const SEPARATION_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    // assigned by the population on insertion, never reused
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    /// visual size, recomputed from energy every tick
    pub radius: f32,
    pub energy: f32,
    pub age: u32,
    pub species: usize,
}

impl Agent {
    /// Creates a new [`Agent`] of age 0.
    pub fn new(x: f32, y: f32, velocity: Vec2, radius: f32, energy: f32, species: usize) -> Self {
        Agent {
            id: usize::MAX,
            position: Vec2::new(x, y),
            velocity,
            radius,
            energy,
            age: 0,
            species,
        }
    }

    /// Random agent anywhere in the world, as used for seeding
    pub fn random<R: Rng>(rng: &mut R, run_options: &RunOptions) -> Self {
        let x = rng.gen_range(0. ..run_options.world.width);
        let y = rng.gen_range(0. ..run_options.world.height);
        // x in [-init_speed, init_speed]
        let x_vel = rng.gen_range(-run_options.init_speed..=run_options.init_speed);
        // y in [-init_speed, init_speed]
        let y_vel = rng.gen_range(-run_options.init_speed..=run_options.init_speed);
        let radius = rng.gen_range(run_options.init_size_min..=run_options.init_size_max);
        let energy = rng.gen_range(run_options.init_energy_min..=run_options.init_energy_max);
        let species = rng.gen_range(0..run_options.species_count);

        let velocity = Vec2::new(x_vel, y_vel).clamp_length_max(run_options.max_speed);

        Agent::new(x, y, velocity, radius, energy, species)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Sum of the flocking forces exerted by `neighbours`, zero without any
    pub fn run_rules(&self, neighbours: &[&Agent], run_options: &RunOptions) -> Vec2 {
        if neighbours.is_empty() {
            return Vec2::ZERO;
        }

        self.cohesion(neighbours, run_options)
            + self.alignment(neighbours, run_options)
            + self.separation(neighbours, run_options)
    }

    pub fn cohesion(&self, neighbours: &[&Agent], run_options: &RunOptions) -> Vec2 {
        if neighbours.is_empty() {
            return Vec2::ZERO;
        }

        let count = neighbours.len() as f32;

        let to_center = match run_options.distance {
            Distance::EucEnclosed => {
                let center = neighbours
                    .iter()
                    .fold(Vec2::ZERO, |acc, other| acc + other.position)
                    / count;
                center - self.position
            }
            // the centroid only makes sense in the agent's own frame
            Distance::EucToroidal => {
                neighbours.iter().fold(Vec2::ZERO, |acc, other| {
                    acc + offset_dyn(self.position, other.position, run_options)
                }) / count
            }
        };

        to_center * run_options.cohesion_coefficient
    }

    pub fn alignment(&self, neighbours: &[&Agent], run_options: &RunOptions) -> Vec2 {
        if neighbours.is_empty() {
            return Vec2::ZERO;
        }

        let avg = neighbours
            .iter()
            .fold(Vec2::ZERO, |acc, other| acc + other.velocity)
            / neighbours.len() as f32;

        (avg - self.velocity) * run_options.alignment_coefficient
    }

    pub fn separation(&self, neighbours: &[&Agent], run_options: &RunOptions) -> Vec2 {
        let mut res = Vec2::ZERO;
        let mut count = 0;

        for other in neighbours {
            let distance = distance_dyn_agent(self, other, run_options);
            if distance < run_options.separation_distance {
                let value = offset_dyn(self.position, other.position, run_options);
                res -= value / (distance + SEPARATION_EPSILON);
                count += 1;
            }
        }

        if count > 0 {
            res / count as f32 * run_options.separation_coefficient
        } else {
            Vec2::ZERO
        }
    }

    pub fn apply_force(&mut self, force: Vec2, run_options: &RunOptions) {
        self.velocity += force;
        self.velocity = self.velocity.clamp_length_max(run_options.max_speed);
    }

    // Actually shifts the individual's location
    pub fn update_location(&mut self, run_options: &RunOptions) {
        self.position += self.velocity;
        self.position = wrap_position(self.position, &run_options.world);
    }

    /// Energy decays, crowding feeds it, size follows it
    pub fn update_vitals(&mut self, n_neighbours: usize, run_options: &RunOptions) {
        self.energy = (self.energy - run_options.energy_decay
            + run_options.energy_growth_rate * n_neighbours as f32)
            .clamp(0., 1.);
        self.age += 1;
        self.radius = run_options.base_size + run_options.size_gain * self.energy;
    }

    /// Draws from `rng` only once past the reproduction threshold
    pub fn wants_offspring<R: Rng>(&self, rng: &mut R, run_options: &RunOptions) -> bool {
        self.energy > run_options.reproduction_threshold
            && rng.gen::<f32>() < run_options.reproduction_probability
    }

    /// Splits off a child carrying half of this agent's energy, the parent
    /// keeps the other half
    pub fn reproduce<R: Rng>(&mut self, rng: &mut R, run_options: &RunOptions) -> Agent {
        let offset = run_options.offspring_offset;
        let jitter = run_options.offspring_jitter;

        let position = wrap_position(
            self.position
                + Vec2::new(
                    rng.gen_range(-offset..=offset),
                    rng.gen_range(-offset..=offset),
                ),
            &run_options.world,
        );
        let velocity = (self.velocity
            + Vec2::new(
                rng.gen_range(-jitter..=jitter),
                rng.gen_range(-jitter..=jitter),
            ))
        .clamp_length_max(run_options.max_speed);

        self.energy *= 0.5;

        Agent::new(
            position.x,
            position.y,
            velocity,
            self.radius * 0.5,
            self.energy,
            self.species,
        )
    }

    pub fn is_dead(&self, run_options: &RunOptions) -> bool {
        self.age > run_options.max_age || self.energy <= 0.
    }
}
