use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// size of the initial population, also the batch size of every reseed
    pub init_agents: usize,
    pub species_count: usize,
    pub world: WorldSize,

    pub max_speed: f32,
    /// velocity components of seeded agents are drawn from [-init_speed, init_speed]
    pub init_speed: f32,
    pub init_size_min: f32,
    pub init_size_max: f32,
    pub init_energy_min: f32,
    pub init_energy_max: f32,

    pub alignment_coefficient: f32,
    pub cohesion_coefficient: f32,
    pub separation_coefficient: f32,

    /// vision radius, agents closer than this are neighbours
    pub sensory_distance: f32,
    pub separation_distance: f32,

    pub energy_decay: f32,
    pub energy_growth_rate: f32,
    pub max_age: u32,

    pub base_size: f32,
    pub size_gain: f32,

    pub reproduction_threshold: f32,
    pub reproduction_probability: f32,
    pub offspring_offset: f32,
    pub offspring_jitter: f32,

    pub distance: Distance,
    pub tracker_type: TrackerType,

    pub sample_rate: u64,
    pub save_options: SaveOptions,

    /// `None` seeds the random source from entropy
    pub seed: Option<u64>,
}

impl RunOptions {
    /// Live population below which a fresh batch is seeded
    pub fn population_floor(&self) -> usize {
        self.init_agents / 2
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let run_options: RunOptions = serde_json::from_str(json)?;
        run_options.validate()?;
        Ok(run_options)
    }

    /// Rejects configurations the step engine cannot run indefinitely with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world.width > 0. && self.world.width.is_finite())
            || !(self.world.height > 0. && self.world.height.is_finite())
        {
            return Err(ConfigError::WorldSize {
                width: self.world.width,
                height: self.world.height,
            });
        }

        if self.species_count == 0 {
            return Err(ConfigError::NoSpecies);
        }

        if !(self.max_speed > 0. && self.max_speed.is_finite()) {
            return Err(ConfigError::MaxSpeed(self.max_speed));
        }

        let non_negative = [
            ("init_speed", self.init_speed),
            ("init_size_min", self.init_size_min),
            ("init_energy_min", self.init_energy_min),
            ("alignment_coefficient", self.alignment_coefficient),
            ("cohesion_coefficient", self.cohesion_coefficient),
            ("separation_coefficient", self.separation_coefficient),
            ("sensory_distance", self.sensory_distance),
            ("separation_distance", self.separation_distance),
            ("energy_decay", self.energy_decay),
            ("energy_growth_rate", self.energy_growth_rate),
            ("base_size", self.base_size),
            ("size_gain", self.size_gain),
            ("reproduction_threshold", self.reproduction_threshold),
            ("offspring_offset", self.offspring_offset),
            ("offspring_jitter", self.offspring_jitter),
        ];

        for (name, value) in non_negative {
            if !(value >= 0. && value.is_finite()) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if !(0. ..=1.).contains(&self.reproduction_probability) {
            return Err(ConfigError::Probability(self.reproduction_probability));
        }

        // symmetric draws in [-x, x] need a width that fits an f32
        let symmetric = [
            ("init_speed", self.init_speed),
            ("offspring_offset", self.offspring_offset),
            ("offspring_jitter", self.offspring_jitter),
        ];

        for (name, half_width) in symmetric {
            if !(2. * half_width).is_finite() {
                return Err(ConfigError::Range {
                    name,
                    min: -half_width,
                    max: half_width,
                });
            }
        }

        if !(self.init_size_min <= self.init_size_max && self.init_size_max.is_finite()) {
            return Err(ConfigError::Range {
                name: "init_size",
                min: self.init_size_min,
                max: self.init_size_max,
            });
        }

        if !(self.init_energy_min <= self.init_energy_max && self.init_energy_max <= 1.) {
            return Err(ConfigError::Range {
                name: "init_energy",
                min: self.init_energy_min,
                max: self.init_energy_max,
            });
        }

        if self.sample_rate == 0 {
            return Err(ConfigError::SampleRate);
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_agents = 100;
        let init_width = 800;
        let init_height = 600;

        let max_speed = 4.0;

        let alignment_coefficient = 0.05;
        let cohesion_coefficient = 0.03;
        let separation_coefficient = 0.08;

        let sensory_distance = 50.;
        let separation_distance = 20.;

        RunOptions {
            init_agents,
            species_count: 3,
            world: get_world_size(init_width, init_height),
            max_speed,
            init_speed: 2.,
            init_size_min: 3.,
            init_size_max: 6.,
            init_energy_min: 0.5,
            init_energy_max: 1.,
            alignment_coefficient,
            cohesion_coefficient,
            separation_coefficient,
            sensory_distance,
            separation_distance,
            energy_decay: 0.001,
            energy_growth_rate: 0.02,
            max_age: 300,
            base_size: 3.,
            size_gain: 3.,
            reproduction_threshold: 0.8,
            reproduction_probability: 0.05,
            offspring_offset: 10.,
            offspring_jitter: 1.,
            distance: Distance::EucEnclosed,
            // tracker_type: TrackerType::SpatHash,
            tracker_type: TrackerType::Naive,
            sample_rate: 1,
            save_options: SaveOptions {
                save_locations: false,
                save_locations_path: Some("./".to_owned()),
                save_locations_timestamp: true,
            },
            seed: None,
        }
    }
}

pub fn get_world_size(init_width: u32, init_height: u32) -> WorldSize {
    WorldSize {
        width: init_width as f32,
        height: init_height as f32,
    }
}

/// Toroidal world spanning [0, width) x [0, height)
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSize {
    fn default() -> Self {
        get_world_size(800, 600)
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "EucToroidal"}
pub enum Distance {
    EucToroidal,
    EucEnclosed,
}

impl Default for Distance {
    fn default() -> Self {
        Distance::EucEnclosed
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "SpatHash"}
pub enum TrackerType {
    SpatHash,
    Naive,
}

impl Default for TrackerType {
    fn default() -> Self {
        TrackerType::Naive
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            save_locations: false,
            save_locations_path: Some("./".to_owned()),
            save_locations_timestamp: true,
        }
    }
}
