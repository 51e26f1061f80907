//! Error types for the life simulation.
//!
//! Configuration problems are reported when a [`crate::simulation::Simulation`]
//! (or one of its parts) is constructed, never in the middle of a run.

use thiserror::Error;

/// A configuration the simulation refuses to start with.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("world dimensions must be positive and finite, got {width}x{height}")]
    WorldSize { width: f32, height: f32 },

    #[error("species count must be at least 1")]
    NoSpecies,

    #[error("max speed must be positive and finite, got {0}")]
    MaxSpeed(f32),

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("reproduction probability must lie in [0, 1], got {0}")]
    Probability(f32),

    #[error("{name} range is invalid: [{min}, {max}]")]
    Range {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("sample rate must be at least 1")]
    SampleRate,

    #[error("unable to parse options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while writing observed agent data.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("can't open data file: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("can't serialize data point: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything that can stop a headless run.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),
}
