use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};
use life_lib::options::{self, Distance, RunOptions, SaveOptions, TrackerType};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Headless agent-based life simulation of flocking agents that breed and die.
pub struct Args {
    /// Config file, YAML or TOML (by extension)
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: std::path::PathBuf,

    /// Seed for a reproducible run, drawn from entropy when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(180)]
    #[arg(long)]
    /// number of ticks to run
    pub ticks: u64,

    #[default(false)]
    #[arg(long)]
    /// print a density map of the world after every tick
    pub show: bool,

    #[default(150)]
    #[arg(long = "frame_ms")]
    /// pause between shown frames
    pub frame_duration_ms: u64,

    #[default(80)]
    #[arg(long)]
    pub columns: usize,

    #[default(30)]
    #[arg(long)]
    pub rows: usize,

    #[default(100)]
    #[arg(short = 'n', long)]
    /// number of agents seeded per batch
    pub init_agents: usize,

    #[default(3)]
    #[arg(long)]
    pub species: usize,

    #[default(4)]
    #[arg(short = 'r', long)]
    /// sample every n-th tick
    pub sample_rate: u64,

    #[default(false)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,

    #[default(800)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(600)]
    #[arg(short = 'y', long)]
    pub init_height: u32,

    #[default(false)]
    #[arg(long)]
    /// wrap distances around the world edges
    pub toroidal: bool,

    #[default(false)]
    #[arg(long)]
    /// use the spatial hash for neighbour queries
    pub spathash: bool,

    #[default(50.)]
    #[arg(long = "sens_dist")]
    pub sensory_distance: f32,
    #[default(20.)]
    #[arg(long = "sep_dist")]
    pub separation_distance: f32,

    #[default(0.05)]
    #[arg(long = "ali_coef")]
    pub alignment_coefficient: f32,
    #[default(0.03)]
    #[arg(long = "coh_coef")]
    pub cohesion_coefficient: f32,
    #[default(0.08)]
    #[arg(long = "sep_coef")]
    pub separation_coefficient: f32,

    #[default(4.)]
    #[arg(long = "max_speed")]
    pub max_speed: f32,

    #[default(0.001)]
    #[arg(long = "decay")]
    pub energy_decay: f32,
    #[default(0.02)]
    #[arg(long = "growth")]
    pub energy_growth_rate: f32,
    #[default(300)]
    #[arg(long = "max_age")]
    pub max_age: u32,

    #[default(0.8)]
    #[arg(long = "repr_trs")]
    pub reproduction_threshold: f32,
    #[default(0.05)]
    #[arg(long = "repr_prob")]
    pub reproduction_probability: f32,
}

impl Config {
    pub fn to_run_options(&self, seed: Option<u64>) -> RunOptions {
        let defaults = RunOptions::default();

        RunOptions {
            init_agents: self.init_agents,
            species_count: self.species,
            world: options::get_world_size(self.init_width, self.init_height),
            max_speed: self.max_speed,
            alignment_coefficient: self.alignment_coefficient,
            cohesion_coefficient: self.cohesion_coefficient,
            separation_coefficient: self.separation_coefficient,
            sensory_distance: self.sensory_distance,
            separation_distance: self.separation_distance,
            energy_decay: self.energy_decay,
            energy_growth_rate: self.energy_growth_rate,
            max_age: self.max_age,
            reproduction_threshold: self.reproduction_threshold,
            reproduction_probability: self.reproduction_probability,
            distance: if self.toroidal {
                Distance::EucToroidal
            } else {
                Distance::EucEnclosed
            },
            tracker_type: if self.spathash {
                TrackerType::SpatHash
            } else {
                TrackerType::Naive
            },
            sample_rate: self.sample_rate,
            save_options: SaveOptions {
                save_locations: self.save,
                save_locations_timestamp: self.save_timestamp,
                // default
                save_locations_path: defaults.save_options.save_locations_path.clone(),
            },
            seed,
            ..defaults
        }
    }
}
