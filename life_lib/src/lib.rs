use error::SimulationError;
use observer::{AgentData, Observer};
use options::RunOptions;
use simulation::Simulation;

pub mod agent;
pub mod engine;
pub mod population;
pub mod simulation;

pub mod error;
pub mod math_helpers;
pub mod observer;
pub mod options;
pub mod render;

/// Runs a headless simulation for `no_ticks` ticks, sampling agents every
/// `sample_rate` ticks, and saves the samples as requested by
/// `run_options.save_options`
pub fn simulate(no_ticks: u64, run_options: RunOptions) -> Result<Vec<AgentData>, SimulationError> {
    let mut simulation = Simulation::new(&run_options)?;
    let mut observer = Observer::new(run_options.sample_rate);

    (0..no_ticks).for_each(|_| {
        simulation.step();
        observer.watch(simulation.agents());
    });

    let data = observer.pop_data_save(&run_options.save_options)?;

    Ok(data)
}
