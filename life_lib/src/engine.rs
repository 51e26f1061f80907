use glam::Vec2;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::agent::Agent;
use crate::error::ConfigError;
use crate::options::{RunOptions, TrackerType};
use crate::population::Population;

pub mod naive_tracker;
pub mod spathash_tracker;
pub mod tracker;

use naive_tracker::NaiveTracker;
use spathash_tracker::SpatHash1D;
use tracker::Tracker;

/// What happened to the population during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub births: usize,
    pub deaths: usize,
    pub replenished: usize,
    pub population: usize,
}

pub fn get_tracker(entities: &[Agent], run_options: &RunOptions) -> Box<dyn Tracker> {
    match run_options.tracker_type {
        TrackerType::Naive => Box::new(NaiveTracker::new(entities, run_options)),
        TrackerType::SpatHash => Box::new(SpatHash1D::new(entities, run_options)),
    }
}

/// Advances a [`Population`] one tick at a time.
///
/// A tick runs in two phases. The calculation loop reads a snapshot of the
/// population taken when the tick starts, the update loop then mutates the
/// live agents. Births and deaths are buffered and only applied once every
/// agent has been updated.
pub struct StepEngine {
    run_options: RunOptions,
    rng: Xoshiro256PlusPlus,
}

impl StepEngine {
    pub fn new(run_options: &RunOptions, rng: Xoshiro256PlusPlus) -> Result<Self, ConfigError> {
        run_options.validate()?;

        Ok(StepEngine {
            run_options: run_options.clone(),
            rng,
        })
    }

    pub fn run_options(&self) -> &RunOptions {
        &self.run_options
    }

    pub fn tick(&mut self, population: &mut Population) -> TickReport {
        let run_options = &self.run_options;

        let tracker = get_tracker(population.agents(), run_options);

        let mut accelleration: Vec<Vec2> = Vec::with_capacity(tracker.get_no_entities());
        let mut n_neighbours: Vec<usize> = Vec::with_capacity(tracker.get_no_entities());

        // calculation loop
        for agent in tracker.view() {
            let mut neighbours = tracker.get_neighbours(agent, run_options);
            // summation order must not depend on the order of the population
            neighbours.sort_unstable_by_key(|a| a.id);

            n_neighbours.push(neighbours.len());
            accelleration.push(agent.run_rules(&neighbours, run_options));
        }

        let mut offspring: Vec<Agent> = Vec::new();

        // update loop
        for (i_cur, agent) in population.agents_mut().iter_mut().enumerate() {
            agent.apply_force(accelleration[i_cur], run_options);
            agent.update_location(run_options);
            agent.update_vitals(n_neighbours[i_cur], run_options);

            if agent.wants_offspring(&mut self.rng, run_options) {
                offspring.push(agent.reproduce(&mut self.rng, run_options));
            }
        }

        let deceased: Vec<usize> = population
            .agents()
            .iter()
            .filter(|a| a.is_dead(run_options))
            .map(|a| a.id)
            .collect();

        let deaths = population.remove_multiple(&deceased);
        let births = offspring.len();
        for child in offspring {
            population.insert(child);
        }

        let replenished = population.replenish_if_below(run_options.population_floor());

        let report = TickReport {
            births,
            deaths,
            replenished,
            population: population.len(),
        };
        debug!(?report, "tick complete");

        report
    }
}
