use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::{
    agent::Agent,
    engine::{StepEngine, TickReport},
    error::ConfigError,
    options::RunOptions,
    population::Population,
    render::FrameRenderer,
};

/// A seeded population together with the engine that advances it
pub struct Simulation {
    population: Population,
    engine: StepEngine,
    tick: u64,
}

impl Simulation {
    pub fn new(run_options: &RunOptions) -> Result<Self, ConfigError> {
        let rng = match run_options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        // the engine draws from its own stream, 2^128 steps ahead
        let mut engine_rng = rng.clone();
        engine_rng.jump();

        let mut population = Population::new(run_options, rng)?;
        population.seed(run_options.init_agents);

        info!(
            agents = population.len(),
            seed = ?run_options.seed,
            tracker = ?run_options.tracker_type,
            "simulation seeded"
        );

        Ok(Simulation {
            population,
            engine: StepEngine::new(run_options, engine_rng)?,
            tick: 0,
        })
    }

    /// Advances the whole population by exactly one tick
    pub fn step(&mut self) -> TickReport {
        let report = self.engine.tick(&mut self.population);
        self.tick += 1;
        report
    }

    /// Runs `total_ticks` ticks, rendering once after each, and returns the
    /// frames in order
    pub fn run<R: FrameRenderer>(&mut self, total_ticks: u64, renderer: &mut R) -> Vec<R::Frame> {
        (0..total_ticks)
            .map(|tick| {
                self.step();
                renderer.render(self.population.agents(), tick, total_ticks)
            })
            .collect()
    }

    pub fn agents(&self) -> &[Agent] {
        self.population.agents()
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn run_options(&self) -> &RunOptions {
        self.engine.run_options()
    }
}

#[cfg(test)]
mod tests {
    use super::Simulation;
    use crate::{agent::Agent, options::RunOptions};

    fn seeded(seed: u64) -> RunOptions {
        RunOptions {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn starts_with_a_full_batch() {
        let sim = Simulation::new(&seeded(1)).unwrap();

        assert_eq!(sim.agents().len(), 100);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn rejects_invalid_options() {
        let run_options = RunOptions {
            world: crate::options::get_world_size(0, 600),
            ..Default::default()
        };

        assert!(Simulation::new(&run_options).is_err());
    }

    #[test]
    fn rejects_offspring_offset_rand_cannot_sample() {
        let run_options = RunOptions {
            offspring_offset: 3.0e38,
            reproduction_threshold: 0.,
            ..seeded(0)
        };

        assert!(matches!(
            Simulation::new(&run_options),
            Err(crate::error::ConfigError::Range { name: "offspring_offset", .. })
        ));
    }

    #[test]
    fn tiny_vision_runs_on_the_spatial_hash() {
        let run_options = RunOptions {
            sensory_distance: 1e-3,
            tracker_type: crate::options::TrackerType::SpatHash,
            ..seeded(4)
        };
        let mut sim = Simulation::new(&run_options).unwrap();

        let report = sim.step();

        assert_eq!(report.population, sim.agents().len());
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = Simulation::new(&seeded(42)).unwrap();
        let mut b = Simulation::new(&seeded(42)).unwrap();

        for _ in 0..50 {
            assert_eq!(a.step(), b.step());
        }

        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Simulation::new(&seeded(1)).unwrap();
        let b = Simulation::new(&seeded(2)).unwrap();

        assert_ne!(a.agents(), b.agents());
    }

    #[test]
    fn renderer_sees_every_tick_in_order() {
        let mut sim = Simulation::new(&seeded(7)).unwrap();

        let mut renderer = |agents: &[Agent], tick: u64, total: u64| (tick, total, agents.len());
        let frames = sim.run(5, &mut renderer);

        assert_eq!(frames.len(), 5);
        assert_eq!(
            frames.iter().map(|f| f.0).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert!(frames.iter().all(|f| f.1 == 5 && f.2 >= 50));
        assert_eq!(sim.tick(), 5);
    }
}
