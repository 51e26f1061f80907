use life_lib::{
    options::{Distance, RunOptions, TrackerType},
    simulation::Simulation,
};
use proptest::prelude::*;

prop_compose! {
    fn arb_run_options()(
        init_agents in 1usize..80,
        species_count in 1usize..5,
        width in 50.0f32..900.0,
        height in 50.0f32..900.0,
        max_speed in 0.5f32..8.0,
        sensory_distance in 0.0f32..120.0,
        reproduction_probability in 0.0f32..=1.0,
        toroidal in any::<bool>(),
        spathash in any::<bool>(),
        seed in any::<u64>(),
    ) -> RunOptions {
        RunOptions {
            init_agents,
            species_count,
            world: life_lib::options::WorldSize { width, height },
            max_speed,
            init_speed: max_speed / 2.,
            sensory_distance,
            separation_distance: sensory_distance / 2.,
            reproduction_probability,
            distance: if toroidal { Distance::EucToroidal } else { Distance::EucEnclosed },
            tracker_type: if spathash { TrackerType::SpatHash } else { TrackerType::Naive },
            seed: Some(seed),
            ..Default::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_state_stays_within_bounds(run_options in arb_run_options(), ticks in 1u64..40) {
        let mut sim = Simulation::new(&run_options).unwrap();
        let floor = run_options.population_floor();

        for _ in 0..ticks {
            let report = sim.step();
            prop_assert_eq!(report.population, sim.agents().len());
            prop_assert!(sim.agents().len() >= floor,
                "population {} fell below floor {}", sim.agents().len(), floor);

            for agent in sim.agents() {
                prop_assert!(agent.position.is_finite());
                prop_assert!(agent.position.x >= 0. && agent.position.x < run_options.world.width,
                    "x {} outside world", agent.position.x);
                prop_assert!(agent.position.y >= 0. && agent.position.y < run_options.world.height,
                    "y {} outside world", agent.position.y);
                prop_assert!(agent.velocity.is_finite());
                prop_assert!(agent.speed() <= run_options.max_speed * (1. + 1e-5),
                    "speed {} over {}", agent.speed(), run_options.max_speed);
                prop_assert!((0. ..=1.).contains(&agent.energy), "energy {}", agent.energy);
                prop_assert!(agent.species < run_options.species_count);
                prop_assert!(agent.age <= run_options.max_age);
            }
        }
    }

    #[test]
    fn test_ids_stay_unique(run_options in arb_run_options()) {
        let mut sim = Simulation::new(&run_options).unwrap();

        for _ in 0..20 {
            sim.step();
            let mut ids: Vec<usize> = sim.agents().iter().map(|a| a.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), sim.agents().len());
        }
    }

    #[test]
    fn test_trackers_agree(run_options in arb_run_options()) {
        let naive = RunOptions { tracker_type: TrackerType::Naive, ..run_options.clone() };
        let spathash = RunOptions { tracker_type: TrackerType::SpatHash, ..run_options };

        let mut a = Simulation::new(&naive).unwrap();
        let mut b = Simulation::new(&spathash).unwrap();

        for _ in 0..10 {
            prop_assert_eq!(a.step(), b.step());
        }
        prop_assert_eq!(a.agents(), b.agents());
    }
}
