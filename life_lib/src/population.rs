use std::collections::HashSet;

use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::{agent::Agent, error::ConfigError, options::RunOptions};

/// Owns every live agent. Agents are kept in insertion order and addressed
/// by the id handed out on insertion.
pub struct Population {
    agents: Vec<Agent>,
    next_id: usize,
    rng: Xoshiro256PlusPlus,
    run_options: RunOptions,
}

impl Population {
    /// An empty population, call [`Population::seed`] to fill it
    pub fn new(run_options: &RunOptions, rng: Xoshiro256PlusPlus) -> Result<Self, ConfigError> {
        run_options.validate()?;

        Ok(Population {
            agents: Vec::with_capacity(run_options.init_agents),
            next_id: 0,
            rng,
            run_options: run_options.clone(),
        })
    }

    /// Appends `count` random agents
    pub fn seed(&mut self, count: usize) {
        for _ in 0..count {
            let agent = Agent::random(&mut self.rng, &self.run_options);
            self.insert(agent);
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub(crate) fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn get(&self, id: usize) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Adds one agent under a fresh id, which is returned
    pub fn insert(&mut self, mut agent: Agent) -> usize {
        agent.id = self.next_id;
        self.next_id += 1;
        self.agents.push(agent);

        agent.id
    }

    /// Removes the agent with `id`, absent ids are ignored
    pub fn remove(&mut self, id: usize) -> Option<Agent> {
        self.agents
            .iter()
            .position(|a| a.id == id)
            .map(|index| self.agents.remove(index))
    }

    /// Removes every listed agent in one sweep, keeping the order of the rest
    pub fn remove_multiple(&mut self, ids_delete: &[usize]) -> usize {
        let ids_delete_set: HashSet<usize> = ids_delete.iter().cloned().collect();
        let before = self.agents.len();

        self.agents.retain(|agent| !ids_delete_set.contains(&agent.id));

        before - self.agents.len()
    }

    /// Seeds whole batches of `init_agents` while the population is below
    /// `floor`, returns how many agents were added.
    ///
    /// A depleted population therefore overshoots the floor instead of being
    /// topped up to it.
    pub fn replenish_if_below(&mut self, floor: usize) -> usize {
        let before = self.agents.len();

        while self.agents.len() < floor && self.run_options.init_agents > 0 {
            self.seed(self.run_options.init_agents);
        }

        let added = self.agents.len() - before;
        if added > 0 {
            info!(
                before,
                added,
                floor,
                "population below floor, seeded fresh batch"
            );
        }

        added
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
