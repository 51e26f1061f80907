use crate::{agent::Agent, math_helpers::distance_dyn_agent, options::RunOptions};

use super::tracker::Tracker;

/// A naive implementation of agent tracking, which uses an O(N^2) algorithm for
/// finding an agent's neighbours. This is the reference every other tracker
/// has to agree with.
pub struct NaiveTracker {
    agents: Vec<Agent>,
}

impl NaiveTracker {
    pub fn get_neighbours_naive<'a>(
        agent: &Agent,
        all_agents: &'a [Agent],
        run_options: &RunOptions,
        neighbours: &mut Vec<&'a Agent>,
    ) {
        for a_other in all_agents.iter() {
            if a_other.id == agent.id {
                continue;
            }

            let distance = distance_dyn_agent(agent, a_other, run_options);
            if distance < run_options.sensory_distance {
                neighbours.push(a_other);
            }
        }
    }
}

impl Tracker for NaiveTracker {
    fn new(entities: &[Agent], _: &RunOptions) -> Self {
        NaiveTracker {
            agents: entities.to_vec(),
        }
    }

    fn view(&self) -> &[Agent] {
        &self.agents
    }

    fn get_neighbours<'a>(&'a self, agent: &Agent, run_options: &RunOptions) -> Vec<&'a Agent> {
        let mut res = Vec::<&'a Agent>::new();

        NaiveTracker::get_neighbours_naive(agent, &self.agents, run_options, &mut res);

        res
    }
}
