use crate::{agent::Agent, options::RunOptions};

// a tracker takes a snapshot of the population at the start of a tick and
// answers neighbourhood queries against it, so no query ever sees a position
// updated during the same tick

pub trait Tracker {
    fn new(entities: &[Agent], run_options: &RunOptions) -> Self
    where
        Self: Sized;
    /// The snapshot, in the order it was taken
    fn view(&self) -> &[Agent];
    /// Every other agent strictly closer than the sensory distance
    fn get_neighbours<'a>(&'a self, agent: &Agent, run_options: &RunOptions) -> Vec<&'a Agent>;
    fn get_no_entities(&self) -> usize {
        self.view().len()
    }
}
