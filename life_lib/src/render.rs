use crate::agent::Agent;

/// Turns the population into a frame once per tick. Implementations only
/// ever get to read the agents.
///
/// Any `FnMut(&[Agent], tick, total_ticks) -> Frame` closure is a renderer.
pub trait FrameRenderer {
    type Frame;

    fn render(&mut self, agents: &[Agent], tick: u64, total_ticks: u64) -> Self::Frame;
}

impl<F, T> FrameRenderer for F
where
    F: FnMut(&[Agent], u64, u64) -> T,
{
    type Frame = T;

    fn render(&mut self, agents: &[Agent], tick: u64, total_ticks: u64) -> T {
        self(agents, tick, total_ticks)
    }
}
