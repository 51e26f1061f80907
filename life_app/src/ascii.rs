use itertools::Itertools;
use life_lib::{agent::Agent, options::WorldSize, render::FrameRenderer};

const GREY_SCALE: &str =
    " .\'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Draws the world as a character density map, one character per cell,
/// denser characters for more crowded cells
pub struct AsciiRenderer {
    columns: usize,
    rows: usize,
    world: WorldSize,
}

impl AsciiRenderer {
    pub fn new(columns: usize, rows: usize, world: &WorldSize) -> Self {
        AsciiRenderer {
            columns: columns.max(1),
            rows: rows.max(1),
            world: *world,
        }
    }

    fn density(&self, agents: &[Agent]) -> Vec<usize> {
        let mut counts = vec![0; self.columns * self.rows];
        for agent in agents {
            let column = ((agent.position.x / self.world.width * self.columns as f32) as usize)
                .min(self.columns - 1);
            let row = ((agent.position.y / self.world.height * self.rows as f32) as usize)
                .min(self.rows - 1);
            counts[column + row * self.columns] += 1;
        }
        counts
    }
}

impl FrameRenderer for AsciiRenderer {
    type Frame = String;

    fn render(&mut self, agents: &[Agent], tick: u64, total_ticks: u64) -> String {
        let scale: Vec<char> = GREY_SCALE.chars().collect();
        let counts = self.density(agents);

        let map = counts
            .chunks(self.columns)
            .map(|row| {
                row.iter()
                    .map(|&n| scale[n.min(scale.len() - 1)])
                    .collect::<String>()
            })
            .join("\n");

        format!(
            "tick {}/{}  agents {}\n{}\n",
            tick + 1,
            total_ticks,
            agents.len(),
            map
        )
    }
}
