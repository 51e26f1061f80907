use itertools::Itertools;

use crate::{
    agent::Agent,
    math_helpers::distance_dyn_agent,
    options::{Distance, RunOptions},
};

use super::{naive_tracker::NaiveTracker, tracker::Tracker};

/// Cells are made slightly wider than the sensory distance, so that float
/// rounding can never put two neighbours more than one cell apart
const CELL_MARGIN: f32 = 1.01;

/// Upper bound on cells along either axis. A tiny sensory distance widens
/// the cells instead of growing the table, wider cells still hold every
/// neighbour.
const MAX_AXIS_CELLS: usize = 256;

pub struct SpatialHashingTableSettings {
    /// grid x range
    pub x_cell_count: usize,
    /// grid y range
    pub y_cell_count: usize,
    /// n cells of grid
    pub cell_count: usize,
    /// environment x units per grid x cell
    pub x_cell_res: f32,
    /// environment y units per grid y cell
    pub y_cell_res: f32,
}

/// Uses a spatial hashing space division method, where all cells of the
/// underlying table are stored in a 1D array.
///
/// Implementation follows [paper](https://www.researchgate.net/publication/277870601_A_Hash_Table_Construction_Algorithm_for_Spatial_Hashing_Based_on_Linear_Memory),
/// a counting sort of the snapshot into cells. Every cell is at least as wide
/// as the sensory distance, so a query only has to look at the 3x3 block of
/// cells around the agent.
pub struct SpatHash1D {
    /// for each cell, there is a pivot with a range into table
    pivots: Vec<SpatHashPiv>,
    /// indexes into `agents`, grouped by cell
    table: Vec<usize>,
    /// the snapshot in population order
    agents: Vec<Agent>,
    pub(crate) settings: SpatialHashingTableSettings,
}

#[derive(Clone, Debug, Default)]
struct SpatHashPiv {
    usg: usize,
    init: usize,
    fin: usize,
}

impl Tracker for SpatHash1D {
    fn new(entities: &[Agent], run_options: &RunOptions) -> Self {
        let settings = SpatHash1D::get_tracker_settings(run_options);

        let mut tracker = SpatHash1D {
            pivots: vec![Default::default(); settings.cell_count],
            table: Vec::with_capacity(entities.len()),
            agents: entities.to_vec(),
            settings,
        };
        tracker.update_table();

        tracker
    }

    fn view(&self) -> &[Agent] {
        &self.agents
    }

    fn get_neighbours<'a>(&'a self, agent: &Agent, run_options: &RunOptions) -> Vec<&'a Agent> {
        let mut result = Vec::<&Agent>::new();

        // a grid narrower than 3 cells would visit some cells twice
        if self.settings.x_cell_count < 3 || self.settings.y_cell_count < 3 {
            NaiveTracker::get_neighbours_naive(agent, &self.agents, run_options, &mut result);
            return result;
        }

        let (column, row) = self.get_cell(agent);

        for (dx, dy) in (-1..=1).cartesian_product(-1..=1) {
            let cell = match self.neighbour_cell(column, row, dx, dy, run_options.distance) {
                Some(cell) => cell,
                None => continue,
            };

            let pivot = &self.pivots[cell];
            if pivot.usg == 0 {
                continue;
            }

            for &index in &self.table[pivot.init..pivot.fin] {
                let other = &self.agents[index];
                if other.id != agent.id
                    && distance_dyn_agent(agent, other, run_options) < run_options.sensory_distance
                {
                    result.push(other);
                }
            }
        }

        result
    }
}

impl SpatHash1D {
    pub fn get_tracker_settings(run_options: &RunOptions) -> SpatialHashingTableSettings {
        let cell_size = run_options.sensory_distance * CELL_MARGIN;

        // `as usize` saturates, so an absurd ratio lands on the cap
        let axis_cells = |extent: f32| -> usize {
            if cell_size > 0. {
                ((extent / cell_size).floor() as usize).clamp(1, MAX_AXIS_CELLS)
            } else {
                1
            }
        };
        let x_cell_count = axis_cells(run_options.world.width);
        let y_cell_count = axis_cells(run_options.world.height);

        SpatialHashingTableSettings {
            x_cell_count,
            y_cell_count,
            cell_count: x_cell_count * y_cell_count,
            x_cell_res: run_options.world.width / x_cell_count as f32,
            y_cell_res: run_options.world.height / y_cell_count as f32,
        }
    }

    /// Returns "hashed" value representing an index for spatial subdivision
    ///
    /// ## Arguments
    ///
    /// - `p_x` - x coordinate of a point of interest
    /// - `p_y` - y coordinate of a point of interest
    /// - `cs_x` - cell size along the x axis
    /// - `cs_y` - cell size along the y axis
    /// - `table_width` - the table width, how many cells make up a row
    /// - `table_height` - how many rows there are
    ///
    /// ## Returns
    /// an index as _usize_, that takes values from 0..(table_width * table_height)
    pub fn get_table_index(
        p_x: f32,
        p_y: f32,
        cs_x: f32,
        cs_y: f32,
        table_width: usize,
        table_height: usize,
    ) -> usize {
        let (column, row) = Self::get_cell_coords(p_x, p_y, cs_x, cs_y, table_width, table_height);
        column + row * table_width
    }

    fn get_cell_coords(
        p_x: f32,
        p_y: f32,
        cs_x: f32,
        cs_y: f32,
        table_width: usize,
        table_height: usize,
    ) -> (usize, usize) {
        let column = ((p_x.max(0.) / cs_x).floor() as usize).min(table_width - 1);
        let row = ((p_y.max(0.) / cs_y).floor() as usize).min(table_height - 1);
        (column, row)
    }

    fn get_cell(&self, agent: &Agent) -> (usize, usize) {
        Self::get_cell_coords(
            agent.position.x,
            agent.position.y,
            self.settings.x_cell_res,
            self.settings.y_cell_res,
            self.settings.x_cell_count,
            self.settings.y_cell_count,
        )
    }

    /// 1D index of the cell at offset (dx, dy), `None` past the edge of an
    /// enclosed world
    fn neighbour_cell(
        &self,
        column: usize,
        row: usize,
        dx: i32,
        dy: i32,
        distance: Distance,
    ) -> Option<usize> {
        let width = self.settings.x_cell_count as i32;
        let height = self.settings.y_cell_count as i32;
        let c = column as i32 + dx;
        let r = row as i32 + dy;

        let (c, r) = match distance {
            Distance::EucEnclosed => {
                if c < 0 || c >= width || r < 0 || r >= height {
                    return None;
                }
                (c, r)
            }
            Distance::EucToroidal => (c.rem_euclid(width), r.rem_euclid(height)),
        };

        Some((c + r * width) as usize)
    }

    /// counting sort of the snapshot into the cells
    fn update_table(&mut self) {
        self.pivots.iter_mut().for_each(|pivot| *pivot = Default::default());

        let cells = self
            .agents
            .iter()
            .map(|a| {
                Self::get_table_index(
                    a.position.x,
                    a.position.y,
                    self.settings.x_cell_res,
                    self.settings.y_cell_res,
                    self.settings.x_cell_count,
                    self.settings.y_cell_count,
                )
            })
            .collect_vec();

        for &cell in &cells {
            self.pivots[cell].usg += 1;
        }

        let mut accum: usize = 0;
        for pivot in self.pivots.iter_mut() {
            pivot.init = accum;
            accum += pivot.usg;
            pivot.fin = pivot.init;
        }

        // fin doubles as the insertion cursor, it ends at init + usg
        self.table = vec![0; self.agents.len()];
        for (index, &cell) in cells.iter().enumerate() {
            let pivot = &mut self.pivots[cell];
            self.table[pivot.fin] = index;
            pivot.fin += 1;
        }
    }
}
