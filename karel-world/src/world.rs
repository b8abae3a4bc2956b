//! Karel world: a grid of cells plus the program's starting state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, DumpKind, Limits, Quantity, TargetVersion};
use crate::{DEFAULT_PROGRAM_NAME, DEFAULT_WORLD_NAME};

/// Contents of a single grid cell
///
/// Only non-empty cells are stored, so a default cell never appears in
/// [`World::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Interior walls around the cell, as a [`Direction::bit`] mask
    pub walls: u8,
    /// Whether the cell's buzzers are reported when the program ends
    pub dump: bool,
    pub buzzers: Quantity,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.walls == 0 && !self.dump && self.buzzers.is_zero()
    }
}

/// In-memory Karel world
///
/// Cells are addressed 1-based as `(i, j)` with `i` the row in `1..=h` and
/// `j` the column in `1..=w`. Row numbers grow southward: the south edge of
/// row `i` is the north edge of row `i + 1`.
///
/// The outer boundary is always walled. Boundary edges are reported by
/// [`World::walls`] but never stored, so two worlds with the same interior
/// walls compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    w: u32,
    h: u32,
    #[serde(with = "cell_map")]
    cells: BTreeMap<(u32, u32), Cell>,
    start_i: u32,
    start_j: u32,
    orientation: Direction,
    bag: Quantity,
    dumps: [bool; 9],
    pub world_name: String,
    pub program_name: String,
    pub limits: Limits,
    pub target_version: TargetVersion,
}

impl Default for World {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl World {
    /// Create an empty `w` x `h` world (dimensions are raised to at least 1)
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w: w.max(1),
            h: h.max(1),
            cells: BTreeMap::new(),
            start_i: 1,
            start_j: 1,
            orientation: Direction::North,
            bag: Quantity::ZERO,
            dumps: [false; 9],
            world_name: DEFAULT_WORLD_NAME.to_string(),
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            limits: Limits::default(),
            target_version: TargetVersion::default(),
        }
    }

    /// Grid width (number of columns)
    pub fn w(&self) -> u32 {
        self.w
    }

    /// Grid height (number of rows)
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Change the grid dimensions, discarding every cell
    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w.max(1);
        self.h = h.max(1);
        self.cells.clear();
    }

    /// Reset everything except the dimensions to defaults
    pub fn clear(&mut self) {
        *self = Self::new(self.w, self.h);
    }

    pub fn contains(&self, i: u32, j: u32) -> bool {
        (1..=self.h).contains(&i) && (1..=self.w).contains(&j)
    }

    // =========================================================================
    // Program start state
    // =========================================================================

    /// Set the starting position, if it lies on the grid
    pub fn move_to(&mut self, i: u32, j: u32) {
        if self.contains(i, j) {
            self.start_i = i;
            self.start_j = j;
        }
    }

    pub fn start_i(&self) -> u32 {
        self.start_i
    }

    pub fn start_j(&self) -> u32 {
        self.start_j
    }

    /// Set the starting orientation
    pub fn rotate(&mut self, direction: Direction) {
        self.orientation = direction;
    }

    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn set_bag_buzzers(&mut self, bag: Quantity) {
        self.bag = bag;
    }

    pub fn start_bag_buzzers(&self) -> Quantity {
        self.bag
    }

    pub fn set_dump(&mut self, kind: DumpKind, enabled: bool) {
        self.dumps[kind.ordinal()] = enabled;
    }

    pub fn dump(&self, kind: DumpKind) -> bool {
        self.dumps[kind.ordinal()]
    }

    // =========================================================================
    // Cells
    // =========================================================================

    /// Non-empty cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &Cell)> {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    fn update_cell(&mut self, i: u32, j: u32, f: impl FnOnce(&mut Cell)) {
        if !self.contains(i, j) {
            return;
        }
        let cell = self.cells.entry((i, j)).or_default();
        f(cell);
        if cell.is_empty() {
            self.cells.remove(&(i, j));
        }
    }

    fn cell(&self, i: u32, j: u32) -> Cell {
        self.cells.get(&(i, j)).copied().unwrap_or_default()
    }

    /// Wall mask of a cell, including the outer boundary
    pub fn walls(&self, i: u32, j: u32) -> u8 {
        if !self.contains(i, j) {
            return 0;
        }
        let mut mask = self.cell(i, j).walls;
        if i == 1 {
            mask |= Direction::North.bit();
        }
        if i == self.h {
            mask |= Direction::South.bit();
        }
        if j == 1 {
            mask |= Direction::West.bit();
        }
        if j == self.w {
            mask |= Direction::East.bit();
        }
        mask
    }

    /// Add a wall on one edge of a cell and the matching edge of its neighbour
    ///
    /// Boundary edges are already walled, so adding one is a no-op.
    pub fn add_wall(&mut self, i: u32, j: u32, direction: Direction) {
        let neighbour = match direction {
            Direction::North => i.checked_sub(1).map(|ni| (ni, j)),
            Direction::South => i.checked_add(1).map(|ni| (ni, j)),
            Direction::West => j.checked_sub(1).map(|nj| (i, nj)),
            Direction::East => j.checked_add(1).map(|nj| (i, nj)),
        };
        let Some((ni, nj)) = neighbour else {
            return;
        };
        if !self.contains(i, j) || !self.contains(ni, nj) {
            return;
        }
        self.update_cell(i, j, |cell| cell.walls |= direction.bit());
        self.update_cell(ni, nj, |cell| cell.walls |= direction.opposite().bit());
    }

    pub fn set_buzzers(&mut self, i: u32, j: u32, buzzers: Quantity) {
        self.update_cell(i, j, |cell| cell.buzzers = buzzers);
    }

    /// Buzzers in a cell at program start
    pub fn start_buzzers(&self, i: u32, j: u32) -> Quantity {
        self.cell(i, j).buzzers
    }

    pub fn set_dump_cell(&mut self, i: u32, j: u32, dump: bool) {
        self.update_cell(i, j, |cell| cell.dump = dump);
    }

    pub fn dump_cell(&self, i: u32, j: u32) -> bool {
        self.cell(i, j).dump
    }

    /// Number of cells flagged for dumping
    pub fn dump_cell_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.dump).count()
    }
}

/// Serializes the cell map as a list of `[[i, j], cell]` pairs, since JSON
/// object keys cannot be tuples.
mod cell_map {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::Cell;

    pub fn serialize<S: Serializer>(
        cells: &BTreeMap<(u32, u32), Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(cells.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(u32, u32), Cell>, D::Error> {
        let entries = Vec::<((u32, u32), Cell)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
