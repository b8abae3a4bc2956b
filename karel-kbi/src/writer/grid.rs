//! Buzzer and cell-pair lists

use karel_world::Quantity;

use super::KbiWriter;
use crate::words::{cell_flags, wire_index};

impl KbiWriter<'_> {
    /// One `(index, count)` entry per cell holding buzzers, row by row
    ///
    /// Returns the number of entries written.
    pub(super) fn write_buzzers(&mut self) -> u32 {
        let world = self.world;
        let (b, c) = (self.widths.b, self.widths.c);
        let mut count = 0;
        for ((i, j), cell) in world.cells() {
            let value = match cell.buzzers {
                Quantity::Finite(0) => continue,
                Quantity::Finite(n) => n,
                Quantity::Infinite => b.sentinel(),
            };
            c.write(&mut self.target, wire_index(world.w(), i, j));
            b.write(&mut self.target, value);
            count += 1;
        }
        count
    }

    /// One `(index, flags)` entry per cell with walls or a dump flag
    ///
    /// When the next such cell is the right-hand neighbour, its flags go in
    /// bits 3-5 of the same byte and it gets no entry of its own.
    pub(super) fn write_cell_pairs(&mut self) -> u32 {
        let world = self.world;
        let c = self.widths.c;
        let mut cells = world
            .cells()
            .map(|(pos, _)| pos)
            .filter_map(|(i, j)| match cell_flags(world, i, j) {
                0 => None,
                flags => Some((i, j, flags)),
            })
            .peekable();

        let mut count = 0;
        while let Some((i, j, mut flags)) = cells.next() {
            let neighbour = cells.next_if(|&(ni, nj, _)| ni == i && nj == j + 1);
            if let Some((_, _, next_flags)) = neighbour {
                flags |= next_flags << 3;
            }
            c.write(&mut self.target, wire_index(world.w(), i, j));
            self.target.write_u8(flags);
            count += 1;
        }
        count
    }
}
