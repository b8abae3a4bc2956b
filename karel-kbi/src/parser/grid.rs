//! Buzzer and cell-pair entries
//!
//! Both lists have a run-length form that the writer never produces but
//! other producers may. A zero where a single entry's value belongs
//! introduces an A-width `length - 1` followed by that many raw values.

use karel_world::Direction;

use super::KbiReader;
use super::helpers::{coord, read_quantity, read_u8, read_word};
use crate::error::KbiError;
use crate::words::coord_to_ij;

impl KbiReader<'_, '_> {
    /// Cell coordinates of the next C-width linear index
    fn read_cell(&mut self) -> Result<(u64, u64), KbiError> {
        let index = read_word(&mut self.cursor, self.widths.c)?;
        Ok(coord_to_ij(self.world.w(), u64::from(index)))
    }

    fn read_run_length(&mut self) -> Result<u64, KbiError> {
        Ok(u64::from(read_word(&mut self.cursor, self.widths.a)?) + 1)
    }

    pub(super) fn parse_buzzer_entry(&mut self) -> Result<(), KbiError> {
        let (i, j) = self.read_cell()?;
        let buzzers = read_quantity(&mut self.cursor, self.widths.b)?;
        if !buzzers.is_zero() {
            self.world.set_buzzers(coord(i), coord(j), buzzers);
            return Ok(());
        }

        // Run of consecutive columns starting at (i, j)
        let len = self.read_run_length()?;
        tracing::trace!(i, j, len, "buzzer run entry");
        for k in 0..len {
            let buzzers = read_quantity(&mut self.cursor, self.widths.b)?;
            self.world.set_buzzers(coord(i), coord(j + k), buzzers);
        }
        Ok(())
    }

    pub(super) fn parse_cell_pair_entry(&mut self) -> Result<(), KbiError> {
        let (i, j) = self.read_cell()?;
        let flags = read_u8(&mut self.cursor)?;
        if flags != 0 {
            self.apply_cell_pair(i, j, flags);
            return Ok(());
        }

        // Run of raw flag bytes, each covering two columns
        let len = self.read_run_length()?;
        tracing::trace!(i, j, len, "cell-pair run entry");
        for k in 0..len {
            let flags = read_u8(&mut self.cursor)?;
            self.apply_cell_pair(i, j + 2 * k, flags);
        }
        Ok(())
    }

    /// Apply a flag byte to `(i, j)` (bits 0-2) and `(i, j + 1)` (bits 3-5)
    fn apply_cell_pair(&mut self, i: u64, j: u64, flags: u8) {
        self.apply_cell_flags(i, j, flags & 0b111);
        self.apply_cell_flags(i, j + 1, (flags >> 3) & 0b111);
    }

    /// Bit 0 south wall, bit 1 east wall, bit 2 dump flag
    fn apply_cell_flags(&mut self, i: u64, j: u64, flags: u8) {
        let (i, j) = (coord(i), coord(j));
        if flags & 1 != 0 {
            self.world.add_wall(i, j, Direction::South);
        }
        if flags & 2 != 0 {
            self.world.add_wall(i, j, Direction::East);
        }
        if flags & 4 != 0 {
            self.world.set_dump_cell(i, j, true);
        }
    }
}
