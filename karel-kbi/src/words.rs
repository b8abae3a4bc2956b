//! Adaptive word widths
//!
//! A KBI file stores three kinds of integers at widths picked from the data:
//!
//! - **A**: grid dimensions, start coordinates and run lengths
//! - **B**: per-cell buzzer counts
//! - **C**: linear cell indices and entry counts
//!
//! Each width reserves its all-ones value as the "infinite" sentinel. The
//! header packs the three width codes into one byte, two bits each.

use karel_world::World;

use crate::buffer::DynamicBuffer;
use crate::error::KbiError;

/// Size of one adaptive integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    U32,
    U16,
    U8,
}

impl WordWidth {
    /// Smallest width that holds `max`
    pub fn for_max(max: u64) -> Self {
        if max < 1 << 8 {
            WordWidth::U8
        } else if max < 1 << 16 {
            WordWidth::U16
        } else {
            WordWidth::U32
        }
    }

    /// Two-bit header code: 0 = 4 bytes, 1 = 2 bytes, 2 = 1 byte
    pub fn code(self) -> u8 {
        match self {
            WordWidth::U32 => 0,
            WordWidth::U16 => 1,
            WordWidth::U8 => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, KbiError> {
        match code {
            0 => Ok(WordWidth::U32),
            1 => Ok(WordWidth::U16),
            2 => Ok(WordWidth::U8),
            other => Err(KbiError::UnsupportedWordWidth(other)),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            WordWidth::U32 => 4,
            WordWidth::U16 => 2,
            WordWidth::U8 => 1,
        }
    }

    /// All-ones value meaning "infinite"
    pub fn sentinel(self) -> u32 {
        match self {
            WordWidth::U32 => u32::MAX,
            WordWidth::U16 => u16::MAX as u32,
            WordWidth::U8 => u8::MAX as u32,
        }
    }

    /// Append `value`, truncated to this width
    pub fn write(self, buffer: &mut DynamicBuffer, value: u32) {
        match self {
            WordWidth::U32 => buffer.write_u32(value),
            WordWidth::U16 => buffer.write_u16(value as u16),
            WordWidth::U8 => buffer.write_u8(value as u8),
        }
    }

    /// Write `value` at an earlier reserved offset
    pub fn write_at(self, buffer: &mut DynamicBuffer, offset: usize, value: u32) {
        match self {
            WordWidth::U32 => buffer.write_u32_at(offset, value),
            WordWidth::U16 => buffer.write_u16_at(offset, value as u16),
            WordWidth::U8 => buffer.write_u8_at(offset, value as u8),
        }
    }

    /// Reserve room for one word and return its offset
    pub fn reserve(self, buffer: &mut DynamicBuffer) -> usize {
        buffer.reserve(self.bytes())
    }
}

/// The A/B/C width triple of one KBI file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordWidths {
    pub a: WordWidth,
    pub b: WordWidth,
    pub c: WordWidth,
}

impl WordWidths {
    /// Compute the minimal widths for a world's contents
    pub fn for_world(world: &World) -> Self {
        let a = WordWidth::for_max(u64::from(world.w().max(world.h()) - 1));

        // +1 keeps the largest finite count clear of the sentinel
        let max_buzzers = world
            .cells()
            .filter_map(|(_, cell)| cell.buzzers.finite())
            .max()
            .unwrap_or(0);
        let b = WordWidth::for_max(u64::from(max_buzzers) + 1);

        let mut count = 0u64;
        let mut max_index = 0u64;
        for ((i, j), _) in world.cells() {
            if is_qualifying_cell(world, i, j) {
                count += 1;
                max_index = max_index.max(linear_index(world.w(), i, j));
            }
        }
        let c = WordWidth::for_max(count.max(max_index));

        Self { a, b, c }
    }

    /// Pack into the header byte: A in bits 0-1, B in 2-3, C in 4-5
    pub fn pack(self) -> u8 {
        self.a.code() | (self.b.code() << 2) | (self.c.code() << 4)
    }

    pub fn unpack(byte: u8) -> Result<Self, KbiError> {
        Ok(Self {
            a: WordWidth::from_code(byte & 3)?,
            b: WordWidth::from_code((byte >> 2) & 3)?,
            c: WordWidth::from_code((byte >> 4) & 3)?,
        })
    }
}

/// Row-major index of cell `(i, j)` in a grid `w` columns wide
pub fn linear_index(w: u32, i: u32, j: u32) -> u64 {
    u64::from(i - 1) * u64::from(w) + u64::from(j - 1)
}

/// [`linear_index`] as written in a C word
///
/// Indices past `u32` saturate to all ones.
pub(crate) fn wire_index(w: u32, i: u32, j: u32) -> u32 {
    u32::try_from(linear_index(w, i, j)).unwrap_or(u32::MAX)
}

/// Inverse of [`linear_index`]
pub fn coord_to_ij(w: u32, index: u64) -> (u64, u64) {
    let w = u64::from(w.max(1));
    (index / w + 1, index % w + 1)
}

/// Whether a cell needs a buzzer entry or a cell-pair entry
pub(crate) fn is_qualifying_cell(world: &World, i: u32, j: u32) -> bool {
    !world.start_buzzers(i, j).is_zero() || cell_flags(world, i, j) != 0
}

/// Wall/dump flags of a cell as stored in a cell-pair entry
///
/// Bit 0 is the south wall, bit 1 the east wall, bit 2 the dump flag. Walls on
/// the grid boundary are implied and never stored.
pub(crate) fn cell_flags(world: &World, i: u32, j: u32) -> u8 {
    use karel_world::Direction;

    let walls = world.walls(i, j);
    let mut flags = 0;
    if walls & Direction::South.bit() != 0 && i != world.h() {
        flags |= 1;
    }
    if walls & Direction::East.bit() != 0 && j != world.w() {
        flags |= 2;
    }
    if world.dump_cell(i, j) {
        flags |= 4;
    }
    flags
}
