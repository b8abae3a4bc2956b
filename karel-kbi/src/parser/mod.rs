//! KBI file parser
//!
//! Reads a file in one forward pass, in the same section order the writer
//! uses, populating the target world as it goes. Only the magic, the version
//! and the width codes are validated; every other value is taken as-is.

use std::io::Cursor;

use karel_world::{Direction, DumpKind, Limit, Limits, Quantity, TargetVersion, World};

use crate::error::KbiError;
use crate::words::WordWidths;
use crate::{
    DEFAULT_PROGRAM_NAME, DEFAULT_WORLD_NAME, KBI_MAGIC, KBI_VERSION_1_0, KBI_VERSION_1_1,
};

mod grid;
mod helpers;

use helpers::{coord, read_string, read_u8, read_u16, read_u32, read_word};

/// Parse a KBI file into `world`
///
/// The world is cleared first. On error it is left partially overwritten and
/// should be discarded.
///
/// # Arguments
/// * `world` - World to populate
/// * `data` - Raw KBI file bytes
///
/// # Returns
/// * `Ok(())` - `world` now holds the decoded world
/// * `Err(KbiError)` - Bad magic, unsupported version or width, or truncated input
pub fn decode_kbi(world: &mut World, data: &[u8]) -> Result<(), KbiError> {
    let mut cursor = Cursor::new(data);
    world.clear();

    let widths = parse_header(&mut cursor, world)?;
    let mut reader = KbiReader {
        world,
        cursor,
        widths,
    };
    reader.parse_conditions()?;
    let (buzzers, cell_pairs) = reader.parse_world()?;
    reader.parse_program_data()?;

    tracing::debug!(
        w = reader.world.w(),
        h = reader.world.h(),
        widths = widths.pack(),
        buzzers,
        cell_pairs,
        bytes = reader.cursor.position(),
        "decoded KBI world"
    );
    Ok(())
}

/// Magic, version and packed word widths
fn parse_header(cursor: &mut Cursor<&[u8]>, world: &mut World) -> Result<WordWidths, KbiError> {
    let magic = [read_u8(cursor)?, read_u8(cursor)?];
    if &magic != KBI_MAGIC {
        return Err(KbiError::InvalidMagic);
    }

    world.target_version = match read_u8(cursor)? {
        KBI_VERSION_1_0 => TargetVersion::V1_0,
        KBI_VERSION_1_1 => TargetVersion::V1_1,
        other => return Err(KbiError::UnsupportedVersion(other)),
    };

    WordWidths::unpack(read_u8(cursor)?)
}

/// Decoding state after the header
struct KbiReader<'a, 'w> {
    world: &'w mut World,
    cursor: Cursor<&'a [u8]>,
    widths: WordWidths,
}

impl KbiReader<'_, '_> {
    fn parse_conditions(&mut self) -> Result<(), KbiError> {
        let mut limits = [Limit::Unlimited; 8];
        for limit in &mut limits {
            *limit = match read_u32(&mut self.cursor)? {
                u32::MAX => Limit::Unlimited,
                n => Limit::Max(n),
            };
        }
        self.world.limits = Limits::from_array(limits);
        Ok(())
    }

    /// Returns the buzzer and cell-pair entry counts
    fn parse_world(&mut self) -> Result<(u32, u32), KbiError> {
        let w = read_word(&mut self.cursor, self.widths.a)?.saturating_add(1);
        let h = read_word(&mut self.cursor, self.widths.a)?.saturating_add(1);
        self.world.resize(w, h);

        self.world.world_name = match read_string(&mut self.cursor)? {
            name if name.is_empty() => DEFAULT_WORLD_NAME.to_string(),
            name => name,
        };

        let buzzers = read_word(&mut self.cursor, self.widths.c)?;
        let cell_pairs = read_word(&mut self.cursor, self.widths.c)?;
        for _ in 0..buzzers {
            self.parse_buzzer_entry()?;
        }
        for _ in 0..cell_pairs {
            self.parse_cell_pair_entry()?;
        }
        Ok((buzzers, cell_pairs))
    }

    fn parse_program_data(&mut self) -> Result<(), KbiError> {
        let j = u64::from(read_word(&mut self.cursor, self.widths.a)?) + 1;
        let i = u64::from(read_word(&mut self.cursor, self.widths.a)?) + 1;
        self.world.move_to(coord(i), coord(j));

        self.world.program_name = match read_string(&mut self.cursor)? {
            name if name.is_empty() => DEFAULT_PROGRAM_NAME.to_string(),
            name => name,
        };

        let bag = match read_u32(&mut self.cursor)? {
            u32::MAX => Quantity::Infinite,
            n => Quantity::Finite(n),
        };
        self.world.set_bag_buzzers(bag);

        let flags = read_u16(&mut self.cursor)?;
        self.world.rotate(Direction::from_code((flags & 3) as u8));
        for kind in DumpKind::ALL {
            if flags & kind.bit() != 0 {
                self.world.set_dump(kind, true);
            }
        }
        Ok(())
    }
}
