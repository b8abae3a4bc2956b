//! Legacy MDO/KEC reader
//!
//! Worlds from the original Karel tooling come as two files of 16-bit
//! little-endian words with every field at a fixed offset:
//!
//! - **MDO** (required): grid size, start state, walls and buzzer heaps.
//! - **KEC** (optional): execution limits and dump settings. Each field is
//!   preceded by an "enabled" word; disabled fields keep the world defaults.
//!
//! There is no writer for this format.
//!
//! # MDO Layout (words)
//!
//! ```text
//! 0-4    "KAREL OMI." signature
//! 6, 7   width, height
//! 8      bag (0xFFFF = infinite)
//! 9, 10  start column, start row
//! 11     orientation (mod 4)
//! 12     wall entry count
//! 13     heap entry count
//! 15..   wall entries (x, y, mask) then heap entries (x, y, count)
//!        mask bits: 0 = edge to row y + 1, 1 = east,
//!                   2 = edge to row y - 1, 3 = west
//! ```
//!
//! # KEC Layout (words)
//!
//! ```text
//! 0/1    instructions      15/16  karel buzzers (deprecated)
//! 3/4    moves             18/19  world buzzers (deprecated)
//! 6/7    turn-left         21     dump position
//! 9/10   pick buzzer       24     dump orientation
//! 12/13  leave buzzer      27/28  dump cell count
//! 30..   dump cells (x, y, unused)
//! ```

mod kec;
mod mdo;


use karel_world::{DumpKind, Limit, TargetVersion, World};

use crate::error::KbiError;

use kec::KecSettings;
use mdo::MdoWorld;

/// MDO signature, "KAREL OMI." as little-endian words
pub const MDO_MAGIC: [u16; 5] = [0x414b, 0x4552, 0x204c, 0x4d4f, 0x2e49];

/// Minimum MDO length in words
pub const MDO_MIN_WORDS: usize = 20;

/// Minimum KEC length in words
pub const KEC_MIN_WORDS: usize = 30;

/// Reinterpret a little-endian byte stream as 16-bit words
///
/// A trailing odd byte is dropped.
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Read an MDO world and optional KEC settings into `world`
///
/// Both documents are fully validated and parsed before `world` is touched,
/// so on error the world is unchanged.
pub fn read_mdo_kec(world: &mut World, mdo: &[u16], kec: Option<&[u16]>) -> Result<(), KbiError> {
    if mdo.len() < MDO_MIN_WORDS {
        return Err(KbiError::LegacyTooSmall {
            document: "MDO",
            words: mdo.len(),
            required: MDO_MIN_WORDS,
        });
    }
    if let Some(kec) = kec
        && kec.len() < KEC_MIN_WORDS
    {
        return Err(KbiError::LegacyTooSmall {
            document: "KEC",
            words: kec.len(),
            required: KEC_MIN_WORDS,
        });
    }
    if mdo[..MDO_MAGIC.len()] != MDO_MAGIC {
        return Err(KbiError::LegacyInvalidMagic);
    }

    let mdo = MdoWorld::parse(mdo)?;
    let kec = kec.map(KecSettings::parse).transpose()?.unwrap_or_default();

    apply(world, &mdo, &kec);
    tracing::debug!(
        w = mdo.width,
        h = mdo.height,
        walls = mdo.walls.len(),
        heaps = mdo.heaps.len(),
        dump_cells = kec.dump_cells.len(),
        "read MDO/KEC world"
    );
    Ok(())
}

fn apply(world: &mut World, mdo: &MdoWorld, kec: &KecSettings) {
    world.resize(u32::from(mdo.width), u32::from(mdo.height));
    world.clear();
    // MDO predates 1.1
    world.target_version = TargetVersion::V1_0;
    world.set_bag_buzzers(mdo.bag);
    world.move_to(u32::from(mdo.start_y), u32::from(mdo.start_x));
    world.rotate(mdo.orientation);

    let limits = &mut world.limits;
    let gated = [
        (kec.instructions, &mut limits.instructions),
        (kec.moves, &mut limits.moves),
        (kec.turn_left, &mut limits.turn_left),
        (kec.pick_buzzer, &mut limits.pick_buzzer),
        (kec.leave_buzzer, &mut limits.leave_buzzer),
    ];
    for (value, limit) in gated {
        if let Some(value) = value {
            *limit = Limit::Max(u32::from(value));
        }
    }
    if kec.dump_position {
        world.set_dump(DumpKind::Position, true);
    }
    if kec.dump_orientation {
        world.set_dump(DumpKind::Orientation, true);
    }
    if !kec.dump_cells.is_empty() {
        world.set_dump(DumpKind::World, true);
    }

    for wall in &mdo.walls {
        for direction in wall.directions() {
            world.add_wall(u32::from(wall.y), u32::from(wall.x), direction);
        }
    }
    for heap in &mdo.heaps {
        world.set_buzzers(u32::from(heap.y), u32::from(heap.x), heap.count);
    }
    for &(x, y) in &kec.dump_cells {
        world.set_dump_cell(u32::from(y), u32::from(x), true);
    }
}
