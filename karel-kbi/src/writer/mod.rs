//! KBI file writer
//!
//! Widths are computed from the whole world before the header is written,
//! since every width-dependent field after it depends on them. Entry counts
//! are not known until their lists are written, so their slots are reserved
//! up front and patched afterwards.

use karel_world::{DumpKind, Limit, Quantity, TargetVersion, World};

use crate::buffer::DynamicBuffer;
use crate::error::KbiError;
use crate::words::WordWidths;
use crate::{DEFAULT_PROGRAM_NAME, DEFAULT_WORLD_NAME, KBI_VERSION_1_0, KBI_VERSION_1_1};

mod grid;


/// Writes one world into a fresh buffer
#[derive(Debug)]
pub struct KbiWriter<'a> {
    world: &'a World,
    widths: WordWidths,
    target: DynamicBuffer,
}

impl<'a> KbiWriter<'a> {
    pub fn new(world: &'a World) -> Self {
        Self {
            world,
            widths: WordWidths::for_world(world),
            target: DynamicBuffer::new(),
        }
    }

    /// Widths this writer will use
    pub fn widths(&self) -> WordWidths {
        self.widths
    }

    /// Build the complete KBI file
    pub fn write(mut self) -> Result<Vec<u8>, KbiError> {
        self.write_header()?;
        self.write_conditions();
        let (buzzers, cell_pairs) = self.write_world_data();
        self.write_program_data();

        tracing::debug!(
            w = self.world.w(),
            h = self.world.h(),
            widths = self.widths.pack(),
            buzzers,
            cell_pairs,
            bytes = self.target.position(),
            "encoded KBI world"
        );
        Ok(self.target.into_bytes())
    }

    fn write_header(&mut self) -> Result<(), KbiError> {
        self.target.write_char("K")?;
        self.target.write_char("W")?;
        self.target.write_u8(match self.world.target_version {
            TargetVersion::V1_0 => KBI_VERSION_1_0,
            TargetVersion::V1_1 => KBI_VERSION_1_1,
        });
        self.target.write_u8(self.widths.pack());
        Ok(())
    }

    /// Execution limits, always 32-bit
    ///
    /// `Max(u32::MAX)` is indistinguishable from the unlimited sentinel.
    fn write_conditions(&mut self) {
        for limit in self.world.limits.to_array() {
            self.target.write_u32(match limit {
                Limit::Max(n) => n,
                Limit::Unlimited => u32::MAX,
            });
        }
    }

    /// Dimensions, name, then the buzzer and cell-pair lists with their counts
    fn write_world_data(&mut self) -> (u32, u32) {
        let world = self.world;
        let a = self.widths.a;
        let c = self.widths.c;
        a.write(&mut self.target, world.w() - 1);
        a.write(&mut self.target, world.h() - 1);
        self.write_name(&world.world_name, DEFAULT_WORLD_NAME);

        let buzzers_slot = c.reserve(&mut self.target);
        let cell_pairs_slot = c.reserve(&mut self.target);

        let buzzers = self.write_buzzers();
        c.write_at(&mut self.target, buzzers_slot, buzzers);

        let cell_pairs = self.write_cell_pairs();
        c.write_at(&mut self.target, cell_pairs_slot, cell_pairs);

        (buzzers, cell_pairs)
    }

    fn write_program_data(&mut self) {
        let world = self.world;
        let a = self.widths.a;
        a.write(&mut self.target, world.start_j().saturating_sub(1));
        a.write(&mut self.target, world.start_i().saturating_sub(1));
        self.write_name(&world.program_name, DEFAULT_PROGRAM_NAME);

        // A finite bag of u32::MAX lands on the infinite sentinel
        self.target.write_u32(match world.start_bag_buzzers() {
            Quantity::Finite(n) => n,
            Quantity::Infinite => u32::MAX,
        });
        self.target.write_u16(program_flags(world));
    }

    /// A name equal to its default is written as a lone NUL
    fn write_name(&mut self, name: &str, default: &str) {
        if name == default {
            self.target.write_u8(0);
        } else {
            self.target.write_string(name);
        }
    }
}

/// Orientation in bits 0-1, one bit per enabled dump kind above it
fn program_flags(world: &World) -> u16 {
    DumpKind::ALL
        .iter()
        .filter(|&&kind| world.dump(kind))
        .fold(u16::from(world.orientation().code()), |flags, kind| {
            flags | kind.bit()
        })
}

/// Encode a world as KBI bytes
///
/// Every [`World`] is encodable; the error path only covers internal
/// invariants of the buffer.
pub fn encode_kbi(world: &World) -> Result<Vec<u8>, KbiError> {
    KbiWriter::new(world).write()
}
