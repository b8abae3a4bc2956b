//! Karel-KBI: binary codec for Karel worlds
//!
//! This crate converts a [`karel_world::World`] to and from KBI, a compact
//! binary format whose integer fields are sized from the world's own data,
//! and reads the legacy MDO/KEC pair into the same model.
//!
//! # KBI Format Overview
//!
//! All multi-byte integers are little-endian. A, B and C are adaptive word
//! widths (1, 2 or 4 bytes) chosen per file; see [`WordWidths`].
//!
//! ```text
//! Header
//!   "KW"                magic
//!   u8                  version (0 = 1.0, 1 = 1.1)
//!   u8                  word widths (A bits 0-1, B bits 2-3, C bits 4-5)
//! Conditions
//!   8 x u32             instructions, stack size, stack memory, call depth,
//!                       move, turn-left, pick, leave (0xFFFFFFFF = unlimited)
//! World
//!   A, A                width - 1, height - 1
//!   string              world name ("" = "mundo_0")
//!   C, C                buzzer entry count, cell-pair entry count
//!   (C index, B count)  buzzer entries (count 0 starts a run)
//!   (C index, u8 flags) cell-pair entries (flags 0 starts a run)
//! Program
//!   A, A                start column - 1, start row - 1
//!   string              program name ("" = "p1")
//!   u32                 bag (0xFFFFFFFF = infinite)
//!   u16                 orientation (bits 0-1) and dump kinds (bits 2-10)
//! ```
//!
//! Strings are NUL-terminated. Each width's all-ones value means "infinite".
//!
//! # Usage
//!
//! ```
//! use karel_kbi::{decode_kbi, encode_kbi};
//! use karel_world::{Direction, Quantity, World};
//!
//! let mut world = World::new(8, 8);
//! world.add_wall(2, 3, Direction::South);
//! world.set_buzzers(4, 4, Quantity::Infinite);
//!
//! let bytes = encode_kbi(&world).unwrap();
//! assert_eq!(&bytes[0..2], b"KW");
//!
//! let mut decoded = World::default();
//! decode_kbi(&mut decoded, &bytes).unwrap();
//! assert_eq!(decoded, world);
//! ```

mod buffer;
mod error;
mod legacy;
mod parser;
mod words;
mod writer;

pub use buffer::DynamicBuffer;
pub use error::KbiError;
pub use legacy::{KEC_MIN_WORDS, MDO_MAGIC, MDO_MIN_WORDS, read_mdo_kec, words_from_le_bytes};
pub use parser::decode_kbi;
pub use words::{WordWidth, WordWidths, coord_to_ij, linear_index};
pub use writer::{KbiWriter, encode_kbi};

pub use karel_world::{DEFAULT_PROGRAM_NAME, DEFAULT_WORLD_NAME};

// =============================================================================
// Constants
// =============================================================================

/// KBI magic bytes "KW"
pub const KBI_MAGIC: &[u8; 2] = b"KW";

/// Version byte of worlds targeting 1.0
pub const KBI_VERSION_1_0: u8 = 0;

/// Version byte of worlds targeting 1.1
pub const KBI_VERSION_1_1: u8 = 1;

/// Size of the fixed header (magic, version, widths)
pub const KBI_HEADER_SIZE: usize = 4;

/// Size of the conditions section (eight u32 limits)
pub const KBI_CONDITIONS_SIZE: usize = 32;
