//! Karel-World: in-memory world model for the Karel codecs
//!
//! A [`World`] is a `w` x `h` grid of cells holding walls, buzzer counts and
//! dump flags, plus the starting state of the program that runs in it:
//! position, orientation, bag, execution [`Limits`] and the set of
//! [`DumpKind`]s reported when the program ends.
//!
//! This crate only stores worlds. Encoding and decoding live in `karel-kbi`.
//!
//! # Usage
//!
//! ```
//! use karel_world::{Direction, Quantity, World};
//!
//! let mut world = World::new(10, 10);
//! world.add_wall(3, 4, Direction::East);
//! world.set_buzzers(5, 5, Quantity::Infinite);
//! world.move_to(1, 1);
//! world.rotate(Direction::East);
//!
//! assert_eq!(world.walls(3, 5) & Direction::West.bit(), Direction::West.bit());
//! assert!(world.start_buzzers(5, 5).is_infinite());
//! ```

mod types;
mod world;

pub use types::{Direction, DumpKind, Limit, Limits, Quantity, TargetVersion};
pub use world::{Cell, World};

/// Name a world gets when none is given
pub const DEFAULT_WORLD_NAME: &str = "mundo_0";

/// Name a program gets when none is given
pub const DEFAULT_PROGRAM_NAME: &str = "p1";
