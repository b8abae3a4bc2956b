//! Scalar value types stored in a [`World`](crate::World)

use serde::{Deserialize, Serialize};

// =============================================================================
// Direction
// =============================================================================

/// Cardinal direction, numbered by its orientation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    West = 0,
    #[default]
    North = 1,
    East = 2,
    South = 3,
}

impl Direction {
    /// All directions in code order
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Direction for an orientation code, taken modulo 4
    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code % 4) as usize]
    }

    /// Orientation code (0-3)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Bit of this edge in a wall mask
    pub fn bit(self) -> u8 {
        1 << self.code()
    }

    pub fn opposite(self) -> Self {
        Self::from_code(self.code() + 2)
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A buzzer count that may be infinite
///
/// Encoded counts use the all-ones value of their field as "infinite", so
/// `Finite(u32::MAX)` is outside the representable range and reads back as
/// `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Finite(u32),
    Infinite,
}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Finite(0);

    pub fn is_infinite(self) -> bool {
        matches!(self, Quantity::Infinite)
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// The finite count, or `None` when infinite
    pub fn finite(self) -> Option<u32> {
        match self {
            Quantity::Finite(n) => Some(n),
            Quantity::Infinite => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Quantity::Finite(n)
    }
}

// =============================================================================
// Limits
// =============================================================================

/// An execution limit that may be lifted entirely
///
/// `Max(u32::MAX)` shares its encoding with `Unlimited` and reads back as
/// `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Limit {
    Max(u32),
    #[default]
    Unlimited,
}

impl Limit {
    pub fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }
}

impl From<u32> for Limit {
    fn from(n: u32) -> Self {
        Limit::Max(n)
    }
}

/// Execution limits of a world, in KBI wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Limits {
    pub instructions: Limit,
    pub stack_size: Limit,
    pub stack_memory: Limit,
    pub call_depth: Limit,
    pub moves: Limit,
    pub turn_left: Limit,
    pub pick_buzzer: Limit,
    pub leave_buzzer: Limit,
}

impl Limits {
    /// The limits in wire order
    pub fn to_array(&self) -> [Limit; 8] {
        [
            self.instructions,
            self.stack_size,
            self.stack_memory,
            self.call_depth,
            self.moves,
            self.turn_left,
            self.pick_buzzer,
            self.leave_buzzer,
        ]
    }

    /// Build from limits in wire order
    pub fn from_array(limits: [Limit; 8]) -> Self {
        let [
            instructions,
            stack_size,
            stack_memory,
            call_depth,
            moves,
            turn_left,
            pick_buzzer,
            leave_buzzer,
        ] = limits;
        Self {
            instructions,
            stack_size,
            stack_memory,
            call_depth,
            moves,
            turn_left,
            pick_buzzer,
            leave_buzzer,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            instructions: Limit::Max(10_000_000),
            stack_size: Limit::Max(65_000),
            stack_memory: Limit::Max(65_000),
            call_depth: Limit::Max(5_000),
            moves: Limit::Unlimited,
            turn_left: Limit::Unlimited,
            pick_buzzer: Limit::Unlimited,
            leave_buzzer: Limit::Unlimited,
        }
    }
}

// =============================================================================
// Dump kinds
// =============================================================================

/// Category of execution state reported when a program ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DumpKind {
    World,
    AllBuzzers,
    Orientation,
    Position,
    Bag,
    Move,
    TurnLeft,
    LeaveBuzzer,
    PickBuzzer,
}

impl DumpKind {
    /// All kinds in program-flag bit order
    pub const ALL: [DumpKind; 9] = [
        DumpKind::World,
        DumpKind::AllBuzzers,
        DumpKind::Orientation,
        DumpKind::Position,
        DumpKind::Bag,
        DumpKind::Move,
        DumpKind::TurnLeft,
        DumpKind::LeaveBuzzer,
        DumpKind::PickBuzzer,
    ];

    /// Position of this kind in [`DumpKind::ALL`]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Bit of this kind in a 16-bit program flag word (bits 2-10)
    pub fn bit(self) -> u16 {
        1 << (2 + self.ordinal())
    }
}

// =============================================================================
// Target version
// =============================================================================

/// Interpreter version a world is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[default]
    #[serde(rename = "1.1")]
    V1_1,
}

impl TargetVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetVersion::V1_0 => "1.0",
            TargetVersion::V1_1 => "1.1",
        }
    }
}
