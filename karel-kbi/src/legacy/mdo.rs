//! MDO world document

use karel_world::{Direction, Quantity};

use crate::error::KbiError;

/// Word value meaning "infinite" in MDO counts
const MDO_INFINITE: u16 = 0xFFFF;

/// First word of the wall/heap entry tables
const MDO_ENTRIES_START: usize = 15;

/// Edge named by each wall mask bit
///
/// MDO rows count northward, so its north edge (bit 0) is the edge towards
/// row `i + 1`, which is [`Direction::South`] in a [`World`](karel_world::World).
/// Bits 0 and 2 are mirrored; east and west keep their meaning.
const MDO_WALL_EDGES: [Direction; 4] = [
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
];

/// A cell's walls as stored in an MDO file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MdoWall {
    pub x: u16,
    pub y: u16,
    /// Bit `k` set means a wall on the edge `MDO_WALL_EDGES[k]`
    pub mask: u16,
}

impl MdoWall {
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        let mask = self.mask;
        MDO_WALL_EDGES
            .into_iter()
            .enumerate()
            .filter(move |&(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, edge)| edge)
    }
}

/// A buzzer heap as stored in an MDO file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MdoHeap {
    pub x: u16,
    pub y: u16,
    pub count: Quantity,
}

/// Fixed-layout contents of an MDO document
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MdoWorld {
    pub width: u16,
    pub height: u16,
    pub bag: Quantity,
    pub start_x: u16,
    pub start_y: u16,
    pub orientation: Direction,
    pub walls: Vec<MdoWall>,
    pub heaps: Vec<MdoHeap>,
}

impl MdoWorld {
    /// Parse an MDO whose length and signature were already checked
    pub(crate) fn parse(mdo: &[u16]) -> Result<Self, KbiError> {
        let wall_count = usize::from(mdo[12]);
        let heap_count = usize::from(mdo[13]);

        let walls_end = MDO_ENTRIES_START + 3 * wall_count;
        let heaps_end = walls_end + 3 * heap_count;
        let walls = entries(mdo, MDO_ENTRIES_START, walls_end)?
            .map(|[x, y, mask]| MdoWall { x, y, mask })
            .collect();
        let heaps = entries(mdo, walls_end, heaps_end)?
            .map(|[x, y, count]| MdoHeap {
                x,
                y,
                count: quantity(count),
            })
            .collect();

        Ok(Self {
            width: mdo[6],
            height: mdo[7],
            bag: quantity(mdo[8]),
            start_x: mdo[9],
            start_y: mdo[10],
            orientation: Direction::from_code((mdo[11] % 4) as u8),
            walls,
            heaps,
        })
    }
}

fn quantity(word: u16) -> Quantity {
    match word {
        MDO_INFINITE => Quantity::Infinite,
        n => Quantity::Finite(u32::from(n)),
    }
}

/// `(a, b, c)` word triples in `start..end`
pub(super) fn entries(
    words: &[u16],
    start: usize,
    end: usize,
) -> Result<impl Iterator<Item = [u16; 3]> + '_, KbiError> {
    let table = words.get(start..end).ok_or(KbiError::UnexpectedEof)?;
    Ok(table.chunks_exact(3).map(|w| [w[0], w[1], w[2]]))
}
