//! KEC execution settings document

use crate::error::KbiError;

use super::mdo::entries;

/// First word of the dump cell table
const KEC_DUMP_CELLS_START: usize = 30;

/// Settings carried by a KEC document
///
/// `None` and `false` mean the field was disabled, leaving the world's own
/// default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct KecSettings {
    pub instructions: Option<u16>,
    pub moves: Option<u16>,
    pub turn_left: Option<u16>,
    pub pick_buzzer: Option<u16>,
    pub leave_buzzer: Option<u16>,
    /// Deprecated limit on buzzers Karel may carry; read but not applied
    pub karel_buzzers: Option<u16>,
    /// Deprecated limit on buzzers in the world; read but not applied
    pub world_buzzers: Option<u16>,
    pub dump_position: bool,
    pub dump_orientation: bool,
    /// `(x, y)` of each cell to dump
    pub dump_cells: Vec<(u16, u16)>,
}

impl KecSettings {
    /// Parse a KEC whose length was already checked
    pub(crate) fn parse(kec: &[u16]) -> Result<Self, KbiError> {
        let gated = |flag: usize| (kec[flag] != 0).then_some(kec[flag + 1]);

        let dump_count = usize::from(gated(27).unwrap_or(0));
        let dump_cells = entries(
            kec,
            KEC_DUMP_CELLS_START,
            KEC_DUMP_CELLS_START + 3 * dump_count,
        )?
        .map(|[x, y, _]| (x, y))
        .collect();

        let settings = Self {
            instructions: gated(0),
            moves: gated(3),
            turn_left: gated(6),
            pick_buzzer: gated(9),
            leave_buzzer: gated(12),
            karel_buzzers: gated(15),
            world_buzzers: gated(18),
            dump_position: kec[21] != 0,
            dump_orientation: kec[24] != 0,
            dump_cells,
        };
        if settings.karel_buzzers.is_some() || settings.world_buzzers.is_some() {
            tracing::warn!("KEC enables deprecated buzzer limits - ignored");
        }
        Ok(settings)
    }
}
