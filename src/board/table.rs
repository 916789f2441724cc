//! Row-width tables and the board sizes built from them.
//!
//! A row-width table lists how many nodes of one kind sit in each row of the
//! board. A board is described by two tables, one for building rows and one
//! for land rows, which must describe the same hex silhouette.

use serde::{Deserialize, Serialize};

use super::coord::MAX_DIMENSION;
use crate::error::BoardError;

/// Building rows of the standard 3-4 player board.
pub const STANDARD_BUILDING_ROWS: [usize; 12] = [3, 4, 4, 5, 5, 6, 6, 5, 5, 4, 4, 3];
/// Land rows of the standard 3-4 player board.
pub const STANDARD_LAND_ROWS: [usize; 5] = [3, 4, 5, 4, 3];
/// Building rows of the extended 5-6 player board.
pub const EXTENDED_BUILDING_ROWS: [usize; 16] = [3, 4, 4, 5, 5, 6, 6, 7, 7, 6, 6, 5, 5, 4, 4, 3];
/// Land rows of the extended 5-6 player board.
pub const EXTENDED_LAND_ROWS: [usize; 7] = [3, 4, 5, 6, 5, 4, 3];

/// An ordered, validated sequence of positive row widths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct RowTable(Vec<usize>);

impl RowTable {
    /// Validates and wraps a list of row widths.
    ///
    /// The table must be non-empty, every width positive, and both the row
    /// count and every width below [`MAX_DIMENSION`].
    pub fn new(rows: Vec<usize>) -> Result<RowTable, BoardError> {
        if rows.is_empty() {
            return Err(BoardError::InvalidConfiguration(
                "row-width table is empty".to_string(),
            ));
        }
        if rows.len() >= MAX_DIMENSION {
            return Err(BoardError::InvalidConfiguration(format!(
                "row-width table has {} rows, at most {} are supported",
                rows.len(),
                MAX_DIMENSION - 1
            )));
        }
        if let Some(row) = rows.iter().position(|&w| w == 0) {
            return Err(BoardError::InvalidConfiguration(format!(
                "row {} has zero width",
                row
            )));
        }
        if let Some(row) = rows.iter().position(|&w| w >= MAX_DIMENSION) {
            return Err(BoardError::InvalidConfiguration(format!(
                "row {} has width {}, at most {} is supported",
                row,
                rows[row],
                MAX_DIMENSION - 1
            )));
        }
        Ok(RowTable(rows))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a validated table has at least one row.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width of `row`, or `None` past the last row.
    pub fn width(&self, row: usize) -> Option<usize> {
        self.0.get(row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Total number of nodes described by the table.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn max_width(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// First row of the second half of the table.
    pub fn midpoint(&self) -> usize {
        self.0.len() / 2
    }

    /// True if the table reads the same top to bottom and bottom to top.
    pub fn is_symmetric(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }
}

impl TryFrom<Vec<usize>> for RowTable {
    type Error = BoardError;

    fn try_from(rows: Vec<usize>) -> Result<Self, Self::Error> {
        RowTable::new(rows)
    }
}

impl From<RowTable> for Vec<usize> {
    fn from(table: RowTable) -> Self {
        table.0
    }
}

/// The board sizes with built-in table pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    /// 19 tiles, 3-4 players.
    Standard,
    /// 30 tiles, 5-6 players.
    Extended,
}

impl BoardSize {
    /// Selects the board size for a player count.
    pub fn for_players(player_count: u8) -> Result<BoardSize, BoardError> {
        match player_count {
            3 | 4 => Ok(BoardSize::Standard),
            5 | 6 => Ok(BoardSize::Extended),
            n => Err(BoardError::InvalidConfiguration(format!(
                "no board size for {} players (supported: 3-6)",
                n
            ))),
        }
    }

    pub fn building_rows(self) -> RowTable {
        match self {
            BoardSize::Standard => RowTable(STANDARD_BUILDING_ROWS.to_vec()),
            BoardSize::Extended => RowTable(EXTENDED_BUILDING_ROWS.to_vec()),
        }
    }

    pub fn land_rows(self) -> RowTable {
        match self {
            BoardSize::Standard => RowTable(STANDARD_LAND_ROWS.to_vec()),
            BoardSize::Extended => RowTable(EXTENDED_LAND_ROWS.to_vec()),
        }
    }
}

/// Derives the building rows that frame a land table.
///
/// Tile row `t` is flanked by building rows `2t`..=`2t+3`: its top peaks, its
/// upper corners, its lower corners and its bottom peaks. Corner rows hold one
/// more node than the tile row; the first and last building rows hold only
/// the peaks of the first and last tile rows.
pub fn building_rows_for(land: &RowTable) -> Vec<usize> {
    let mut rows = Vec::with_capacity(2 * land.len() + 2);
    rows.push(land.as_slice()[0]);
    for width in land.iter() {
        rows.push(width + 1);
        rows.push(width + 1);
    }
    rows.push(land.as_slice()[land.len() - 1]);
    rows
}

/// Checks that `building` and `land` describe the same hex board.
///
/// The land table must have an odd number of rows, be symmetric, and grow by
/// exactly one tile per row down to its middle row. The building table must be
/// the one [`building_rows_for`] derives from it.
pub fn check_matched_pair(building: &RowTable, land: &RowTable) -> Result<(), BoardError> {
    if land.len() % 2 == 0 {
        return Err(BoardError::InvalidConfiguration(format!(
            "land table has {} rows, expected an odd number",
            land.len()
        )));
    }
    if !land.is_symmetric() {
        return Err(BoardError::InvalidConfiguration(format!(
            "land table {:?} is not symmetric",
            land.as_slice()
        )));
    }
    let rows = land.as_slice();
    for t in 1..=land.midpoint() {
        if rows[t] != rows[t - 1] + 1 {
            return Err(BoardError::InvalidConfiguration(format!(
                "land row {} has width {}, expected {}",
                t,
                rows[t],
                rows[t - 1] + 1
            )));
        }
    }

    let expected = building_rows_for(land);
    if building.len() != expected.len() {
        return Err(BoardError::InvalidConfiguration(format!(
            "building table has {} rows, {} land rows need {}",
            building.len(),
            land.len(),
            expected.len()
        )));
    }
    for (row, (have, want)) in building.iter().zip(expected.iter().copied()).enumerate() {
        if have != want {
            return Err(BoardError::InvalidConfiguration(format!(
                "building row {} has width {}, land table needs {}",
                row, have, want
            )));
        }
    }
    Ok(())
}
