//! Canonical node identifiers.
//!
//! Every node on the board is keyed by a short string of the form
//! `<kind>-<row>-<col>`, e.g. `B-05-03` for the building at row 5, column 3
//! or `L-02-01` for the land tile at row 2, column 1. Rows and columns are
//! zero-padded to two digits so that sorting the strings gives row-major
//! order. [`NodeId`] is the typed form of that key; its `Ord` matches the
//! string order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::table::RowTable;
use crate::error::BoardError;

/// Upper bound (exclusive) for rows and columns so identifiers stay fixed-width.
pub const MAX_DIMENSION: usize = 100;

/// The kind of a board node.
///
/// Variant order follows the identifier prefixes (`B` < `L`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Building,
    Land,
}

impl NodeKind {
    /// Returns the single-character identifier prefix.
    pub const fn prefix(self) -> char {
        match self {
            NodeKind::Building => 'B',
            NodeKind::Land => 'L',
        }
    }

    /// Parses a kind from its identifier prefix.
    pub fn from_prefix(c: char) -> Option<NodeKind> {
        match c {
            'B' => Some(NodeKind::Building),
            'L' => Some(NodeKind::Land),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Building => write!(f, "building"),
            NodeKind::Land => write!(f, "land"),
        }
    }
}

/// Typed canonical key of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    kind: NodeKind,
    row: u16,
    col: u16,
}

impl NodeId {
    pub const fn kind(self) -> NodeKind {
        self.kind
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Returns the canonical string key.
    pub fn key(self) -> String {
        self.to_string()
    }

    /// First and last identifiers (inclusive) of a row, for range queries.
    ///
    /// `None` for rows no identifier can name.
    pub(crate) fn row_bounds(kind: NodeKind, row: usize) -> Option<(NodeId, NodeId)> {
        if row >= MAX_DIMENSION {
            return None;
        }
        let row = row as u16;
        Some((
            NodeId { kind, row, col: 0 },
            NodeId {
                kind,
                row,
                col: u16::MAX,
            },
        ))
    }
}

/// Names the node at `(row, col)` of the given kind, checking it against `table`.
///
/// Signed inputs let callers probe neighbours such as `col - 1` directly; any
/// negative or out-of-table coordinate fails with [`BoardError::OutOfBounds`].
pub fn name(kind: NodeKind, row: i32, col: i32, table: &RowTable) -> Result<NodeId, BoardError> {
    let out_of_bounds = BoardError::OutOfBounds { kind, row, col };
    if row < 0 || col < 0 {
        return Err(out_of_bounds);
    }
    let width = table.width(row as usize).ok_or_else(|| out_of_bounds.clone())?;
    if col as usize >= width {
        return Err(out_of_bounds);
    }
    Ok(NodeId {
        kind,
        row: row as u16,
        col: col as u16,
    })
}

/// Shorthand for [`name`] with [`NodeKind::Building`].
pub fn building(row: i32, col: i32, table: &RowTable) -> Result<NodeId, BoardError> {
    name(NodeKind::Building, row, col, table)
}

/// Shorthand for [`name`] with [`NodeKind::Land`].
pub fn land(row: i32, col: i32, table: &RowTable) -> Result<NodeId, BoardError> {
    name(NodeKind::Land, row, col, table)
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.kind.prefix(), self.row, self.col)
    }
}

/// Parses a two-digit zero-padded field.
fn parse_field(s: &str) -> Option<u16> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for NodeId {
    type Err = BoardError;

    /// Parses `B-RR-CC` / `L-RR-CC`. Table bounds are not checked here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidIdentifier(s.to_string());
        let mut parts = s.split('-');
        let (Some(prefix), Some(row), Some(col), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let mut prefix_chars = prefix.chars();
        let kind = match (prefix_chars.next(), prefix_chars.next()) {
            (Some(c), None) => NodeKind::from_prefix(c).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let row = parse_field(row).ok_or_else(invalid)?;
        let col = parse_field(col).ok_or_else(invalid)?;
        Ok(NodeId { kind, row, col })
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a road: the unordered pair of its building endpoints.
///
/// The smaller endpoint is always stored first, so two roads over the same
/// pair compare equal regardless of construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoadId {
    a: NodeId,
    b: NodeId,
}

impl RoadId {
    /// Builds the identifier for the road between `x` and `y`.
    ///
    /// Returns `None` for a self-loop.
    pub fn new(x: NodeId, y: NodeId) -> Option<RoadId> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(RoadId { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(RoadId { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub const fn endpoints(self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Returns the endpoint opposite `id`, if `id` is one of the endpoints.
    pub fn other(self, id: NodeId) -> Option<NodeId> {
        if id == self.a {
            Some(self.b)
        } else if id == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn touches(self, id: NodeId) -> bool {
        self.other(id).is_some()
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.a, self.b)
    }
}

impl FromStr for RoadId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidIdentifier(s.to_string());
        let (a, b) = s.split_once('~').ok_or_else(invalid)?;
        let a: NodeId = a.parse()?;
        let b: NodeId = b.parse()?;
        RoadId::new(a, b).ok_or_else(invalid)
    }
}

impl Serialize for RoadId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
