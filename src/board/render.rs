//! Plain-text rendering of board rows, for debugging and visual checks.
//!
//! Each row lists its node identifiers left to right, indented with one `____`
//! per node it is narrower than the widest row of its table:
//!
//! ```text
//! Land nodes:
//! ________L-00-00  L-00-01  L-00-02
//! ____L-01-00  L-01-01  L-01-02  L-01-03
//! ```

use std::fmt::Write;

use super::coord::NodeKind;
use super::graph::Board;

const INDENT: &str = "____";
const SEPARATOR: &str = "  ";

/// Renders one row of `kind` nodes.
pub fn render_row(board: &Board, kind: NodeKind, row: usize) -> String {
    let table = board.rows(kind);
    let width = table.width(row).unwrap_or(0);
    let mut line = INDENT.repeat(table.max_width().saturating_sub(width));
    for node in board.graph().row(kind, row) {
        line.push_str(&node.id().key());
        line.push_str(SEPARATOR);
    }
    line.trim_end().to_string()
}

/// Renders every row of `kind` nodes under a heading.
pub fn render_nodes(board: &Board, kind: NodeKind) -> String {
    let heading = match kind {
        NodeKind::Building => "Building nodes:",
        NodeKind::Land => "Land nodes:",
    };
    let mut out = String::from(heading);
    out.push('\n');
    for row in 0..board.rows(kind).len() {
        let _ = writeln!(out, "{}", render_row(board, kind, row));
    }
    out
}

/// Renders buildings, then land tiles.
pub fn render_board(board: &Board) -> String {
    let mut out = render_nodes(board, NodeKind::Building);
    out.push_str(&render_nodes(board, NodeKind::Land));
    out
}
