//! Board representation and topology generation.
//!
//! Contains coordinate naming, row-width tables, the node/road/adjacency
//! graph, the generator that wires it, and a plain-text row renderer.

pub mod coord;
pub mod generator;
pub mod graph;
pub mod node;
pub mod render;
pub mod table;

pub use coord::{name, NodeId, NodeKind, RoadId};
pub use generator::{assemble, assemble_all, row_link, BoardBuilder, RowLink};
pub use graph::{Board, Graph};
pub use node::{Node, NodeData, PlayerId, Road, Structure, Terrain};
pub use table::{check_matched_pair, BoardSize, RowTable};
