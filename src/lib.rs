//! Hexboard library.
//!
//! Builds the static topology of a hex-tile settlement board: land tiles,
//! building intersections, the roads between intersections, and which
//! intersections touch which tiles.

pub mod board;
pub mod config;
pub mod error;
