//! Board topology generator.
//!
//! Builds the graph of a hex-tile board from its row-width tables:
//! building and land nodes, the roads between buildings, and the relation
//! between every tile and the buildings on its boundary.
//!
//! Geometry: building rows alternate between two kinds of connection to the
//! row below. Odd rows connect straight down. Even rows above the board's
//! equator branch into a row one node wider; even rows below it converge into
//! a row one node narrower. Tile row `t` is framed by building rows `2t`
//! (top peaks), `2t+1` (upper corners), `2t+2` (lower corners) and `2t+3`
//! (bottom peaks).

use std::cmp::Ordering;

use log::{debug, info, trace};
use rayon::prelude::*;

use super::coord::{self, NodeKind};
use super::graph::{Board, Graph};
use super::node::Node;
use super::table::{self, RowTable};
use crate::config::BoardConfig;
use crate::error::BoardError;

/// Buildings a tile touches at most.
pub const MAX_BUILDINGS_PER_TILE: usize = 6;
/// Buildings a tile touches at least.
pub const MIN_BUILDINGS_PER_TILE: usize = 3;
/// Tiles a building touches at most.
pub const MAX_TILES_PER_BUILDING: usize = 3;

/// How the nodes of a building row connect to the row below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLink {
    /// `(r, c)` connects to `(r+1, c)`.
    Straight,
    /// `(r, c)` connects to `(r+1, c)` and `(r+1, c+1)`.
    Branching,
    /// `(r, c)` connects to `(r+1, c)` unless `c` is the last column, and to
    /// `(r+1, c-1)` unless `c` is the first column.
    Converging,
}

impl RowLink {
    /// Target columns in the next row for the node at `col` of a row of `width`.
    ///
    /// Targets may still fall outside the next row; callers skip those.
    pub fn targets(self, col: usize, width: usize) -> Vec<i32> {
        let c = col as i32;
        match self {
            RowLink::Straight => vec![c],
            RowLink::Branching => vec![c, c + 1],
            RowLink::Converging => {
                let mut targets = Vec::with_capacity(2);
                if col + 1 < width {
                    targets.push(c);
                }
                if col > 0 {
                    targets.push(c - 1);
                }
                targets
            }
        }
    }
}

/// Connection pattern between `row` and `row + 1`, or `None` for the last row.
///
/// Odd rows are straight. Even rows branch in the first half of the table
/// (`row < len / 2`) and converge in the second half. A strict width change
/// between the two rows overrides the half: a row whose successor is wider
/// always branches, one whose successor is narrower always converges.
pub fn row_link(table: &RowTable, row: usize) -> Option<RowLink> {
    let here = table.width(row)?;
    let next = table.width(row + 1)?;
    if row % 2 == 1 {
        return Some(RowLink::Straight);
    }
    let link = match next.cmp(&here) {
        Ordering::Greater => RowLink::Branching,
        Ordering::Less => RowLink::Converging,
        Ordering::Equal if row < table.midpoint() => RowLink::Branching,
        Ordering::Equal => RowLink::Converging,
    };
    Some(link)
}

/// Horizontal position of `col` in a centred row of `width`, in half-tile units.
///
/// Every row, building or land, is centred on 0 with a spacing of 2, so nodes
/// that sit above each other on the physical board share the same offset.
fn half_offset(width: usize, col: usize) -> i32 {
    2 * col as i32 - (width as i32 - 1)
}

/// Column of the building at half-tile offset `x` in `row`, if the offset
/// falls on a node position of that row. The column may still be out of range.
fn column_at(table: &RowTable, row: i32, x: i32) -> Option<i32> {
    let width = table.width(usize::try_from(row).ok()?)? as i32;
    let twice = x + width - 1;
    if twice.rem_euclid(2) != 0 {
        return None;
    }
    Some(twice / 2)
}

/// Owns the graph while it is being built.
///
/// Stages can be run individually (e.g. roads for a bare building table);
/// [`assemble`] runs all of them in order.
#[derive(Debug, Default)]
pub struct BoardBuilder {
    graph: Graph,
}

impl BoardBuilder {
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            graph: Graph::new(),
        }
    }

    /// The graph built so far.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Adds a building node for every cell of `table`. Returns how many were new.
    pub fn create_building_nodes(&mut self, table: &RowTable) -> Result<usize, BoardError> {
        self.create_nodes(NodeKind::Building, table)
    }

    /// Adds a land node for every cell of `table`. Returns how many were new.
    pub fn create_land_nodes(&mut self, table: &RowTable) -> Result<usize, BoardError> {
        self.create_nodes(NodeKind::Land, table)
    }

    fn create_nodes(&mut self, kind: NodeKind, table: &RowTable) -> Result<usize, BoardError> {
        let mut added = 0;
        for (row, width) in table.iter().enumerate() {
            for col in 0..width {
                let id = coord::name(kind, row as i32, col as i32, table)?;
                if self.graph.contains(id) {
                    continue;
                }
                self.graph.insert_node(Node::new(id))?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Connects every building row to the row below it with roads.
    ///
    /// Neighbours outside the table are the board's border and are skipped.
    /// Roads that already exist are not added again. Returns how many roads
    /// were added.
    pub fn create_roads(&mut self, table: &RowTable) -> Result<usize, BoardError> {
        let mut added = 0;
        for (row, width) in table.iter().enumerate() {
            let Some(link) = row_link(table, row) else {
                break;
            };
            for col in 0..width {
                let from = coord::building(row as i32, col as i32, table)?;
                for target in link.targets(col, width) {
                    let Ok(to) = coord::building(row as i32 + 1, target, table) else {
                        trace!("{}: no neighbour at ({}, {})", from, row + 1, target);
                        continue;
                    };
                    if self.graph.has_road(from, to) {
                        continue;
                    }
                    self.graph.insert_road(from, to)?;
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Records which buildings lie on the boundary of each land tile.
    ///
    /// Both node sets must already exist. Afterwards every tile must touch
    /// 3 to 6 buildings and every building 1 to 3 tiles. Returns how many
    /// tile/building pairs were added.
    pub fn create_tile_adjacency(
        &mut self,
        building_table: &RowTable,
        land_table: &RowTable,
    ) -> Result<usize, BoardError> {
        let mut added = 0;
        for (t, width) in land_table.iter().enumerate() {
            for c in 0..width {
                let tile = coord::land(t as i32, c as i32, land_table)?;
                if !self.graph.contains(tile) {
                    return Err(BoardError::UnknownNode(tile.key()));
                }
                let centre = half_offset(width, c);
                let top = 2 * t as i32;
                let corners = [
                    (top, centre),
                    (top + 1, centre - 1),
                    (top + 1, centre + 1),
                    (top + 2, centre - 1),
                    (top + 2, centre + 1),
                    (top + 3, centre),
                ];
                for (row, x) in corners {
                    let Some(col) = column_at(building_table, row, x) else {
                        trace!("{}: no building row {} at offset {}", tile, row, x);
                        continue;
                    };
                    let Ok(building) = coord::building(row, col, building_table) else {
                        trace!("{}: no building at ({}, {})", tile, row, col);
                        continue;
                    };
                    if self.graph.insert_adjacency(tile, building)? {
                        added += 1;
                    }
                }
            }
        }
        self.check_tile_degrees()?;
        Ok(added)
    }

    /// Checks the per-node bounds of the tile relation.
    fn check_tile_degrees(&self) -> Result<(), BoardError> {
        for tile in self.graph.nodes_of(NodeKind::Land) {
            let n = self.graph.adjacent_buildings(tile.id()).count();
            if !(MIN_BUILDINGS_PER_TILE..=MAX_BUILDINGS_PER_TILE).contains(&n) {
                return Err(BoardError::InvalidConfiguration(format!(
                    "tile '{}' touches {} buildings, expected {} to {}",
                    tile.id(),
                    n,
                    MIN_BUILDINGS_PER_TILE,
                    MAX_BUILDINGS_PER_TILE
                )));
            }
        }
        for building in self.graph.nodes_of(NodeKind::Building) {
            let n = self.graph.adjacent_tiles(building.id()).count();
            if !(1..=MAX_TILES_PER_BUILDING).contains(&n) {
                return Err(BoardError::InvalidConfiguration(format!(
                    "building '{}' touches {} tiles, expected 1 to {}",
                    building.id(),
                    n,
                    MAX_TILES_PER_BUILDING
                )));
            }
        }
        Ok(())
    }

    /// Validates the graph and freezes it into a [`Board`].
    ///
    /// The node sets must match the tables exactly.
    pub fn finish(self, building_rows: RowTable, land_rows: RowTable) -> Result<Board, BoardError> {
        for (kind, table) in [
            (NodeKind::Building, &building_rows),
            (NodeKind::Land, &land_rows),
        ] {
            let count = self.graph.node_count(kind);
            if count != table.total() {
                return Err(BoardError::InvalidConfiguration(format!(
                    "graph has {} {} nodes, table describes {}",
                    count,
                    kind,
                    table.total()
                )));
            }
        }
        self.graph.validate()?;
        Ok(Board::new(building_rows, land_rows, self.graph))
    }
}

/// Builds a complete board for `config`.
///
/// Nodes are created before roads, and roads before tile adjacency. Either
/// the whole board is returned or the first error encountered.
pub fn assemble(config: &BoardConfig) -> Result<Board, BoardError> {
    let (building_rows, land_rows) = config.tables()?;
    table::check_matched_pair(&building_rows, &land_rows)?;

    let mut builder = BoardBuilder::new();
    let buildings = builder.create_building_nodes(&building_rows)?;
    let tiles = builder.create_land_nodes(&land_rows)?;
    debug!("created {} building nodes, {} land nodes", buildings, tiles);

    let roads = builder.create_roads(&building_rows)?;
    debug!("created {} roads", roads);

    let pairs = builder.create_tile_adjacency(&building_rows, &land_rows)?;
    debug!("created {} tile adjacencies", pairs);

    let board = builder.finish(building_rows, land_rows)?;
    info!(
        "assembled {}-player board: {} buildings, {} tiles, {} roads",
        config.player_count, buildings, tiles, roads
    );
    Ok(board)
}

/// Builds one board per configuration in parallel, e.g. one per game room.
///
/// Each board is assembled independently; results keep the input order.
pub fn assemble_all(configs: &[BoardConfig]) -> Vec<Result<Board, BoardError>> {
    configs.par_iter().map(assemble).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::coord::NodeId;
    use crate::board::table::BoardSize;

    fn table(rows: &[usize]) -> RowTable {
        RowTable::new(rows.to_vec()).unwrap()
    }

    fn id(key: &str) -> NodeId {
        key.parse().unwrap()
    }

    fn roads_for(rows: &[usize]) -> BoardBuilder {
        let t = table(rows);
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&t).unwrap();
        builder.create_roads(&t).unwrap();
        builder
    }

    fn road_keys(builder: &BoardBuilder) -> Vec<String> {
        builder.graph().roads().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn row_links_of_standard_table() {
        let t = BoardSize::Standard.building_rows();
        let links: Vec<RowLink> = (0..t.len()).filter_map(|r| row_link(&t, r)).collect();
        use RowLink::*;
        assert_eq!(
            links,
            vec![
                Branching, Straight, Branching, Straight, Branching, Straight, Converging,
                Straight, Converging, Straight, Converging
            ]
        );
    }

    #[test]
    fn equal_width_even_rows_follow_the_midpoint() {
        let t = table(&[4, 4, 4, 4]);
        assert_eq!(row_link(&t, 0), Some(RowLink::Branching));
        assert_eq!(row_link(&t, 1), Some(RowLink::Straight));
        assert_eq!(row_link(&t, 2), Some(RowLink::Converging));
        assert_eq!(row_link(&t, 3), None);
    }

    #[test]
    fn branching_row_connects_to_both_lower_neighbours() {
        let builder = roads_for(&[3, 4]);
        assert_eq!(
            road_keys(&builder),
            vec![
                "B-00-00~B-01-00",
                "B-00-00~B-01-01",
                "B-00-01~B-01-01",
                "B-00-01~B-01-02",
                "B-00-02~B-01-02",
                "B-00-02~B-01-03",
            ]
        );
    }

    #[test]
    fn converging_row_drops_outer_diagonals() {
        let builder = roads_for(&[4, 3]);
        let g = builder.graph();
        assert_eq!(g.road_count(), 6);
        let neighbours = |key: &str| -> Vec<String> {
            g.road_neighbors(id(key)).map(|n| n.key()).collect()
        };
        assert_eq!(neighbours("B-00-00"), vec!["B-01-00"]);
        assert_eq!(neighbours("B-00-01"), vec!["B-01-00", "B-01-01"]);
        assert_eq!(neighbours("B-00-02"), vec!["B-01-01", "B-01-02"]);
        assert_eq!(neighbours("B-00-03"), vec!["B-01-02"]);
    }

    #[test]
    fn straight_rows_skip_missing_columns() {
        // Row 1 is odd and its successor is shorter: column 3 has nothing below.
        let builder = roads_for(&[3, 4, 3]);
        let g = builder.graph();
        assert!(g.has_road(id("B-01-02"), id("B-02-02")));
        assert_eq!(
            g.road_neighbors(id("B-01-03")).collect::<Vec<_>>(),
            vec![id("B-00-02")]
        );
        assert_eq!(g.road_count(), 6 + 3);
    }

    #[test]
    fn roads_are_idempotent() {
        let t = BoardSize::Standard.building_rows();
        let mut builder = BoardBuilder::new();
        assert_eq!(builder.create_building_nodes(&t).unwrap(), 54);
        assert_eq!(builder.create_building_nodes(&t).unwrap(), 0);
        assert_eq!(builder.create_roads(&t).unwrap(), 72);
        assert_eq!(builder.create_roads(&t).unwrap(), 0);
        assert_eq!(builder.graph().road_count(), 72);
    }

    #[test]
    fn land_nodes_are_idempotent() {
        let t = BoardSize::Standard.land_rows();
        let mut builder = BoardBuilder::new();
        assert_eq!(builder.create_land_nodes(&t).unwrap(), 19);
        assert_eq!(builder.create_land_nodes(&t).unwrap(), 0);
        assert_eq!(builder.graph().node_count(NodeKind::Land), 19);
        assert_eq!(builder.graph().node_count(NodeKind::Building), 0);
    }

    #[test]
    fn roads_need_their_endpoints() {
        let t = table(&[3, 4]);
        let mut builder = BoardBuilder::new();
        assert_eq!(
            builder.create_roads(&t),
            Err(BoardError::UnknownNode("B-00-00".to_string()))
        );
    }

    #[test]
    fn single_tile_is_a_hexagon() {
        let building = table(&[1, 2, 2, 1]);
        let land = table(&[1]);
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&building).unwrap();
        builder.create_land_nodes(&land).unwrap();
        assert_eq!(builder.create_roads(&building).unwrap(), 6);
        assert_eq!(builder.create_tile_adjacency(&building, &land).unwrap(), 6);

        let g = builder.graph();
        for node in g.nodes_of(NodeKind::Building) {
            assert_eq!(g.road_neighbors(node.id()).count(), 2, "{}", node.id());
            assert_eq!(g.adjacent_tiles(node.id()).count(), 1);
        }
    }

    #[test]
    fn tile_adjacency_of_corner_and_centre_tiles() {
        let size = BoardSize::Standard;
        let (building, land) = (size.building_rows(), size.land_rows());
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&building).unwrap();
        builder.create_land_nodes(&land).unwrap();
        builder.create_tile_adjacency(&building, &land).unwrap();
        let g = builder.graph();

        let around = |key: &str| -> Vec<String> {
            g.adjacent_buildings(id(key)).map(|n| n.key()).collect()
        };
        assert_eq!(
            around("L-00-00"),
            vec!["B-00-00", "B-01-00", "B-01-01", "B-02-00", "B-02-01", "B-03-01"]
        );
        assert_eq!(
            around("L-02-02"),
            vec!["B-04-02", "B-05-02", "B-05-03", "B-06-02", "B-06-03", "B-07-02"]
        );
        assert_eq!(
            around("L-04-02"),
            vec!["B-08-03", "B-09-02", "B-09-03", "B-10-02", "B-10-03", "B-11-02"]
        );
    }

    #[test]
    fn tile_adjacency_requires_tiles() {
        let size = BoardSize::Standard;
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&size.building_rows()).unwrap();
        assert_eq!(
            builder.create_tile_adjacency(&size.building_rows(), &size.land_rows()),
            Err(BoardError::UnknownNode("L-00-00".to_string()))
        );
    }

    #[test]
    fn tile_adjacency_rejects_uncovered_buildings() {
        // A building table taller than the land table leaves buildings without tiles.
        let building = table(&[1, 2, 2, 1, 1]);
        let land = table(&[1]);
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&building).unwrap();
        builder.create_land_nodes(&land).unwrap();
        assert!(matches!(
            builder.create_tile_adjacency(&building, &land),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn finish_checks_node_counts() {
        let size = BoardSize::Standard;
        let mut builder = BoardBuilder::new();
        builder.create_building_nodes(&size.building_rows()).unwrap();
        assert!(matches!(
            builder.finish(size.building_rows(), size.land_rows()),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn assemble_rejects_mismatched_tables() {
        let config = BoardConfig {
            player_count: 4,
            building_rows: Some(BoardSize::Extended.building_rows()),
            land_rows: Some(BoardSize::Standard.land_rows()),
        };
        assert!(matches!(
            assemble(&config),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn assemble_rejects_tables_of_another_player_count() {
        let extended = BoardConfig::with_tables(
            4,
            BoardSize::Extended.building_rows(),
            BoardSize::Extended.land_rows(),
        );
        assert!(matches!(
            assemble(&extended),
            Err(BoardError::InvalidConfiguration(_))
        ));

        let standard = BoardConfig::with_tables(
            4,
            BoardSize::Standard.building_rows(),
            BoardSize::Standard.land_rows(),
        );
        assert_eq!(assemble(&standard).unwrap().graph().road_count(), 72);
    }

    #[test]
    fn assemble_all_keeps_input_order() {
        let configs = [
            BoardConfig::for_players(6),
            BoardConfig::for_players(9),
            BoardConfig::for_players(4),
        ];
        let boards = assemble_all(&configs);
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[0].as_ref().unwrap().graph().road_count(), 109);
        assert!(boards[1].is_err());
        assert_eq!(boards[2].as_ref().unwrap().graph().road_count(), 72);
    }
}
