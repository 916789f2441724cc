//! The board graph: nodes, roads and tile adjacency.
//!
//! All collections are ordered maps keyed by [`NodeId`] / [`RoadId`], so
//! iteration is row-major and identical across runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use super::coord::{NodeId, NodeKind, RoadId};
use super::node::{Node, PlayerId, Road, Structure, Terrain};
use super::table::RowTable;
use crate::error::BoardError;

/// Serializes the values of a map as a sequence (the keys are repeated inside).
fn values_only<S, K, V>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_seq(map.values())
}

/// Nodes, roads and the tile <-> building relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    #[serde(serialize_with = "values_only")]
    nodes: BTreeMap<NodeId, Node>,
    #[serde(serialize_with = "values_only")]
    roads: BTreeMap<RoadId, Road>,
    /// Road neighbours of each building.
    #[serde(skip)]
    links: BTreeMap<NodeId, BTreeSet<NodeId>>,
    /// Tile adjacency, stored in both directions.
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub(crate) fn new() -> Graph {
        Graph::default()
    }

    /// Inserts a node; fails if its identifier is already present.
    pub(crate) fn insert_node(&mut self, node: Node) -> Result<(), BoardError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(BoardError::DuplicateNode(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Checks that `id` exists and is of the expected kind.
    fn expect_kind(&self, id: NodeId, expected: NodeKind) -> Result<(), BoardError> {
        if !self.nodes.contains_key(&id) {
            return Err(BoardError::UnknownNode(id.key()));
        }
        if id.kind() != expected {
            return Err(BoardError::KindMismatch { id, expected });
        }
        Ok(())
    }

    /// Inserts a road between two existing buildings.
    ///
    /// Fails on a self-loop, a missing or non-building endpoint, or a road
    /// that already exists.
    pub(crate) fn insert_road(&mut self, a: NodeId, b: NodeId) -> Result<RoadId, BoardError> {
        self.expect_kind(a, NodeKind::Building)?;
        self.expect_kind(b, NodeKind::Building)?;
        let id = RoadId::new(a, b).ok_or_else(|| {
            BoardError::InvalidConfiguration(format!("road from '{}' to itself", a))
        })?;
        if self.roads.contains_key(&id) {
            return Err(BoardError::DuplicateEdge(a, b));
        }
        self.roads.insert(id, Road::new(id));
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
        Ok(id)
    }

    /// Records that `land` and `building` touch, in both directions.
    ///
    /// Returns false if the pair was already recorded.
    pub(crate) fn insert_adjacency(
        &mut self,
        land: NodeId,
        building: NodeId,
    ) -> Result<bool, BoardError> {
        self.expect_kind(land, NodeKind::Land)?;
        self.expect_kind(building, NodeKind::Building)?;
        let added = self.adjacency.entry(land).or_default().insert(building);
        self.adjacency.entry(building).or_default().insert(land);
        Ok(added)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks a node up by its canonical string key, e.g. `"B-05-03"`.
    pub fn node_by_key(&self, key: &str) -> Result<&Node, BoardError> {
        let id: NodeId = key.parse()?;
        self.nodes
            .get(&id)
            .ok_or_else(|| BoardError::UnknownNode(key.to_string()))
    }

    /// All nodes, buildings first, each kind in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Nodes of one kind in row-major order.
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// Nodes of one row, left to right.
    pub fn row(&self, kind: NodeKind, row: usize) -> impl Iterator<Item = &Node> + '_ {
        NodeId::row_bounds(kind, row)
            .into_iter()
            .flat_map(move |(first, last)| self.nodes.range(first..=last))
            .map(|(_, n)| n)
    }

    pub fn node_count(&self, kind: NodeKind) -> usize {
        self.nodes_of(kind).count()
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> + '_ {
        self.roads.values()
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn has_road(&self, a: NodeId, b: NodeId) -> bool {
        RoadId::new(a, b).is_some_and(|id| self.roads.contains_key(&id))
    }

    /// Buildings one road away from `building`.
    pub fn road_neighbors(&self, building: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.links.get(&building).into_iter().flatten().copied()
    }

    /// Buildings on the boundary of a land tile (empty for unknown ids).
    pub fn adjacent_buildings(&self, land: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacent(land, NodeKind::Land)
    }

    /// Land tiles touching a building (empty for unknown ids).
    pub fn adjacent_tiles(&self, building: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacent(building, NodeKind::Building)
    }

    fn adjacent(&self, id: NodeId, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(&id)
            .filter(|_| id.kind() == kind)
            .into_iter()
            .flatten()
            .copied()
    }

    /// True if the land tile and the building touch.
    pub fn touches(&self, land: NodeId, building: NodeId) -> bool {
        self.adjacency
            .get(&land)
            .is_some_and(|set| land.kind() == NodeKind::Land && set.contains(&building))
    }

    /// Number of distinct tile/building pairs.
    pub fn adjacency_count(&self) -> usize {
        self.adjacency
            .iter()
            .filter(|(id, _)| id.kind() == NodeKind::Land)
            .map(|(_, set)| set.len())
            .sum()
    }

    /// Checks the structural invariants of the graph.
    ///
    /// Every road joins two existing buildings and appears in both endpoints'
    /// link sets; every adjacency pair joins a land tile and a building and is
    /// recorded in both directions.
    pub(crate) fn validate(&self) -> Result<(), BoardError> {
        for id in self.roads.keys() {
            let (a, b) = id.endpoints();
            self.expect_kind(a, NodeKind::Building)?;
            self.expect_kind(b, NodeKind::Building)?;
            let linked = |x: NodeId, y: NodeId| self.links.get(&x).is_some_and(|s| s.contains(&y));
            if !linked(a, b) || !linked(b, a) {
                return Err(BoardError::InvalidConfiguration(format!(
                    "road '{}' is missing from its endpoints' links",
                    id
                )));
            }
        }

        for (&id, set) in &self.adjacency {
            let other_kind = match id.kind() {
                NodeKind::Land => NodeKind::Building,
                NodeKind::Building => NodeKind::Land,
            };
            self.expect_kind(id, id.kind())?;
            for &other in set {
                self.expect_kind(other, other_kind)?;
                let mirrored = self.adjacency.get(&other).is_some_and(|s| s.contains(&id));
                if !mirrored {
                    return Err(BoardError::InvalidConfiguration(format!(
                        "adjacency '{}' -> '{}' is not symmetric",
                        id, other
                    )));
                }
            }
        }
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, BoardError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| BoardError::UnknownNode(id.key()))
    }
}

/// An assembled board: the graph plus the row-width tables it was built from.
///
/// The topology cannot change after assembly; only owners, structures and
/// terrain can be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    building_rows: RowTable,
    land_rows: RowTable,
    #[serde(flatten)]
    graph: Graph,
}

impl Board {
    pub(crate) fn new(building_rows: RowTable, land_rows: RowTable, graph: Graph) -> Board {
        Board {
            building_rows,
            land_rows,
            graph,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn building_rows(&self) -> &RowTable {
        &self.building_rows
    }

    pub fn land_rows(&self) -> &RowTable {
        &self.land_rows
    }

    /// Row-width table for the given node kind.
    pub fn rows(&self, kind: NodeKind) -> &RowTable {
        match kind {
            NodeKind::Building => &self.building_rows,
            NodeKind::Land => &self.land_rows,
        }
    }

    pub fn set_owner(&mut self, id: NodeId, owner: Option<PlayerId>) -> Result<(), BoardError> {
        self.graph.node_mut(id)?.set_owner(owner);
        Ok(())
    }

    pub fn set_terrain(&mut self, id: NodeId, terrain: Terrain) -> Result<(), BoardError> {
        if self.graph.node_mut(id)?.set_terrain(terrain) {
            Ok(())
        } else {
            Err(BoardError::KindMismatch {
                id,
                expected: NodeKind::Land,
            })
        }
    }

    pub fn set_structure(&mut self, id: NodeId, structure: Structure) -> Result<(), BoardError> {
        if self.graph.node_mut(id)?.set_structure(structure) {
            Ok(())
        } else {
            Err(BoardError::KindMismatch {
                id,
                expected: NodeKind::Building,
            })
        }
    }

    pub fn set_road_owner(&mut self, id: RoadId, owner: Option<PlayerId>) -> Result<(), BoardError> {
        let road = self
            .graph
            .roads
            .get_mut(&id)
            .ok_or(BoardError::UnknownRoad(id))?;
        road.set_owner(owner);
        Ok(())
    }
}
