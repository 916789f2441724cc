//! Node and road attributes.
//!
//! Topology (identifiers, endpoints) is fixed once a board is assembled; the
//! attributes here (owner, structure, terrain) are the only mutable parts.

use serde::{Deserialize, Serialize};

use super::coord::{NodeId, NodeKind, RoadId};

/// Identifies a player. The board does not interpret the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

/// The terrain produced by a land tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Forest,
    Field,
    Mountain,
    Hill,
    Pasture,
    Desert,
}

/// What stands on a building node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    #[default]
    None,
    Village,
    City,
}

/// Kind-specific node attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum NodeData {
    Land { terrain: Option<Terrain> },
    Building { structure: Structure },
}

/// A land tile or a building intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: NodeId,
    owner: Option<PlayerId>,
    #[serde(flatten)]
    data: NodeData,
}

impl Node {
    /// Creates an unowned node with default attributes for its kind.
    pub fn new(id: NodeId) -> Node {
        let data = match id.kind() {
            NodeKind::Land => NodeData::Land { terrain: None },
            NodeKind::Building => NodeData::Building {
                structure: Structure::None,
            },
        };
        Node {
            id,
            owner: None,
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn data(&self) -> NodeData {
        self.data
    }

    /// Terrain of a land tile; `None` for buildings and unassigned tiles.
    pub fn terrain(&self) -> Option<Terrain> {
        match self.data {
            NodeData::Land { terrain } => terrain,
            NodeData::Building { .. } => None,
        }
    }

    /// Structure on a building; `None` for land tiles.
    pub fn structure(&self) -> Option<Structure> {
        match self.data {
            NodeData::Building { structure } => Some(structure),
            NodeData::Land { .. } => None,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Returns false (and changes nothing) if the node is not a land tile.
    pub(crate) fn set_terrain(&mut self, terrain: Terrain) -> bool {
        match &mut self.data {
            NodeData::Land { terrain: slot } => {
                *slot = Some(terrain);
                true
            }
            NodeData::Building { .. } => false,
        }
    }

    /// Returns false (and changes nothing) if the node is not a building.
    pub(crate) fn set_structure(&mut self, structure: Structure) -> bool {
        match &mut self.data {
            NodeData::Building { structure: slot } => {
                *slot = structure;
                true
            }
            NodeData::Land { .. } => false,
        }
    }
}

/// A road between two building nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Road {
    id: RoadId,
    owner: Option<PlayerId>,
}

impl Road {
    pub fn new(id: RoadId) -> Road {
        Road { id, owner: None }
    }

    pub fn id(&self) -> RoadId {
        self.id
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        self.id.endpoints()
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }
}
