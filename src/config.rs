//! Board configuration.
//!
//! A [`BoardConfig`] selects the pair of row-width tables a board is built
//! from, either through a player count or through explicit tables. It can be
//! loaded from JSON, e.g.
//!
//! ```json
//! { "player_count": 6 }
//! { "player_count": 2, "building_rows": [1, 2, 2, 1], "land_rows": [1] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::table::{BoardSize, RowTable};
use crate::error::{BoardError, ConfigError};

/// Default number of players.
pub const DEFAULT_PLAYER_COUNT: u8 = 4;

/// Selects the board to assemble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Number of players. Picks the preset tables unless both overrides are
    /// set; overrides for a count with a preset must match that preset.
    pub player_count: u8,
    /// Building rows override; must come with `land_rows`.
    pub building_rows: Option<RowTable>,
    /// Land rows override; must come with `building_rows`.
    pub land_rows: Option<RowTable>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            player_count: DEFAULT_PLAYER_COUNT,
            building_rows: None,
            land_rows: None,
        }
    }
}

impl BoardConfig {
    /// Configuration using the preset tables for `player_count`.
    pub fn for_players(player_count: u8) -> BoardConfig {
        BoardConfig {
            player_count,
            ..BoardConfig::default()
        }
    }

    /// Configuration with explicit tables.
    pub fn with_tables(player_count: u8, building_rows: RowTable, land_rows: RowTable) -> BoardConfig {
        BoardConfig {
            player_count,
            building_rows: Some(building_rows),
            land_rows: Some(land_rows),
        }
    }

    /// Returns the (building, land) tables this configuration selects.
    ///
    /// Explicit tables for 3 to 6 players must equal that player count's
    /// preset. Other counts accept any tables. Does not check that the pair
    /// is matched; [`assemble`](crate::board::assemble) does.
    pub fn tables(&self) -> Result<(RowTable, RowTable), BoardError> {
        match (&self.building_rows, &self.land_rows) {
            (Some(building), Some(land)) => {
                if let Ok(size) = BoardSize::for_players(self.player_count) {
                    if *building != size.building_rows() || *land != size.land_rows() {
                        return Err(BoardError::InvalidConfiguration(format!(
                            "explicit tables do not match the {:?} board for {} players",
                            size, self.player_count
                        )));
                    }
                }
                Ok((building.clone(), land.clone()))
            }
            (None, None) => {
                let size = BoardSize::for_players(self.player_count)?;
                Ok((size.building_rows(), size.land_rows()))
            }
            _ => Err(BoardError::InvalidConfiguration(
                "building_rows and land_rows must be given together".to_string(),
            )),
        }
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<BoardConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<BoardConfig, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        BoardConfig::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::table::{EXTENDED_LAND_ROWS, STANDARD_BUILDING_ROWS};

    #[test]
    fn default_is_four_players() {
        let config = BoardConfig::default();
        assert_eq!(config.player_count, 4);
        let (building, _) = config.tables().unwrap();
        assert_eq!(building.as_slice(), &STANDARD_BUILDING_ROWS);
    }

    #[test]
    fn parse_player_count_only() {
        let config = BoardConfig::from_json(r#"{ "player_count": 6 }"#).unwrap();
        assert_eq!(config, BoardConfig::for_players(6));
        let (_, land) = config.tables().unwrap();
        assert_eq!(land.as_slice(), &EXTENDED_LAND_ROWS);
    }

    #[test]
    fn parse_empty_object_uses_defaults() {
        assert_eq!(BoardConfig::from_json("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn parse_explicit_tables() {
        let config = BoardConfig::from_json(
            r#"{ "player_count": 2, "building_rows": [1, 2, 2, 1], "land_rows": [1] }"#,
        )
        .unwrap();
        let (building, land) = config.tables().unwrap();
        assert_eq!(building.as_slice(), &[1, 2, 2, 1]);
        assert_eq!(land.as_slice(), &[1]);
    }

    #[test]
    fn explicit_tables_must_match_the_player_count() {
        let extended = BoardConfig::with_tables(
            4,
            BoardSize::Extended.building_rows(),
            BoardSize::Extended.land_rows(),
        );
        assert!(matches!(
            extended.tables(),
            Err(BoardError::InvalidConfiguration(msg)) if msg.contains("4 players")
        ));

        let standard = BoardConfig::with_tables(
            3,
            BoardSize::Standard.building_rows(),
            BoardSize::Standard.land_rows(),
        );
        let (building, land) = standard.tables().unwrap();
        assert_eq!(building.as_slice(), &STANDARD_BUILDING_ROWS);
        assert_eq!(land, BoardSize::Standard.land_rows());

        let json = BoardConfig::from_json(
            r#"{ "player_count": 5, "building_rows": [1, 2, 2, 1], "land_rows": [1] }"#,
        )
        .unwrap();
        assert!(json.tables().is_err());
    }

    #[test]
    fn half_an_override_is_rejected() {
        let config = BoardConfig::from_json(r#"{ "land_rows": [1] }"#).unwrap();
        assert!(matches!(
            config.tables(),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            BoardConfig::from_json(r#"{ "player_count": "four" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{ "players": 4 }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            BoardConfig::from_json(r#"{ "building_rows": [3, 0], "land_rows": [1] }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BoardConfig::load(Path::new("/nonexistent/board.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/board.json"));
    }
}
