//! Core type aliases and small shared enums.

use serde::{Deserialize, Serialize};

/// Player index into the game's player roster (0-7).
pub type PlayerId = u8;

/// Index into a player's unit list.
///
/// Units are removed by splicing the owning list, so an index is only
/// valid until the next removal (the engine is single-threaded and fully
/// synchronous, which makes this safe for callers that re-query each turn).
pub type UnitIndex = usize;

/// Index into a player's city list.
pub type CityIndex = usize;

/// Difficulty level for a game session.
///
/// Difficulty feeds directly into the city unhappiness baseline for
/// human-controlled players; computer players use a fixed baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Chieftain,
    Warlord,
    #[default]
    Prince,
    King,
    Emperor,
}

impl Difficulty {
    /// Numeric level used in the unhappiness baseline (0-4).
    pub const fn level(&self) -> i32 {
        match self {
            Difficulty::Chieftain => 0,
            Difficulty::Warlord => 1,
            Difficulty::Prince => 2,
            Difficulty::King => 3,
            Difficulty::Emperor => 4,
        }
    }

    /// Get all difficulty variants.
    pub const fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Chieftain,
            Difficulty::Warlord,
            Difficulty::Prince,
            Difficulty::King,
            Difficulty::Emperor,
        ]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Chieftain => write!(f, "Chieftain"),
            Difficulty::Warlord => write!(f, "Warlord"),
            Difficulty::Prince => write!(f, "Prince"),
            Difficulty::King => write!(f, "King"),
            Difficulty::Emperor => write!(f, "Emperor"),
        }
    }
}

/// Who is driving a player's actions.
///
/// The engine treats all controllers identically: every command arrives as
/// an [`crate::action::Action`] through the same validation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Controller {
    #[default]
    LocalHuman,
    Computer,
    Remote,
}

impl Controller {
    /// Check whether a human is behind this controller.
    pub const fn is_human(&self) -> bool {
        matches!(self, Controller::LocalHuman | Controller::Remote)
    }
}

/// RGB color for player identification on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to hex string (e.g., "#FF0000").
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::new(128, 128, 128) // Gray
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(Difficulty::Chieftain.level(), 0);
        assert_eq!(Difficulty::Emperor.level(), 4);
        assert_eq!(Difficulty::all().len(), 5);
    }

    #[test]
    fn test_controller_is_human() {
        assert!(Controller::LocalHuman.is_human());
        assert!(Controller::Remote.is_human());
        assert!(!Controller::Computer.is_human());
    }

    #[test]
    fn test_player_color_hex() {
        assert_eq!(PlayerColor::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(PlayerColor::new(0, 128, 255).to_hex(), "#0080FF");
    }
}
