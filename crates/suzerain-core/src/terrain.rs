//! Terrain catalog: static per-terrain data for movement, defense,
//! yields and improvement eligibility.
//!
//! All lookups are `const fn` match tables; there is no terrain state.

use crate::yields::TileYield;
use serde::{Deserialize, Serialize};

/// Base terrain of a map tile.
///
/// `Void` is the sentinel for off-map queries (beyond the clamped y edge);
/// it never appears inside a generated map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grassland,
    Plains,
    Forest,
    Hills,
    Mountains,
    Desert,
    Arctic,
    Tundra,
    Swamp,
    Jungle,
    River,
    Ocean,
    Void,
}

impl Terrain {
    /// Movement cost in whole tiles to enter this terrain.
    pub const fn movement_cost(&self) -> u32 {
        match self {
            Terrain::Grassland
            | Terrain::Plains
            | Terrain::Desert
            | Terrain::Tundra
            | Terrain::River
            | Terrain::Ocean => 1,
            Terrain::Forest
            | Terrain::Hills
            | Terrain::Jungle
            | Terrain::Swamp
            | Terrain::Arctic => 2,
            Terrain::Mountains => 3,
            Terrain::Void => 0,
        }
    }

    /// Defensive multiplier for land units standing on this terrain.
    pub const fn defense_factor(&self) -> f64 {
        match self {
            Terrain::Forest | Terrain::Jungle | Terrain::Swamp => 1.5,
            Terrain::Hills => 2.0,
            Terrain::Mountains => 3.0,
            _ => 1.0,
        }
    }

    /// Base yield of an unimproved tile.
    pub const fn base_yield(&self) -> TileYield {
        match self {
            Terrain::Grassland => TileYield::new(2, 0, 0),
            Terrain::Plains => TileYield::new(1, 1, 0),
            Terrain::Forest => TileYield::new(1, 2, 0),
            Terrain::Hills => TileYield::new(1, 0, 0),
            Terrain::Mountains => TileYield::new(0, 1, 0),
            Terrain::Desert => TileYield::new(0, 1, 0),
            Terrain::Arctic => TileYield::zero(),
            Terrain::Tundra => TileYield::new(1, 0, 0),
            Terrain::Swamp => TileYield::new(1, 0, 0),
            Terrain::Jungle => TileYield::new(1, 0, 0),
            Terrain::River => TileYield::new(2, 0, 1),
            Terrain::Ocean => TileYield::new(1, 0, 2),
            Terrain::Void => TileYield::zero(),
        }
    }

    /// Yield when the tile carries its special resource (or the extra-shield
    /// mark for shield-bearing grassland/river tiles).
    pub const fn special_yield(&self) -> TileYield {
        match self {
            Terrain::Grassland => TileYield::new(2, 1, 0),
            Terrain::Plains => TileYield::new(1, 3, 0),    // Horses
            Terrain::Forest => TileYield::new(3, 2, 0),    // Game
            Terrain::Hills => TileYield::new(1, 2, 0),     // Coal
            Terrain::Mountains => TileYield::new(0, 1, 6), // Gold
            Terrain::Desert => TileYield::new(3, 1, 0),    // Oasis
            Terrain::Arctic => TileYield::new(2, 0, 0),    // Seals
            Terrain::Tundra => TileYield::new(2, 0, 0),    // Game
            Terrain::Swamp => TileYield::new(1, 4, 0),     // Oil
            Terrain::Jungle => TileYield::new(1, 0, 4),    // Gems
            Terrain::River => TileYield::new(2, 1, 1),
            Terrain::Ocean => TileYield::new(3, 0, 2), // Fish
            Terrain::Void => TileYield::zero(),
        }
    }

    /// Extra shields a mine adds on this terrain (zero means no mining).
    pub const fn mine_shields(&self) -> u32 {
        match self {
            Terrain::Hills => 2,
            Terrain::Mountains | Terrain::Desert => 1,
            _ => 0,
        }
    }

    /// Extra trade a road adds on this terrain.
    pub const fn road_trade(&self) -> u32 {
        match self {
            Terrain::Grassland | Terrain::Plains | Terrain::Desert => 1,
            _ => 0,
        }
    }

    /// Whether this terrain accepts irrigation (which adds +1 food).
    pub const fn can_irrigate(&self) -> bool {
        matches!(
            self,
            Terrain::Grassland
                | Terrain::Plains
                | Terrain::Desert
                | Terrain::Hills
                | Terrain::River
        )
    }

    /// Terrain this clears to, with the job length in turns.
    pub const fn clear_to(&self) -> Option<(Terrain, u32)> {
        match self {
            Terrain::Forest => Some((Terrain::Plains, 5)),
            Terrain::Jungle => Some((Terrain::Grassland, 15)),
            Terrain::Swamp => Some((Terrain::Grassland, 15)),
            _ => None,
        }
    }

    /// Whether the terrain itself supplies water for irrigation.
    pub const fn gives_water_access(&self) -> bool {
        matches!(self, Terrain::River | Terrain::Ocean)
    }

    /// Check if this is a water terrain.
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::Ocean)
    }

    /// Turns of settler work to lay a road here.
    pub const fn road_turns(&self) -> u32 {
        self.movement_cost() * 2
    }

    /// Turns of settler work to irrigate here.
    pub const fn irrigation_turns(&self) -> u32 {
        match self {
            Terrain::Hills => 10,
            _ => 5,
        }
    }

    /// Turns of settler work to dig a mine here.
    pub const fn mine_turns(&self) -> u32 {
        match self {
            Terrain::Hills | Terrain::Mountains => 10,
            _ => 5,
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Terrain::Grassland => "Grassland",
            Terrain::Plains => "Plains",
            Terrain::Forest => "Forest",
            Terrain::Hills => "Hills",
            Terrain::Mountains => "Mountains",
            Terrain::Desert => "Desert",
            Terrain::Arctic => "Arctic",
            Terrain::Tundra => "Tundra",
            Terrain::Swamp => "Swamp",
            Terrain::Jungle => "Jungle",
            Terrain::River => "River",
            Terrain::Ocean => "Ocean",
            Terrain::Void => "Void",
        }
    }

    /// Get all terrain variants that appear on generated maps.
    pub const fn all() -> &'static [Terrain] {
        &[
            Terrain::Grassland,
            Terrain::Plains,
            Terrain::Forest,
            Terrain::Hills,
            Terrain::Mountains,
            Terrain::Desert,
            Terrain::Arctic,
            Terrain::Tundra,
            Terrain::Swamp,
            Terrain::Jungle,
            Terrain::River,
            Terrain::Ocean,
        ]
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_costs() {
        assert_eq!(Terrain::Grassland.movement_cost(), 1);
        assert_eq!(Terrain::Forest.movement_cost(), 2);
        assert_eq!(Terrain::Mountains.movement_cost(), 3);
        assert_eq!(Terrain::Void.movement_cost(), 0);
    }

    #[test]
    fn test_defense_factors() {
        assert_eq!(Terrain::Grassland.defense_factor(), 1.0);
        assert_eq!(Terrain::Hills.defense_factor(), 2.0);
        assert_eq!(Terrain::Mountains.defense_factor(), 3.0);
    }

    #[test]
    fn test_yields() {
        assert_eq!(Terrain::Grassland.base_yield().food, 2);
        assert_eq!(Terrain::Ocean.base_yield().trade, 2);
        assert_eq!(Terrain::Arctic.base_yield().total(), 0);
        // Specials always improve on the base yield.
        for terrain in Terrain::all() {
            assert!(terrain.special_yield().total() >= terrain.base_yield().total());
        }
    }

    #[test]
    fn test_irrigation_eligibility() {
        assert!(Terrain::Grassland.can_irrigate());
        assert!(Terrain::River.can_irrigate());
        assert!(!Terrain::Forest.can_irrigate());
        assert!(!Terrain::Ocean.can_irrigate());
    }

    #[test]
    fn test_clearing() {
        assert_eq!(Terrain::Forest.clear_to(), Some((Terrain::Plains, 5)));
        assert_eq!(Terrain::Jungle.clear_to(), Some((Terrain::Grassland, 15)));
        assert_eq!(Terrain::Grassland.clear_to(), None);
    }

    #[test]
    fn test_water_access() {
        assert!(Terrain::Ocean.gives_water_access());
        assert!(Terrain::River.gives_water_access());
        assert!(Terrain::Ocean.is_water());
        assert!(!Terrain::River.is_water());
    }
}
