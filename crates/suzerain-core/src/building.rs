//! Building catalog: construction cost, per-turn upkeep and happiness.

use serde::{Deserialize, Serialize};

/// Buildings a city can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Building {
    Palace,
    Barracks,
    Granary,
    Temple,
    Marketplace,
    Library,
    Courthouse,
    CityWalls,
    Aqueduct,
    Colosseum,
    Cathedral,
    University,
    Bank,
}

impl Building {
    /// Production cost in shields.
    pub const fn cost(&self) -> u32 {
        match self {
            Building::Palace => 200,
            Building::Barracks => 40,
            Building::Granary => 60,
            Building::Temple => 40,
            Building::Marketplace => 80,
            Building::Library => 80,
            Building::Courthouse => 80,
            Building::CityWalls => 120,
            Building::Aqueduct => 120,
            Building::Colosseum => 100,
            Building::Cathedral => 160,
            Building::University => 160,
            Building::Bank => 120,
        }
    }

    /// Gold upkeep per turn.
    pub const fn upkeep(&self) -> u32 {
        match self {
            Building::Palace => 0,
            Building::Barracks | Building::Granary | Building::Temple => 1,
            Building::Marketplace | Building::Library | Building::Courthouse => 1,
            Building::CityWalls | Building::Aqueduct => 2,
            Building::Colosseum => 4,
            Building::Cathedral | Building::University | Building::Bank => 3,
        }
    }

    /// Unhappy citizens this building pacifies.
    pub const fn happiness_adjustment(&self) -> u32 {
        match self {
            Building::Temple => 1,
            Building::Colosseum => 3,
            Building::Cathedral => 4,
            _ => 0,
        }
    }

    /// Gold returned when the building is sold. Full cost, no depreciation.
    pub const fn sell_price(&self) -> u32 {
        self.cost()
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Building::Palace => "Palace",
            Building::Barracks => "Barracks",
            Building::Granary => "Granary",
            Building::Temple => "Temple",
            Building::Marketplace => "Marketplace",
            Building::Library => "Library",
            Building::Courthouse => "Courthouse",
            Building::CityWalls => "City Walls",
            Building::Aqueduct => "Aqueduct",
            Building::Colosseum => "Colosseum",
            Building::Cathedral => "Cathedral",
            Building::University => "University",
            Building::Bank => "Bank",
        }
    }

    /// Get all building types.
    pub const fn all() -> &'static [Building] {
        &[
            Building::Palace,
            Building::Barracks,
            Building::Granary,
            Building::Temple,
            Building::Marketplace,
            Building::Library,
            Building::Courthouse,
            Building::CityWalls,
            Building::Aqueduct,
            Building::Colosseum,
            Building::Cathedral,
            Building::University,
            Building::Bank,
        ]
    }
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs_and_upkeep() {
        assert_eq!(Building::Palace.cost(), 200);
        assert_eq!(Building::Palace.upkeep(), 0);
        assert_eq!(Building::Temple.cost(), 40);
        assert_eq!(Building::Colosseum.upkeep(), 4);
    }

    #[test]
    fn test_happiness_buildings() {
        assert_eq!(Building::Temple.happiness_adjustment(), 1);
        assert_eq!(Building::Colosseum.happiness_adjustment(), 3);
        assert_eq!(Building::Cathedral.happiness_adjustment(), 4);
        assert_eq!(Building::Granary.happiness_adjustment(), 0);
    }

    #[test]
    fn test_sell_price_is_full_cost() {
        for building in Building::all() {
            assert_eq!(building.sell_price(), building.cost());
        }
    }
}
