//! City entity, specialists and production targets.

use crate::building::Building;
use crate::map::GameMap;
use crate::types::PlayerId;
use crate::unit::UnitType;
use serde::{Deserialize, Serialize};

/// The 20 tile offsets a city can work, surrounding the center.
///
/// The block is the 5x5 square around the center minus the four corners and
/// the center itself. The center tile is never assignable; it always
/// contributes its yield for free.
pub const WORKABLE_OFFSETS: [(i32, i32); 20] = [
    (-1, -2),
    (0, -2),
    (1, -2),
    (-2, -1),
    (-1, -1),
    (0, -1),
    (1, -1),
    (2, -1),
    (-2, 0),
    (-1, 0),
    (1, 0),
    (2, 0),
    (-2, 1),
    (-1, 1),
    (0, 1),
    (1, 1),
    (2, 1),
    (-1, 2),
    (0, 2),
    (1, 2),
];

/// A citizen not assigned to a worked tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialist {
    #[default]
    Entertainer,
    TaxAgent,
    Scientist,
}

impl Specialist {
    /// Luxury produced by this specialist.
    pub const fn luxury(&self) -> u32 {
        match self {
            Specialist::Entertainer => 2,
            _ => 0,
        }
    }

    /// Gold produced by this specialist.
    pub const fn gold(&self) -> u32 {
        match self {
            Specialist::TaxAgent => 2,
            _ => 0,
        }
    }

    /// Beakers produced by this specialist.
    pub const fn beakers(&self) -> u32 {
        match self {
            Specialist::Scientist => 2,
            _ => 0,
        }
    }
}

/// What a city is currently producing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Production {
    Unit(UnitType),
    Building(Building),
}

impl Production {
    /// Shield cost of the target.
    pub fn cost(&self) -> u32 {
        match self {
            Production::Unit(unit_type) => unit_type.prototype().cost,
            Production::Building(building) => building.cost(),
        }
    }

    /// Display name of the target.
    pub fn name(&self) -> &'static str {
        match self {
            Production::Unit(unit_type) => unit_type.name(),
            Production::Building(building) => building.name(),
        }
    }
}

impl Default for Production {
    fn default() -> Self {
        Production::Unit(UnitType::Militia)
    }
}

/// A city on the game map.
///
/// Invariant: `worked_tiles.len() + specialists.len() == size` after every
/// mutation; [`crate::economy::calculate_citizens`] repairs any drift by
/// back-filling entertainers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    /// Owning player.
    pub owner: PlayerId,
    /// City name.
    pub name: String,
    /// X position.
    pub x: u32,
    /// Y position.
    pub y: u32,
    /// Population level, always at least 1.
    pub size: u32,
    /// Worked tile offsets, indices into [`WORKABLE_OFFSETS`].
    pub worked_tiles: Vec<usize>,
    /// Citizens working as specialists instead of on tiles.
    pub specialists: Vec<Specialist>,
    /// Food stored toward the next population level.
    pub food: u32,
    /// Shields stored toward the current production target.
    pub shields: u32,
    /// Buildings constructed in this city.
    pub buildings: Vec<Building>,
    /// Current production target.
    pub production: Production,
    /// Has production been bought with gold this turn?
    pub bought_this_turn: bool,
    /// Has a building been sold this turn?
    pub sold_this_turn: bool,
}

impl City {
    /// Create a new size-1 city. The single citizen starts as an
    /// entertainer until workers are assigned.
    pub fn new(owner: PlayerId, name: String, x: u32, y: u32) -> Self {
        Self {
            owner,
            name,
            x,
            y,
            size: 1,
            worked_tiles: Vec::new(),
            specialists: vec![Specialist::Entertainer],
            food: 0,
            shields: 0,
            buildings: Vec::new(),
            production: Production::default(),
            bought_this_turn: false,
            sold_this_turn: false,
        }
    }

    /// Food needed in the box before the city grows.
    pub fn growth_threshold(&self) -> u32 {
        10 * (self.size + 1)
    }

    /// Check whether a building has been constructed here.
    pub fn has_building(&self, building: Building) -> bool {
        self.buildings.contains(&building)
    }

    /// Add a building if not already present.
    pub fn add_building(&mut self, building: Building) {
        if !self.has_building(building) {
            self.buildings.push(building);
        }
    }

    /// Remove a building. Returns whether it was present.
    pub fn remove_building(&mut self, building: Building) -> bool {
        match self.buildings.iter().position(|b| *b == building) {
            Some(i) => {
                self.buildings.remove(i);
                true
            }
            None => false,
        }
    }

    /// Total gold upkeep of all constructed buildings.
    pub fn building_upkeep(&self) -> u32 {
        self.buildings.iter().map(|b| b.upkeep()).sum()
    }

    /// Map position of a workable offset, with x wrapped. `None` when the
    /// offset index is invalid or the tile falls past the map's y edge.
    pub fn offset_position(&self, map: &GameMap, offset: usize) -> Option<(u32, u32)> {
        let (dx, dy) = *WORKABLE_OFFSETS.get(offset)?;
        let y = self.y as i32 + dy;
        if !map.contains_y(y) {
            return None;
        }
        Some((map.wrap_x(self.x as i32 + dx), y as u32))
    }

    /// Check whether an offset is currently worked.
    pub fn works_offset(&self, offset: usize) -> bool {
        self.worked_tiles.contains(&offset)
    }
}
