//! Unit prototypes and the mutable unit entity.
//!
//! Prototypes are a static catalog (`const fn` match tables, same shape as
//! the terrain catalog). Units track their movement budget in thirds of a
//! tile so road movement can cost a single third.

use crate::types::{CityIndex, PlayerId};
use serde::{Deserialize, Serialize};

/// Where a unit can move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Land,
    Sea,
    Air,
}

impl Domain {
    pub const fn is_land(&self) -> bool {
        matches!(self, Domain::Land)
    }
}

/// Technology gates referenced by unit prototypes.
///
/// Research itself lives outside this crate; the gates are catalog data the
/// surrounding system checks when offering production choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advance {
    HorsebackRiding,
    Chivalry,
    Mathematics,
    Metallurgy,
    Gunpowder,
    Conscription,
    Automobile,
    Robotics,
    MapMaking,
    Navigation,
    Magnetism,
    Industrialization,
    Flight,
    AdvancedFlight,
}

/// Static stats for a unit type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrototype {
    /// Attack strength.
    pub attack: u32,
    /// Defense strength.
    pub defense: u32,
    /// Movement per turn in whole tiles.
    pub moves: u32,
    /// Movement domain.
    pub domain: Domain,
    /// Production cost in shields.
    pub cost: u32,
    /// Can found cities and work terrain improvements.
    pub is_builder: bool,
    /// Non-combat unit (no unhappiness upkeep, cannot fortify).
    pub is_civilian: bool,
    /// Attacks are not blunted by city walls.
    pub ignores_walls: bool,
    /// Land units this unit can carry. Carrying itself is not implemented;
    /// the capacity is catalog data only.
    pub transport_land: u32,
    /// Air units this unit can carry. Data only, as above.
    pub transport_air: u32,
    /// Advance required before this unit can be produced.
    pub requires: Option<Advance>,
    /// Advance that retires this unit from production menus.
    pub obsoleted_by: Option<Advance>,
}

impl UnitPrototype {
    /// Create a land combat unit.
    pub const fn land(attack: u32, defense: u32, moves: u32, cost: u32) -> Self {
        Self {
            attack,
            defense,
            moves,
            domain: Domain::Land,
            cost,
            is_builder: false,
            is_civilian: false,
            ignores_walls: false,
            transport_land: 0,
            transport_air: 0,
            requires: None,
            obsoleted_by: None,
        }
    }

    /// Create a sea unit with a land-unit cargo hold.
    pub const fn sea(attack: u32, defense: u32, moves: u32, cost: u32, cargo: u32) -> Self {
        Self {
            attack,
            defense,
            moves,
            domain: Domain::Sea,
            cost,
            is_builder: false,
            is_civilian: false,
            ignores_walls: false,
            transport_land: cargo,
            transport_air: 0,
            requires: None,
            obsoleted_by: None,
        }
    }

    /// Create an air unit.
    pub const fn air(attack: u32, defense: u32, moves: u32, cost: u32) -> Self {
        Self {
            attack,
            defense,
            moves,
            domain: Domain::Air,
            cost,
            is_builder: false,
            is_civilian: false,
            ignores_walls: false,
            transport_land: 0,
            transport_air: 0,
            requires: None,
            obsoleted_by: None,
        }
    }

    /// Create a civilian builder unit.
    pub const fn builder(moves: u32, cost: u32) -> Self {
        let mut proto = Self::land(0, 1, moves, cost);
        proto.is_builder = true;
        proto.is_civilian = true;
        proto
    }

    /// Gate this prototype behind an advance.
    pub const fn requires(mut self, advance: Advance) -> Self {
        self.requires = Some(advance);
        self
    }

    /// Retire this prototype once an advance is researched.
    pub const fn obsolete_at(mut self, advance: Advance) -> Self {
        self.obsoleted_by = Some(advance);
        self
    }

    /// Let this prototype attack through city walls at full strength.
    pub const fn ignoring_walls(mut self) -> Self {
        self.ignores_walls = true;
        self
    }
}

/// Types of units available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Settlers,
    Militia,
    Phalanx,
    Legion,
    Musketeers,
    Riflemen,
    Cavalry,
    Knights,
    Armor,
    Catapult,
    Cannon,
    Artillery,
    Trireme,
    Sail,
    Frigate,
    Transport,
    Fighter,
    Bomber,
}

impl UnitType {
    /// Get the prototype for this unit type.
    pub const fn prototype(&self) -> UnitPrototype {
        match self {
            UnitType::Settlers => UnitPrototype::builder(1, 40),
            UnitType::Militia => UnitPrototype::land(1, 1, 1, 10),
            UnitType::Phalanx => UnitPrototype::land(1, 2, 1, 20),
            UnitType::Legion => UnitPrototype::land(4, 2, 1, 20),
            UnitType::Musketeers => UnitPrototype::land(2, 3, 1, 30).requires(Advance::Gunpowder),
            UnitType::Riflemen => UnitPrototype::land(3, 5, 1, 30).requires(Advance::Conscription),
            UnitType::Cavalry => UnitPrototype::land(2, 1, 2, 20)
                .requires(Advance::HorsebackRiding)
                .obsolete_at(Advance::Conscription),
            UnitType::Knights => UnitPrototype::land(4, 2, 2, 40).requires(Advance::Chivalry),
            UnitType::Armor => UnitPrototype::land(10, 5, 3, 80).requires(Advance::Automobile),
            UnitType::Catapult => UnitPrototype::land(6, 1, 1, 40)
                .requires(Advance::Mathematics)
                .obsolete_at(Advance::Metallurgy),
            UnitType::Cannon => UnitPrototype::land(8, 1, 1, 40)
                .requires(Advance::Metallurgy)
                .obsolete_at(Advance::Robotics),
            UnitType::Artillery => UnitPrototype::land(12, 2, 2, 60)
                .requires(Advance::Robotics)
                .ignoring_walls(),
            UnitType::Trireme => UnitPrototype::sea(1, 0, 3, 40, 2)
                .requires(Advance::MapMaking)
                .obsolete_at(Advance::Navigation),
            UnitType::Sail => UnitPrototype::sea(1, 1, 3, 40, 3)
                .requires(Advance::Navigation)
                .obsolete_at(Advance::Magnetism),
            UnitType::Frigate => UnitPrototype::sea(2, 2, 3, 40, 4).requires(Advance::Magnetism),
            UnitType::Transport => {
                UnitPrototype::sea(0, 3, 4, 50, 8).requires(Advance::Industrialization)
            }
            UnitType::Fighter => UnitPrototype::air(4, 3, 10, 60).requires(Advance::Flight),
            UnitType::Bomber => UnitPrototype::air(12, 1, 8, 120).requires(Advance::AdvancedFlight),
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            UnitType::Settlers => "Settlers",
            UnitType::Militia => "Militia",
            UnitType::Phalanx => "Phalanx",
            UnitType::Legion => "Legion",
            UnitType::Musketeers => "Musketeers",
            UnitType::Riflemen => "Riflemen",
            UnitType::Cavalry => "Cavalry",
            UnitType::Knights => "Knights",
            UnitType::Armor => "Armor",
            UnitType::Catapult => "Catapult",
            UnitType::Cannon => "Cannon",
            UnitType::Artillery => "Artillery",
            UnitType::Trireme => "Trireme",
            UnitType::Sail => "Sail",
            UnitType::Frigate => "Frigate",
            UnitType::Transport => "Transport",
            UnitType::Fighter => "Fighter",
            UnitType::Bomber => "Bomber",
        }
    }

    /// Get all unit types.
    pub const fn all() -> &'static [UnitType] {
        &[
            UnitType::Settlers,
            UnitType::Militia,
            UnitType::Phalanx,
            UnitType::Legion,
            UnitType::Musketeers,
            UnitType::Riflemen,
            UnitType::Cavalry,
            UnitType::Knights,
            UnitType::Armor,
            UnitType::Catapult,
            UnitType::Cannon,
            UnitType::Artillery,
            UnitType::Trireme,
            UnitType::Sail,
            UnitType::Frigate,
            UnitType::Transport,
            UnitType::Fighter,
            UnitType::Bomber,
        ]
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle state of a unit.
///
/// The working states are advanced by the turn processor; a finished job
/// returns the unit to `Idle` with its progress counter reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    #[default]
    Idle,
    Sentry,
    Fortifying,
    Fortified,
    BuildingRoad,
    BuildingIrrigation,
    BuildingMine,
    BuildingFortress,
    Clearing,
    CleaningPollution,
}

impl UnitState {
    /// Is the unit in the middle of a multi-turn terrain job?
    pub const fn is_working(&self) -> bool {
        matches!(
            self,
            UnitState::BuildingRoad
                | UnitState::BuildingIrrigation
                | UnitState::BuildingMine
                | UnitState::BuildingFortress
                | UnitState::Clearing
                | UnitState::CleaningPollution
        )
    }
}

/// A unit on the game map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    /// Type of unit.
    pub unit_type: UnitType,
    /// X position.
    pub x: u32,
    /// Y position.
    pub y: u32,
    /// Owning player.
    pub owner: PlayerId,
    /// Remaining movement this turn, in thirds of a tile.
    pub moves_left: u32,
    /// Veteran units fight at 1.5x strength.
    pub veteran: bool,
    /// Lifecycle state.
    pub state: UnitState,
    /// Turns spent on the current terrain job.
    pub progress: u32,
    /// City this unit is homed to, if any. The index is a hint: there is
    /// no cleanup when a city changes hands, so it can dangle afterwards.
    pub home_city: Option<CityIndex>,
}

impl Unit {
    /// Create a new unit with a full movement budget.
    pub fn new(unit_type: UnitType, owner: PlayerId, x: u32, y: u32) -> Self {
        Self {
            unit_type,
            x,
            y,
            owner,
            moves_left: unit_type.prototype().moves * 3,
            veteran: false,
            state: UnitState::Idle,
            progress: 0,
            home_city: None,
        }
    }

    /// Get the prototype for this unit.
    pub fn prototype(&self) -> UnitPrototype {
        self.unit_type.prototype()
    }

    /// Full movement budget in thirds of a tile.
    pub fn max_moves(&self) -> u32 {
        self.prototype().moves * 3
    }

    /// Refill the movement budget for a new turn.
    pub fn reset_moves(&mut self) {
        self.moves_left = self.max_moves();
    }

    /// Spend movement, saturating at zero.
    pub fn use_moves(&mut self, thirds: u32) {
        self.moves_left = self.moves_left.saturating_sub(thirds);
    }

    /// Check if this is a military unit.
    pub fn is_military(&self) -> bool {
        !self.prototype().is_civilian
    }

    /// Idle with movement remaining, so eligible for selection.
    pub fn ready_for_orders(&self) -> bool {
        self.state == UnitState::Idle && self.moves_left > 0
    }
}
