//! Root game state: the master map, the player roster and the turn pointer.
//!
//! The whole aggregate is a plain value passed into every entry point.
//! There is no interior synchronization; callers embedding this engine in
//! a concurrent host must serialize all calls through a single writer.

use crate::map::{GameMap, MapTemplate};
use crate::player::{Civilization, PlayerState};
use crate::rng::GameRng;
use crate::types::{CityIndex, Controller, Difficulty, PlayerId, UnitIndex};
use crate::unit::{Unit, UnitType};
use serde::{Deserialize, Serialize};

/// The complete authoritative state of one game session.
///
/// Serializes field-for-field; the RNG is the one exception and re-seeds
/// from entropy on load, so combat draws are not replay-exact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Seed used to derive per-tile special-resource marks at setup.
    /// Decorative beyond that: combat draws come from `rng` instead.
    pub seed: u64,
    /// Whose turn it is.
    pub player_in_turn: PlayerId,
    /// All players, in turn order.
    pub players: Vec<PlayerState>,
    /// The master map. Ground truth; never hides anything.
    pub map: GameMap,
    /// Current turn number, starting at 1.
    pub turn: u32,
    /// Difficulty level for this session.
    pub difficulty: Difficulty,
    /// Random source for combat and promotion rolls. Independent of
    /// `seed`; tests pin outcomes by assigning a seeded generator.
    #[serde(skip, default)]
    pub rng: GameRng,
}

impl GameState {
    /// Build a game from the external map generator's template.
    pub fn new(template: &MapTemplate, seed: u64, difficulty: Difficulty) -> Self {
        Self {
            seed,
            player_in_turn: 0,
            players: Vec::new(),
            map: GameMap::from_template(template, seed),
            turn: 1,
            difficulty,
            rng: GameRng::from_entropy(),
        }
    }

    /// Add a player to the roster, returning its id.
    pub fn add_player(&mut self, civilization: Civilization, controller: Controller) -> PlayerId {
        let id = self.players.len() as PlayerId;
        self.players
            .push(PlayerState::new(civilization, &self.map, controller));
        id
    }

    /// Get a player by id.
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id as usize]
    }

    /// Get a player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id as usize]
    }

    /// Spawn a unit for a player and reveal the surrounding tiles on that
    /// player's map. Returns the unit's index.
    pub fn spawn_unit(
        &mut self,
        player: PlayerId,
        unit_type: UnitType,
        x: u32,
        y: u32,
    ) -> UnitIndex {
        let unit = Unit::new(unit_type, player, x, y);
        let p = &mut self.players[player as usize];
        p.units.push(unit);
        p.map.reveal_around(&self.map, x, y);
        p.units.len() - 1
    }

    /// Remove a unit, keeping the owner's selection pointer consistent
    /// across the index shift.
    pub fn remove_unit(&mut self, player: PlayerId, unit: UnitIndex) {
        let p = &mut self.players[player as usize];
        p.units.remove(unit);
        p.selected_unit = match p.selected_unit {
            Some(s) if s == unit => None,
            Some(s) if s > unit => Some(s - 1),
            other => other,
        };
    }

    /// Remove a city from its owner's list.
    pub fn remove_city(&mut self, player: PlayerId, city: CityIndex) {
        self.players[player as usize].cities.remove(city);
    }

    /// First unit standing on `(x, y)` across all players, optionally
    /// skipping one specific unit. Sanctioned read path for rendering/AI.
    pub fn unit_at(
        &self,
        x: u32,
        y: u32,
        exclude: Option<(PlayerId, UnitIndex)>,
    ) -> Option<(PlayerId, UnitIndex)> {
        for (pi, player) in self.players.iter().enumerate() {
            for (ui, unit) in player.units.iter().enumerate() {
                if (unit.x, unit.y) == (x, y) && exclude != Some((pi as PlayerId, ui)) {
                    return Some((pi as PlayerId, ui));
                }
            }
        }
        None
    }

    /// City on `(x, y)` across all players.
    pub fn city_at(&self, x: u32, y: u32) -> Option<(PlayerId, CityIndex)> {
        for (pi, player) in self.players.iter().enumerate() {
            if let Some(ci) = player.city_at(x, y) {
                return Some((pi as PlayerId, ci));
            }
        }
        None
    }

    /// The currently selected unit for a player, if any.
    pub fn selected_unit(&self, player: PlayerId) -> Option<&Unit> {
        let p = self.player(player);
        p.selected_unit.and_then(|i| p.units.get(i))
    }

    /// Recompute a player's selected unit: the next idle unit with moves
    /// remaining, cycling forward from the previous selection. Clears the
    /// selection when no unit is eligible.
    pub fn reselect_unit(&mut self, player: PlayerId) {
        let p = &mut self.players[player as usize];
        let count = p.units.len();
        if count == 0 {
            p.selected_unit = None;
            return;
        }
        let start = match p.selected_unit {
            Some(i) => i + 1,
            None => 0,
        };
        for step in 0..count {
            let i = (start + step) % count;
            if p.units[i].ready_for_orders() {
                p.selected_unit = Some(i);
                return;
            }
        }
        p.selected_unit = None;
    }
}
