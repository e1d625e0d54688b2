//! Command surface: actions in, results out.
//!
//! Two error channels, deliberately kept apart: [`GameError`] is the fault
//! channel for caller bugs (out-of-turn commands, dangling indices) and is
//! raised through `Result`; everything a player could legitimately attempt
//! and be refused comes back as an [`ActionResult`] value, either a typed
//! [`ActionFailure`] or a silent `ActionResult::None`.

use crate::building::Building;
use crate::city::Production;
use crate::government::Government;
use crate::types::{CityIndex, PlayerId, UnitIndex};
use crate::unit::UnitType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract violations: the caller issued a command the UI/AI layer should
/// never have produced. These are bugs, not player choices.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player {0} acted outside their turn")]
    OutOfTurn(PlayerId),
    #[error("player {player} has no unit at index {unit}")]
    UnitNotFound { player: PlayerId, unit: UnitIndex },
    #[error("player {player} has no city at index {city}")]
    CityNotFound { player: PlayerId, city: CityIndex },
    #[error("unit {unit} of player {player} has no moves left")]
    NoMovesLeft { player: PlayerId, unit: UnitIndex },
}

/// A command submitted by a player (human or computer, through the same
/// path). Exactly one variant per submission; execution is atomic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    EndTurn {
        player: PlayerId,
    },
    Revolution {
        player: PlayerId,
    },
    EstablishGovernment {
        player: PlayerId,
        government: Government,
    },
    SetTaxRate {
        player: PlayerId,
        rate: i32,
    },
    SetLuxuryRate {
        player: PlayerId,
        rate: i32,
    },
    UnitAction {
        player: PlayerId,
        unit: UnitIndex,
        order: UnitOrder,
    },
    CityAction {
        player: PlayerId,
        city: CityIndex,
        order: CityOrder,
    },
}

impl Action {
    /// The player this action belongs to.
    pub fn player(&self) -> PlayerId {
        match self {
            Action::EndTurn { player }
            | Action::Revolution { player }
            | Action::EstablishGovernment { player, .. }
            | Action::SetTaxRate { player, .. }
            | Action::SetLuxuryRate { player, .. }
            | Action::UnitAction { player, .. }
            | Action::CityAction { player, .. } => *player,
        }
    }
}

/// Orders for a single unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UnitOrder {
    /// Step one tile. `dx` and `dy` must be in `-1..=1` and not both zero.
    Move { dx: i32, dy: i32 },
    /// Skip this unit for now; selection moves on and comes back around.
    Wait,
    /// Give up the rest of this unit's movement for the turn.
    NoOrders,
    BuildRoad,
    BuildIrrigation,
    BuildMine,
    Clear,
    Fortify,
    /// Found a city here, or join one standing on this tile.
    FoundOrJoinCity,
}

/// Orders for a single city.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CityOrder {
    /// Toggle a workable offset in or out of the worked set.
    ToggleWorkedTile { offset: usize },
    /// Replace the production target. Banked shields carry over.
    SelectProduction { production: Production },
    /// Pay gold to finish the current production target immediately.
    BuyProduction,
    /// Sell a constructed building for its full cost.
    SellBuilding { building: Building },
}

/// Why a well-formed action was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailure {
    /// Tax or luxury rate negative, or combined rates above 10.
    InvalidRate,
    /// `EstablishGovernment` outside Anarchy.
    GovernmentIntact,
    /// `EstablishGovernment` before the revolution has run its course.
    StillRevolting,
    /// Not enough gold in the treasury.
    CannotAfford,
    AlreadyBoughtThisTurn,
    AlreadySoldThisTurn,
}

/// Snapshot of a unit involved in combat, taken as the battle resolves.
/// Indices are not used here because the loser is removed from its owner's
/// list, shifting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub player: PlayerId,
    pub unit_type: UnitType,
    pub x: u32,
    pub y: u32,
    pub veteran: bool,
}

/// Which side survived a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatSide {
    Attacker,
    Defender,
}

/// Observable outcome of an accepted action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionResult {
    /// Nothing observable happened: either the action has no visible
    /// effect or it was a silent policy no-op.
    None,
    UnitMoved {
        player: PlayerId,
        unit: UnitIndex,
        dx: i32,
        dy: i32,
    },
    Combat {
        attacker: Combatant,
        defender: Combatant,
        winner: CombatSide,
        dx: i32,
        dy: i32,
    },
    Failed {
        reason: ActionFailure,
    },
    /// Batch of events produced while starting the new current player's turn.
    TurnStarted {
        player: PlayerId,
        events: Vec<TurnEvent>,
    },
}

/// Events raised while processing the start of a player's turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnEvent {
    CityGrew {
        city: CityIndex,
        size: u32,
    },
    CityStarved {
        city: CityIndex,
        size: u32,
    },
    /// A city starved away its last citizen and was removed.
    CityDisbanded {
        name: String,
    },
    ProductionCompleted {
        city: CityIndex,
        production: Production,
    },
    /// A unit finished its terrain job and returned to idle.
    ImprovementFinished {
        unit: UnitIndex,
    },
    /// The revolution is over; the player may now establish a government.
    SelectGovernment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_player() {
        let action = Action::UnitAction {
            player: 2,
            unit: 0,
            order: UnitOrder::Fortify,
        };
        assert_eq!(action.player(), 2);
        assert_eq!(Action::EndTurn { player: 1 }.player(), 1);
    }

    #[test]
    fn test_action_round_trip() {
        let action = Action::UnitAction {
            player: 0,
            unit: 3,
            order: UnitOrder::Move { dx: 1, dy: -1 },
        };
        let json = serde_json::to_string(&action).unwrap();
        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
    }

    #[test]
    fn test_result_round_trip() {
        let result = ActionResult::Combat {
            attacker: Combatant {
                player: 0,
                unit_type: UnitType::Legion,
                x: 4,
                y: 4,
                veteran: true,
            },
            defender: Combatant {
                player: 1,
                unit_type: UnitType::Phalanx,
                x: 5,
                y: 4,
                veteran: false,
            },
            winner: CombatSide::Attacker,
            dx: 1,
            dy: 0,
        };
        let json = serde_json::to_string(&result).unwrap();
        let restored: ActionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, result);
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::UnitNotFound { player: 1, unit: 9 };
        assert_eq!(err.to_string(), "player 1 has no unit at index 9");
        assert_eq!(
            GameError::OutOfTurn(3).to_string(),
            "player 3 acted outside their turn"
        );
    }
}
