//! Action validation and dispatch.
//!
//! [`GameState::perform`] is the single entry point for every command,
//! human or computer. Validation runs before any mutation; once a command
//! passes, it applies completely or not at all.

use crate::action::{Action, ActionFailure, ActionResult, CityOrder, GameError};
use crate::building::Building;
use crate::city::WORKABLE_OFFSETS;
use crate::economy;
use crate::game_state::GameState;
use crate::government::Government;
use crate::turn;
use crate::types::{CityIndex, PlayerId, UnitIndex};
use crate::unit_actions;

impl GameState {
    /// Validate and apply one action.
    ///
    /// `Err` is the fault channel: the caller submitted an impossible
    /// command (wrong turn, dangling index) and nothing was mutated.
    /// Refused-but-legal choices come back as `Ok` with a `Failed` or
    /// empty result.
    pub fn perform(&mut self, action: Action) -> Result<ActionResult, GameError> {
        match action {
            Action::EndTurn { player } => {
                self.validate_player(player)?;
                Ok(turn::end_turn(self))
            }
            Action::Revolution { player } => {
                self.validate_player(player)?;
                self.player_mut(player).government = Government::Anarchy;
                Ok(ActionResult::None)
            }
            Action::EstablishGovernment { player, government } => {
                self.validate_player(player)?;
                Ok(self.establish_government(player, government))
            }
            Action::SetTaxRate { player, rate } => {
                self.validate_player(player)?;
                let luxury = self.player(player).luxury_rate as i32;
                Ok(self.set_rates(player, rate, luxury, true))
            }
            Action::SetLuxuryRate { player, rate } => {
                self.validate_player(player)?;
                let tax = self.player(player).tax_rate as i32;
                Ok(self.set_rates(player, tax, rate, false))
            }
            Action::UnitAction {
                player,
                unit,
                order,
            } => {
                self.validate_unit_action(player, unit)?;
                Ok(unit_actions::execute(self, player, unit, order))
            }
            Action::CityAction {
                player,
                city,
                order,
            } => {
                self.validate_city_action(player, city)?;
                Ok(self.execute_city_order(player, city, order))
            }
        }
    }

    /// Reject commands submitted outside the acting player's turn.
    fn validate_player(&self, player: PlayerId) -> Result<(), GameError> {
        if player != self.player_in_turn {
            return Err(GameError::OutOfTurn(player));
        }
        Ok(())
    }

    /// Turn check, then existence and movement budget of the unit.
    fn validate_unit_action(&self, player: PlayerId, unit: UnitIndex) -> Result<(), GameError> {
        self.validate_player(player)?;
        match self.player(player).units.get(unit) {
            None => Err(GameError::UnitNotFound { player, unit }),
            Some(u) if u.moves_left == 0 => Err(GameError::NoMovesLeft { player, unit }),
            Some(_) => Ok(()),
        }
    }

    /// Turn check, then existence of the city.
    fn validate_city_action(&self, player: PlayerId, city: CityIndex) -> Result<(), GameError> {
        self.validate_player(player)?;
        if self.player(player).cities.get(city).is_none() {
            return Err(GameError::CityNotFound { player, city });
        }
        Ok(())
    }

    fn establish_government(&mut self, player: PlayerId, government: Government) -> ActionResult {
        if self.player(player).government != Government::Anarchy {
            return ActionResult::Failed {
                reason: ActionFailure::GovernmentIntact,
            };
        }
        if self.turn % 4 != 0 {
            return ActionResult::Failed {
                reason: ActionFailure::StillRevolting,
            };
        }
        self.player_mut(player).government = government;
        ActionResult::None
    }

    /// Apply a tax or luxury rate change; the two must stay non-negative
    /// and sum to at most 10.
    fn set_rates(&mut self, player: PlayerId, tax: i32, luxury: i32, tax_changed: bool) -> ActionResult {
        let changed = if tax_changed { tax } else { luxury };
        if changed < 0 || tax + luxury > 10 {
            return ActionResult::Failed {
                reason: ActionFailure::InvalidRate,
            };
        }
        let p = self.player_mut(player);
        p.tax_rate = tax as u8;
        p.luxury_rate = luxury as u8;
        ActionResult::None
    }

    fn execute_city_order(
        &mut self,
        player: PlayerId,
        city: CityIndex,
        order: CityOrder,
    ) -> ActionResult {
        match order {
            CityOrder::ToggleWorkedTile { offset } => self.toggle_worked_tile(player, city, offset),
            CityOrder::SelectProduction { production } => {
                // Banked shields carry over to the new target.
                self.player_mut(player).cities[city].production = production;
                ActionResult::None
            }
            CityOrder::BuyProduction => self.buy_production(player, city),
            CityOrder::SellBuilding { building } => self.sell_building(player, city, building),
        }
    }

    /// Toggle an offset out of or into the worked set. Toggling off frees
    /// the citizen into entertainment; toggling on takes a specialist off
    /// the books, and is refused silently for blocked offsets or when
    /// every citizen is already working.
    fn toggle_worked_tile(
        &mut self,
        player: PlayerId,
        city: CityIndex,
        offset: usize,
    ) -> ActionResult {
        if offset >= WORKABLE_OFFSETS.len() {
            return ActionResult::None;
        }
        if self.player(player).cities[city].works_offset(offset) {
            let c = &mut self.player_mut(player).cities[city];
            c.worked_tiles.retain(|o| *o != offset);
            economy::calculate_citizens(c);
        } else {
            let blocked = economy::blocked_offsets(self, player, city);
            if blocked[offset] {
                return ActionResult::None;
            }
            let c = &mut self.player_mut(player).cities[city];
            if c.specialists.pop().is_none() {
                return ActionResult::None;
            }
            c.worked_tiles.push(offset);
        }
        ActionResult::None
    }

    fn buy_production(&mut self, player: PlayerId, city: CityIndex) -> ActionResult {
        let (production, shields, bought) = {
            let c = &self.player(player).cities[city];
            (c.production, c.shields, c.bought_this_turn)
        };
        if bought {
            return ActionResult::Failed {
                reason: ActionFailure::AlreadyBoughtThisTurn,
            };
        }
        let price = economy::buy_cost(production, shields);
        if self.player(player).gold < price {
            return ActionResult::Failed {
                reason: ActionFailure::CannotAfford,
            };
        }
        let p = self.player_mut(player);
        p.gold -= price;
        let c = &mut p.cities[city];
        c.shields = production.cost();
        c.bought_this_turn = true;
        ActionResult::None
    }

    fn sell_building(
        &mut self,
        player: PlayerId,
        city: CityIndex,
        building: Building,
    ) -> ActionResult {
        if self.player(player).cities[city].sold_this_turn {
            return ActionResult::Failed {
                reason: ActionFailure::AlreadySoldThisTurn,
            };
        }
        if !self.player_mut(player).cities[city].remove_building(building) {
            return ActionResult::None;
        }
        let p = self.player_mut(player);
        p.gold += building.sell_price();
        p.cities[city].sold_this_turn = true;
        ActionResult::None
    }
}
