//! Unit action executor: movement, combat triggering, city capture,
//! terrain improvement orders and city founding.
//!
//! Everything here runs after validation, so the unit exists, belongs to
//! the acting player and has movement left. Policy refusals (illegal
//! targets, disallowed orders) come back as a silent empty result.

use crate::action::{ActionResult, CombatSide, Combatant, UnitOrder};
use crate::building::Building;
use crate::city::City;
use crate::combat;
use crate::economy;
use crate::game_state::GameState;
use crate::map::MapTile;
use crate::types::{CityIndex, PlayerId, UnitIndex};
use crate::unit::{Domain, UnitState};

/// Apply a unit order. The result is `None` for orders with no observable
/// effect, `UnitMoved` or `Combat` for movement.
pub fn execute(
    state: &mut GameState,
    player: PlayerId,
    unit: UnitIndex,
    order: UnitOrder,
) -> ActionResult {
    match order {
        UnitOrder::Move { dx, dy } => execute_move(state, player, unit, dx, dy),
        UnitOrder::Wait => {
            state.reselect_unit(player);
            ActionResult::None
        }
        UnitOrder::NoOrders => {
            state.player_mut(player).units[unit].moves_left = 0;
            state.reselect_unit(player);
            ActionResult::None
        }
        UnitOrder::BuildRoad => start_job(state, player, unit, UnitState::BuildingRoad),
        UnitOrder::BuildIrrigation => start_job(state, player, unit, UnitState::BuildingIrrigation),
        UnitOrder::BuildMine => start_job(state, player, unit, UnitState::BuildingMine),
        UnitOrder::Clear => start_job(state, player, unit, UnitState::Clearing),
        UnitOrder::Fortify => fortify(state, player, unit),
        UnitOrder::FoundOrJoinCity => found_or_join_city(state, player, unit),
    }
}

/// Resolve a one-tile move: x wraps, y does not; entering a hostile tile
/// becomes combat; an undefended enemy city is captured on entry.
fn execute_move(
    state: &mut GameState,
    player: PlayerId,
    unit: UnitIndex,
    dx: i32,
    dy: i32,
) -> ActionResult {
    if (dx == 0 && dy == 0) || dx.abs() > 1 || dy.abs() > 1 {
        return ActionResult::None;
    }
    let (ox, oy, domain) = {
        let u = &state.player(player).units[unit];
        (u.x, u.y, u.prototype().domain)
    };
    let ty = oy as i32 + dy;
    if !state.map.contains_y(ty) {
        return ActionResult::None;
    }
    let tx = state.map.wrap_x(ox as i32 + dx);
    let ty = ty as u32;
    let dest = state.map.tile(tx as i32, ty as i32);

    let dest_city = state.city_at(tx, ty);
    match domain {
        Domain::Land => {
            if dest.terrain.is_water() {
                return ActionResult::None;
            }
        }
        Domain::Sea => {
            let friendly_port = matches!(dest_city, Some((owner, _)) if owner == player);
            if !dest.terrain.is_water() && !friendly_port {
                return ActionResult::None;
            }
        }
        Domain::Air => {}
    }

    if let Some((defender, _)) = state.unit_at(tx, ty, None) {
        if defender != player {
            return resolve_combat(state, player, unit, defender, tx, ty, dx, dy);
        }
    }

    if let Some((owner, city)) = dest_city {
        if owner != player {
            capture_city(state, player, owner, city);
        }
    }

    let origin = state.map.tile(ox as i32, oy as i32);
    let cost = movement_cost(&origin, &dest);
    {
        let u = &mut state.player_mut(player).units[unit];
        u.x = tx;
        u.y = ty;
        u.use_moves(cost);
    }
    state.players[player as usize]
        .map
        .reveal_around(&state.map, tx, ty);

    if state.player(player).units[unit].moves_left == 0 {
        state.reselect_unit(player);
    }
    ActionResult::UnitMoved {
        player,
        unit,
        dx,
        dy,
    }
}

/// Movement cost in thirds of a tile. Shared roads discount to a single
/// third; an unbroken railroad link is free.
fn movement_cost(origin: &MapTile, dest: &MapTile) -> u32 {
    if origin.railroad && dest.railroad {
        0
    } else if origin.has_road() && dest.has_road() {
        1
    } else {
        dest.movement_cost() * 3
    }
}

/// Fight the strongest unit of the stack on the destination tile. The
/// loser is removed outright; the survivor may come out a veteran.
fn resolve_combat(
    state: &mut GameState,
    player: PlayerId,
    unit: UnitIndex,
    defender_player: PlayerId,
    tx: u32,
    ty: u32,
    dx: i32,
    dy: i32,
) -> ActionResult {
    let tile = state.map.tile(tx as i32, ty as i32);
    let ignores_walls = state.player(player).units[unit].prototype().ignores_walls;
    let walled = match state.city_at(tx, ty) {
        Some((owner, city)) if owner == defender_player => {
            state.player(owner).cities[city].has_building(Building::CityWalls) && !ignores_walls
        }
        _ => false,
    };

    let stack = state.player(defender_player).units_at(tx, ty);
    let defender = combat::best_defender(&state.player(defender_player).units, &stack, &tile, walled);
    let attack = combat::attack_strength(&state.player(player).units[unit]);
    let defense = combat::defense_strength(
        &state.player(defender_player).units[defender],
        &tile,
        walled,
    );

    let attacker_won = combat::resolve_battle(&mut state.rng, attack, defense);
    let promoted = combat::promote_survivor(&mut state.rng);

    // The attack costs a full tile of movement either way.
    state.player_mut(player).units[unit].use_moves(3);

    if attacker_won && promoted {
        state.player_mut(player).units[unit].veteran = true;
    } else if !attacker_won && promoted {
        state.player_mut(defender_player).units[defender].veteran = true;
    }

    let attacker_snapshot = snapshot(state, player, unit);
    let defender_snapshot = snapshot(state, defender_player, defender);

    if attacker_won {
        state.remove_unit(defender_player, defender);
        if state.player(player).units[unit].moves_left == 0 {
            state.reselect_unit(player);
        }
    } else {
        state.remove_unit(player, unit);
        state.reselect_unit(player);
    }

    ActionResult::Combat {
        attacker: attacker_snapshot,
        defender: defender_snapshot,
        winner: if attacker_won {
            CombatSide::Attacker
        } else {
            CombatSide::Defender
        },
        dx,
        dy,
    }
}

fn snapshot(state: &GameState, player: PlayerId, unit: UnitIndex) -> Combatant {
    let u = &state.player(player).units[unit];
    Combatant {
        player,
        unit_type: u.unit_type,
        x: u.x,
        y: u.y,
        veteran: u.veteran,
    }
}

/// Take an enemy city: one citizen is lost in the fighting. A city taken
/// at size 1 is razed instead of changing hands.
fn capture_city(state: &mut GameState, captor: PlayerId, owner: PlayerId, city: CityIndex) {
    {
        let c = &mut state.player_mut(owner).cities[city];
        c.size -= 1;
        c.food = 0;
    }
    if state.player(owner).cities[city].size == 0 {
        state.remove_city(owner, city);
        return;
    }
    let mut captured = state.player_mut(owner).cities.remove(city);
    captured.owner = captor;
    state.player_mut(captor).cities.push(captured);
    let index = state.player(captor).cities.len() - 1;
    economy::assign_best_workers(state, captor, index);
}

/// Start a terrain job if the unit and tile permit it; otherwise nothing
/// happens and nothing is reported.
fn start_job(
    state: &mut GameState,
    player: PlayerId,
    unit: UnitIndex,
    job: UnitState,
) -> ActionResult {
    let (x, y, is_builder, is_idle) = {
        let u = &state.player(player).units[unit];
        (u.x, u.y, u.prototype().is_builder, u.state == UnitState::Idle)
    };
    if !is_builder || !is_idle {
        return ActionResult::None;
    }
    let tile = state.map.tile(x as i32, y as i32);
    let permitted = match job {
        UnitState::BuildingRoad => !tile.has_road() && !tile.terrain.is_water(),
        UnitState::BuildingIrrigation => {
            tile.terrain.can_irrigate() && !tile.irrigation && has_water_access(state, x, y)
        }
        UnitState::BuildingMine => tile.terrain.mine_shields() > 0 && !tile.mine,
        UnitState::Clearing => tile.terrain.clear_to().is_some(),
        _ => false,
    };
    if !permitted {
        return ActionResult::None;
    }
    {
        let u = &mut state.player_mut(player).units[unit];
        u.state = job;
        u.progress = 0;
    }
    state.reselect_unit(player);
    ActionResult::None
}

/// Irrigation needs water on the tile itself or next to it; an already
/// irrigated neighbor carries water onward.
fn has_water_access(state: &GameState, x: u32, y: u32) -> bool {
    if state.map.tile(x as i32, y as i32).terrain.gives_water_access() {
        return true;
    }
    for dy in -1..=1i32 {
        for dx in -1..=1i32 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let tile = state.map.tile(x as i32 + dx, y as i32 + dy);
            if tile.terrain.gives_water_access() || tile.irrigation {
                return true;
            }
        }
    }
    false
}

fn fortify(state: &mut GameState, player: PlayerId, unit: UnitIndex) -> ActionResult {
    let permitted = {
        let u = &state.player(player).units[unit];
        u.state == UnitState::Idle && u.is_military()
    };
    if !permitted {
        return ActionResult::None;
    }
    state.player_mut(player).units[unit].state = UnitState::Fortifying;
    state.reselect_unit(player);
    ActionResult::None
}

/// Found a city on open ground, or pour the settlers into a friendly city
/// already standing here. Consumes the unit either way.
fn found_or_join_city(state: &mut GameState, player: PlayerId, unit: UnitIndex) -> ActionResult {
    let (x, y, is_builder) = {
        let u = &state.player(player).units[unit];
        (u.x, u.y, u.prototype().is_builder)
    };
    if !is_builder {
        return ActionResult::None;
    }
    match state.city_at(x, y) {
        Some((owner, city)) if owner == player => {
            state.player_mut(player).cities[city].size += 1;
            economy::assign_new_citizen(state, player, city);
        }
        Some(_) => return ActionResult::None,
        None => {
            let name = state.player_mut(player).next_city_name();
            state
                .player_mut(player)
                .cities
                .push(City::new(player, name, x, y));
            let city = state.player(player).cities.len() - 1;
            economy::assign_best_workers(state, player, city);
        }
    }
    state.remove_unit(player, unit);
    state.reselect_unit(player);
    ActionResult::None
}
