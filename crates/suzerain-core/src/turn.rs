//! Turn processor: player rotation and the start-of-turn batch.
//!
//! Ending a turn hands control to the next player and immediately runs
//! that player's bulk effects, in a fixed order: movement budgets refill,
//! cities tick, terrain jobs advance, the anarchy clock is checked, and a
//! unit is selected. The batch is reported as a single `TurnStarted`
//! result.

use crate::action::{ActionResult, TurnEvent};
use crate::building::Building;
use crate::city::{City, Production};
use crate::economy;
use crate::game_state::GameState;
use crate::government::Government;
use crate::terrain::Terrain;
use crate::types::{CityIndex, PlayerId};
use crate::unit::{UnitState, UnitType};

/// Advance the turn pointer and process the incoming player's turn start.
pub fn end_turn(state: &mut GameState) -> ActionResult {
    let next = (state.player_in_turn as usize + 1) % state.players.len();
    if next == 0 {
        state.turn += 1;
    }
    state.player_in_turn = next as PlayerId;
    let player = state.player_in_turn;
    let mut events = Vec::new();

    for unit in &mut state.players[player as usize].units {
        unit.reset_moves();
    }

    process_cities(state, player, &mut events);
    process_unit_jobs(state, player, &mut events);

    if state.player(player).government == Government::Anarchy && state.turn % 4 == 0 {
        events.push(TurnEvent::SelectGovernment);
    }

    state.reselect_unit(player);
    ActionResult::TurnStarted { player, events }
}

fn process_cities(state: &mut GameState, player: PlayerId, events: &mut Vec<TurnEvent>) {
    let mut city = 0;
    while city < state.player(player).cities.len() {
        if city_tick(state, player, city, events) {
            city += 1;
        }
        // A disbanded city shifted the list; the same index is the next city.
    }
}

/// Apply one turn of growth, production and treasury flow to a city.
/// Returns false when the city starved away entirely.
fn city_tick(
    state: &mut GameState,
    player: PlayerId,
    city: CityIndex,
    events: &mut Vec<TurnEvent>,
) -> bool {
    {
        let c = &mut state.player_mut(player).cities[city];
        c.bought_this_turn = false;
        c.sold_this_turn = false;
    }
    let yields = economy::city_yield(state, player, city);

    // Food: each citizen eats two, the box grows or drains with the rest.
    let (size, food, has_granary, threshold) = {
        let c = &state.player(player).cities[city];
        (
            c.size,
            c.food,
            c.has_building(Building::Granary),
            c.growth_threshold(),
        )
    };
    let balance = food as i64 + yields.food as i64 - 2 * size as i64;
    if balance < 0 {
        let disbanded = {
            let c = &mut state.player_mut(player).cities[city];
            c.size -= 1;
            c.food = 0;
            if c.size == 0 {
                Some(c.name.clone())
            } else {
                economy::calculate_citizens(c);
                None
            }
        };
        match disbanded {
            Some(name) => {
                state.remove_city(player, city);
                events.push(TurnEvent::CityDisbanded { name });
                return false;
            }
            None => {
                let size = state.player(player).cities[city].size;
                events.push(TurnEvent::CityStarved { city, size });
            }
        }
    } else if balance as u32 >= threshold {
        {
            let c = &mut state.player_mut(player).cities[city];
            c.size += 1;
            c.food = if has_granary { threshold / 2 } else { 0 };
        }
        economy::assign_new_citizen(state, player, city);
        let size = state.player(player).cities[city].size;
        events.push(TurnEvent::CityGrew { city, size });
    } else {
        state.player_mut(player).cities[city].food = balance as u32;
    }

    // Shields toward the production target.
    let (shields, production) = {
        let c = &mut state.player_mut(player).cities[city];
        c.shields += yields.shields;
        (c.shields, c.production)
    };
    if shields >= production.cost() {
        complete_production(state, player, city, production);
        events.push(TurnEvent::ProductionCompleted { city, production });
    }

    // Treasury and research.
    let upkeep = state.player(player).cities[city].building_upkeep();
    let p = state.player_mut(player);
    p.gold = (p.gold + yields.gold).saturating_sub(upkeep);
    p.research += yields.beakers;
    true
}

fn complete_production(
    state: &mut GameState,
    player: PlayerId,
    city: CityIndex,
    production: Production,
) {
    match production {
        Production::Unit(unit_type) => {
            let (x, y) = {
                let c = &state.player(player).cities[city];
                (c.x, c.y)
            };
            let unit = state.spawn_unit(player, unit_type, x, y);
            state.player_mut(player).units[unit].home_city = Some(city);
            state.player_mut(player).cities[city].shields = 0;
        }
        Production::Building(building) => {
            let c = &mut state.player_mut(player).cities[city];
            c.add_building(building);
            c.shields = 0;
            c.production = next_building_target(c);
        }
    }
}

/// Cheapest building the city has not constructed yet; militia keep the
/// shield box busy once everything is built.
fn next_building_target(city: &City) -> Production {
    Building::all()
        .iter()
        .filter(|b| !city.has_building(**b))
        .min_by_key(|b| b.cost())
        .map(|b| Production::Building(*b))
        .unwrap_or(Production::Unit(UnitType::Militia))
}

/// Advance every in-progress terrain job and fortification posture.
fn process_unit_jobs(state: &mut GameState, player: PlayerId, events: &mut Vec<TurnEvent>) {
    for unit in 0..state.player(player).units.len() {
        let (x, y, unit_state, progress) = {
            let u = &state.player(player).units[unit];
            (u.x, u.y, u.state, u.progress)
        };
        match unit_state {
            UnitState::Fortifying => {
                state.player_mut(player).units[unit].state = UnitState::Fortified;
            }
            job if job.is_working() => {
                let terrain = state.map.tile(x as i32, y as i32).terrain;
                let progress = progress + 1;
                if progress >= job_duration(job, terrain) {
                    finish_job(state, player, x, y, job);
                    let u = &mut state.player_mut(player).units[unit];
                    u.state = UnitState::Idle;
                    u.progress = 0;
                    events.push(TurnEvent::ImprovementFinished { unit });
                } else {
                    state.player_mut(player).units[unit].progress = progress;
                }
            }
            _ => {}
        }
    }
}

fn job_duration(job: UnitState, terrain: Terrain) -> u32 {
    match job {
        UnitState::BuildingRoad => terrain.road_turns(),
        UnitState::BuildingIrrigation => terrain.irrigation_turns(),
        UnitState::BuildingMine => terrain.mine_turns(),
        UnitState::Clearing => terrain.clear_to().map(|(_, turns)| turns).unwrap_or(1),
        UnitState::BuildingFortress => 10,
        UnitState::CleaningPollution => 5,
        _ => 1,
    }
}

/// Write a finished job onto the master map and let the worker's owner
/// see the result. Irrigation and mines displace one another.
fn finish_job(state: &mut GameState, player: PlayerId, x: u32, y: u32, job: UnitState) {
    if let Some(tile) = state.map.tile_mut(x as i32, y as i32) {
        match job {
            UnitState::BuildingRoad => tile.road = true,
            UnitState::BuildingIrrigation => {
                tile.irrigation = true;
                tile.mine = false;
            }
            UnitState::BuildingMine => {
                tile.mine = true;
                tile.irrigation = false;
            }
            UnitState::Clearing => {
                if let Some((target, _)) = tile.terrain.clear_to() {
                    tile.terrain = target;
                }
            }
            _ => {}
        }
    }
    state.players[player as usize]
        .map
        .refresh_from(&state.map, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GameMap, MapTemplate};
    use crate::player::Civilization;
    use crate::types::{Controller, Difficulty};

    fn solo_game() -> GameState {
        let template = MapTemplate::filled(16, 16, Terrain::Grassland);
        let mut state = GameState::new(&template, 0, Difficulty::Prince);
        state.map = GameMap::filled(16, 16, Terrain::Grassland);
        state.add_player(Civilization::romans(), Controller::LocalHuman);
        state
    }

    fn two_player_game() -> GameState {
        let mut state = solo_game();
        state.add_player(Civilization::greeks(), Controller::Computer);
        state
    }

    fn reveal_all(state: &mut GameState, player: u8) {
        for tile in &mut state.player_mut(player).map.tiles {
            tile.hidden = false;
        }
    }

    fn city_of_size(state: &mut GameState, size: u32, x: u32, y: u32) -> CityIndex {
        let mut city = City::new(0, format!("City {}", x), x, y);
        city.size = size;
        state.player_mut(0).cities.push(city);
        let ci = state.player(0).cities.len() - 1;
        reveal_all(state, 0);
        economy::assign_best_workers(state, 0, ci);
        ci
    }

    #[test]
    fn test_rotation_and_turn_counter() {
        let mut state = two_player_game();
        assert_eq!((state.player_in_turn, state.turn), (0, 1));

        end_turn(&mut state);
        assert_eq!((state.player_in_turn, state.turn), (1, 1));

        let result = end_turn(&mut state);
        assert_eq!((state.player_in_turn, state.turn), (0, 2));
        assert!(matches!(
            result,
            ActionResult::TurnStarted { player: 0, .. }
        ));
    }

    #[test]
    fn test_moves_refill_at_turn_start() {
        let mut state = solo_game();
        let u = state.spawn_unit(0, UnitType::Knights, 5, 5);
        state.player_mut(0).units[u].moves_left = 0;
        end_turn(&mut state);
        assert_eq!(state.player(0).units[u].moves_left, 6);
    }

    #[test]
    fn test_city_growth_assigns_the_new_citizen() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 2, 8, 8);
        // Size 2 on grassland: center 2 + two worked tiles = 6 food, eats 4.
        state.player_mut(0).cities[ci].food = 29;

        let result = end_turn(&mut state);
        let c = &state.player(0).cities[ci];
        assert_eq!(c.size, 3);
        assert_eq!(c.food, 0);
        assert_eq!(
            c.worked_tiles.len() + c.specialists.len(),
            c.size as usize
        );
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(events.contains(&TurnEvent::CityGrew { city: ci, size: 3 }));
            }
            other => panic!("expected turn start, got {:?}", other),
        }
    }

    #[test]
    fn test_granary_keeps_half_the_box() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 2, 8, 8);
        state.player_mut(0).cities[ci].add_building(Building::Granary);
        state.player_mut(0).cities[ci].food = 29;
        end_turn(&mut state);
        // Threshold was 30; half stays in the box.
        assert_eq!(state.player(0).cities[ci].food, 15);
    }

    #[test]
    fn test_starvation_shrinks_then_disbands() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 2, 8, 8);
        // Entertainers only: center feeds 2, citizens eat 4.
        state.player_mut(0).cities[ci].worked_tiles.clear();
        economy::calculate_citizens(&mut state.player_mut(0).cities[ci]);

        let result = end_turn(&mut state);
        assert_eq!(state.player(0).cities[ci].size, 1);
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(events.contains(&TurnEvent::CityStarved { city: ci, size: 1 }));
            }
            other => panic!("expected turn start, got {:?}", other),
        }

        // A size-1 city cannot starve further and survives on the center.
        end_turn(&mut state);
        assert_eq!(state.player(0).cities[ci].size, 1);
    }

    #[test]
    fn test_completed_unit_spawns_homed() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 3, 8, 8);
        state.player_mut(0).cities[ci].production = Production::Unit(UnitType::Phalanx);
        // Grassland banks no shields; the box is already full.
        state.player_mut(0).cities[ci].shields = 20;

        let result = end_turn(&mut state);
        let unit = state
            .player(0)
            .units
            .iter()
            .find(|u| u.unit_type == UnitType::Phalanx)
            .expect("phalanx spawned");
        assert_eq!((unit.x, unit.y), (8, 8));
        assert_eq!(unit.home_city, Some(ci));
        assert_eq!(unit.moves_left, 3);
        assert_eq!(state.player(0).cities[ci].shields, 0);
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(events.iter().any(|e| matches!(
                    e,
                    TurnEvent::ProductionCompleted { city, .. } if *city == ci
                )));
            }
            other => panic!("expected turn start, got {:?}", other),
        }
    }

    #[test]
    fn test_completed_building_falls_back_to_cheapest() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 3, 8, 8);
        state.player_mut(0).cities[ci].production = Production::Building(Building::Temple);
        state.player_mut(0).cities[ci].shields = 40;

        end_turn(&mut state);
        let c = &state.player(0).cities[ci];
        assert!(c.has_building(Building::Temple));
        // Temple built; Barracks is the cheapest remaining at 40.
        assert_eq!(c.production, Production::Building(Building::Barracks));
    }

    #[test]
    fn test_upkeep_drains_the_treasury() {
        let mut state = solo_game();
        let ci = city_of_size(&mut state, 1, 8, 8);
        state.player_mut(0).cities[ci].add_building(Building::CityWalls);
        state.player_mut(0).gold = 1;
        end_turn(&mut state);
        // Grassland trade is zero; two upkeep against one gold saturates.
        assert_eq!(state.player(0).gold, 0);
    }

    #[test]
    fn test_road_job_finishes_on_schedule() {
        let mut state = solo_game();
        let u = state.spawn_unit(0, UnitType::Settlers, 5, 5);
        state.player_mut(0).units[u].state = UnitState::BuildingRoad;

        // Grassland roads take two turns.
        end_turn(&mut state);
        assert_eq!(state.player(0).units[u].state, UnitState::BuildingRoad);
        assert!(!state.map.tile(5, 5).road);

        let result = end_turn(&mut state);
        assert!(state.map.tile(5, 5).road);
        assert!(!state.player(0).map.tile(5, 5).hidden);
        assert!(state.player(0).map.tile(5, 5).road);
        let unit = &state.player(0).units[u];
        assert_eq!(unit.state, UnitState::Idle);
        assert_eq!(unit.progress, 0);
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(events.contains(&TurnEvent::ImprovementFinished { unit: u }));
            }
            other => panic!("expected turn start, got {:?}", other),
        }
    }

    #[test]
    fn test_mine_displaces_irrigation() {
        let mut state = solo_game();
        state.map.tile_mut(5, 5).unwrap().irrigation = true;
        finish_job(&mut state, 0, 5, 5, UnitState::BuildingMine);
        let tile = state.map.tile(5, 5);
        assert!(tile.mine);
        assert!(!tile.irrigation);
    }

    #[test]
    fn test_fortifying_settles_into_fortified() {
        let mut state = solo_game();
        let u = state.spawn_unit(0, UnitType::Phalanx, 5, 5);
        state.player_mut(0).units[u].state = UnitState::Fortifying;
        end_turn(&mut state);
        assert_eq!(state.player(0).units[u].state, UnitState::Fortified);
    }

    #[test]
    fn test_anarchy_clock() {
        let mut state = solo_game();
        state.player_mut(0).government = Government::Anarchy;

        state.turn = 2; // becomes 3 at the wrap
        let result = end_turn(&mut state);
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(!events.contains(&TurnEvent::SelectGovernment));
            }
            other => panic!("expected turn start, got {:?}", other),
        }

        let result = end_turn(&mut state); // turn 4
        match result {
            ActionResult::TurnStarted { events, .. } => {
                assert!(events.contains(&TurnEvent::SelectGovernment));
            }
            other => panic!("expected turn start, got {:?}", other),
        }
    }

    #[test]
    fn test_turn_start_selects_a_unit() {
        let mut state = solo_game();
        state.spawn_unit(0, UnitType::Militia, 4, 4);
        state.player_mut(0).selected_unit = None;
        end_turn(&mut state);
        assert_eq!(state.player(0).selected_unit, Some(0));
    }
}
