//! City economy engine: pure formulas over a city's worked tiles,
//! specialists, buildings and its owner's government.
//!
//! Nothing here advances time. The turn processor calls into this module
//! once per city per turn; the city executor calls it when assignments
//! change. All functions read the master map: a city works real tiles,
//! fog only gates which offsets may be assigned.

use crate::city::{City, Production, Specialist, WORKABLE_OFFSETS};
use crate::game_state::GameState;
use crate::government::Government;
use crate::types::{CityIndex, PlayerId};

/// Everything a city produces in one turn, before the turn processor
/// applies it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CityYield {
    pub food: u32,
    pub shields: u32,
    /// Raw trade before corruption.
    pub trade: u32,
    /// Trade lost to corruption.
    pub corruption: u32,
    pub luxury: u32,
    pub gold: u32,
    pub beakers: u32,
    pub happy: u32,
    pub unhappy: u32,
}

/// Compute which workable offsets a city cannot currently use.
///
/// An offset is blocked when it falls past the map's y edge, is still
/// hidden on the owner's map, is another city's center or worked tile, or
/// holds a foreign unit. The owner's own units never block.
pub fn blocked_offsets(state: &GameState, player: PlayerId, city: CityIndex) -> [bool; 20] {
    let c = &state.player(player).cities[city];
    let fog = &state.player(player).map;
    let mut blocked = [false; 20];

    for (i, _) in WORKABLE_OFFSETS.iter().enumerate() {
        let Some((tx, ty)) = c.offset_position(&state.map, i) else {
            blocked[i] = true;
            continue;
        };
        if fog.tile(tx as i32, ty as i32).hidden {
            blocked[i] = true;
            continue;
        }
        if tile_claimed_by_other_city(state, player, city, tx, ty) {
            blocked[i] = true;
            continue;
        }
        let foreign_unit = state
            .players
            .iter()
            .enumerate()
            .filter(|(pi, _)| *pi != player as usize)
            .any(|(_, p)| p.unit_at(tx, ty).is_some());
        if foreign_unit {
            blocked[i] = true;
        }
    }
    blocked
}

/// Is `(x, y)` the center or a worked tile of any city other than the
/// given one?
fn tile_claimed_by_other_city(
    state: &GameState,
    player: PlayerId,
    city: CityIndex,
    x: u32,
    y: u32,
) -> bool {
    for (pi, p) in state.players.iter().enumerate() {
        for (ci, other) in p.cities.iter().enumerate() {
            if (pi as PlayerId, ci) == (player, city) {
                continue;
            }
            if (other.x, other.y) == (x, y) {
                return true;
            }
            for &off in &other.worked_tiles {
                if other.offset_position(&state.map, off) == Some((x, y)) {
                    return true;
                }
            }
        }
    }
    false
}

/// Rank all usable offsets for a city, best first, by
/// `food*4 + shields*2 + trade`.
pub fn best_offsets(state: &GameState, player: PlayerId, city: CityIndex) -> Vec<usize> {
    let blocked = blocked_offsets(state, player, city);
    let c = &state.player(player).cities[city];
    let mut ranked: Vec<(usize, u32)> = WORKABLE_OFFSETS
        .iter()
        .enumerate()
        .filter(|(i, _)| !blocked[*i])
        .filter_map(|(i, _)| {
            let (tx, ty) = c.offset_position(&state.map, i)?;
            Some((i, state.map.tile(tx as i32, ty as i32).yields().worth()))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(i, _)| i).collect()
}

/// Repair the citizen invariant: `worked + specialists == size`.
///
/// Excess citizens are dropped specialists-first, then worked tiles from
/// the back; any shortfall is back-filled with entertainers.
pub fn calculate_citizens(city: &mut City) {
    let size = city.size as usize;
    while city.worked_tiles.len() + city.specialists.len() > size {
        if city.specialists.pop().is_none() {
            city.worked_tiles.pop();
        }
    }
    while city.worked_tiles.len() + city.specialists.len() < size {
        city.specialists.push(Specialist::Entertainer);
    }
}

/// Re-run the full auto-assignment: the top `size` usable offsets become
/// the working set, remaining citizens become entertainers. Used when a
/// city is founded or changes hands.
pub fn assign_best_workers(state: &mut GameState, player: PlayerId, city: CityIndex) {
    let ranked = best_offsets(state, player, city);
    let c = &mut state.player_mut(player).cities[city];
    let size = c.size as usize;
    c.worked_tiles = ranked.into_iter().take(size).collect();
    c.specialists.clear();
    calculate_citizens(c);
}

/// Put one newly grown citizen to work on the best unused offset, or make
/// it an entertainer when nothing is workable. Existing assignments are
/// left alone.
pub fn assign_new_citizen(state: &mut GameState, player: PlayerId, city: CityIndex) {
    let choice = best_offsets(state, player, city)
        .into_iter()
        .find(|off| !state.player(player).cities[city].works_offset(*off));
    let c = &mut state.player_mut(player).cities[city];
    match choice {
        Some(off) => c.worked_tiles.push(off),
        None => c.specialists.push(Specialist::Entertainer),
    }
    calculate_citizens(c);
}

/// Compute a city's full per-turn output.
pub fn city_yield(state: &GameState, player: PlayerId, city: CityIndex) -> CityYield {
    let p = state.player(player);
    let c = &p.cities[city];

    // Center tile always contributes, then each worked offset.
    let mut tiles = state.map.tile(c.x as i32, c.y as i32).yields();
    for &off in &c.worked_tiles {
        if let Some((tx, ty)) = c.offset_position(&state.map, off) {
            tiles += state.map.tile(tx as i32, ty as i32).yields();
        }
    }

    let mut luxury: u32 = c.specialists.iter().map(|s| s.luxury()).sum();
    let mut gold: u32 = c.specialists.iter().map(|s| s.gold()).sum();
    let mut beakers: u32 = c.specialists.iter().map(|s| s.beakers()).sum();

    let trade = tiles.trade;
    let corruption = corruption(state, player, city, trade);
    let kept = trade - corruption;

    // Split the surviving trade by the player's rates, in tenths.
    let lux_share = share(p.luxury_rate, kept);
    let lux_and_gold_share = share(p.luxury_rate + p.tax_rate, kept);
    luxury += lux_share;
    gold += lux_and_gold_share - lux_share;
    beakers += kept - lux_and_gold_share;

    let (happy, unhappy) = happiness(state, player, city, luxury);

    CityYield {
        food: tiles.food,
        shields: tiles.shields,
        trade,
        corruption,
        luxury,
        gold,
        beakers,
        happy,
        unhappy,
    }
}

/// Rounded `rate` tenths of `trade`.
fn share(rate: u8, trade: u32) -> u32 {
    (rate as f64 * trade as f64 * 0.1).round() as u32
}

/// Trade lost to corruption, by distance from the governing capital.
///
/// Communism charges a flat simulated distance instead of the real one; a
/// player with no capital anywhere suffers the 100% branch. At least one
/// trade unit always survives.
pub fn corruption(state: &GameState, player: PlayerId, city: CityIndex, trade: u32) -> u32 {
    if trade == 0 {
        return 0;
    }
    let p = state.player(player);
    let Some(divisor) = p.government.corruption_divisor() else {
        return 0;
    };
    let distance = match p.government {
        Government::Communism => Some(Government::COMMUNISM_DISTANCE),
        _ => capital_distance(state, player, city),
    };
    let coefficient = match distance {
        Some(d) => (d as f64 / divisor as f64).min(1.0),
        None => 1.0,
    };
    let lost = (trade as f64 * coefficient).floor() as u32;
    lost.min(trade - 1)
}

/// Wrap-aware distance from a city to its owner's capital. `None` when the
/// player has no capital.
pub fn capital_distance(state: &GameState, player: PlayerId, city: CityIndex) -> Option<u32> {
    let p = state.player(player);
    let capital = &p.cities[p.capital()?];
    let c = &p.cities[city];
    Some(state.map.distance((c.x, c.y), (capital.x, capital.y)))
}

/// Run the happiness pipeline: difficulty baseline, luxury, buildings,
/// then unit upkeep, re-clamping after every stage.
fn happiness(state: &GameState, player: PlayerId, city: CityIndex, luxury: u32) -> (u32, u32) {
    let p = state.player(player);
    let c = &p.cities[city];
    let size = c.size;
    let available = size.saturating_sub(c.specialists.len() as u32);

    let base = if p.controller.is_human() {
        size as i32 + state.difficulty.level() - 6
    } else {
        size as i32 - 3
    };
    let mut unhappy = base.clamp(0, size as i32) as u32;
    let mut happy = 0u32;
    clamp_mood(&mut happy, &mut unhappy, available);

    happy += luxury / 2;
    clamp_mood(&mut happy, &mut unhappy, available);

    for building in &c.buildings {
        unhappy = unhappy.saturating_sub(building.happiness_adjustment());
        clamp_mood(&mut happy, &mut unhappy, available);
    }

    let abroad = p
        .units
        .iter()
        .filter(|u| u.home_city == Some(city) && u.is_military() && (u.x, u.y) != (c.x, c.y))
        .count() as u32;
    unhappy += abroad * p.government.military_unhappiness();
    clamp_mood(&mut happy, &mut unhappy, available);

    (happy, unhappy)
}

/// Shrink `happy` and `unhappy` together until they fit the non-specialist
/// population.
fn clamp_mood(happy: &mut u32, unhappy: &mut u32, available: u32) {
    while *happy + *unhappy > available {
        if *happy > 0 {
            *happy -= 1;
        }
        if *happy + *unhappy > available && *unhappy > 0 {
            *unhappy -= 1;
        }
    }
}

/// Gold price to finish the current production target immediately.
///
/// Units price on a quadratic of the remaining shields; buildings price
/// linearly. Starting from an empty shield box doubles the price.
pub fn buy_cost(production: Production, shields: u32) -> u32 {
    let cost = production.cost();
    let multiplier = if shields == 0 { 2 } else { 1 };
    match production {
        Production::Unit(_) => {
            let r = cost.saturating_sub(shields) as f64 / 10.0;
            ((5.0 * r * r + 20.0 * r) * multiplier as f64).floor() as u32
        }
        Production::Building(_) => cost.saturating_sub(shields) * 2 * multiplier,
    }
}
