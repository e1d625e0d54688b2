//! Unit combat: strength formulas, best-defender choice and the dice duel.
//!
//! Strengths are pure functions of the combatants and the defended tile;
//! the only randomness is the pair of rolls in [`resolve_battle`] and the
//! veteran promotion chance the caller applies to the survivor.

use crate::map::MapTile;
use crate::rng::GameRng;
use crate::unit::{Unit, UnitState};

const VETERAN_BONUS: f64 = 1.5;

/// Attack strength of a unit: base attack scaled up, the veteran bonus,
/// and a penalty for attacking on a depleted movement budget.
pub fn attack_strength(attacker: &Unit) -> f64 {
    let proto = attacker.prototype();
    let veteran = if attacker.veteran { VETERAN_BONUS } else { 1.0 };
    let momentum = (attacker.moves_left as f64 / 3.0).min(1.0);
    proto.attack as f64 * 8.0 * veteran * momentum
}

/// Defense strength of a unit standing on a tile.
///
/// Land defenders stack terrain and posture multipliers: 12 behind
/// effective city walls, 6 fortified, 4 otherwise. Sea and air defenders
/// get a flat multiplier instead. `walled` is whether city walls apply to
/// this battle (the defender stands in a walled city and the attacker
/// does not ignore walls).
pub fn defense_strength(defender: &Unit, tile: &MapTile, walled: bool) -> f64 {
    let proto = defender.prototype();
    let mut strength = proto.defense as f64 * 2.0;
    if proto.domain.is_land() {
        strength *= tile.terrain.defense_factor();
        strength *= if walled {
            12.0
        } else if defender.state == UnitState::Fortified {
            6.0
        } else {
            4.0
        };
    } else {
        strength *= 8.0;
    }
    if defender.veteran {
        strength *= VETERAN_BONUS;
    }
    strength
}

/// Pick the strongest defender from a stack of unit indices.
///
/// Falls back to the first of the stack when every score is zero.
pub fn best_defender(units: &[Unit], stack: &[usize], tile: &MapTile, walled: bool) -> usize {
    let mut best = stack[0];
    let mut best_strength = 0.0;
    for &i in stack {
        let strength = defense_strength(&units[i], tile, walled);
        if strength > best_strength {
            best = i;
            best_strength = strength;
        }
    }
    best
}

/// Roll the dice: each side draws uniformly in `[0, strength)` and the
/// attacker needs the strictly higher roll. Equal rolls, including the
/// zero-strength degenerate case, go to the defender.
pub fn resolve_battle(rng: &mut GameRng, attack: f64, defense: f64) -> bool {
    rng.roll(attack) > rng.roll(defense)
}

/// Promotion chance for the survivor of a battle.
pub fn promote_survivor(rng: &mut GameRng) -> bool {
    rng.chance(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;
    use crate::unit::UnitType;

    fn unit(unit_type: UnitType) -> Unit {
        Unit::new(unit_type, 0, 5, 5)
    }

    #[test]
    fn test_attack_strength_scaling() {
        let legion = unit(UnitType::Legion);
        assert_eq!(attack_strength(&legion), 4.0 * 8.0);

        let mut veteran = unit(UnitType::Legion);
        veteran.veteran = true;
        assert_eq!(attack_strength(&veteran), 4.0 * 8.0 * 1.5);

        // A third of a tile left blunts the attack to a third.
        let mut tired = unit(UnitType::Legion);
        tired.moves_left = 1;
        assert_eq!(attack_strength(&tired), 4.0 * 8.0 / 3.0);

        // Extra budget above one tile does not help.
        let knights = unit(UnitType::Knights);
        assert_eq!(attack_strength(&knights), 4.0 * 8.0);
    }

    #[test]
    fn test_defense_strength_posture() {
        let plain = MapTile::new(Terrain::Grassland);
        let phalanx = unit(UnitType::Phalanx);
        assert_eq!(defense_strength(&phalanx, &plain, false), 2.0 * 2.0 * 4.0);

        let mut fortified = unit(UnitType::Phalanx);
        fortified.state = UnitState::Fortified;
        assert_eq!(
            defense_strength(&fortified, &plain, false),
            2.0 * 2.0 * 6.0
        );
        // Walls beat fortification.
        assert_eq!(defense_strength(&fortified, &plain, true), 2.0 * 2.0 * 12.0);
    }

    #[test]
    fn test_defense_strength_terrain() {
        let hills = MapTile::new(Terrain::Hills);
        let phalanx = unit(UnitType::Phalanx);
        assert_eq!(
            defense_strength(&phalanx, &hills, false),
            2.0 * 2.0 * 2.0 * 4.0
        );

        // Sea units ignore terrain and posture.
        let frigate = unit(UnitType::Frigate);
        assert_eq!(defense_strength(&frigate, &hills, false), 2.0 * 2.0 * 8.0);
    }

    #[test]
    fn test_best_defender_prefers_strongest() {
        let plain = MapTile::new(Terrain::Grassland);
        let units = vec![
            unit(UnitType::Militia),
            unit(UnitType::Phalanx),
            unit(UnitType::Legion),
        ];
        assert_eq!(best_defender(&units, &[0, 1, 2], &plain, false), 1);
    }

    #[test]
    fn test_best_defender_defaults_to_first() {
        let plain = MapTile::new(Terrain::Grassland);
        let units = vec![unit(UnitType::Trireme), unit(UnitType::Trireme)];
        // Both score zero; the first of the stack holds the line.
        assert_eq!(best_defender(&units, &[1, 0], &plain, false), 1);
    }

    #[test]
    fn test_zero_attack_always_loses() {
        let mut rng = GameRng::seeded(9);
        for _ in 0..50 {
            assert!(!resolve_battle(&mut rng, 0.0, 8.0));
        }
    }

    #[test]
    fn test_resolution_is_deterministic_for_a_seed() {
        let mut a = GameRng::seeded(123);
        let mut b = GameRng::seeded(123);
        for _ in 0..50 {
            assert_eq!(
                resolve_battle(&mut a, 32.0, 16.0),
                resolve_battle(&mut b, 32.0, 16.0)
            );
        }
    }

    #[test]
    fn test_stronger_side_wins_more() {
        let mut rng = GameRng::seeded(7);
        let wins = (0..1000)
            .filter(|_| resolve_battle(&mut rng, 48.0, 16.0))
            .count();
        assert!(wins > 600, "strong attacker won only {} of 1000", wins);
    }
}
