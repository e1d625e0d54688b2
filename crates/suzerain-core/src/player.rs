//! Player state and civilization identity.

use crate::building::Building;
use crate::city::City;
use crate::government::Government;
use crate::map::GameMap;
use crate::types::{CityIndex, Controller, PlayerColor, UnitIndex};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// A civilization's identity: name, map color and city-name pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Civilization {
    /// Nation name.
    pub name: String,
    /// Map display color.
    pub color: PlayerColor,
    /// Names handed out to newly founded cities, in order.
    pub city_names: Vec<String>,
}

impl Civilization {
    fn new(name: &str, color: PlayerColor, city_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color,
            city_names: city_names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn romans() -> Self {
        Self::new(
            "Romans",
            PlayerColor::new(255, 255, 255),
            &[
                "Rome", "Capua", "Veii", "Pompeii", "Ravenna", "Neapolis", "Ostia", "Brundisium",
            ],
        )
    }

    pub fn babylonians() -> Self {
        Self::new(
            "Babylonians",
            PlayerColor::new(0, 160, 0),
            &[
                "Babylon", "Lagash", "Nippur", "Kish", "Ur", "Uruk", "Eridu", "Sippar",
            ],
        )
    }

    pub fn egyptians() -> Self {
        Self::new(
            "Egyptians",
            PlayerColor::new(240, 220, 0),
            &[
                "Thebes", "Memphis", "Heliopolis", "Elephantine", "Alexandria", "Pi-Ramesses",
                "Giza", "Buto",
            ],
        )
    }

    pub fn greeks() -> Self {
        Self::new(
            "Greeks",
            PlayerColor::new(80, 140, 240),
            &[
                "Athens", "Sparta", "Corinth", "Delphi", "Thebes", "Argos", "Knossos", "Rhodes",
            ],
        )
    }

    pub fn mongols() -> Self {
        Self::new(
            "Mongols",
            PlayerColor::new(160, 160, 160),
            &[
                "Karakorum", "Samarkand", "Bokhara", "Nishapur", "Kashgar", "Tabriz", "Aleppo",
                "Kabul",
            ],
        )
    }

    pub fn aztecs() -> Self {
        Self::new(
            "Aztecs",
            PlayerColor::new(220, 120, 0),
            &[
                "Tenochtitlan", "Chiauhtla", "Chapultepec", "Coatepec", "Ayotzinco", "Itzapalapa",
                "Iztapam", "Mitxcoac",
            ],
        )
    }

    /// Get all predefined civilizations.
    pub fn roster() -> Vec<Civilization> {
        vec![
            Self::romans(),
            Self::babylonians(),
            Self::egyptians(),
            Self::greeks(),
            Self::mongols(),
            Self::aztecs(),
        ]
    }
}

/// A player in the game: identity, fog-of-view map, entity rosters and
/// economy settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Civilization identity.
    pub civilization: Civilization,
    /// This player's view of the world. Tiles stay hidden until revealed
    /// by unit movement; revealed tiles can hold stale data.
    pub map: GameMap,
    /// Units owned by this player.
    pub units: Vec<Unit>,
    /// Cities owned by this player.
    pub cities: Vec<City>,
    /// Who drives this player's actions.
    pub controller: Controller,
    /// Unit currently awaiting orders, if any.
    pub selected_unit: Option<UnitIndex>,
    /// Treasury gold.
    pub gold: u32,
    /// Accumulated research beakers.
    pub research: u32,
    /// Tax rate in tenths (0-10). Invariant: `tax_rate + luxury_rate <= 10`.
    pub tax_rate: u8,
    /// Luxury rate in tenths (0-10).
    pub luxury_rate: u8,
    /// Current form of government.
    pub government: Government,
    /// Cursor into the civilization's city-name pool.
    pub next_city_name: usize,
}

impl PlayerState {
    /// Create a player with an all-hidden view of the given master map.
    pub fn new(civilization: Civilization, master: &GameMap, controller: Controller) -> Self {
        Self {
            civilization,
            map: master.hidden_copy(),
            units: Vec::new(),
            cities: Vec::new(),
            controller,
            selected_unit: None,
            gold: 0,
            research: 0,
            tax_rate: 5,
            luxury_rate: 0,
            government: Government::default(),
            next_city_name: 0,
        }
    }

    /// Take the next city name from the pool, falling back to numbered
    /// names once the pool runs dry.
    pub fn next_city_name(&mut self) -> String {
        let name = match self.civilization.city_names.get(self.next_city_name) {
            Some(name) => name.clone(),
            None => format!("{} {}", self.civilization.name, self.next_city_name + 1),
        };
        self.next_city_name += 1;
        name
    }

    /// Index of the first unit standing on `(x, y)`, if any.
    pub fn unit_at(&self, x: u32, y: u32) -> Option<UnitIndex> {
        self.units.iter().position(|u| u.x == x && u.y == y)
    }

    /// Indices of every unit standing on `(x, y)`.
    pub fn units_at(&self, x: u32, y: u32) -> Vec<UnitIndex> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| u.x == x && u.y == y)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the city at `(x, y)`, if any.
    pub fn city_at(&self, x: u32, y: u32) -> Option<CityIndex> {
        self.cities.iter().position(|c| c.x == x && c.y == y)
    }

    /// The city holding this player's Palace.
    pub fn capital(&self) -> Option<CityIndex> {
        self.cities
            .iter()
            .position(|c| c.has_building(Building::Palace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;

    fn test_player() -> PlayerState {
        let master = GameMap::filled(10, 10, Terrain::Grassland);
        PlayerState::new(Civilization::romans(), &master, Controller::LocalHuman)
    }

    #[test]
    fn test_new_player_sees_nothing() {
        let player = test_player();
        assert!(player.map.tiles.iter().all(|t| t.hidden));
        assert_eq!(player.tax_rate + player.luxury_rate, 5);
        assert_eq!(player.government, Government::Despotism);
    }

    #[test]
    fn test_city_name_pool() {
        let mut player = test_player();
        assert_eq!(player.next_city_name(), "Rome");
        assert_eq!(player.next_city_name(), "Capua");
        player.next_city_name = player.civilization.city_names.len();
        assert_eq!(player.next_city_name(), "Romans 9");
    }

    #[test]
    fn test_unit_and_city_lookup() {
        let mut player = test_player();
        player.units.push(Unit::new(crate::unit::UnitType::Militia, 0, 3, 4));
        player.units.push(Unit::new(crate::unit::UnitType::Phalanx, 0, 3, 4));
        assert_eq!(player.unit_at(3, 4), Some(0));
        assert_eq!(player.units_at(3, 4), vec![0, 1]);
        assert_eq!(player.unit_at(5, 5), None);

        player.cities.push(City::new(0, "Rome".to_string(), 7, 7));
        assert_eq!(player.city_at(7, 7), Some(0));
        assert_eq!(player.capital(), None);
        player.cities[0].add_building(Building::Palace);
        assert_eq!(player.capital(), Some(0));
    }

    #[test]
    fn test_roster_has_distinct_names() {
        let roster = Civilization::roster();
        for (i, a) in roster.iter().enumerate() {
            for b in roster.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
