//! Suzerain Core Library
//!
//! This crate is the deterministic rules engine of Suzerain, a turn-based
//! territorial strategy game. It owns the authoritative world state,
//! validates and applies player and computer commands, and resolves their
//! economic and combat consequences.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Single writer**: Fully synchronous; callers serialize all access
//! - **Serializable**: All state can be saved/loaded via serde
//! - **Two error tiers**: Caller bugs raise [`action::GameError`]; refused
//!   player choices come back as [`action::ActionResult`] values

// Static catalogs
pub mod building;
pub mod government;
pub mod terrain;
pub mod types;
pub mod unit;
pub mod yields;

// World map
pub mod map;

// Game state
pub mod game_state;
pub mod player;
pub mod city;

// Rules
pub mod combat;
pub mod economy;
pub mod rng;

// Command surface and execution
pub mod action;
pub mod engine;
pub mod turn;
pub mod unit_actions;

// Re-exports for convenience
pub use action::{
    Action, ActionFailure, ActionResult, CityOrder, CombatSide, Combatant, GameError, TurnEvent,
    UnitOrder,
};
pub use building::Building;
pub use city::{City, Production, Specialist, WORKABLE_OFFSETS};
pub use economy::CityYield;
pub use game_state::GameState;
pub use government::Government;
pub use map::{GameMap, MapTemplate, MapTile};
pub use player::{Civilization, PlayerState};
pub use rng::GameRng;
pub use terrain::Terrain;
pub use types::{CityIndex, Controller, Difficulty, PlayerColor, PlayerId, UnitIndex};
pub use unit::{Advance, Domain, Unit, UnitPrototype, UnitState, UnitType};
pub use yields::TileYield;
