//! Government catalog: corruption and unit-upkeep unhappiness.

use serde::{Deserialize, Serialize};

/// Forms of government a player can adopt.
///
/// Anarchy is the forced interim form during a revolution; a new government
/// can only be established on turns divisible by four.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Government {
    Anarchy,
    #[default]
    Despotism,
    Monarchy,
    Communism,
    Republic,
    Democracy,
}

impl Government {
    /// Communism levies corruption as if every city sat at this distance
    /// from the capital, rather than using the true distance.
    pub const COMMUNISM_DISTANCE: u32 = 10;

    /// Distance divisor for the corruption coefficient: a city loses
    /// `distance / divisor` of its trade (capped at all-but-one unit).
    /// `None` means the government is corruption-free.
    pub const fn corruption_divisor(&self) -> Option<u32> {
        match self {
            Government::Anarchy => Some(8),
            Government::Despotism => Some(12),
            Government::Monarchy => Some(16),
            Government::Communism => Some(20),
            Government::Republic => Some(24),
            Government::Democracy => None,
        }
    }

    /// Unhappiness per military unit homed to a city but deployed outside it.
    pub const fn military_unhappiness(&self) -> u32 {
        match self {
            Government::Republic => 1,
            Government::Democracy => 2,
            _ => 0,
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Government::Anarchy => "Anarchy",
            Government::Despotism => "Despotism",
            Government::Monarchy => "Monarchy",
            Government::Communism => "Communism",
            Government::Republic => "Republic",
            Government::Democracy => "Democracy",
        }
    }

    /// Get all government forms.
    pub const fn all() -> &'static [Government] {
        &[
            Government::Anarchy,
            Government::Despotism,
            Government::Monarchy,
            Government::Communism,
            Government::Republic,
            Government::Democracy,
        ]
    }
}

impl std::fmt::Display for Government {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
