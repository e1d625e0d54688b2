//! Tile yields: the food/shields/trade triple every economic formula consumes.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Raw yield of a single tile.
///
/// Trade is split into luxury/gold/beakers later by the economy engine;
/// at the tile level only the three raw axes exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileYield {
    /// Food - feeds and grows city population.
    pub food: u32,
    /// Shields - production toward units and buildings.
    pub shields: u32,
    /// Trade - converted to luxury, gold and beakers by tax/luxury rates.
    pub trade: u32,
}

impl TileYield {
    /// Create a yield with all axes zero.
    pub const fn zero() -> Self {
        Self {
            food: 0,
            shields: 0,
            trade: 0,
        }
    }

    /// Create a yield from individual components.
    pub const fn new(food: u32, shields: u32, trade: u32) -> Self {
        Self {
            food,
            shields,
            trade,
        }
    }

    /// Total across all axes.
    pub const fn total(&self) -> u32 {
        self.food + self.shields + self.trade
    }

    /// Ranking weight used when auto-assigning citizens to tiles:
    /// food is worth the most, then shields, then trade.
    pub const fn worth(&self) -> u32 {
        self.food * 4 + self.shields * 2 + self.trade
    }
}

impl Add for TileYield {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            food: self.food + other.food,
            shields: self.shields + other.shields,
            trade: self.trade + other.trade,
        }
    }
}

impl AddAssign for TileYield {
    fn add_assign(&mut self, other: Self) {
        self.food += other.food;
        self.shields += other.shields;
        self.trade += other.trade;
    }
}

impl std::fmt::Display for TileYield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.food != 0 {
            parts.push(format!("{}F", self.food));
        }
        if self.shields != 0 {
            parts.push(format!("{}S", self.shields));
        }
        if self.trade != 0 {
            parts.push(format!("{}T", self.trade));
        }
        if parts.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let y = TileYield::default();
        assert_eq!(y, TileYield::zero());
        assert_eq!(y.total(), 0);
    }

    #[test]
    fn test_add() {
        let a = TileYield::new(2, 1, 0);
        let b = TileYield::new(1, 0, 2);
        let sum = a + b;
        assert_eq!(sum.food, 3);
        assert_eq!(sum.shields, 1);
        assert_eq!(sum.trade, 2);
    }

    #[test]
    fn test_worth_weighting() {
        // A food tile outranks a shield tile of the same total.
        assert!(TileYield::new(2, 0, 0).worth() > TileYield::new(0, 2, 0).worth());
        assert_eq!(TileYield::new(1, 1, 1).worth(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileYield::new(2, 1, 0)), "2F 1S");
        assert_eq!(format!("{}", TileYield::zero()), "0");
    }
}
