//! World map: a toroidal-in-x grid of tiles, plus per-player fog copies.
//!
//! X wraps modulo the map width; Y clamps (there is no polar wrap, queries
//! past the top or bottom edge return the `Void` sentinel tile). The master
//! map is ground truth and never hides anything; each player holds a fog
//! copy whose tiles stay `hidden` until revealed by unit movement.

use crate::terrain::Terrain;
use crate::yields::TileYield;
use serde::{Deserialize, Serialize};

/// A single tile of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTile {
    /// Base terrain.
    pub terrain: Terrain,
    /// Has a road been built here?
    pub road: bool,
    /// Has the road been upgraded to a railroad?
    pub railroad: bool,
    /// Is the tile irrigated?
    pub irrigation: bool,
    /// Does the tile carry a mine?
    pub mine: bool,
    /// Hidden under fog. Only meaningful on per-player maps; the master
    /// map keeps this false everywhere.
    pub hidden: bool,
    /// Does the tile carry its terrain's special resource?
    pub special_resource: bool,
    /// Shield-bearing grassland/river variant.
    pub extra_shield: bool,
}

impl MapTile {
    /// Sentinel returned for off-map queries.
    pub const VOID: MapTile = MapTile::new(Terrain::Void);

    /// Create a bare tile of the given terrain.
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            road: false,
            railroad: false,
            irrigation: false,
            mine: false,
            hidden: false,
            special_resource: false,
            extra_shield: false,
        }
    }

    /// Road presence for movement purposes (a railroad counts as a road).
    pub const fn has_road(&self) -> bool {
        self.road || self.railroad
    }

    /// Movement cost in whole tiles to enter this tile.
    pub const fn movement_cost(&self) -> u32 {
        self.terrain.movement_cost()
    }

    /// Full yield of this tile including improvements and resources.
    pub fn yields(&self) -> TileYield {
        let mut y = if self.special_resource || self.extra_shield {
            self.terrain.special_yield()
        } else {
            self.terrain.base_yield()
        };
        if self.irrigation && self.terrain.can_irrigate() {
            y.food += 1;
        }
        if self.mine {
            y.shields += self.terrain.mine_shields();
        }
        if self.has_road() {
            y.trade += self.terrain.road_trade();
        }
        y
    }
}

impl Default for MapTile {
    fn default() -> Self {
        Self::new(Terrain::default())
    }
}

/// Raw terrain grid handed in by the external map generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapTemplate {
    pub width: u32,
    pub height: u32,
    /// Terrain per tile, indexed `x + y * width`.
    pub data: Vec<Terrain>,
}

impl MapTemplate {
    /// Template filled with a single terrain (useful for testing).
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            data: vec![terrain; (width * height) as usize],
        }
    }
}

/// The game map: a flat tile sequence indexed `x + y * width`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMap {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<MapTile>,
}

impl GameMap {
    /// Build the master map from a template, deriving special-resource and
    /// extra-shield marks deterministically from `(x, y, seed)`.
    pub fn from_template(template: &MapTemplate, seed: u64) -> Self {
        let mut tiles = Vec::with_capacity((template.width * template.height) as usize);
        for y in 0..template.height {
            for x in 0..template.width {
                let idx = (x + y * template.width) as usize;
                let terrain = template.data.get(idx).copied().unwrap_or(Terrain::Ocean);
                let mut tile = MapTile::new(terrain);
                match terrain {
                    Terrain::Grassland | Terrain::River => {
                        tile.extra_shield = extra_shield_at(x, y, seed);
                    }
                    Terrain::Void => {}
                    _ => {
                        tile.special_resource = special_resource_at(x, y, seed);
                    }
                }
                tiles.push(tile);
            }
        }
        Self {
            width: template.width,
            height: template.height,
            tiles,
        }
    }

    /// Map filled with a single bare terrain (useful for testing).
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            tiles: vec![MapTile::new(terrain); (width * height) as usize],
        }
    }

    /// Wrap an x coordinate onto the map.
    pub fn wrap_x(&self, x: i32) -> u32 {
        let w = self.width as i32;
        (((x % w) + w) % w) as u32
    }

    /// Check whether a y coordinate lies on the map (no polar wrap).
    pub fn contains_y(&self, y: i32) -> bool {
        y >= 0 && (y as u32) < self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (x + y * self.width) as usize
    }

    /// Tile at the given coordinate with wrap/clamp applied.
    ///
    /// Off-map y yields the `Void` sentinel.
    pub fn tile(&self, x: i32, y: i32) -> MapTile {
        if !self.contains_y(y) {
            return MapTile::VOID;
        }
        let x = self.wrap_x(x);
        self.tiles[self.index(x, y as u32)]
    }

    /// Mutable tile access; `None` off-map.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut MapTile> {
        if !self.contains_y(y) {
            return None;
        }
        let x = self.wrap_x(x);
        let idx = self.index(x, y as u32);
        Some(&mut self.tiles[idx])
    }

    /// Replace a tile (in-bounds only; off-map writes are dropped).
    pub fn set(&mut self, x: i32, y: i32, tile: MapTile) {
        if let Some(t) = self.tile_mut(x, y) {
            *t = tile;
        }
    }

    /// A fog copy of this map: same tiles, everything hidden.
    pub fn hidden_copy(&self) -> GameMap {
        let mut copy = self.clone();
        for tile in &mut copy.tiles {
            tile.hidden = true;
        }
        copy
    }

    /// Reveal the 3x3 block centered on `(x, y)` by copying tiles from the
    /// master map. X wraps at the seam; rows past the top/bottom edge are
    /// skipped.
    pub fn reveal_around(&mut self, master: &GameMap, x: u32, y: u32) {
        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                let ty = y as i32 + dy;
                if !self.contains_y(ty) {
                    continue;
                }
                let tx = self.wrap_x(x as i32 + dx);
                let idx = self.index(tx, ty as u32);
                self.tiles[idx] = master.tiles[idx];
            }
        }
    }

    /// Refresh a single tile from the master map, keeping it revealed.
    pub fn refresh_from(&mut self, master: &GameMap, x: u32, y: u32) {
        let idx = self.index(x, y);
        self.tiles[idx] = master.tiles[idx];
    }

    /// Count total tiles in the map.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Distance between two tiles, crossing the x seam when shorter.
    pub fn distance(&self, a: (u32, u32), b: (u32, u32)) -> u32 {
        let dx = a.0.abs_diff(b.0);
        let dx = dx.min(self.width - dx);
        dx + a.1.abs_diff(b.1)
    }
}

/// Avalanche hash over tile coordinates and the game seed.
fn tile_hash(x: u32, y: u32, seed: u64) -> u64 {
    let mut h = seed
        ^ (x as u64).wrapping_mul(0x9E3779B97F4A7C15)
        ^ (y as u64).wrapping_mul(0xC2B2AE3D27D4EB4F);
    h ^= h >> 29;
    h = h.wrapping_mul(0xBF58476D1CE4E5B9);
    h ^= h >> 32;
    h
}

/// Deterministic special-resource placement (about one tile in sixteen).
fn special_resource_at(x: u32, y: u32, seed: u64) -> bool {
    tile_hash(x, y, seed) % 16 == 0
}

/// Deterministic shield placement on grassland/river (about half the tiles).
fn extra_shield_at(x: u32, y: u32, seed: u64) -> bool {
    (tile_hash(x, y, seed) >> 8) % 2 == 0
}
