//! Tile identifiers: a dense, bounded set of tile kinds stored in every grid cell.
//!
//! Identifiers are contiguous starting at 0 so that `tile as usize` can index a
//! fixed-size `[u32; Tile::COUNT]` histogram directly. [`Tile::Void`] is ID 0 so
//! that zero-initialized grids represent empty space.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored inside every level cell (1 byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Empty space: open sky on cloud levels, out-of-bounds everywhere else.
    #[default]
    Void = 0,
    Water,
    Lava,
    Rock,
    HardRock,
    Basalt,
    Sand,
    Grass,
    Dirt,
    Stone,
    Cactus,
    Tree,
    TallGrass,
    Daisy,
    Poppy,
    IronOre,
    GoldOre,
    GemOre,
    MithrilOre,
    Cloud,
    CloudBank,
    StairsUp,
    StairsDown,
}

impl Tile {
    /// Exclusive upper bound of tile IDs.
    pub const COUNT: usize = Tile::StairsDown as usize + 1;

    /// Every tile in ID order.
    pub const ALL: [Tile; Tile::COUNT] = [
        Tile::Void,
        Tile::Water,
        Tile::Lava,
        Tile::Rock,
        Tile::HardRock,
        Tile::Basalt,
        Tile::Sand,
        Tile::Grass,
        Tile::Dirt,
        Tile::Stone,
        Tile::Cactus,
        Tile::Tree,
        Tile::TallGrass,
        Tile::Daisy,
        Tile::Poppy,
        Tile::IronOre,
        Tile::GoldOre,
        Tile::GemOre,
        Tile::MithrilOre,
        Tile::Cloud,
        Tile::CloudBank,
        Tile::StairsUp,
        Tile::StairsDown,
    ];

    /// Returns the numeric ID of this tile.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the tile with the given ID, or `None` if the ID is out of range.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Human-readable name (e.g. "water", "hard_rock").
    pub fn name(self) -> &'static str {
        match self {
            Tile::Void => "void",
            Tile::Water => "water",
            Tile::Lava => "lava",
            Tile::Rock => "rock",
            Tile::HardRock => "hard_rock",
            Tile::Basalt => "basalt",
            Tile::Sand => "sand",
            Tile::Grass => "grass",
            Tile::Dirt => "dirt",
            Tile::Stone => "stone",
            Tile::Cactus => "cactus",
            Tile::Tree => "tree",
            Tile::TallGrass => "tall_grass",
            Tile::Daisy => "daisy",
            Tile::Poppy => "poppy",
            Tile::IronOre => "iron_ore",
            Tile::GoldOre => "gold_ore",
            Tile::GemOre => "gem_ore",
            Tile::MithrilOre => "mithril_ore",
            Tile::Cloud => "cloud",
            Tile::CloudBank => "cloud_bank",
            Tile::StairsUp => "stairs_up",
            Tile::StairsDown => "stairs_down",
        }
    }

    /// Single-character glyph used by ASCII dumps.
    pub fn glyph(self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Water => '~',
            Tile::Lava => '%',
            Tile::Rock => '#',
            Tile::HardRock => 'H',
            Tile::Basalt => 'B',
            Tile::Sand => ':',
            Tile::Grass => '.',
            Tile::Dirt => ',',
            Tile::Stone => '_',
            Tile::Cactus => 'C',
            Tile::Tree => 'T',
            Tile::TallGrass => '"',
            Tile::Daisy => '*',
            Tile::Poppy => 'o',
            Tile::IronOre => 'i',
            Tile::GoldOre => 'g',
            Tile::GemOre => 'e',
            Tile::MithrilOre => 'm',
            Tile::Cloud => '-',
            Tile::CloudBank => '=',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
        }
    }

    /// Returns `true` for water and lava.
    pub fn is_liquid(self) -> bool {
        matches!(self, Tile::Water | Tile::Lava)
    }

    /// Returns `true` for solid rock-class tiles (including ore-bearing rock).
    pub fn is_rock(self) -> bool {
        matches!(
            self,
            Tile::Rock
                | Tile::HardRock
                | Tile::Basalt
                | Tile::IronOre
                | Tile::GoldOre
                | Tile::GemOre
                | Tile::MithrilOre
        )
    }

    /// Returns `true` for flower tiles.
    pub fn is_flower(self) -> bool {
        matches!(self, Tile::Daisy | Tile::Poppy)
    }

    /// Returns `true` if an entity can stand on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            Tile::Sand
                | Tile::Grass
                | Tile::Dirt
                | Tile::Stone
                | Tile::TallGrass
                | Tile::Daisy
                | Tile::Poppy
                | Tile::Cloud
                | Tile::StairsUp
                | Tile::StairsDown
        )
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
