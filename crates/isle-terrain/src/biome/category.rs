//! Biome categories: the closed set of terrain kinds a coordinate can have.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain kind at a world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BiomeCategory {
    /// Default, walkable terrain. Always used inside the spawn zone.
    Grass,
    /// Walkable beach terrain; the only place water can appear.
    Sand,
    /// Impassable water carved out of sand.
    Water,
}

impl BiomeCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Grass, Self::Sand, Self::Water];

    /// Lowercase name, also used as the default texture name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Sand => "sand",
            Self::Water => "water",
        }
    }

    /// Whether actors may stand on this terrain.
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Dense index in `0..3`, matching [`Self::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Grass => 0,
            Self::Sand => 1,
            Self::Water => 2,
        }
    }
}

impl fmt::Display for BiomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The pre-water layer: what the base field says before water is carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseBiome {
    /// Base field at or below the sand threshold.
    Grass,
    /// Base field above the sand threshold.
    Sand,
}

impl From<BaseBiome> for BiomeCategory {
    fn from(base: BaseBiome) -> Self {
        match base {
            BaseBiome::Grass => Self::Grass,
            BaseBiome::Sand => Self::Sand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, category) in BiomeCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_only_water_is_impassable() {
        assert!(BiomeCategory::Grass.is_passable());
        assert!(BiomeCategory::Sand.is_passable());
        assert!(!BiomeCategory::Water.is_passable());
    }

    #[test]
    fn test_base_biome_converts() {
        assert_eq!(BiomeCategory::from(BaseBiome::Grass), BiomeCategory::Grass);
        assert_eq!(BiomeCategory::from(BaseBiome::Sand), BiomeCategory::Sand);
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(BiomeCategory::Water.to_string(), "water");
    }
}
