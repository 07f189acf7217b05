//! Region classifier: turns the two noise fields into a biome.
//!
//! Precedence is structural. The water field is sampled only after the base
//! field has said sand, so water can never appear on grass.

use super::{BaseBiome, BiomeCategory, BiomeQuery, SpawnZoneGuard};
use crate::config::{BiomeConfig, ClassificationThresholds};
use crate::noise_field::NoiseField;

/// Classifies coordinates into [`BiomeCategory`] values.
pub struct RegionClassifier {
    base: NoiseField,
    water: NoiseField,
    thresholds: ClassificationThresholds,
    guard: SpawnZoneGuard,
}

impl RegionClassifier {
    /// Build both noise fields from a configuration.
    ///
    /// The configuration is expected to be validated; invalid octave tables
    /// still produce a total (if uninteresting) classifier.
    pub fn new(config: &BiomeConfig) -> Self {
        Self {
            base: NoiseField::new(&config.base),
            water: NoiseField::new(&config.water),
            thresholds: config.thresholds,
            guard: SpawnZoneGuard::new(config.exclusion_radius),
        }
    }

    /// Biome at `(x, y)`, spawn exclusion included.
    pub fn classify(&self, x: f64, y: f64) -> BiomeCategory {
        if self.guard.is_within_exclusion(x, y) {
            return BiomeCategory::Grass;
        }
        self.classify_terrain(x, y)
    }

    /// Biome at `(x, y)` from the noise layers alone, ignoring the spawn zone.
    pub fn classify_terrain(&self, x: f64, y: f64) -> BiomeCategory {
        match self.base_classify(x, y) {
            BaseBiome::Grass => BiomeCategory::Grass,
            BaseBiome::Sand => {
                if self.water.sample(x, y) > self.thresholds.water_threshold {
                    BiomeCategory::Water
                } else {
                    BiomeCategory::Sand
                }
            }
        }
    }

    /// The pre-water layer at `(x, y)`. Does not apply the spawn zone.
    pub fn base_classify(&self, x: f64, y: f64) -> BaseBiome {
        if self.base.sample(x, y) > self.thresholds.sand_threshold {
            BaseBiome::Sand
        } else {
            BaseBiome::Grass
        }
    }

    /// The spawn zone guard applied by [`Self::classify`].
    pub fn guard(&self) -> &SpawnZoneGuard {
        &self.guard
    }

    /// Active thresholds.
    pub fn thresholds(&self) -> ClassificationThresholds {
        self.thresholds
    }

    /// Base (grass/sand) noise field.
    pub fn base_field(&self) -> &NoiseField {
        &self.base
    }

    /// Water-carving noise field.
    pub fn water_field(&self) -> &NoiseField {
        &self.water
    }
}

impl BiomeQuery for RegionClassifier {
    fn biome_at(&self, x: f64, y: f64) -> BiomeCategory {
        self.classify(x, y)
    }
}
