//! Validated, immutable engine configuration.
//!
//! [`BiomeConfig`] is built once per process from the canonical
//! [`WorldConfig`](isle_config::WorldConfig) and handed to
//! [`BiomeEngine::initialize`](crate::BiomeEngine::initialize). Nothing in the
//! engine reads ambient state; two processes agree exactly when their
//! `BiomeConfig`s are equal.

use isle_config::{CacheConfig, NormalizationMode, OctaveSpec, WorldConfig};

use crate::seed::derive_water_seed;

/// Errors detected while validating a [`BiomeConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BiomeConfigError {
    /// A noise field has no octaves.
    #[error("{field} noise field has no octaves")]
    EmptyOctaves {
        /// Which field ("base" or "water").
        field: &'static str,
    },
    /// An octave frequency is zero, negative, or not finite.
    #[error("{field} octave {index}: frequency must be finite and positive, got {value}")]
    InvalidFrequency {
        /// Which field.
        field: &'static str,
        /// Octave index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// An octave amplitude is negative or not finite.
    #[error("{field} octave {index}: amplitude must be finite and non-negative, got {value}")]
    InvalidAmplitude {
        /// Which field.
        field: &'static str,
        /// Octave index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// All amplitudes of a field sum to zero.
    #[error("{field} noise field has zero total amplitude")]
    ZeroAmplitude {
        /// Which field.
        field: &'static str,
    },
    /// A threshold lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Threshold name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The spawn exclusion radius is negative or not finite.
    #[error("exclusion radius must be finite and non-negative, got {0}")]
    InvalidExclusionRadius(f64),
    /// The cache tile size is zero, negative, or not finite.
    #[error("cache tile size must be finite and positive, got {0}")]
    InvalidTileSize(f64),
    /// The cache capacity is zero.
    #[error("cache capacity must be at least one tile")]
    ZeroCacheCapacity,
}

/// Seeded octave table for one coherent noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Permutation seed.
    pub seed: u32,
    /// Layers, lowest frequency first.
    pub octaves: Vec<OctaveSpec>,
    /// Mapping of the accumulated value into `[0, 1]`.
    pub normalization: NormalizationMode,
}

impl NoiseConfig {
    /// Create an equalized field config.
    pub fn new(seed: u32, octaves: Vec<OctaveSpec>) -> Self {
        Self {
            seed,
            octaves,
            normalization: NormalizationMode::Equalized,
        }
    }

    /// Sum of all octave amplitudes.
    pub fn amplitude_sum(&self) -> f64 {
        self.octaves.iter().map(|o| o.amplitude).sum()
    }

    /// Lowest octave frequency, or `None` for an empty table.
    pub fn min_frequency(&self) -> Option<f64> {
        self.octaves
            .iter()
            .map(|o| o.frequency)
            .min_by(|a, b| a.total_cmp(b))
    }

    fn validate(&self, field: &'static str) -> Result<(), BiomeConfigError> {
        if self.octaves.is_empty() {
            return Err(BiomeConfigError::EmptyOctaves { field });
        }
        for (index, octave) in self.octaves.iter().enumerate() {
            if !(octave.frequency.is_finite() && octave.frequency > 0.0) {
                return Err(BiomeConfigError::InvalidFrequency {
                    field,
                    index,
                    value: octave.frequency,
                });
            }
            if !(octave.amplitude.is_finite() && octave.amplitude >= 0.0) {
                return Err(BiomeConfigError::InvalidAmplitude {
                    field,
                    index,
                    value: octave.amplitude,
                });
            }
        }
        if self.amplitude_sum() <= 0.0 {
            return Err(BiomeConfigError::ZeroAmplitude { field });
        }
        Ok(())
    }
}

/// The two cut points that decide every biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationThresholds {
    /// Base noise above this is sand, otherwise grass.
    pub sand_threshold: f64,
    /// Inside sand, water noise above this is water.
    pub water_threshold: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            sand_threshold: world.sand_threshold,
            water_threshold: world.water_threshold,
        }
    }
}

impl ClassificationThresholds {
    fn validate(&self) -> Result<(), BiomeConfigError> {
        for (name, value) in [
            ("sand_threshold", self.sand_threshold),
            ("water_threshold", self.water_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(BiomeConfigError::ThresholdOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Tile geometry and bound of the query cache.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheSettings {
    /// Edge length of one tile in world units.
    pub tile_size: f64,
    /// Maximum tiles held before the working set is reset.
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let cache = CacheConfig::default();
        Self {
            tile_size: cache.tile_size,
            capacity: cache.capacity,
        }
    }
}

/// Complete configuration of a [`BiomeEngine`](crate::BiomeEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeConfig {
    /// Grass/sand field.
    pub base: NoiseConfig,
    /// Water-carving field, consulted only on sand.
    pub water: NoiseConfig,
    /// Cut points.
    pub thresholds: ClassificationThresholds,
    /// Radius around the origin that is always grass.
    pub exclusion_radius: f64,
    /// Query cache, or `None` to disable memoization.
    pub cache: Option<CacheSettings>,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self::from_world(&WorldConfig::default(), &CacheConfig::default())
    }
}

impl BiomeConfig {
    /// Build the engine configuration from the canonical world constants.
    pub fn from_world(world: &WorldConfig, cache: &CacheConfig) -> Self {
        let water_seed = world
            .water_seed
            .unwrap_or_else(|| derive_water_seed(world.seed));
        Self {
            base: NoiseConfig {
                seed: world.seed,
                octaves: world.base_octaves.clone(),
                normalization: world.normalization,
            },
            water: NoiseConfig {
                seed: water_seed,
                octaves: world.water_octaves.clone(),
                normalization: world.normalization,
            },
            thresholds: ClassificationThresholds {
                sand_threshold: world.sand_threshold,
                water_threshold: world.water_threshold,
            },
            exclusion_radius: world.exclusion_radius,
            cache: cache.enabled.then_some(CacheSettings {
                tile_size: cache.tile_size,
                capacity: cache.capacity,
            }),
        }
    }

    /// Default tables and thresholds with a different world seed.
    pub fn with_seed(seed: u32) -> Self {
        let world = WorldConfig {
            seed,
            ..WorldConfig::default()
        };
        Self::from_world(&world, &CacheConfig::default())
    }

    /// Check every field; [`BiomeEngine::initialize`](crate::BiomeEngine::initialize)
    /// calls this before building anything.
    pub fn validate(&self) -> Result<(), BiomeConfigError> {
        self.base.validate("base")?;
        self.water.validate("water")?;
        self.thresholds.validate()?;
        if !(self.exclusion_radius.is_finite() && self.exclusion_radius >= 0.0) {
            return Err(BiomeConfigError::InvalidExclusionRadius(
                self.exclusion_radius,
            ));
        }
        if let Some(cache) = &self.cache {
            if !(cache.tile_size.is_finite() && cache.tile_size > 0.0) {
                return Err(BiomeConfigError::InvalidTileSize(cache.tile_size));
            }
            if cache.capacity == 0 {
                return Err(BiomeConfigError::ZeroCacheCapacity);
            }
        }
        Ok(())
    }
}
