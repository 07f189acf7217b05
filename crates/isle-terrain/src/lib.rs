//! Deterministic 2D biome engine: grass, sand, and water regions from layered noise.
//!
//! A coordinate maps to exactly one [`BiomeCategory`]. The base noise field
//! splits the world into grass and sand; a second, independently seeded field
//! carves water out of sand only, so every lake has a beach. A disc around
//! the origin is always grass. Identical [`BiomeConfig`]s give identical
//! answers on every machine, which is what lets clients and servers agree on
//! terrain without sending any of it.

mod cache;
mod collision;
mod config;
mod engine;
mod noise_field;
mod placement;
mod seed;
mod survey;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    BaseBiome, BiomeCategory, BiomeQuery, RegionClassifier, SpawnZoneGuard, TextureAssignment,
    TextureError, TextureHandle,
};
pub use cache::{BiomeQueryCache, CacheStats, TileKey};
pub use collision::{MoveOutcome, TerrainCollision};
pub use config::{BiomeConfig, BiomeConfigError, CacheSettings, ClassificationThresholds, NoiseConfig};
pub use engine::BiomeEngine;
pub use isle_config::{NormalizationMode, OctaveSpec};
pub use noise_field::NoiseField;
pub use placement::{DEFAULT_MAX_ATTEMPTS, PlacementOutcome, SpawnPlacer};
pub use seed::{ConfigFingerprint, calibration_rng, derive_water_seed, spawn_rng};
pub use survey::{AreaDistribution, BiomeCensus, SurveyRegion, calibrate_thresholds};
