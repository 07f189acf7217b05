//! Biome system: categories, the region classifier, the spawn zone guard, and
//! texture assignment.
//!
//! Consumers that only need "what is at (x, y)?" take a [`BiomeQuery`] so they
//! work with the full engine, a bare classifier, or a test double.

mod category;
mod classifier;
mod spawn_zone;
mod texture;

pub use category::{BaseBiome, BiomeCategory};
pub use classifier::RegionClassifier;
pub use spawn_zone::SpawnZoneGuard;
pub use texture::{TextureAssignment, TextureError, TextureHandle};

/// Point query for the biome at a world coordinate.
pub trait BiomeQuery {
    /// Biome at `(x, y)`. Must be total and deterministic.
    fn biome_at(&self, x: f64, y: f64) -> BiomeCategory;
}

impl<Q: BiomeQuery + ?Sized> BiomeQuery for &Q {
    fn biome_at(&self, x: f64, y: f64) -> BiomeCategory {
        (**self).biome_at(x, y)
    }
}
