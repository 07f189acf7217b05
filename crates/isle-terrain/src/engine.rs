//! The biome engine: the one object collision, rendering, and spawning talk to.
//!
//! Every process (server and each client) builds its own engine from the same
//! [`BiomeConfig`]. There is no shared state between engines and no biome data
//! on the wire; agreement comes from configuration parity alone, which
//! [`BiomeEngine::fingerprint`] makes checkable.

use crate::biome::{BaseBiome, BiomeCategory, BiomeQuery, RegionClassifier};
use crate::cache::{BiomeQueryCache, CacheStats};
use crate::config::{BiomeConfig, BiomeConfigError};
use crate::seed::ConfigFingerprint;

/// Deterministic coordinate → biome service.
///
/// `Send + Sync`: share it by reference or `Arc` across threads.
pub struct BiomeEngine {
    classifier: RegionClassifier,
    cache: Option<BiomeQueryCache>,
    config: BiomeConfig,
    fingerprint: ConfigFingerprint,
}

impl BiomeEngine {
    /// Validate `config` and build the engine.
    ///
    /// # Errors
    ///
    /// Returns the first [`BiomeConfigError`] found in `config`.
    pub fn initialize(config: BiomeConfig) -> Result<Self, BiomeConfigError> {
        config.validate()?;

        let fingerprint = ConfigFingerprint::of(&config);
        let classifier = RegionClassifier::new(&config);
        let cache = config.cache.map(BiomeQueryCache::new);

        tracing::info!(
            %fingerprint,
            seed = config.base.seed,
            sand_threshold = config.thresholds.sand_threshold,
            water_threshold = config.thresholds.water_threshold,
            exclusion_radius = config.exclusion_radius,
            cached = cache.is_some(),
            "biome engine initialized"
        );

        Ok(Self {
            classifier,
            cache,
            config,
            fingerprint,
        })
    }

    /// Exact biome at `(x, y)`.
    pub fn classify(&self, x: f64, y: f64) -> BiomeCategory {
        self.classifier.classify(x, y)
    }

    /// Biome at tile resolution, memoized.
    ///
    /// The spawn zone is checked at the exact point; everything else is the
    /// terrain classification of the containing tile's origin. Without a
    /// cache this is identical to [`Self::classify`].
    pub fn classify_cached(&self, x: f64, y: f64) -> BiomeCategory {
        if self.classifier.guard().is_within_exclusion(x, y) {
            return BiomeCategory::Grass;
        }
        match &self.cache {
            Some(cache) => cache.get(x, y, |tx, ty| self.classifier.classify_terrain(tx, ty)),
            None => self.classifier.classify_terrain(x, y),
        }
    }

    /// Pre-water layer at `(x, y)`, for validation and debugging.
    pub fn base_classify(&self, x: f64, y: f64) -> BaseBiome {
        self.classifier.base_classify(x, y)
    }

    /// Whether `(x, y)` lies strictly inside the spawn exclusion radius.
    pub fn is_within_exclusion(&self, x: f64, y: f64) -> bool {
        self.classifier.guard().is_within_exclusion(x, y)
    }

    /// Digest of the parity-relevant configuration.
    pub fn fingerprint(&self) -> ConfigFingerprint {
        self.fingerprint
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &BiomeConfig {
        &self.config
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    /// Cache counters, or `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(BiomeQueryCache::stats)
    }

    /// Release the cache and tear the engine down.
    pub fn dispose(self) {
        if let Some(cache) = &self.cache {
            let stats = cache.stats();
            cache.clear();
            tracing::debug!(
                hits = stats.hits,
                misses = stats.misses,
                resets = stats.resets,
                "biome engine disposed"
            );
        }
    }
}

impl BiomeQuery for BiomeEngine {
    fn biome_at(&self, x: f64, y: f64) -> BiomeCategory {
        self.classify(x, y)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
