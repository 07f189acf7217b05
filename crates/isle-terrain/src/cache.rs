//! Tile-quantized memoization of biome queries.
//!
//! Render and collision code ask about many sub-tile positions per frame.
//! Quantizing to a fixed tile grid lets all of them share one classification.
//! The map is sharded ([`DashMap`]), so concurrent misses on the same tile just
//! compute the same pure result twice; no global lock is taken.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::biome::BiomeCategory;
use crate::config::CacheSettings;

/// Tile indices beyond this magnitude are not cached (and may not be exact).
const MAX_TILE_INDEX: f64 = 9.0e15;

/// Integer tile coordinate: `floor(coord / tile_size)` per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Tile column.
    pub x: i64,
    /// Tile row.
    pub y: i64,
}

impl TileKey {
    /// Quantize a world coordinate. `None` for non-finite or astronomically
    /// distant coordinates, which bypass the cache.
    pub fn quantize(x: f64, y: f64, tile_size: f64) -> Option<Self> {
        let tx = (x / tile_size).floor();
        let ty = (y / tile_size).floor();
        if tx.abs() < MAX_TILE_INDEX && ty.abs() < MAX_TILE_INDEX {
            Some(Self {
                x: tx as i64,
                y: ty as i64,
            })
        } else {
            None
        }
    }

    /// World coordinate of the tile's minimum corner, the point every query
    /// inside the tile is answered for.
    pub fn origin(self, tile_size: f64) -> (f64, f64) {
        (self.x as f64 * tile_size, self.y as f64 * tile_size)
    }
}

/// Counters for cache diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered from the map.
    pub hits: u64,
    /// Queries that computed a tile.
    pub misses: u64,
    /// Times the working set was dropped for reaching capacity.
    pub resets: u64,
    /// Tiles currently held.
    pub entries: usize,
}

/// Bounded, thread-safe tile → biome map.
pub struct BiomeQueryCache {
    tiles: DashMap<TileKey, BiomeCategory, FxBuildHasher>,
    tile_size: f64,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    resets: AtomicU64,
}

impl BiomeQueryCache {
    /// Empty cache with the given tile geometry and bound.
    pub fn new(settings: CacheSettings) -> Self {
        let capacity = settings.capacity.max(1);
        Self {
            tiles: DashMap::with_capacity_and_hasher(capacity.min(4096), FxBuildHasher),
            tile_size: settings.tile_size,
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    /// Biome for the tile containing `(x, y)`.
    ///
    /// On a miss `compute` is called with the tile origin and the result is
    /// stored. Coordinates that cannot be quantized call `compute(x, y)`
    /// directly and are not stored.
    pub fn get(
        &self,
        x: f64,
        y: f64,
        compute: impl FnOnce(f64, f64) -> BiomeCategory,
    ) -> BiomeCategory {
        let Some(key) = TileKey::quantize(x, y, self.tile_size) else {
            return compute(x, y);
        };

        if let Some(hit) = self.tiles.get(&key).map(|entry| *entry.value()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let (ox, oy) = key.origin(self.tile_size);
        let biome = compute(ox, oy);

        if self.tiles.len() >= self.capacity {
            self.tiles.clear();
            let resets = self.resets.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(capacity = self.capacity, resets, "biome cache full, working set reset");
        }
        self.tiles.insert(key, biome);
        biome
    }

    /// Tile edge length in world units.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Maximum number of tiles held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tiles currently held.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if no tile is held.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Drop every tile. Counters are kept.
    pub fn clear(&self) {
        self.tiles.clear();
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            entries: self.tiles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn cache(tile_size: f64, capacity: usize) -> BiomeQueryCache {
        BiomeQueryCache::new(CacheSettings {
            tile_size,
            capacity,
        })
    }

    #[test]
    fn test_quantize_floors_negative_coordinates() {
        assert_eq!(TileKey::quantize(0.0, 0.0, 32.0), Some(TileKey { x: 0, y: 0 }));
        assert_eq!(TileKey::quantize(31.9, 63.9, 32.0), Some(TileKey { x: 0, y: 1 }));
        assert_eq!(TileKey::quantize(-0.1, -32.0, 32.0), Some(TileKey { x: -1, y: -1 }));
        assert_eq!(TileKey::quantize(-32.1, 0.0, 32.0), Some(TileKey { x: -2, y: 0 }));
    }

    #[test]
    fn test_quantize_rejects_degenerate_coordinates() {
        assert_eq!(TileKey::quantize(f64::NAN, 0.0, 32.0), None);
        assert_eq!(TileKey::quantize(0.0, f64::INFINITY, 32.0), None);
        assert_eq!(TileKey::quantize(1e300, 0.0, 32.0), None);
    }

    #[test]
    fn test_origin_is_min_corner() {
        let key = TileKey { x: -2, y: 3 };
        assert_eq!(key.origin(16.0), (-32.0, 48.0));
    }

    #[test]
    fn test_same_tile_computes_once() {
        let cache = cache(32.0, 100);
        let calls = AtomicUsize::new(0);
        let compute = |_x: f64, _y: f64| {
            calls.fetch_add(1, Ordering::Relaxed);
            BiomeCategory::Sand
        };

        for i in 0..10 {
            let v = cache.get(1.0 + i as f64, 2.0 + i as f64, compute);
            assert_eq!(v, BiomeCategory::Sand);
        }
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 9);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_compute_receives_tile_origin() {
        let cache = cache(10.0, 100);
        cache.get(-3.5, 17.2, |x, y| {
            assert_eq!((x, y), (-10.0, 10.0));
            BiomeCategory::Grass
        });
    }

    #[test]
    fn test_capacity_bounds_working_set() {
        let cache = cache(1.0, 8);
        for i in 0..100 {
            cache.get(i as f64 + 0.5, 0.5, |_, _| BiomeCategory::Grass);
            assert!(cache.len() <= 8);
        }
        assert!(cache.stats().resets > 0);
    }

    #[test]
    fn test_uncacheable_coordinates_bypass() {
        let cache = cache(32.0, 100);
        let v = cache.get(f64::NAN, 0.0, |_, _| BiomeCategory::Water);
        assert_eq!(v, BiomeCategory::Water);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_empties_map() {
        let cache = cache(32.0, 100);
        cache.get(0.0, 0.0, |_, _| BiomeCategory::Grass);
        cache.get(100.0, 0.0, |_, _| BiomeCategory::Sand);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_population_is_consistent() {
        let cache = cache(8.0, 10_000);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for i in 0..500 {
                        let x = i as f64 * 3.0;
                        let expected = if (x / 8.0).floor() as i64 % 2 == 0 {
                            BiomeCategory::Grass
                        } else {
                            BiomeCategory::Sand
                        };
                        let got = cache.get(x, 0.0, |ox, _| {
                            if (ox / 8.0) as i64 % 2 == 0 {
                                BiomeCategory::Grass
                            } else {
                                BiomeCategory::Sand
                            }
                        });
                        assert_eq!(got, expected);
                    }
                });
            }
        });
        // 500 * 3 / 8 tiles touched
        assert_eq!(cache.len(), 188);
    }
}
