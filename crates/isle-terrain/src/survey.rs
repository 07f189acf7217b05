//! Area census and offline threshold calibration.
//!
//! Area ratios are a statistical property of the noise fields, so they are
//! checked by measurement: sample a large grid, count categories, compare with
//! the target split. [`calibrate_thresholds`] runs the same measurement in
//! reverse, picking the percentiles of the sampled noise that yield the target.

use glam::DVec2;
use serde::Serialize;

use crate::biome::{BiomeCategory, BiomeQuery};
use crate::config::{BiomeConfig, ClassificationThresholds};
use crate::noise_field::NoiseField;

/// Regular grid of sample points over an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurveyRegion {
    /// Minimum corner.
    pub min: DVec2,
    /// Maximum corner.
    pub max: DVec2,
    /// Samples per axis.
    pub grid: u32,
}

impl SurveyRegion {
    /// Square of half-width `half_extent` around the origin.
    pub fn centered(half_extent: f64, grid: u32) -> Self {
        Self {
            min: DVec2::splat(-half_extent),
            max: DVec2::splat(half_extent),
            grid,
        }
    }

    /// Total number of sample points.
    pub fn sample_count(&self) -> u64 {
        u64::from(self.grid) * u64::from(self.grid)
    }

    /// Sample point at cell `(i, j)`: the centre of that grid cell.
    pub fn point(&self, i: u32, j: u32) -> DVec2 {
        let cells = f64::from(self.grid.max(1));
        let step = (self.max - self.min) / cells;
        self.min + step * DVec2::new(f64::from(i) + 0.5, f64::from(j) + 0.5)
    }

    /// All sample points, row by row.
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        (0..self.grid).flat_map(move |j| (0..self.grid).map(move |i| self.point(i, j)))
    }
}

/// Fractions of area per category, summing to one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AreaDistribution {
    /// Grass fraction.
    pub grass: f64,
    /// Sand fraction.
    pub sand: f64,
    /// Water fraction.
    pub water: f64,
}

impl Default for AreaDistribution {
    /// The tuning target: half grass, a third sand, the rest water.
    fn default() -> Self {
        Self {
            grass: 0.50,
            sand: 0.35,
            water: 0.15,
        }
    }
}

impl AreaDistribution {
    /// Fraction for one category.
    pub fn get(&self, category: BiomeCategory) -> f64 {
        match category {
            BiomeCategory::Grass => self.grass,
            BiomeCategory::Sand => self.sand,
            BiomeCategory::Water => self.water,
        }
    }

    /// Largest absolute per-category difference.
    pub fn max_deviation(&self, other: &Self) -> f64 {
        BiomeCategory::ALL
            .iter()
            .map(|&c| (self.get(c) - other.get(c)).abs())
            .fold(0.0, f64::max)
    }
}

/// Per-category sample counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BiomeCensus {
    /// Grass samples.
    pub grass: u64,
    /// Sand samples.
    pub sand: u64,
    /// Water samples.
    pub water: u64,
}

impl BiomeCensus {
    /// Count categories over every point of `region`.
    pub fn survey<Q: BiomeQuery + ?Sized>(query: &Q, region: &SurveyRegion) -> Self {
        Self::survey_rows(query, region, 0..region.grid)
    }

    /// Same counts as [`Self::survey`], with rows split across `threads` scoped
    /// threads sharing `query`.
    pub fn survey_parallel<Q: BiomeQuery + Sync + ?Sized>(
        query: &Q,
        region: &SurveyRegion,
        threads: usize,
    ) -> Self {
        let threads = threads.clamp(1, region.grid.max(1) as usize);
        let rows_per_thread = region.grid.div_ceil(threads as u32).max(1);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..region.grid)
                .step_by(rows_per_thread as usize)
                .map(|start| {
                    let end = (start + rows_per_thread).min(region.grid);
                    s.spawn(move || Self::survey_rows(query, region, start..end))
                })
                .collect();

            handles
                .into_iter()
                .fold(Self::default(), |acc, handle| match handle.join() {
                    Ok(part) => acc.merged(part),
                    Err(panic) => std::panic::resume_unwind(panic),
                })
        })
    }

    fn survey_rows<Q: BiomeQuery + ?Sized>(
        query: &Q,
        region: &SurveyRegion,
        rows: std::ops::Range<u32>,
    ) -> Self {
        let mut census = Self::default();
        for j in rows {
            for i in 0..region.grid {
                let p = region.point(i, j);
                census.record(query.biome_at(p.x, p.y));
            }
        }
        census
    }

    /// Count one sample.
    pub fn record(&mut self, category: BiomeCategory) {
        match category {
            BiomeCategory::Grass => self.grass += 1,
            BiomeCategory::Sand => self.sand += 1,
            BiomeCategory::Water => self.water += 1,
        }
    }

    /// Sum of two censuses.
    pub fn merged(self, other: Self) -> Self {
        Self {
            grass: self.grass + other.grass,
            sand: self.sand + other.sand,
            water: self.water + other.water,
        }
    }

    /// Total samples.
    pub fn total(&self) -> u64 {
        self.grass + self.sand + self.water
    }

    /// Measured fractions (all zero for an empty census).
    pub fn fractions(&self) -> AreaDistribution {
        let total = self.total();
        if total == 0 {
            return AreaDistribution {
                grass: 0.0,
                sand: 0.0,
                water: 0.0,
            };
        }
        let total = total as f64;
        AreaDistribution {
            grass: self.grass as f64 / total,
            sand: self.sand as f64 / total,
            water: self.water as f64 / total,
        }
    }
}

/// Pick thresholds that reproduce `target` over `region`.
///
/// The sand threshold is the `target.grass` percentile of the sampled base
/// field. The water threshold is the percentile of the water field, over the
/// samples that came out sand, that leaves `water / (sand + water)` of them
/// above it. The spawn zone is ignored; it is a negligible share of any
/// useful survey area.
pub fn calibrate_thresholds(
    config: &BiomeConfig,
    region: &SurveyRegion,
    target: &AreaDistribution,
) -> ClassificationThresholds {
    let base = NoiseField::new(&config.base);
    let water = NoiseField::new(&config.water);

    let mut base_values: Vec<(f64, DVec2)> = region
        .points()
        .map(|p| (base.sample(p.x, p.y), p))
        .collect();
    base_values.sort_by(|a, b| a.0.total_cmp(&b.0));

    let grass_share = target.grass.clamp(0.0, 1.0);
    let sand_threshold = percentile_by(&base_values, grass_share, |v| v.0);

    let mut water_values: Vec<f64> = base_values
        .iter()
        .filter(|(value, _)| *value > sand_threshold)
        .map(|(_, p)| water.sample(p.x, p.y))
        .collect();
    water_values.sort_by(f64::total_cmp);

    let wet = target.sand + target.water;
    let dry_share = if wet > 0.0 {
        (1.0 - target.water / wet).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let water_threshold = percentile_by(&water_values, dry_share, |v| *v);

    tracing::debug!(
        sand_threshold,
        water_threshold,
        samples = base_values.len(),
        "calibrated thresholds"
    );

    ClassificationThresholds {
        sand_threshold,
        water_threshold,
    }
}

/// Value at fraction `p` of a sorted slice; `1.0` for an empty slice so that
/// nothing lies above it.
fn percentile_by<T>(sorted: &[T], p: f64, value: impl Fn(&T) -> f64) -> f64 {
    if sorted.is_empty() {
        return 1.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    value(&sorted[idx.min(sorted.len() - 1)]).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stripes;

    impl BiomeQuery for Stripes {
        fn biome_at(&self, x: f64, _y: f64) -> BiomeCategory {
            if x < 0.0 {
                BiomeCategory::Grass
            } else if x < 50.0 {
                BiomeCategory::Sand
            } else {
                BiomeCategory::Water
            }
        }
    }

    #[test]
    fn test_region_points_are_cell_centres() {
        let region = SurveyRegion::centered(100.0, 4);
        assert_eq!(region.point(0, 0), DVec2::new(-75.0, -75.0));
        assert_eq!(region.point(3, 3), DVec2::new(75.0, 75.0));
        assert_eq!(region.points().count() as u64, region.sample_count());
    }

    #[test]
    fn test_census_counts_stripes() {
        let region = SurveyRegion::centered(100.0, 4);
        let census = BiomeCensus::survey(&Stripes, &region);
        // x centres: -75, -25, 25, 75
        assert_eq!(census.grass, 8);
        assert_eq!(census.sand, 4);
        assert_eq!(census.water, 4);
        let f = census.fractions();
        assert_eq!(f.grass, 0.5);
        assert_eq!(f.sand, 0.25);
        assert_eq!(f.water, 0.25);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let region = SurveyRegion::centered(100.0, 37);
        let serial = BiomeCensus::survey(&Stripes, &region);
        for threads in [1, 2, 3, 8, 64] {
            assert_eq!(
                BiomeCensus::survey_parallel(&Stripes, &region, threads),
                serial
            );
        }
    }

    #[test]
    fn test_empty_census_fractions_are_zero() {
        let f = BiomeCensus::default().fractions();
        assert_eq!((f.grass, f.sand, f.water), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_max_deviation() {
        let a = AreaDistribution::default();
        let b = AreaDistribution {
            grass: 0.45,
            sand: 0.37,
            water: 0.18,
        };
        assert!((a.max_deviation(&b) - 0.05).abs() < 1e-12);
        assert_eq!(a.max_deviation(&a), 0.0);
    }

    #[test]
    fn test_percentile_by() {
        let values = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(percentile_by(&values, 0.0, |v| *v), 0.1);
        assert_eq!(percentile_by(&values, 0.5, |v| *v), 0.3);
        assert_eq!(percentile_by(&values, 1.0, |v| *v), 0.5);
        assert_eq!(percentile_by::<f64>(&[], 0.5, |v| *v), 1.0);
    }
}
