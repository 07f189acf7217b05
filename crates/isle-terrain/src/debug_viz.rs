//! Biome map rendering for eyeballing region shapes and tuning thresholds.

mod image;

use glam::DVec2;

pub use self::image::DebugImage;
use crate::biome::{BaseBiome, BiomeCategory, BiomeQuery, RegionClassifier};

/// Fixed map colour per category.
pub fn biome_color(category: BiomeCategory) -> (u8, u8, u8) {
    match category {
        BiomeCategory::Grass => (100, 180, 60),
        BiomeCategory::Sand => (230, 210, 140),
        BiomeCategory::Water => (20, 50, 180),
    }
}

/// Render the biome of every pixel centre over `[min, max]`.
///
/// Pixel row 0 is the top of the image, i.e. `max.y`.
pub fn render_biome_map<Q: BiomeQuery + ?Sized>(
    query: &Q,
    min: DVec2,
    max: DVec2,
    width: u32,
    height: u32,
) -> DebugImage {
    render_with(min, max, width, height, |p| {
        biome_color(query.biome_at(p.x, p.y))
    })
}

/// Render the pre-water layer, spawn zone drawn as grass.
pub fn render_base_map(
    classifier: &RegionClassifier,
    min: DVec2,
    max: DVec2,
    width: u32,
    height: u32,
) -> DebugImage {
    render_with(min, max, width, height, |p| {
        if classifier.guard().is_within_exclusion(p.x, p.y) {
            return biome_color(BiomeCategory::Grass);
        }
        match classifier.base_classify(p.x, p.y) {
            BaseBiome::Grass => biome_color(BiomeCategory::Grass),
            BaseBiome::Sand => biome_color(BiomeCategory::Sand),
        }
    })
}

fn render_with(
    min: DVec2,
    max: DVec2,
    width: u32,
    height: u32,
    color_at: impl Fn(DVec2) -> (u8, u8, u8),
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let size = DVec2::new(f64::from(width.max(1)), f64::from(height.max(1)));
    let step = (max - min) / size;

    for py in 0..height {
        for px in 0..width {
            let p = DVec2::new(
                min.x + (f64::from(px) + 0.5) * step.x,
                max.y - (f64::from(py) + 0.5) * step.y,
            );
            image.set_rgb(px, py, color_at(p));
        }
    }

    image
}
