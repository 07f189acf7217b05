//! Writing calibration results back to `config.ron`.

use std::path::Path;

use isle_config::{Config, ConfigError};
use isle_terrain::ClassificationThresholds;

/// Store calibrated thresholds in the config file under `config_dir`.
///
/// The file is re-read first and only the two threshold fields change, so CLI
/// overrides of this run (seed, cache, log level) never leak into the shared
/// world constants.
pub fn save_thresholds(
    config_dir: &Path,
    thresholds: ClassificationThresholds,
) -> Result<Config, ConfigError> {
    let mut on_disk = Config::load_or_create(config_dir)?;
    on_disk.world.sand_threshold = thresholds.sand_threshold;
    on_disk.world.water_threshold = thresholds.water_threshold;
    on_disk.save(config_dir)?;
    tracing::info!(
        dir = %config_dir.display(),
        sand_threshold = thresholds.sand_threshold,
        water_threshold = thresholds.water_threshold,
        "saved calibrated thresholds"
    );
    Ok(on_disk)
}
