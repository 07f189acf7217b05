//! Configuration structs with canonical defaults and RON persistence.
//!
//! Every process taking part in a session (the server and each client) must
//! run with the same [`WorldConfig`]. Biome data is never transmitted; peers
//! recompute it from these constants.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "isle";
const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World constants shared by every participating process.
    pub world: WorldConfig,
    /// Biome query cache settings (local to each process).
    pub cache: CacheConfig,
    /// Area survey and calibration settings.
    pub survey: SurveyConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// One frequency/amplitude layer of a noise field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OctaveSpec {
    /// Spatial frequency in cycles per world unit.
    pub frequency: f64,
    /// Relative weight of this layer.
    pub amplitude: f64,
}

impl OctaveSpec {
    /// Shorthand constructor.
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// How accumulated octave noise is mapped into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NormalizationMode {
    /// Amplitude-weighted mean remapped from `[-1, 1]` to `[0, 1]`.
    Linear,
    /// Linear value pushed through the field's empirical CDF, so thresholds
    /// read directly as area fractions.
    #[default]
    Equalized,
}

/// Canonical world constants. Must be identical on every peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed driving the base (grass/sand) field.
    pub seed: u32,
    /// Explicit seed for the water-carving field. Derived from `seed` when `None`.
    pub water_seed: Option<u32>,
    /// Octave table of the base field, lowest frequency first.
    pub base_octaves: Vec<OctaveSpec>,
    /// Octave table of the water field, lowest frequency first.
    pub water_octaves: Vec<OctaveSpec>,
    /// Normalization applied to both fields.
    pub normalization: NormalizationMode,
    /// Base noise above this value is sand, otherwise grass.
    ///
    /// Under `Equalized` normalization the field is close to uniform on
    /// `[0, 1]`, so this value is the grass share of the map: 0.5 gives about
    /// half grass. Under `Linear` it is a raw noise level and area shares
    /// have to be measured.
    pub sand_threshold: f64,
    /// Within sand, water noise above this value is water.
    ///
    /// Under `Equalized` normalization `1 - water_threshold` is the share of
    /// sand that turns to water: with 0.5 sand and 0.7 here, water covers
    /// about 0.5 * 0.3 = 15% of the map.
    pub water_threshold: f64,
    /// Radius around the origin that is always grass.
    pub exclusion_radius: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            water_seed: None,
            base_octaves: vec![
                OctaveSpec::new(0.0005, 1.0),
                OctaveSpec::new(0.001, 0.5),
                OctaveSpec::new(0.002, 0.25),
                OctaveSpec::new(0.004, 0.125),
            ],
            water_octaves: vec![
                OctaveSpec::new(0.0008, 1.0),
                OctaveSpec::new(0.0016, 0.5),
                OctaveSpec::new(0.0032, 0.25),
            ],
            normalization: NormalizationMode::Equalized,
            sand_threshold: 0.5,
            water_threshold: 0.7,
            exclusion_radius: 1500.0,
        }
    }
}

/// Biome query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether cached queries are memoized at all.
    pub enabled: bool,
    /// Edge length of one cache tile in world units.
    pub tile_size: f64,
    /// Maximum number of tiles kept before the working set is reset.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tile_size: 32.0,
            capacity: 65_536,
        }
    }
}

/// Area survey configuration used for offline tuning and validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurveyConfig {
    /// Half the edge length of the square surveyed around the origin.
    pub half_extent: f64,
    /// Samples per axis.
    pub grid: u32,
    /// Target grass fraction.
    pub target_grass: f64,
    /// Target sand fraction.
    pub target_sand: f64,
    /// Target water fraction.
    pub target_water: f64,
    /// Accepted absolute deviation per category.
    pub tolerance: f64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            half_extent: 50_000.0,
            grid: 200,
            target_grass: 0.50,
            target_sand: 0.35,
            target_water: 0.15,
            tolerance: 0.05,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Width of rendered biome maps in pixels.
    pub map_width: u32,
    /// Height of rendered biome maps in pixels.
    pub map_height: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            map_width: 512,
            map_height: 512,
        }
    }
}

/// Resolve the platform configuration directory for Isle.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file; returns `Some(new_config)` if it differs from `self`.
    ///
    /// A changed `world` section means this process no longer agrees with its
    /// peers, so that case is logged at warn level.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if new_config == *self {
            return Ok(None);
        }
        if new_config.world != self.world {
            log::warn!("World constants changed on reload; peers must restart with the same file");
        } else {
            log::info!("Config reloaded with changes");
        }
        Ok(Some(new_config))
    }
}
