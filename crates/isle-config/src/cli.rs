//! Command-line argument parsing shared by Isle binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Isle command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. Overriding world
/// constants on one peer only will desynchronize it from the others.
#[derive(Parser, Debug, Default)]
#[command(name = "isle", about = "Isle biome engine")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Base noise value above which terrain is sand.
    #[arg(long)]
    pub sand_threshold: Option<f64>,

    /// Water noise value above which sand becomes water.
    #[arg(long)]
    pub water_threshold: Option<f64>,

    /// Radius around the origin forced to grass.
    #[arg(long)]
    pub exclusion_radius: Option<f64>,

    /// Disable the biome query cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(t) = args.sand_threshold {
            self.world.sand_threshold = t;
        }
        if let Some(t) = args.water_threshold {
            self.world.water_threshold = t;
        }
        if let Some(r) = args.exclusion_radius {
            self.world.exclusion_radius = r;
        }
        if args.no_cache {
            self.cache.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            sand_threshold: Some(0.45),
            no_cache: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.sand_threshold, 0.45);
        assert!(!config.cache.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.water_threshold, 0.7);
        assert_eq!(config.world.exclusion_radius, 1500.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "isle",
            "--seed",
            "42",
            "--water-threshold",
            "0.75",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.water_threshold, Some(0.75));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(!args.no_cache);
    }
}
