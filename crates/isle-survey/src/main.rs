//! Offline survey tool: measures biome area ratios for the configured world,
//! prints the parity fingerprint, and optionally calibrates thresholds or
//! writes a PNG biome map.

mod persist;
mod report;

use std::path::{Path, PathBuf};

use clap::Parser;
use isle_config::{CliArgs, Config, ConfigError, default_config_dir};
use isle_terrain::{
    BiomeCensus, BiomeConfig, BiomeConfigError, BiomeEngine, SurveyRegion, calibrate_thresholds,
    debug_viz,
};

use crate::report::{SurveyReport, target_distribution};

#[derive(Parser, Debug)]
#[command(name = "isle-survey", about = "Measure biome area ratios for an Isle world")]
struct SurveyArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Also compute thresholds that would hit the target distribution.
    #[arg(long)]
    calibrate: bool,

    /// Write calibrated thresholds back to config.ron (implies --calibrate).
    #[arg(long)]
    save_calibration: bool,

    /// Write a PNG biome map of the surveyed square to this path.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Worker threads for the census (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
enum SurveyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid biome configuration: {0}")]
    Biome(#[from] BiomeConfigError),
    #[error("failed to write biome map: {0}")]
    Image(#[from] image::ImageError),
    #[error("biome map buffer does not match its dimensions")]
    ImageBuffer,
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let args = SurveyArgs::parse();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("isle-survey: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the measured distribution is within tolerance.
fn run(args: &SurveyArgs) -> Result<bool, SurveyError> {
    let config_dir = match &args.common.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args.common);

    let log_dir = dirs::cache_dir().map(|dir| dir.join("isle").join("logs"));
    isle_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    let engine = BiomeEngine::initialize(BiomeConfig::from_world(&config.world, &config.cache))?;
    let region = SurveyRegion::centered(config.survey.half_extent, config.survey.grid);
    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);

    tracing::info!(
        fingerprint = %engine.fingerprint(),
        samples = region.sample_count(),
        threads,
        "surveying"
    );
    let census = BiomeCensus::survey_parallel(&engine, &region, threads);
    let mut report = SurveyReport::new(&engine, census, &config.survey);

    if args.calibrate || args.save_calibration {
        let target = target_distribution(&config.survey);
        let thresholds = calibrate_thresholds(engine.config(), &region, &target);
        report.calibrated = Some(thresholds.into());
        if args.save_calibration {
            persist::save_thresholds(&config_dir, thresholds)?;
        }
    }

    if let Some(path) = &args.map {
        write_map(&engine, &region, &config, path)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    let ok = report.within_tolerance();
    if !ok {
        tracing::warn!(
            max_deviation = report.max_deviation,
            tolerance = report.tolerance,
            "biome distribution out of tolerance"
        );
    }
    engine.dispose();
    Ok(ok)
}

fn write_map(
    engine: &BiomeEngine,
    region: &SurveyRegion,
    config: &Config,
    path: &Path,
) -> Result<(), SurveyError> {
    let (width, height) = (config.debug.map_width, config.debug.map_height);
    let map = debug_viz::render_biome_map(engine, region.min, region.max, width, height);
    let buffer =
        image::RgbaImage::from_raw(width, height, map.pixels).ok_or(SurveyError::ImageBuffer)?;
    buffer.save(path)?;
    tracing::info!(
        path = %path.display(),
        width,
        height,
        "wrote biome map"
    );
    Ok(())
}
