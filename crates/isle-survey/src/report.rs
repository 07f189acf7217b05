//! Survey results in human and machine readable form.

use std::fmt;

use isle_config::SurveyConfig;
use isle_terrain::{AreaDistribution, BiomeCensus, BiomeEngine, ClassificationThresholds};
use serde::Serialize;

/// Everything one survey run found out.
#[derive(Debug, Serialize)]
pub struct SurveyReport {
    /// Parity fingerprint, as hex.
    pub fingerprint: String,
    /// World seed.
    pub seed: u32,
    /// Sand threshold the census ran with.
    pub sand_threshold: f64,
    /// Water threshold the census ran with.
    pub water_threshold: f64,
    /// Raw counts.
    pub census: BiomeCensus,
    /// Measured fractions.
    pub actual: AreaDistribution,
    /// Configured target fractions.
    pub target: AreaDistribution,
    /// Largest per-category deviation from target.
    pub max_deviation: f64,
    /// Accepted deviation.
    pub tolerance: f64,
    /// Thresholds suggested by calibration, when requested.
    pub calibrated: Option<CalibratedThresholds>,
}

/// Serializable form of [`ClassificationThresholds`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalibratedThresholds {
    pub sand_threshold: f64,
    pub water_threshold: f64,
}

impl From<ClassificationThresholds> for CalibratedThresholds {
    fn from(t: ClassificationThresholds) -> Self {
        Self {
            sand_threshold: t.sand_threshold,
            water_threshold: t.water_threshold,
        }
    }
}

/// Target distribution from the survey section of the config.
pub fn target_distribution(survey: &SurveyConfig) -> AreaDistribution {
    AreaDistribution {
        grass: survey.target_grass,
        sand: survey.target_sand,
        water: survey.target_water,
    }
}

impl SurveyReport {
    /// Assemble a report from a finished census.
    pub fn new(engine: &BiomeEngine, census: BiomeCensus, survey: &SurveyConfig) -> Self {
        let config = engine.config();
        let actual = census.fractions();
        let target = target_distribution(survey);
        Self {
            fingerprint: engine.fingerprint().to_string(),
            seed: config.base.seed,
            sand_threshold: config.thresholds.sand_threshold,
            water_threshold: config.thresholds.water_threshold,
            census,
            actual,
            target,
            max_deviation: target.max_deviation(&actual),
            tolerance: survey.tolerance,
            calibrated: None,
        }
    }

    /// Whether every category is within tolerance of its target.
    pub fn within_tolerance(&self) -> bool {
        self.max_deviation <= self.tolerance
    }
}

impl fmt::Display for SurveyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Isle biome survey")?;
        writeln!(f, "  fingerprint: {}", self.fingerprint)?;
        writeln!(f, "  seed:        {}", self.seed)?;
        writeln!(
            f,
            "  thresholds:  sand > {:.4}, water > {:.4}",
            self.sand_threshold, self.water_threshold
        )?;
        writeln!(f, "  samples:     {}", self.census.total())?;
        writeln!(f, "  category   actual   target")?;
        for (name, actual, target) in [
            ("grass", self.actual.grass, self.target.grass),
            ("sand", self.actual.sand, self.target.sand),
            ("water", self.actual.water, self.target.water),
        ] {
            writeln!(f, "  {name:<8} {:>7.2}% {:>7.2}%", actual * 100.0, target * 100.0)?;
        }
        let verdict = if self.within_tolerance() { "ok" } else { "OUT OF TOLERANCE" };
        writeln!(
            f,
            "  deviation:   {:.2} points (tolerance {:.2}) {verdict}",
            self.max_deviation * 100.0,
            self.tolerance * 100.0
        )?;
        if let Some(c) = self.calibrated {
            writeln!(
                f,
                "  calibrated:  sand_threshold = {:.4}, water_threshold = {:.4}",
                c.sand_threshold, c.water_threshold
            )?;
        }
        Ok(())
    }
}
