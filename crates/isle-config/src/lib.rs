//! Configuration system for the Isle biome engine.
//!
//! Holds the canonical world constants (noise seed, octave tables, thresholds,
//! spawn exclusion radius) that every server and client process must load
//! identically, plus cache, survey, and debug settings. Persists to disk as RON,
//! supports CLI overrides via clap, and detects changes on reload.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CacheConfig, Config, DebugConfig, NormalizationMode, OctaveSpec, SurveyConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;
