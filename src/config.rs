use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{CompatibilityCalculator, LabelThresholds, RankWeights};
use crate::models::ValidationError;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub compatibility: CompatibilitySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub rank_weights: RankWeightsConfig,
}

/// Weight for each rank position, most important first
#[derive(Debug, Clone, Deserialize)]
pub struct RankWeightsConfig {
    #[serde(default = "default_first_weight")]
    pub first: f64,
    #[serde(default = "default_second_weight")]
    pub second: f64,
    #[serde(default = "default_third_weight")]
    pub third: f64,
    #[serde(default = "default_fourth_weight")]
    pub fourth: f64,
    #[serde(default = "default_fifth_weight")]
    pub fifth: f64,
}

impl Default for RankWeightsConfig {
    fn default() -> Self {
        Self {
            first: default_first_weight(),
            second: default_second_weight(),
            third: default_third_weight(),
            fourth: default_fourth_weight(),
            fifth: default_fifth_weight(),
        }
    }
}

impl RankWeightsConfig {
    /// Configured weights as validated rank weights.
    pub fn to_rank_weights(&self) -> Result<RankWeights, ValidationError> {
        RankWeights::new([self.first, self.second, self.third, self.fourth, self.fifth])
    }
}

fn default_first_weight() -> f64 { 0.35 }
fn default_second_weight() -> f64 { 0.25 }
fn default_third_weight() -> f64 { 0.20 }
fn default_fourth_weight() -> f64 { 0.12 }
fn default_fifth_weight() -> f64 { 0.08 }

#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilitySettings {
    #[serde(default = "default_min_ratings")]
    pub min_ratings: u32,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

impl Default for CompatibilitySettings {
    fn default() -> Self {
        Self {
            min_ratings: default_min_ratings(),
            thresholds: ThresholdsConfig::default(),
        }
    }
}

fn default_min_ratings() -> u32 { 10 }

/// Label thresholds, highest band first
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_highly_compatible")]
    pub highly_compatible: f64,
    #[serde(default = "default_compatible")]
    pub compatible: f64,
    #[serde(default = "default_moderately_compatible")]
    pub moderately_compatible: f64,
    #[serde(default = "default_somewhat_different")]
    pub somewhat_different: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            highly_compatible: default_highly_compatible(),
            compatible: default_compatible(),
            moderately_compatible: default_moderately_compatible(),
            somewhat_different: default_somewhat_different(),
        }
    }
}

impl ThresholdsConfig {
    pub fn to_thresholds(&self) -> LabelThresholds {
        LabelThresholds {
            highly_compatible: self.highly_compatible,
            compatible: self.compatible,
            moderately_compatible: self.moderately_compatible,
            somewhat_different: self.somewhat_different,
        }
    }
}

fn default_highly_compatible() -> f64 { 0.85 }
fn default_compatible() -> f64 { 0.65 }
fn default_moderately_compatible() -> f64 { 0.45 }
fn default_somewhat_different() -> f64 { 0.25 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FOLIO_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with FOLIO)
            // e.g., FOLIO__COMPATIBILITY__MIN_RATINGS -> compatibility.min_ratings
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Build the compatibility calculator these settings describe
    ///
    /// Fails when configured rank weights are malformed; the defaults
    /// always pass.
    pub fn calculator(&self) -> Result<CompatibilityCalculator, ValidationError> {
        Ok(CompatibilityCalculator::new(
            self.scoring.rank_weights.to_rank_weights()?,
            self.compatibility.min_ratings,
            self.compatibility.thresholds.to_thresholds(),
        ))
    }
}
