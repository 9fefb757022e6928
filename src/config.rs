// Mon Oct 19 2026 - Alex

use crate::structure::BuildIdentifier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Heap allocation granularity of the target; candidates are only tested at multiples of it.
    pub alignment: usize,
    pub chunk_size: usize,
    /// Extra bytes read past each chunk so structs straddling the seam are still seen whole.
    pub chunk_overlap: usize,
    pub max_threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            alignment: 4,
            chunk_size: 1024 * 1024,
            chunk_overlap: 0x200,
            max_threads: num_cpus::get(),
        }
    }
}

impl ScanConfig {
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.alignment == 0 || !self.alignment.is_power_of_two() {
            return Err("scan.alignment must be a power of two".to_string());
        }
        if self.chunk_size == 0 {
            return Err("scan.chunk_size must be greater than 0".to_string());
        }
        if self.chunk_size % self.alignment != 0 {
            return Err("scan.chunk_size must be a multiple of scan.alignment".to_string());
        }
        if self.max_threads == 0 {
            return Err("scan.max_threads must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Thresholds used when clamping fields read from the dump.
///
/// These are observed bounds, not engine constants. They are kept adjustable so a dump from an
/// unusual build can be read without code changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_topic_type: u8,
    pub max_next_speaker: u8,
    pub max_info_difficulty: u8,
    pub max_topic_priority: f32,
    pub max_list_items: usize,
    pub max_array_elements: usize,
    pub max_string_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_topic_type: 7,
            max_next_speaker: 2,
            max_info_difficulty: 10,
            max_topic_priority: 200.0,
            max_list_items: 256,
            max_array_elements: 1024,
            max_string_length: 4096,
        }
    }
}

impl ValidationLimits {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_list_items == 0 {
            return Err("limits.max_list_items must be greater than 0".to_string());
        }
        if self.max_array_elements == 0 {
            return Err("limits.max_array_elements must be greater than 0".to_string());
        }
        if self.max_string_length == 0 || self.max_string_length > u16::MAX as usize {
            return Err("limits.max_string_length must be between 1 and 65535".to_string());
        }
        if !self.max_topic_priority.is_finite() || self.max_topic_priority < 0.0 {
            return Err("limits.max_topic_priority must be a non-negative number".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Free-form build string; see [`BuildIdentifier::from_build_string`].
    pub build: Option<String>,
    pub scan: ScanConfig,
    pub limits: ValidationLimits,
    pub output_file: Option<PathBuf>,
    pub enable_verbose_output: bool,
    pub enable_progress_bars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build: None,
            scan: ScanConfig::default(),
            limits: ValidationLimits::default(),
            output_file: None,
            enable_verbose_output: false,
            enable_progress_bars: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn with_build(mut self, build: String) -> Self {
        self.build = Some(build);
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = Some(output);
        self
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.scan.max_threads = threads;
        self
    }

    pub fn build_identifier(&self) -> BuildIdentifier {
        self.build
            .as_deref()
            .map(BuildIdentifier::from_build_string)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scan.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan.alignment, 4);
        assert_eq!(config.limits.max_info_difficulty, 10);
        assert_eq!(config.build_identifier(), BuildIdentifier::Unknown);
    }

    #[test]
    fn test_validate_rejects_bad_scan_settings() {
        let mut config = Config::default();
        config.scan.alignment = 3;
        assert!(config.validate().is_err());

        let config = Config::default().with_max_threads(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.chunk_size = 0x1002;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_caps() {
        let mut config = Config::default();
        config.limits.max_list_items = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json_str(
            r#"{ "build": "Debug 0.9", "limits": { "max_info_difficulty": 12 } }"#,
        )
        .unwrap();
        assert_eq!(config.build_identifier(), BuildIdentifier::Debug);
        assert_eq!(config.limits.max_info_difficulty, 12);
        assert_eq!(config.limits.max_topic_type, 7);
        assert_eq!(config.scan.chunk_overlap, 0x200);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::default().with_build("retail".to_string());
        let text = serde_json::to_string(&config).unwrap();
        let back = Config::from_json_str(&text).unwrap();
        assert_eq!(back.build.as_deref(), Some("retail"));
        assert_eq!(back.scan, config.scan);
    }

    #[test]
    fn test_invalid_json_config() {
        let err = Config::from_json_str(r#"{ "scan": { "alignment": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(matches!(Config::from_json_str("{"), Err(ConfigError::Parse(_))));
    }
}
