//! Configuration Management

use crate::patterns::DetectorConfig;
use crate::session::EventKind;
use crate::sync::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Keyframe synchronization settings
    pub sync: SyncSettings,
    /// Pattern detection settings
    pub patterns: PatternSettings,
    /// Sequence similarity settings
    #[serde(default)]
    pub similarity: SimilaritySettings,
}

/// Keyframe synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Max |frame - trigger| distance for a before-frame match (seconds)
    pub tolerance: f64,
    /// UI settle time after a trigger (seconds)
    pub after_delay: f64,
    /// Event kinds that produce keyframe pairs
    pub trigger_kinds: Vec<EventKind>,
}

/// Pattern detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSettings {
    /// Shortest sequence length worth reporting
    pub min_length: usize,
    /// Minimum occurrences for a sequence to count as a pattern
    pub min_occurrences: usize,
}

/// Sequence similarity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilaritySettings {
    /// Shortest window compared for similarity
    pub min_length: usize,
    /// Similarity score needed to report a region
    pub threshold: f64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            after_delay: 0.3,
            trigger_kinds: vec![EventKind::MouseClick],
        }
    }
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            min_length: 2,
            min_occurrences: 2,
        }
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            min_length: 2,
            threshold: 0.8,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.sync_config().validate()?;
        self.detector_config().validate()?;
        if self.similarity.min_length < 1 {
            return Err(crate::Error::Config(format!(
                "similarity.min_length must be at least 1, got {}",
                self.similarity.min_length
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity.threshold) {
            return Err(crate::Error::Config(format!(
                "similarity.threshold must be in [0, 1], got {}",
                self.similarity.threshold
            )));
        }
        Ok(())
    }

    /// Build the runtime synchronizer configuration
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            trigger_kinds: self.sync.trigger_kinds.iter().copied().collect(),
            tolerance: self.sync.tolerance,
            after_delay: self.sync.after_delay,
        }
    }

    /// Build the runtime detector configuration
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            min_length: self.patterns.min_length,
            min_occurrences: self.patterns.min_occurrences,
        }
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".routine_miner").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
