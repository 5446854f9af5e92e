//! Automaton configuration
//!
//! One `AutomatonConfig` drives a track-finding pass. Every field has a
//! default, so a configuration file only needs the values it changes:
//!
//! ```
//! use trackca_core::config::{AutomatonConfig, FollowMode};
//!
//! let config = AutomatonConfig::from_toml_str(
//!     r#"
//!     strict_seeding = false
//!     min_state_to_follow = 3.0
//!     follow_mode = "single"
//!     max_paths = 500
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(!config.strict_seeding);
//! assert_eq!(config.follow_mode, FollowMode::Single);
//! assert_eq!(config.min_path_length, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackCaError};

/// How paths are extracted from the seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowMode {
    /// Branch on every tie (`follow_all`)
    #[default]
    All,
    /// One greedy path per seed (`follow_single`)
    Single,
}

/// Parameters of one track-finding pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomatonConfig {
    /// Only true chain heads become seeds
    pub strict_seeding: bool,
    /// Minimal cell state of a seed; `None` accepts every state
    pub min_seed_state: Option<f64>,
    /// Minimal cell state of a start item when following; `None` accepts every state
    pub min_state_to_follow: Option<f64>,
    pub follow_mode: FollowMode,
    /// Drop paths whose items all belong to a better path (pipeline only)
    pub clean_overlapping_set: bool,
    /// Abort the event when more seeds are found
    pub max_seeds: Option<usize>,
    /// Abort the event when more paths would be produced
    pub max_paths: Option<usize>,
    /// Shorter paths are dropped (pipeline) or end the search (multipass)
    pub min_path_length: usize,
    /// Upper bound on multipass iterations
    pub max_passes: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            strict_seeding: true,
            min_seed_state: None,
            min_state_to_follow: None,
            follow_mode: FollowMode::All,
            clean_overlapping_set: true,
            max_seeds: None,
            max_paths: None,
            min_path_length: 1,
            max_passes: 100,
        }
    }
}

impl AutomatonConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// * `Serialization` - If the document is malformed or has unknown keys
    /// * `InvalidConfig` - If a value is out of range
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// * `Serialization` - If the document is malformed or has unknown keys
    /// * `InvalidConfig` - If a value is out of range
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// * `InvalidConfig` - Naming the first offending field
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("min_seed_state", self.min_seed_state),
            ("min_state_to_follow", self.min_state_to_follow),
        ] {
            if value.is_some_and(f64::is_nan) {
                return Err(invalid(field, "must not be NaN"));
            }
        }
        if self.min_path_length == 0 {
            return Err(invalid("min_path_length", "must be at least 1"));
        }
        if self.max_passes == 0 {
            return Err(invalid("max_passes", "must be at least 1"));
        }
        Ok(())
    }

    /// Seed threshold as used by `mark_seeds`
    pub fn seed_threshold(&self) -> f64 {
        self.min_seed_state.unwrap_or(f64::NEG_INFINITY)
    }

    /// Start threshold as used by the path follower
    pub fn follow_threshold(&self) -> f64 {
        self.min_state_to_follow.unwrap_or(f64::NEG_INFINITY)
    }
}

fn invalid(field: &str, reason: &str) -> TrackCaError {
    TrackCaError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
