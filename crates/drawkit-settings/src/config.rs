//! Configuration for DrawKit
//!
//! Every cross-cutting default used by the path core lives here as an
//! explicit value instead of process-wide state. Files are JSON or TOML,
//! chosen by extension, and are validated on both load and save.
//!
//! Configuration is organized into logical sections:
//! - Hit testing (point priority, stroke width used for tolerances)
//! - Creation (angular constraint, freehand fitting, auto-close distance)
//! - Joining (end point tolerance, tangent continuity)
//! - Metrics (flattening tolerance)
//! - History (undo depth)

use std::path::{Path, PathBuf};

use drawkit_core::ConfigError;
use drawkit_path::{
    default_tolerance, CreationOptions, EditSession, HitPriority, JoinResult, PathHistory,
    PathMetrics, DEFAULT_FLATNESS, DEFAULT_HISTORY_DEPTH, DEFAULT_SMOOTHING,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Name of the directory holding DrawKit's files inside the platform config dir.
pub const CONFIG_DIR_NAME: &str = "drawkit";

/// Default file name for the persisted configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Hit testing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestingSettings {
    /// Prefer on-path points over control points when both are hit
    pub on_path_priority: bool,
    /// Widest stroke applied to edited paths, used to derive hit tolerance
    pub widest_stroke: f64,
}

impl Default for HitTestingSettings {
    fn default() -> Self {
        Self {
            on_path_priority: false,
            widest_stroke: 1.0,
        }
    }
}

impl HitTestingSettings {
    pub fn priority(&self) -> HitPriority {
        HitPriority::from_on_path_flag(self.on_path_priority)
    }

    /// Hit tolerance for paths stroked no wider than `widest_stroke`.
    pub fn tolerance(&self) -> f64 {
        default_tolerance(self.widest_stroke)
    }
}

/// Interactive creation preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationSettings {
    /// Snap angle step in degrees for constrained drawing
    pub angular_constraint_degrees: f64,
    /// Maximum distance of a fitted freehand curve from the stroke
    pub freehand_smoothing: f64,
    /// Minimum spacing between freehand samples
    pub freehand_min_spacing: f64,
    /// Distance from the start point within which a click closes the path
    pub close_tolerance: f64,
}

impl Default for CreationSettings {
    fn default() -> Self {
        Self {
            angular_constraint_degrees: 45.0,
            freehand_smoothing: DEFAULT_SMOOTHING,
            freehand_min_spacing: 1.0,
            close_tolerance: 4.0,
        }
    }
}

impl CreationSettings {
    pub fn to_options(&self) -> CreationOptions {
        CreationOptions {
            constraint_angle: self.angular_constraint_degrees.to_radians(),
            freehand_smoothing: self.freehand_smoothing,
            freehand_min_spacing: self.freehand_min_spacing,
            close_tolerance: self.close_tolerance,
        }
    }
}

/// Path joining preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinSettings {
    /// Maximum distance between end points that still join
    pub tolerance: f64,
    /// Align handles at the join for tangent continuity
    pub colinear: bool,
}

impl Default for JoinSettings {
    fn default() -> Self {
        Self {
            tolerance: 4.0,
            colinear: true,
        }
    }
}

impl JoinSettings {
    /// Joins `other` onto `target` with these settings.
    pub fn join(&self, target: &mut drawkit_path::Path, other: &drawkit_path::Path) -> JoinResult {
        target.join(other, self.tolerance, self.colinear)
    }
}

/// Length and nearest point computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Maximum deviation of flattened curves from the true curve
    pub flatness: f64,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            flatness: DEFAULT_FLATNESS,
        }
    }
}

impl MetricsSettings {
    pub fn metrics(&self) -> PathMetrics {
        PathMetrics::new(self.flatness)
    }
}

/// Undo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Number of undo steps kept per path
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl HistorySettings {
    pub fn history(&self) -> PathHistory {
        PathHistory::new(self.max_depth)
    }

    /// An edit session over `path` with this depth.
    pub fn session(&self, path: drawkit_path::Path) -> EditSession {
        EditSession::new(path, self.max_depth)
    }
}

/// Complete configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections or keys in a file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hit_testing: HitTestingSettings,
    pub creation: CreationSettings,
    pub join: JoinSettings,
    pub metrics: MetricsSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for DrawKit, e.g. `~/.config/drawkit`.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Default location of the configuration file.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Parse config from a string in the given file's format.
    pub fn from_str_for(path: &Path, content: &str) -> SettingsResult<Self> {
        let config: Self = match format_of(path)? {
            Format::Json => serde_json::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_for(path, &content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("must be a finite number > 0, got {value}"),
                })
            }
        }

        positive("hit_testing.widest_stroke", self.hit_testing.widest_stroke)?;

        let degrees = self.creation.angular_constraint_degrees;
        positive("creation.angular_constraint_degrees", degrees)?;
        if degrees > 180.0 {
            return Err(ConfigError::InvalidSetting {
                key: "creation.angular_constraint_degrees".to_string(),
                reason: format!("must be at most 180, got {degrees}"),
            });
        }
        positive("creation.freehand_smoothing", self.creation.freehand_smoothing)?;
        positive("creation.freehand_min_spacing", self.creation.freehand_min_spacing)?;
        positive("creation.close_tolerance", self.creation.close_tolerance)?;

        positive("join.tolerance", self.join.tolerance)?;
        positive("metrics.flatness", self.metrics.flatness)?;

        if self.history.max_depth == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "history.max_depth".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        Ok(())
    }
}
