//! Driver settings and preferences
//!
//! Read from JSON next to the binary or wherever `--config` points, then
//! overridden by command-line flags. Only presentation and pacing live here;
//! physics constants are fixed.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (random per run when unset)
    pub seed: Option<u64>,
    /// Render frame interval in milliseconds
    pub frame_ms: u64,
    /// Maximum simulation ticks per frame to prevent spiral of death
    pub max_substeps: u32,
    /// Show the key help line under the HUD
    pub show_help: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: 16,
            max_substeps: 64,
            show_help: true,
        }
    }
}

impl Settings {
    /// Bounds for `frame_ms`
    pub const MIN_FRAME_MS: u64 = 1;
    pub const MAX_FRAME_MS: u64 = 100;

    /// Default file name when no path is given
    pub const FILE_NAME: &'static str = "gate-flight.json";

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply command-line flags over file values, then sanitize
    pub fn with_overrides(mut self, seed: Option<u64>, frame_ms: Option<u64>, no_help: bool) -> Self {
        if let Some(seed) = seed {
            self.seed = Some(seed);
        }
        if let Some(frame_ms) = frame_ms {
            self.frame_ms = frame_ms;
        }
        if no_help {
            self.show_help = false;
        }
        self.sanitized()
    }

    /// Clamp pacing values into their usable range
    pub fn sanitized(mut self) -> Self {
        self.frame_ms = self.frame_ms.clamp(Self::MIN_FRAME_MS, Self::MAX_FRAME_MS);
        self.max_substeps = self.max_substeps.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gate-flight-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(&temp_path("does-not-exist.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_file_loads() {
        let path = temp_path("full.json");
        std::fs::write(
            &path,
            r#"{ "seed": 77, "frame_ms": 33, "max_substeps": 40, "show_help": false }"#,
        )
        .unwrap();
        let expected = Settings {
            seed: Some(77),
            frame_ms: 33,
            max_substeps: 40,
            show_help: false,
        };
        assert_eq!(Settings::load(&path), expected);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{ "seed": 5 }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.frame_ms, 16);
        assert!(settings.show_help);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let path = temp_path("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_sanitized_clamps_pacing() {
        let settings = Settings {
            frame_ms: 0,
            max_substeps: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.frame_ms, Settings::MIN_FRAME_MS);
        assert_eq!(settings.max_substeps, 1);

        let settings = Settings {
            frame_ms: 10_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.frame_ms, Settings::MAX_FRAME_MS);
    }

    #[test]
    fn test_flags_beat_file_values() {
        let from_file = Settings {
            seed: Some(1),
            frame_ms: 33,
            max_substeps: 40,
            show_help: true,
        };
        let settings = from_file.with_overrides(Some(9), Some(20), true);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.frame_ms, 20);
        assert!(!settings.show_help);
        assert_eq!(settings.max_substeps, 40);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let from_file = Settings {
            seed: Some(1),
            frame_ms: 33,
            max_substeps: 40,
            show_help: false,
        };
        assert_eq!(from_file.clone().with_overrides(None, None, false), from_file);
    }

    #[test]
    fn test_frame_ms_flag_is_clamped() {
        let settings = Settings::default().with_overrides(None, Some(0), false);
        assert_eq!(settings.frame_ms, Settings::MIN_FRAME_MS);

        let settings = Settings::default().with_overrides(None, Some(5_000), false);
        assert_eq!(settings.frame_ms, Settings::MAX_FRAME_MS);
    }
}
