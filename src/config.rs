use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::protocol::GridCoord;

pub const CONFIG_PATH_VAR: &str = "STAR_TRADER_CONFIG";
pub const SEED_VAR: &str = "STAR_TRADER_SEED";
pub const WIDTH_VAR: &str = "STAR_TRADER_WIDTH";
pub const HEIGHT_VAR: &str = "STAR_TRADER_HEIGHT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub galaxy_width: i32,
    pub galaxy_height: i32,
    pub start_system: GridCoord,
    /// Fixed seed for universe and economy; random when absent.
    pub seed: Option<u64>,
    /// Simulated seconds between economy ticks.
    pub economy_tick_interval: f32,
    pub tick_rate_hz: u32,
    /// Rejected angles tried per asteroid before the last one is kept.
    pub asteroid_attempts: u32,
    /// Simulated seconds the headless driver runs for.
    pub run_seconds: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            galaxy_width: 10,
            galaxy_height: 10,
            start_system: GridCoord::new(5, 5),
            seed: None,
            economy_tick_interval: 300.0,
            tick_rate_hz: 60,
            asteroid_attempts: 64,
            run_seconds: 120.0,
        }
    }
}

impl GameConfig {
    /// Loads `.env`, then the JSON config file, then env overrides.
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded .env");
        }

        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load_from_file(Path::new(&path)),
            Err(_) => match default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validated()
    }

    /// Reads a JSON config. Falls back to defaults if the file is missing
    /// or malformed.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<GameConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config at {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    GameConfig::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read config at {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                GameConfig::default()
            }
        }
    }

    /// Applies `STAR_TRADER_SEED/WIDTH/HEIGHT`. Unparseable values are
    /// ignored with a warning.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(e) => warn!("Ignoring {}={:?}: {}", SEED_VAR, raw, e),
            }
        }
        if let Some(raw) = lookup(WIDTH_VAR) {
            match raw.trim().parse::<i32>() {
                Ok(width) => self.galaxy_width = width,
                Err(e) => warn!("Ignoring {}={:?}: {}", WIDTH_VAR, raw, e),
            }
        }
        if let Some(raw) = lookup(HEIGHT_VAR) {
            match raw.trim().parse::<i32>() {
                Ok(height) => self.galaxy_height = height,
                Err(e) => warn!("Ignoring {}={:?}: {}", HEIGHT_VAR, raw, e),
            }
        }
    }

    /// Clamps values that would leave the game unplayable.
    pub fn validated(mut self) -> Self {
        if self.galaxy_width < 1 || self.galaxy_height < 1 {
            warn!(
                "Galaxy size {}x{} is invalid, using 1x1 minimum",
                self.galaxy_width, self.galaxy_height
            );
            self.galaxy_width = self.galaxy_width.max(1);
            self.galaxy_height = self.galaxy_height.max(1);
        }

        let start = GridCoord::new(
            self.start_system.x.clamp(0, self.galaxy_width - 1),
            self.start_system.y.clamp(0, self.galaxy_height - 1),
        );
        if start != self.start_system {
            warn!(
                "Start system {:?} is outside the galaxy, using {:?}",
                self.start_system, start
            );
            self.start_system = start;
        }

        if self.tick_rate_hz == 0 {
            self.tick_rate_hz = 60;
        }
        if self.economy_tick_interval <= 0.0 {
            self.economy_tick_interval = 300.0;
        }
        if self.asteroid_attempts == 0 {
            self.asteroid_attempts = 1;
        }
        self
    }

    /// Seconds of simulated time per frame.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }
}

/// `<config dir>/star-trader/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("star-trader").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "galaxy_width": 6, "seed": 9 }"#).unwrap();
        assert_eq!(config.galaxy_width, 6);
        assert_eq!(config.galaxy_height, 10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.economy_tick_interval, 300.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from_file(Path::new("/nonexistent/star-trader/config.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn env_overrides_apply_and_bad_values_are_ignored() {
        let mut config = GameConfig::default();
        config.apply_env_overrides(lookup(&[
            (SEED_VAR, "1234"),
            (WIDTH_VAR, "3"),
            (HEIGHT_VAR, "lots"),
        ]));
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.galaxy_width, 3);
        assert_eq!(config.galaxy_height, 10);
    }

    #[test]
    fn start_system_is_clamped_into_galaxy() {
        let config = GameConfig {
            galaxy_width: 3,
            galaxy_height: 3,
            ..GameConfig::default()
        }
        .validated();
        assert_eq!(config.start_system, GridCoord::new(2, 2));
    }

    #[test]
    fn frame_time_follows_tick_rate() {
        let config = GameConfig::default();
        assert!((config.frame_time() - 1.0 / 60.0).abs() < 1e-6);
    }
}
