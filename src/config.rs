//! Match configuration
//!
//! Geometry and tuning are fixed at construction for the whole match; the
//! sim never rereads them mid-rally. Persisted as JSON so a frontend can
//! ship presets or let players tweak names and the winning score.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIZE_UNIT;

/// Fixed-at-construction match parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Court width in pixels
    pub screen_width: f32,
    /// Court height in pixels
    pub screen_height: f32,
    /// Paddle length in size units (half-extent in px = length * 10)
    pub paddle_length: f32,
    /// Human paddle step per accepted move command (px)
    pub paddle_speed: f32,
    /// CPU paddle step per accepted move command (px)
    pub cpu_paddle_speed: f32,
    /// Ball speed at serve and throughout the rally (px per tick)
    pub starting_ball_speed: f32,
    /// First player to reach this score wins the match
    pub winning_score: u32,
    pub player_name: String,
    pub cpu_name: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 500.0,
            paddle_length: 5.0,
            paddle_speed: 40.0,
            // The CPU takes many small steps where the human takes one big one
            cpu_paddle_speed: 40.0 / 30.0,
            starting_ball_speed: 3.0,
            winning_score: 5,
            player_name: "Player 1".to_string(),
            cpu_name: "CPU".to_string(),
        }
    }
}

impl MatchConfig {
    /// Load a config file, falling back to defaults when the file is missing
    /// or malformed. A broken config must never abort a match.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded match config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    /// Paddle half-extent in pixels
    pub fn paddle_half_extent(&self) -> f32 {
        self.paddle_length * SIZE_UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_classic_court() {
        let config = MatchConfig::default();
        assert_eq!(config.screen_width, 800.0);
        assert_eq!(config.screen_height, 500.0);
        assert_eq!(config.paddle_half_extent(), 50.0);
        assert_eq!(config.winning_score, 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = MatchConfig {
            winning_score: 11,
            player_name: "Ada".to_string(),
            ..MatchConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.winning_score, 11);
        assert_eq!(back.player_name, "Ada");
        assert_eq!(back.screen_width, config.screen_width);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: MatchConfig = serde_json::from_str(r#"{"winning_score": 3}"#).unwrap();
        assert_eq!(back.winning_score, 3);
        assert_eq!(back.screen_height, 500.0);
        assert_eq!(back.cpu_name, "CPU");
    }
}
