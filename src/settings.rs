//! Game settings and tuning constants
//!
//! Built once at startup (defaults, or a JSON document) and passed by
//! reference to every simulation component.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Aabb;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
    #[error("{field} must be negative (upward), got {value}")]
    NotUpward { field: &'static str, value: i64 },
    #[error(
        "scroll limits must satisfy 0 <= left < right <= screen width (left={left}, right={right}, width={width})"
    )]
    ScrollLimits { left: i32, right: i32, width: i32 },
    #[error("scroll dead zone is {zone}px wide but the player is {player_width}px")]
    DeadZoneTooNarrow { zone: i32, player_width: i32 },
    #[error("stomp bounce {stomp_bounce} must be weaker than the jump impulse {jump_impulse}")]
    BounceTooStrong { stomp_bounce: i32, jump_impulse: i32 },
    #[error("enemy_head_threshold must not be negative, got {0}")]
    NegativeHeadThreshold(i32),
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,
    /// Target tick rate of the external frame limiter
    pub fps: u32,
    /// Side length of one layout cell
    pub block_size: i32,

    // === Player ===
    pub player_speed: i32,
    pub player_width: i32,
    pub player_height: i32,
    /// Added to vertical velocity each tick
    pub gravity: i32,
    /// Vertical velocity after a jump (negative is up)
    pub jump_impulse: i32,
    /// Vertical velocity after stomping an enemy (negative is up)
    pub stomp_bounce: i32,

    // === Level entities ===
    pub enemy_speed: i32,
    pub enemy_size: i32,
    /// Contact depth below an enemy's top that still counts as a head hit
    pub enemy_head_threshold: i32,
    pub coin_size: i32,
    pub door_width: i32,
    pub door_height: i32,

    // === Scrolling ===
    /// Screen x the player's left edge may not go past
    pub scroll_left_limit: i32,
    /// Screen x the player's right edge may not go past
    pub scroll_right_limit: i32,

    // === Session ===
    pub starting_lives: u32,
    pub coin_points: u64,
    pub enemy_points: u64,
    /// Ticks gameplay is suspended after damage before the respawn
    pub damage_stun_ticks: u32,
    /// Ticks spent between touching a door and the next level starting
    pub level_advance_ticks: u32,

    // === Menu hit-testing ===
    /// "Play" button on the main menu
    pub play_button: Aabb,
    /// "Menu" button on the game-over screen
    pub menu_button: Aabb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,
            block_size: BLOCK_SIZE,

            player_speed: PLAYER_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            stomp_bounce: STOMP_BOUNCE,

            enemy_speed: ENEMY_SPEED,
            enemy_size: ENEMY_SIZE,
            enemy_head_threshold: ENEMY_HEAD_THRESHOLD,
            coin_size: COIN_SIZE,
            door_width: DOOR_WIDTH,
            door_height: DOOR_HEIGHT,

            scroll_left_limit: SCROLL_LEFT_LIMIT,
            scroll_right_limit: SCROLL_RIGHT_LIMIT,

            starting_lives: STARTING_LIVES,
            coin_points: COIN_POINTS,
            enemy_points: ENEMY_POINTS,
            damage_stun_ticks: DAMAGE_STUN_TICKS,
            level_advance_ticks: LEVEL_ADVANCE_TICKS,

            // Centered under each other on the default 800x500 screen
            play_button: Aabb::new(300, 200, 200, 50),
            menu_button: Aabb::new(300, 300, 200, 50),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("screen_width", self.screen_width as i64),
            ("screen_height", self.screen_height as i64),
            ("fps", self.fps as i64),
            ("block_size", self.block_size as i64),
            ("player_speed", self.player_speed as i64),
            ("player_width", self.player_width as i64),
            ("player_height", self.player_height as i64),
            ("gravity", self.gravity as i64),
            ("enemy_speed", self.enemy_speed as i64),
            ("enemy_size", self.enemy_size as i64),
            ("coin_size", self.coin_size as i64),
            ("door_width", self.door_width as i64),
            ("door_height", self.door_height as i64),
            ("starting_lives", self.starting_lives as i64),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("jump_impulse", self.jump_impulse),
            ("stomp_bounce", self.stomp_bounce),
        ] {
            if value >= 0 {
                return Err(SettingsError::NotUpward {
                    field,
                    value: value as i64,
                });
            }
        }

        let (left, right) = (self.scroll_left_limit, self.scroll_right_limit);
        if left < 0 || left >= right || right > self.screen_width {
            return Err(SettingsError::ScrollLimits {
                left,
                right,
                width: self.screen_width,
            });
        }
        // The player must fit inside the dead zone or the left edge is never corrected
        if right - left < self.player_width {
            return Err(SettingsError::DeadZoneTooNarrow {
                zone: right - left,
                player_width: self.player_width,
            });
        }

        if self.stomp_bounce <= self.jump_impulse {
            return Err(SettingsError::BounceTooStrong {
                stomp_bounce: self.stomp_bounce,
                jump_impulse: self.jump_impulse,
            });
        }
        if self.enemy_head_threshold < 0 {
            return Err(SettingsError::NegativeHeadThreshold(self.enemy_head_threshold));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.screen_width, 800);
        assert_eq!(settings.block_size, 50);
        assert_eq!(settings.player_speed, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "player_speed": 7, "gravity": 2 }"#).unwrap();
        assert_eq!(settings.player_speed, 7);
        assert_eq!(settings.gravity, 2);
        assert_eq!(settings.screen_height, SCREEN_HEIGHT);
    }

    #[test]
    fn test_rejects_inverted_scroll_limits() {
        let err = Settings::from_json(r#"{ "scroll_left_limit": 600, "scroll_right_limit": 500 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::ScrollLimits { left: 600, .. }));
    }

    #[test]
    fn test_rejects_dead_zone_narrower_than_player() {
        let err = Settings::from_json(r#"{ "scroll_left_limit": 200, "scroll_right_limit": 220 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::DeadZoneTooNarrow {
                zone: 20,
                player_width: 40
            }
        ));

        // Exactly the player's width still fits
        let settings = Settings {
            scroll_left_limit: 200,
            scroll_right_limit: 240,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bounce_stronger_than_jump() {
        let err = Settings::from_json(r#"{ "stomp_bounce": -25 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::BounceTooStrong { stomp_bounce: -25, .. }));
        let err = Settings::from_json(r#"{ "stomp_bounce": -20 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::BounceTooStrong { .. }));
    }

    #[test]
    fn test_rejects_negative_head_threshold() {
        let err = Settings::from_json(r#"{ "enemy_head_threshold": -1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::NegativeHeadThreshold(-1)));
        assert!(Settings::from_json(r#"{ "enemy_head_threshold": 0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let err = Settings::from_json(r#"{ "block_size": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::NotPositive {
                field: "block_size",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let err = Settings::from_json(r#"{ "jump_impulse": 5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::NotUpward { field: "jump_impulse", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
