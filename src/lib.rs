//! Robot Platformer - A side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scrolling, session state)
//! - `levels`: Data-driven level layout tables
//! - `settings`: Tuning constants, constructed once and passed by reference
//!
//! Rendering, audio and asset decoding live outside this crate. The core
//! consumes [`sim::InputEvent`]s and produces [`sim::RenderSnapshot`]s.

pub mod levels;
pub mod settings;
pub mod sim;

pub use levels::{LevelDef, PlatformStyle, Theme};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 500;
    /// Target frame rate of the external frame limiter
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (one tick per frame)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Side length of one layout cell
    pub const BLOCK_SIZE: i32 = 50;

    /// Player defaults
    pub const PLAYER_SPEED: i32 = 5;
    pub const PLAYER_WIDTH: i32 = 40;
    pub const PLAYER_HEIGHT: i32 = 50;

    /// Added to vertical velocity every tick (no terminal velocity)
    pub const GRAVITY: i32 = 1;
    /// Vertical velocity set by a jump from the ground
    pub const JUMP_IMPULSE: i32 = -20;
    /// Vertical velocity set after stomping an enemy
    pub const STOMP_BOUNCE: i32 = -10;

    /// Enemy defaults
    pub const ENEMY_SPEED: i32 = 2;
    pub const ENEMY_SIZE: i32 = 40;
    /// Contacts this many pixels below the enemy's top (or fewer) count as head hits
    pub const ENEMY_HEAD_THRESHOLD: i32 = 15;

    pub const COIN_SIZE: i32 = 20;
    pub const DOOR_WIDTH: i32 = 50;
    pub const DOOR_HEIGHT: i32 = 100;

    /// Horizontal dead zone (screen x) the player is kept inside by scrolling
    pub const SCROLL_LEFT_LIMIT: i32 = 200;
    pub const SCROLL_RIGHT_LIMIT: i32 = 500;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const COIN_POINTS: u64 = 10;
    pub const ENEMY_POINTS: u64 = 50;

    /// Ticks the player stays stunned after taking damage (1 second)
    pub const DAMAGE_STUN_TICKS: u32 = FPS;
    /// Ticks spent in the level transition
    pub const LEVEL_ADVANCE_TICKS: u32 = 1;
}
