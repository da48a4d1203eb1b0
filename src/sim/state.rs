//! Session state and phase transitions
//!
//! The session owns everything mutable: the player, the current level and
//! the stats. It is advanced only by [`super::tick`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::level::{Level, LevelFormatError};
use super::mask::{MaskError, SpriteSet};
use super::player::PlayerBody;
use crate::levels::LevelDef;
use crate::settings::{Settings, SettingsError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start action
    MainMenu,
    /// Active gameplay
    Playing,
    /// Door reached, next level loads when the countdown ends
    LevelAdvance,
    /// Out of lives or out of levels
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub lives: u32,
    pub score: u64,
    pub level_index: usize,
}

/// Something that happened during a tick, for audio/UI/logging layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Jumped,
    EnemyStomped { id: u32 },
    CoinCollected { id: u32 },
    FellOffScreen,
    PlayerDamaged { lives_left: u32 },
    Respawned,
    LevelAdvanced { index: usize },
    GameCompleted,
    GameOver { score: u64 },
    ReturnedToMenu,
    QuitRequested,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Mask(#[from] MaskError),
    #[error(transparent)]
    Level(#[from] LevelFormatError),
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub sprites: SpriteSet,
    /// Every level built once up front; loading clones a fresh copy
    templates: Vec<Level>,
    pub level: Level,
    pub player: PlayerBody,
    pub stats: SessionStats,
    pub phase: GamePhase,
    /// Ticks left before the respawn after damage (gameplay frozen while > 0)
    pub stun_ticks: u32,
    /// Ticks left in `LevelAdvance`
    pub advance_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub quit_requested: bool,
}

impl Session {
    /// Create a session with placeholder sprite masks sized from settings
    pub fn new(settings: Settings, levels: Vec<LevelDef>) -> Result<Self, SessionError> {
        settings.validate()?;
        let sprites = SpriteSet::from_settings(&settings)?;
        Self::with_sprites(settings, levels, sprites)
    }

    /// Create a session with masks derived from real sprite images.
    ///
    /// Every level is built here so malformed layouts fail before play starts.
    pub fn with_sprites(
        settings: Settings,
        levels: Vec<LevelDef>,
        sprites: SpriteSet,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        if levels.is_empty() {
            return Err(LevelFormatError::NoLevels.into());
        }
        let templates = levels
            .iter()
            .map(|def| Level::build(def, &settings, &sprites))
            .collect::<Result<Vec<_>, _>>()?;

        let level = templates[0].clone();
        let mut player = PlayerBody::new(sprites.player.clone());
        player.place_at(level.player_start);

        Ok(Self {
            stats: SessionStats {
                lives: settings.starting_lives,
                score: 0,
                level_index: 0,
            },
            settings,
            sprites,
            templates,
            level,
            player,
            phase: GamePhase::MainMenu,
            stun_ticks: 0,
            advance_ticks: 0,
            time_ticks: 0,
            quit_requested: false,
        })
    }

    pub fn level_count(&self) -> usize {
        self.templates.len()
    }

    /// Replace the current level with a fresh copy and put the player on its spawn
    fn load_level(&mut self, index: usize) {
        self.level = self.templates[index].clone();
        self.stats.level_index = index;
        self.player.place_at(self.level.player_start);
        log::info!("Loaded level {} '{}'", index + 1, self.level.name);
    }

    /// MainMenu -> Playing, with fresh stats and the first level
    pub fn start(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::MainMenu {
            return;
        }
        self.stats = SessionStats {
            lives: self.settings.starting_lives,
            score: 0,
            level_index: 0,
        };
        self.stun_ticks = 0;
        self.advance_ticks = 0;
        self.load_level(0);
        self.phase = GamePhase::Playing;
        events.push(GameEvent::SessionStarted);
        log::info!("Session started with {} lives", self.stats.lives);
    }

    /// GameOver -> MainMenu
    pub fn return_to_menu(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::MainMenu;
        events.push(GameEvent::ReturnedToMenu);
    }

    /// Lose a life. With lives left the player is stunned and respawns when
    /// the stun runs out; otherwise the session ends.
    pub fn damage_player(&mut self, events: &mut Vec<GameEvent>) {
        self.stats.lives = self.stats.lives.saturating_sub(1);
        events.push(GameEvent::PlayerDamaged {
            lives_left: self.stats.lives,
        });
        log::debug!("Player damaged, {} lives left", self.stats.lives);

        if self.stats.lives == 0 {
            self.game_over(events);
            return;
        }

        self.stun_ticks = self.settings.damage_stun_ticks;
        self.player.vx = 0;
        self.player.vy = 0;
        if self.stun_ticks == 0 {
            self.respawn(events);
        }
    }

    pub(crate) fn respawn(&mut self, events: &mut Vec<GameEvent>) {
        self.player.place_at(self.level.player_start);
        events.push(GameEvent::Respawned);
    }

    /// Door reached: start the transition, or finish the game after the last level
    pub fn begin_level_advance(&mut self, events: &mut Vec<GameEvent>) {
        if self.stats.level_index + 1 < self.templates.len() {
            self.phase = GamePhase::LevelAdvance;
            self.advance_ticks = self.settings.level_advance_ticks.max(1);
            log::info!("Level {} complete", self.stats.level_index + 1);
        } else {
            log::info!("Final level complete");
            events.push(GameEvent::GameCompleted);
            self.game_over(events);
        }
    }

    pub(crate) fn finish_level_advance(&mut self, events: &mut Vec<GameEvent>) {
        let next = self.stats.level_index + 1;
        self.load_level(next);
        self.phase = GamePhase::Playing;
        events.push(GameEvent::LevelAdvanced { index: next });
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        self.stun_ticks = 0;
        events.push(GameEvent::GameOver {
            score: self.stats.score,
        });
        log::info!(
            "Game over: score {} on level {}",
            self.stats.score,
            self.stats.level_index + 1
        );
    }
}
