//! Per-tick view of the session for an external renderer

use glam::IVec2;
use serde::Serialize;

use super::geometry::Aabb;
use super::state::{GamePhase, Session, SessionStats};
use crate::levels::{PlatformStyle, Theme};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Aabb,
    pub facing_left: bool,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub rect: Aabb,
    pub style: PlatformStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpriteView {
    pub id: u32,
    pub rect: Aabb,
    pub facing_left: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub stats: SessionStats,
    pub level_name: String,
    pub theme: Theme,
    pub shift: i32,
    /// Full level width in pixels, for parallax and progress display
    pub level_width: i32,
    /// Respawn point (bottom-center) in current screen coordinates
    pub spawn: IVec2,
    /// Non-zero while the player is stunned after damage
    pub stun_ticks: u32,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub enemies: Vec<SpriteView>,
    pub coins: Vec<SpriteView>,
    pub door: Option<Aabb>,
}

impl Session {
    pub fn snapshot(&self) -> RenderSnapshot {
        let level = &self.level;
        RenderSnapshot {
            phase: self.phase,
            stats: self.stats,
            level_name: level.name.clone(),
            theme: level.theme,
            shift: level.shift,
            level_width: level.width,
            spawn: level.player_start,
            stun_ticks: self.stun_ticks,
            player: PlayerView {
                rect: self.player.rect,
                facing_left: self.player.facing_left,
                on_ground: self.player.on_ground,
            },
            platforms: level
                .platforms
                .iter()
                .map(|p| PlatformView {
                    rect: p.rect,
                    style: p.style,
                })
                .collect(),
            enemies: level
                .enemies
                .iter()
                .map(|e| SpriteView {
                    id: e.id,
                    rect: e.rect,
                    facing_left: e.facing_left(),
                })
                .collect(),
            coins: level
                .coins
                .iter()
                .map(|c| SpriteView {
                    id: c.id,
                    rect: c.rect,
                    facing_left: false,
                })
                .collect(),
            door: level.door.as_ref().map(|d| d.rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::levels::default_levels;
    use crate::settings::Settings;
    use crate::sim::Session;

    #[test]
    fn test_snapshot_mirrors_level() {
        let s = Session::new(Settings::default(), default_levels()).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.platforms.len(), s.level.platforms.len());
        assert_eq!(snap.enemies.len(), s.level.enemies.len());
        assert_eq!(snap.coins.len(), s.level.coins.len());
        assert!(snap.door.is_some());
        assert_eq!(snap.player.rect, s.player.rect);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let s = Session::new(Settings::default(), default_levels()).unwrap();
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["phase"], "MainMenu");
        assert_eq!(json["stats"]["lives"], 3);
        assert_eq!(json["level_name"], "Green Hills");
        assert!(json["platforms"].as_array().is_some_and(|p| !p.is_empty()));
        assert_eq!(json["level_width"], s.level.width);
        assert_eq!(json["spawn"][0], s.level.player_start.x);
        assert_eq!(json["spawn"][1], s.level.player_start.y);
    }

    #[test]
    fn test_snapshot_spawn_follows_scroll() {
        let mut s = Session::new(Settings::default(), default_levels()).unwrap();
        let before = s.snapshot();
        s.level.shift_world(-30);
        let after = s.snapshot();
        assert_eq!(after.spawn.x, before.spawn.x - 30);
        assert_eq!(after.level_width, before.level_width);
        assert_eq!(after.shift, before.shift - 30);
    }
}
