//! The player's body and the per-tick physics integrator
//!
//! Horizontal velocity is not integrated: it is derived from the movement
//! intent flags every tick. Vertical velocity integrates gravity with no
//! terminal velocity. Position is only changed by the collision resolver.

use std::sync::Arc;

use glam::IVec2;

use super::geometry::Aabb;
use super::mask::Mask;
use crate::settings::Settings;

/// The robot the player controls
#[derive(Debug, Clone)]
pub struct PlayerBody {
    pub rect: Aabb,
    pub mask: Arc<Mask>,
    pub vx: i32,
    pub vy: i32,
    /// True only on ticks where a fall was stopped by a platform top
    pub on_ground: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Last horizontal direction moved, for the renderer
    pub facing_left: bool,
}

impl PlayerBody {
    pub fn new(mask: Arc<Mask>) -> Self {
        Self {
            rect: Aabb::new(0, 0, mask.width(), mask.height()),
            mask,
            vx: 0,
            vy: 0,
            on_ground: false,
            moving_left: false,
            moving_right: false,
            facing_left: false,
        }
    }

    /// Reposition at a spawn point (bottom-center) and drop all momentum.
    /// Movement intents are kept so held keys keep working.
    pub fn place_at(&mut self, spawn: IVec2) {
        self.rect.set_mid_bottom(spawn);
        self.vx = 0;
        self.vy = 0;
        self.on_ground = false;
    }

    /// Set `vx` from the intent flags. Both or neither held means standing still.
    pub fn update_horizontal_velocity(&mut self, speed: i32) {
        self.vx = match (self.moving_left, self.moving_right) {
            (false, true) => speed,
            (true, false) => -speed,
            _ => 0,
        };
        if self.vx != 0 {
            self.facing_left = self.vx < 0;
        }
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: i32) {
        self.vy += gravity;
    }

    /// Jump if standing on a platform. Clears `on_ground` immediately so the
    /// same ground contact cannot be used twice.
    pub fn jump(&mut self, impulse: i32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = impulse;
        self.on_ground = false;
        true
    }

    /// Rebound after stomping an enemy
    pub fn stomp_bounce(&mut self, impulse: i32) {
        self.vy = impulse;
    }
}

/// Advance velocities for one tick. The tentative move is applied by
/// [`super::collision::move_and_collide`].
pub fn integrate(player: &mut PlayerBody, settings: &Settings) {
    player.update_horizontal_velocity(settings.player_speed);
    player.apply_gravity(settings.gravity);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerBody {
        PlayerBody::new(Arc::new(Mask::filled(40, 50).unwrap()))
    }

    #[test]
    fn test_horizontal_velocity_from_flags() {
        let mut p = player();
        p.update_horizontal_velocity(5);
        assert_eq!(p.vx, 0);

        p.moving_right = true;
        p.update_horizontal_velocity(5);
        assert_eq!(p.vx, 5);
        assert!(!p.facing_left);

        p.moving_left = true;
        p.update_horizontal_velocity(5);
        assert_eq!(p.vx, 0, "both keys held must not drift");

        p.moving_right = false;
        p.update_horizontal_velocity(5);
        assert_eq!(p.vx, -5);
        assert!(p.facing_left);
    }

    #[test]
    fn test_gravity_is_unbounded() {
        let mut p = player();
        for _ in 0..100 {
            p.apply_gravity(1);
        }
        assert_eq!(p.vy, 100);
    }

    #[test]
    fn test_jump_from_ground() {
        // Scenario: at rest on a platform, jump pressed
        let mut p = player();
        p.on_ground = true;
        assert!(p.jump(-20));
        assert_eq!(p.vy, -20);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_no_double_jump() {
        let mut p = player();
        p.on_ground = true;
        assert!(p.jump(-20));
        p.apply_gravity(1);
        assert!(!p.jump(-20));
        assert_eq!(p.vy, -19);
    }

    #[test]
    fn test_stomp_bounce_is_independent_of_jump() {
        let mut p = player();
        p.vy = 12;
        p.stomp_bounce(-10);
        assert_eq!(p.vy, -10);
    }

    #[test]
    fn test_place_at_resets_momentum() {
        let mut p = player();
        p.vx = 5;
        p.vy = 30;
        p.on_ground = true;
        p.moving_right = true;
        p.place_at(IVec2::new(100, 450));
        assert_eq!(p.rect, Aabb::new(80, 400, 40, 50));
        assert_eq!((p.vx, p.vy, p.on_ground), (0, 0, false));
        assert!(p.moving_right);
    }

    #[test]
    fn test_integrate_uses_settings() {
        let settings = Settings::default();
        let mut p = player();
        p.moving_left = true;
        integrate(&mut p, &settings);
        assert_eq!(p.vx, -settings.player_speed);
        assert_eq!(p.vy, settings.gravity);
    }
}
