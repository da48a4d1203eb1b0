//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one step:
//! input -> physics -> static collision -> scroll -> patrol -> interactions.

use glam::IVec2;

use super::collision::move_and_collide;
use super::interaction::resolve_interactions;
use super::patrol::patrol;
use super::player::integrate;
use super::scroll::scroll;
use super::state::{GameEvent, GamePhase, Session};

/// Logical keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    /// Start from the menu / return to the menu after game over
    Confirm,
}

/// Discrete input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Click/tap in screen coordinates, hit-tested against menu buttons
    PointerClick { x: i32, y: i32 },
    Quit,
}

/// Advance the session by one fixed step. Returns what happened.
pub fn tick(session: &mut Session, input: &[InputEvent]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let phase_before = session.phase;

    // Input is always consumed, even while stunned
    for event in input {
        handle_input(session, *event, &mut events);
    }
    // Menu transitions take the whole tick; play starts on the next one
    if session.quit_requested || session.phase != phase_before {
        return events;
    }

    session.time_ticks += 1;

    match session.phase {
        GamePhase::MainMenu | GamePhase::GameOver => {}

        GamePhase::LevelAdvance => {
            session.advance_ticks = session.advance_ticks.saturating_sub(1);
            if session.advance_ticks == 0 {
                session.finish_level_advance(&mut events);
            }
        }

        GamePhase::Playing => {
            if session.stun_ticks > 0 {
                session.stun_ticks -= 1;
                if session.stun_ticks == 0 {
                    session.respawn(&mut events);
                }
                return events;
            }

            let settings = &session.settings;
            integrate(&mut session.player, settings);
            move_and_collide(&mut session.player, &session.level.platforms);
            scroll(&mut session.player, &mut session.level, settings);
            patrol(&mut session.level.enemies, &session.level.limits);
            resolve_interactions(session, &mut events);
        }
    }

    events
}

fn handle_input(session: &mut Session, event: InputEvent, events: &mut Vec<GameEvent>) {
    match event {
        InputEvent::KeyDown(Key::Left) => session.player.moving_left = true,
        InputEvent::KeyUp(Key::Left) => session.player.moving_left = false,
        InputEvent::KeyDown(Key::Right) => session.player.moving_right = true,
        InputEvent::KeyUp(Key::Right) => session.player.moving_right = false,

        InputEvent::KeyDown(Key::Jump) => {
            if session.phase == GamePhase::Playing
                && session.stun_ticks == 0
                && session.player.jump(session.settings.jump_impulse)
            {
                events.push(GameEvent::Jumped);
            }
        }
        InputEvent::KeyUp(Key::Jump) | InputEvent::KeyUp(Key::Confirm) => {}

        InputEvent::KeyDown(Key::Confirm) => match session.phase {
            GamePhase::MainMenu => session.start(events),
            GamePhase::GameOver => session.return_to_menu(events),
            _ => {}
        },

        InputEvent::PointerClick { x, y } => {
            let point = IVec2::new(x, y);
            match session.phase {
                GamePhase::MainMenu if session.settings.play_button.contains_point(point) => {
                    session.start(events)
                }
                GamePhase::GameOver if session.settings.menu_button.contains_point(point) => {
                    session.return_to_menu(events)
                }
                _ => {}
            }
        }

        InputEvent::Quit => {
            if session.stun_ticks > 0 {
                log::warn!("Quit requested while stunned");
            }
            session.quit_requested = true;
            events.push(GameEvent::QuitRequested);
        }
    }
}
