//! Player interactions with enemies, coins, the door and the screen bottom
//!
//! Runs after movement has settled for the tick. Checks happen in a fixed
//! order: screen bottom, enemies, coins, door. Stomps and pickups in the same
//! tick both count; taking damage ends the pass for that tick.

use glam::IVec2;

use super::collision::mask_contact;
use super::level::Enemy;
use super::state::{GameEvent, GamePhase, Session};

/// How a player/enemy contact is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Landed on the head: enemy dies, player bounces
    Stomp,
    /// Anything else: player loses a life
    Damage,
}

/// Classify a contact point. A stomp needs the contact within the enemy's
/// head region and the player falling at the moment of contact.
pub fn classify_enemy_contact(contact: IVec2, enemy: &Enemy, player_vy: i32) -> EnemyContact {
    let offset = contact.y - enemy.rect.top();
    if offset <= enemy.top_limit && player_vy > 0 {
        EnemyContact::Stomp
    } else {
        EnemyContact::Damage
    }
}

/// Apply every interaction for this tick
pub fn resolve_interactions(session: &mut Session, events: &mut Vec<GameEvent>) {
    if session.player.rect.bottom() > session.settings.screen_height {
        log::debug!("Player fell off screen at x={}", session.player.rect.x);
        events.push(GameEvent::FellOffScreen);
        session.damage_player(events);
        return;
    }

    if resolve_enemies(session, events) {
        session.damage_player(events);
        return;
    }

    resolve_coins(session, events);

    let player = &session.player;
    let touching_door = session
        .level
        .door
        .as_ref()
        .is_some_and(|door| mask_contact(&player.rect, &player.mask, &door.rect, &door.mask).is_some());
    if touching_door && session.phase == GamePhase::Playing {
        session.begin_level_advance(events);
    }
}

/// Stomp every enemy hit on the head. Returns true if any contact hurts.
///
/// All contacts are classified with the fall speed from before any bounce,
/// so stomping one enemy does not turn a second simultaneous stomp into damage.
fn resolve_enemies(session: &mut Session, events: &mut Vec<GameEvent>) -> bool {
    let player = &session.player;
    let mut stomped = Vec::new();
    let mut hurt = false;
    for enemy in &session.level.enemies {
        let Some(contact) = mask_contact(&player.rect, &player.mask, &enemy.rect, &enemy.mask)
        else {
            continue;
        };
        match classify_enemy_contact(contact, enemy, player.vy) {
            EnemyContact::Stomp => stomped.push(enemy.id),
            EnemyContact::Damage => hurt = true,
        }
    }

    for id in &stomped {
        if session.level.remove_enemy(*id).is_some() {
            session.stats.score += session.settings.enemy_points;
            events.push(GameEvent::EnemyStomped { id: *id });
            log::debug!("Stomped enemy {id}");
        }
    }
    if !stomped.is_empty() {
        session.player.stomp_bounce(session.settings.stomp_bounce);
    }
    hurt
}

fn resolve_coins(session: &mut Session, events: &mut Vec<GameEvent>) {
    let player = &session.player;
    let touched: Vec<u32> = session
        .level
        .coins
        .iter()
        .filter(|coin| mask_contact(&player.rect, &player.mask, &coin.rect, &coin.mask).is_some())
        .map(|coin| coin.id)
        .collect();

    for id in touched {
        // Removal and award are one step: a coin already gone awards nothing
        if session.level.remove_coin(id).is_some() {
            session.stats.score += session.settings.coin_points;
            events.push(GameEvent::CoinCollected { id });
            log::debug!("Collected coin {id}");
        }
    }
}
