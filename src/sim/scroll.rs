//! Side scrolling by moving the world
//!
//! The camera never moves. When the player leaves the horizontal dead zone
//! the player is clamped back to its edge and the whole level is translated
//! by the overflow instead.

use super::level::Level;
use super::player::PlayerBody;
use crate::settings::Settings;

/// Keep the player inside `[scroll_left_limit, scroll_right_limit]`.
///
/// Returns the shift applied to the level (negative when the world moves left).
pub fn scroll(player: &mut PlayerBody, level: &mut Level, settings: &Settings) -> i32 {
    let right_limit = settings.scroll_right_limit;
    let left_limit = settings.scroll_left_limit;

    let shift = if player.rect.right() >= right_limit {
        let overflow = player.rect.right() - right_limit;
        player.rect.set_right(right_limit);
        -overflow
    } else if player.rect.left() <= left_limit {
        let overflow = left_limit - player.rect.left();
        player.rect.set_left(left_limit);
        overflow
    } else {
        0
    };

    level.shift_world(shift);
    shift
}
