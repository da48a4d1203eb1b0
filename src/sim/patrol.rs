//! Enemy patrol: constant speed, turn around at patrol limits

use super::level::{Enemy, PatrolLimit};

/// Move every enemy one step and flip those that touched a limit.
/// Returns how many enemies turned around.
pub fn patrol(enemies: &mut [Enemy], limits: &[PatrolLimit]) -> usize {
    let mut flips = 0;
    for enemy in enemies.iter_mut() {
        enemy.rect.translate_x(enemy.direction * enemy.speed);
        if limits.iter().any(|l| enemy.rect.overlaps(&l.rect)) {
            enemy.direction = -enemy.direction;
            flips += 1;
        }
    }
    flips
}
