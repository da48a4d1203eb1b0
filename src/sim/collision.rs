//! Collision detection and response
//!
//! Static geometry is resolved one axis at a time: move horizontally and push
//! out of walls, then move vertically and push out of floors and ceilings.
//! Dynamic pairs (player vs enemies, coins, door) use pixel masks.
//!
//! When several platforms overlap the player at once, candidates are visited
//! smallest penetration first (ties broken by position) and each one is
//! re-tested before clamping. The result is always the most restrictive clamp
//! and does not depend on the order platforms are stored in.

use glam::IVec2;

use super::geometry::Aabb;
use super::level::Platform;
use super::mask::Mask;
use super::player::PlayerBody;

/// What the static resolution touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticContacts {
    /// Stopped by a wall while moving horizontally
    pub blocked_x: bool,
    /// Fall stopped by a platform top
    pub landed: bool,
    /// Rise stopped by a platform bottom
    pub bumped_head: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Platforms overlapping `rect`, ordered by penetration depth along `axis`
fn overlapping_by_depth(rect: &Aabb, platforms: &[Platform], axis: Axis) -> Vec<Aabb> {
    let mut hits: Vec<(i32, Aabb)> = platforms
        .iter()
        .filter_map(|p| {
            rect.intersection(&p.rect).map(|overlap| {
                let depth = match axis {
                    Axis::Horizontal => overlap.width,
                    Axis::Vertical => overlap.height,
                };
                (depth, p.rect)
            })
        })
        .collect();
    hits.sort_by_key(|(depth, r)| (*depth, r.x, r.y));
    hits.into_iter().map(|(_, r)| r).collect()
}

/// Apply `vx` and push the player out of any wall it entered
pub fn resolve_horizontal(player: &mut PlayerBody, platforms: &[Platform]) -> bool {
    player.rect.translate_x(player.vx);
    let mut blocked = false;
    for wall in overlapping_by_depth(&player.rect, platforms, Axis::Horizontal) {
        if !player.rect.overlaps(&wall) {
            continue;
        }
        if player.vx > 0 {
            player.rect.set_right(wall.left());
            blocked = true;
        } else if player.vx < 0 {
            player.rect.set_left(wall.right());
            blocked = true;
        }
    }
    blocked
}

/// Apply `vy` and push the player out of floors/ceilings.
///
/// `on_ground` is recomputed from scratch: it is true afterwards only if a
/// fall was stopped this call. Any vertical hit zeroes `vy`.
pub fn resolve_vertical(player: &mut PlayerBody, platforms: &[Platform]) -> (bool, bool) {
    player.on_ground = false;
    player.rect.translate_y(player.vy);

    let vy = player.vy;
    let mut landed = false;
    let mut bumped = false;
    for block in overlapping_by_depth(&player.rect, platforms, Axis::Vertical) {
        if !player.rect.overlaps(&block) {
            continue;
        }
        if vy > 0 {
            player.rect.set_bottom(block.top());
            landed = true;
        } else if vy < 0 {
            player.rect.set_top(block.bottom());
            bumped = true;
        }
    }

    if landed || bumped {
        player.vy = 0;
    }
    player.on_ground = landed;
    (landed, bumped)
}

/// Move the player by its velocity against static platforms, horizontal axis first
pub fn move_and_collide(player: &mut PlayerBody, platforms: &[Platform]) -> StaticContacts {
    let blocked_x = resolve_horizontal(player, platforms);
    let (landed, bumped_head) = resolve_vertical(player, platforms);
    StaticContacts {
        blocked_x,
        landed,
        bumped_head,
    }
}

/// First pixel where two masks are both opaque, in screen coordinates.
///
/// Each mask is anchored at its box's top-left corner. The boxes are tested
/// first; the overlapping region is then scanned row by row, so the contact
/// returned is the topmost, then leftmost, shared pixel.
pub fn mask_contact(a_rect: &Aabb, a: &Mask, b_rect: &Aabb, b: &Mask) -> Option<IVec2> {
    let a_box = Aabb::new(a_rect.x, a_rect.y, a.width(), a.height());
    let b_box = Aabb::new(b_rect.x, b_rect.y, b.width(), b.height());
    let region = a_box.intersection(&b_box)?;

    for y in region.top()..region.bottom() {
        for x in region.left()..region.right() {
            if a.get(x - a_box.x, y - a_box.y) && b.get(x - b_box.x, y - b_box.y) {
                return Some(IVec2::new(x, y));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::PlatformStyle;
    use std::sync::Arc;

    fn platform(x: i32, y: i32, w: i32, h: i32) -> Platform {
        Platform {
            rect: Aabb::new(x, y, w, h),
            style: PlatformStyle::Flat,
        }
    }

    fn player_at(x: i32, y: i32) -> PlayerBody {
        let mut p = PlayerBody::new(Arc::new(Mask::filled(40, 50).unwrap()));
        p.rect.x = x;
        p.rect.y = y;
        p
    }

    #[test]
    fn test_wall_on_right_clamps_exactly() {
        // Moving right at speed 5 into a platform directly to the right
        let platforms = [platform(100, 0, 50, 100)];
        let mut p = player_at(58, 20);
        p.vx = 5;
        let contacts = move_and_collide(&mut p, &platforms);
        assert!(contacts.blocked_x);
        assert_eq!(p.rect.right(), 100);

        // Deeper tentative penetration still lands on the edge
        let mut p = player_at(59, 20);
        p.vx = 40;
        move_and_collide(&mut p, &platforms);
        assert_eq!(p.rect.right(), 100);
    }

    #[test]
    fn test_wall_on_left_clamps_exactly() {
        let platforms = [platform(0, 0, 50, 100)];
        let mut p = player_at(53, 20);
        p.vx = -5;
        move_and_collide(&mut p, &platforms);
        assert_eq!(p.rect.left(), 50);
    }

    #[test]
    fn test_free_fall_moves_by_velocity() {
        // Platform below with a gap: first tick falls by one gravity step
        let platforms = [platform(0, 450, 250, 50)];
        let mut p = player_at(5, 350);
        p.apply_gravity(1);
        let contacts = move_and_collide(&mut p, &platforms);
        assert_eq!(p.vy, 1);
        assert_eq!(p.rect.y, 351);
        assert!(!contacts.landed);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_landing_sets_ground_and_zeroes_vy() {
        let platforms = [platform(0, 450, 250, 50)];
        let mut p = player_at(5, 395);
        p.vy = 12;
        let contacts = move_and_collide(&mut p, &platforms);
        assert!(contacts.landed);
        assert!(p.on_ground);
        assert_eq!(p.vy, 0);
        assert_eq!(p.rect.bottom(), 450);
    }

    #[test]
    fn test_ceiling_bump_zeroes_vy_without_ground() {
        let platforms = [platform(0, 0, 250, 50)];
        let mut p = player_at(5, 60);
        p.vy = -20;
        p.on_ground = true;
        let contacts = move_and_collide(&mut p, &platforms);
        assert!(contacts.bumped_head);
        assert!(!p.on_ground);
        assert_eq!(p.vy, 0);
        assert_eq!(p.rect.top(), 50);
    }

    #[test]
    fn test_ground_flag_not_sticky() {
        let platforms = [platform(0, 450, 250, 50)];
        let mut p = player_at(5, 400);
        p.on_ground = true;
        // Walking off: vy 0 means no vertical hit this tick
        p.vy = 0;
        move_and_collide(&mut p, &platforms);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_multiple_walls_order_independent() {
        let a = platform(100, 0, 50, 100);
        let b = platform(110, 0, 50, 100);
        for platforms in [[a.clone(), b.clone()], [b.clone(), a.clone()]] {
            let mut p = player_at(55, 20);
            p.vx = 20;
            move_and_collide(&mut p, &platforms);
            assert_eq!(p.rect.right(), 100);
        }
    }

    #[test]
    fn test_multiple_floors_order_independent() {
        let low = platform(0, 460, 100, 40);
        let high = platform(30, 450, 100, 50);
        for platforms in [[low.clone(), high.clone()], [high.clone(), low.clone()]] {
            let mut p = player_at(20, 398);
            p.vy = 15;
            move_and_collide(&mut p, &platforms);
            assert_eq!(p.rect.bottom(), 450);
            assert!(p.on_ground);
        }
    }

    #[test]
    fn test_axis_separation_slides_along_floor() {
        // Diagonal move into a floor: horizontal motion is kept
        let platforms = [platform(0, 450, 500, 50)];
        let mut p = player_at(100, 398);
        p.vx = 5;
        p.vy = 10;
        move_and_collide(&mut p, &platforms);
        assert_eq!(p.rect.x, 105);
        assert_eq!(p.rect.bottom(), 450);
    }

    #[test]
    fn test_mask_contact_topmost_leftmost() {
        let a = Mask::filled(10, 10).unwrap();
        let b = Mask::filled(10, 10).unwrap();
        let contact = mask_contact(&Aabb::new(0, 0, 10, 10), &a, &Aabb::new(5, 7, 10, 10), &b);
        assert_eq!(contact, Some(IVec2::new(5, 7)));
    }

    #[test]
    fn test_mask_contact_respects_transparency() {
        // Two discs whose boxes overlap only at the transparent corners
        let disc = Mask::ellipse(20, 20).unwrap();
        let a = Aabb::new(0, 0, 20, 20);
        let b = Aabb::new(17, 17, 20, 20);
        assert!(a.overlaps(&b));
        assert_eq!(mask_contact(&a, &disc, &b, &disc), None);

        let c = Aabb::new(15, 0, 20, 20);
        assert!(mask_contact(&a, &disc, &c, &disc).is_some());
    }

    #[test]
    fn test_mask_contact_no_box_overlap() {
        let m = Mask::filled(10, 10).unwrap();
        assert_eq!(
            mask_contact(&Aabb::new(0, 0, 10, 10), &m, &Aabb::new(10, 0, 10, 10), &m),
            None
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn grid_platforms(cells: &[(i32, i32)]) -> Vec<Platform> {
            cells
                .iter()
                .map(|&(cx, cy)| platform(cx * 50, cy * 50, 50, 50))
                .collect()
        }

        proptest! {
            #[test]
            fn resolved_axes_never_overlap(
                cells in proptest::collection::vec((0i32..8, 0i32..8), 1..20),
                x in 0i32..360,
                y in 0i32..360,
                vx in -39i32..40,
                vy in -49i32..50,
            ) {
                let platforms = grid_platforms(&cells);
                let mut p = player_at(x, y);
                prop_assume!(platforms.iter().all(|pl| !pl.rect.overlaps(&p.rect)));
                p.vx = vx;
                p.vy = vy;

                resolve_horizontal(&mut p, &platforms);
                for pl in &platforms {
                    prop_assert!(!pl.rect.overlaps(&p.rect), "horizontal overlap with {:?}", pl.rect);
                }

                resolve_vertical(&mut p, &platforms);
                for pl in &platforms {
                    prop_assert!(!pl.rect.overlaps(&p.rect), "vertical overlap with {:?}", pl.rect);
                }
            }

            #[test]
            fn ground_flag_matches_landing(
                cells in proptest::collection::vec((0i32..8, 0i32..8), 1..20),
                x in 0i32..360,
                y in 0i32..360,
                vy in -49i32..50,
            ) {
                let platforms = grid_platforms(&cells);
                let mut p = player_at(x, y);
                prop_assume!(platforms.iter().all(|pl| !pl.rect.overlaps(&p.rect)));
                p.vy = vy;
                p.on_ground = true;

                let (landed, _) = resolve_vertical(&mut p, &platforms);
                prop_assert_eq!(p.on_ground, landed);
                if landed {
                    prop_assert!(vy > 0);
                    prop_assert!(platforms.iter().any(|pl| pl.rect.top() == p.rect.bottom()));
                }
            }
        }
    }
}
