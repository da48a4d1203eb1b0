//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, integer pixel coordinates
//! - Stable iteration order (spawn order, removal by id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod interaction;
pub mod level;
pub mod mask;
pub mod patrol;
pub mod player;
pub mod scroll;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{StaticContacts, mask_contact, move_and_collide};
pub use geometry::{Aabb, GeometryError};
pub use interaction::{EnemyContact, classify_enemy_contact, resolve_interactions};
pub use level::{Coin, Door, Enemy, Level, LevelFormatError, PatrolLimit, Platform};
pub use mask::{DEFAULT_ALPHA_THRESHOLD, Mask, MaskError, SpriteSet};
pub use patrol::patrol;
pub use player::{PlayerBody, integrate};
pub use scroll::scroll;
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GamePhase, Session, SessionError, SessionStats};
pub use tick::{InputEvent, Key, tick};
