//! Level geometry built from a layout table
//!
//! A `Level` owns every entity of the stage. Entities are created in bulk
//! when the level is built and the whole level is dropped on advance or
//! restart. Scrolling translates every member together, see [`Level::shift_world`].

use std::sync::Arc;

use glam::IVec2;
use thiserror::Error;

use super::geometry::{Aabb, GeometryError};
use super::mask::{Mask, SpriteSet};
use crate::levels::{LevelDef, PlatformStyle, Theme};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum LevelFormatError {
    #[error("level table is empty")]
    NoLevels,
    #[error("level '{name}' has no rows")]
    Empty { name: String },
    #[error("level '{name}' has no player spawn point 'P'")]
    MissingSpawn { name: String },
    #[error("level '{name}' has {count} player spawn points, expected exactly one")]
    MultipleSpawns { name: String, count: usize },
    #[error("level '{name}' has {count} doors, at most one is allowed")]
    MultipleDoors { name: String, count: usize },
    #[error("level '{name}': {source}")]
    Geometry {
        name: String,
        #[source]
        source: GeometryError,
    },
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Meaning of one layout character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Platform,
    Enemy,
    Coin,
    Limit,
    Spawn,
    Door,
    Empty,
}

impl Cell {
    pub fn from_char(c: char) -> Self {
        match c {
            'X' => Cell::Platform,
            'E' => Cell::Enemy,
            'C' => Cell::Coin,
            '#' => Cell::Limit,
            'P' => Cell::Spawn,
            'D' => Cell::Door,
            _ => Cell::Empty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Aabb,
    pub style: PlatformStyle,
}

/// Invisible marker that turns patrolling enemies around
#[derive(Debug, Clone)]
pub struct PatrolLimit {
    pub rect: Aabb,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Aabb,
    pub mask: Arc<Mask>,
    /// +1 moving right, -1 moving left
    pub direction: i32,
    pub speed: i32,
    /// Contacts at most this far below `rect.top()` hit the head
    pub top_limit: i32,
}

impl Enemy {
    pub fn facing_left(&self) -> bool {
        self.direction < 0
    }
}

#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub rect: Aabb,
    pub mask: Arc<Mask>,
}

#[derive(Debug, Clone)]
pub struct Door {
    pub rect: Aabb,
    pub mask: Arc<Mask>,
}

/// A loaded level
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub theme: Theme,
    pub platforms: Vec<Platform>,
    pub limits: Vec<PatrolLimit>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub door: Option<Door>,
    /// Sum of every horizontal translation applied since the level was built
    pub shift: i32,
    /// Where the player's bottom-center is placed on load and respawn
    pub player_start: IVec2,
    /// Width of the longest row in pixels
    pub width: i32,
    next_id: u32,
}

/// Sprite box whose bottom-center sits on the bottom-center of a cell
fn sprite_rect(cell: &Aabb, mask: &Mask) -> Aabb {
    let mut rect = Aabb::new(0, 0, mask.width(), mask.height());
    rect.set_mid_bottom(cell.mid_bottom());
    rect
}

impl Level {
    /// Build a level from its layout. Rows are laid out bottom to top, the
    /// last row resting on the bottom edge of the screen.
    pub fn build(
        def: &LevelDef,
        settings: &Settings,
        sprites: &SpriteSet,
    ) -> Result<Self, LevelFormatError> {
        let name = def.name.clone();
        if def.rows.iter().all(|r| r.is_empty()) {
            return Err(LevelFormatError::Empty { name });
        }

        let block = settings.block_size;
        let mut level = Level {
            name: name.clone(),
            theme: def.theme,
            platforms: Vec::new(),
            limits: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            door: None,
            shift: 0,
            player_start: IVec2::ZERO,
            width: 0,
            next_id: 1,
        };
        let mut spawns = Vec::new();
        let mut doors = 0usize;

        let mut cell_top = settings.screen_height;
        for row in def.rows.iter().rev() {
            cell_top -= block;
            for (col, c) in row.chars().enumerate() {
                let kind = Cell::from_char(c);
                if kind == Cell::Empty {
                    continue;
                }
                let cell = Aabb::checked(col as i32 * block, cell_top, block, block).map_err(
                    |source| LevelFormatError::Geometry {
                        name: name.clone(),
                        source,
                    },
                )?;

                match kind {
                    Cell::Platform => level.platforms.push(Platform {
                        rect: cell,
                        style: def.theme.platform_style,
                    }),
                    Cell::Limit => level.limits.push(PatrolLimit { rect: cell }),
                    Cell::Coin => level.push_coin(&cell, sprites),
                    Cell::Enemy => {
                        let id = level.next_entity_id();
                        level.enemies.push(Enemy {
                            id,
                            rect: sprite_rect(&cell, &sprites.enemy),
                            mask: Arc::clone(&sprites.enemy),
                            direction: 1,
                            speed: settings.enemy_speed,
                            top_limit: settings.enemy_head_threshold,
                        });
                        if def.coins_under_enemies {
                            level.push_coin(&cell, sprites);
                        }
                    }
                    Cell::Spawn => spawns.push(cell.mid_bottom()),
                    Cell::Door => {
                        doors += 1;
                        level.door = Some(Door {
                            rect: sprite_rect(&cell, &sprites.door),
                            mask: Arc::clone(&sprites.door),
                        });
                    }
                    Cell::Empty => {}
                }
            }
        }

        match spawns.as_slice() {
            [] => return Err(LevelFormatError::MissingSpawn { name }),
            [start] => level.player_start = *start,
            _ => {
                return Err(LevelFormatError::MultipleSpawns {
                    name,
                    count: spawns.len(),
                });
            }
        }
        if doors > 1 {
            return Err(LevelFormatError::MultipleDoors { name, count: doors });
        }

        let longest = def.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        level.width = longest as i32 * block;

        log::info!(
            "Built level '{}': {} platforms, {} enemies, {} coins, door: {}",
            level.name,
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len(),
            level.door.is_some()
        );
        Ok(level)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push_coin(&mut self, cell: &Aabb, sprites: &SpriteSet) {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            rect: sprite_rect(cell, &sprites.coin),
            mask: Arc::clone(&sprites.coin),
        });
    }

    /// Translate the whole level horizontally. Every collection, the door
    /// and the spawn point move together in one step.
    pub fn shift_world(&mut self, dx: i32) {
        if dx == 0 {
            return;
        }
        self.shift += dx;
        for platform in &mut self.platforms {
            platform.rect.translate_x(dx);
        }
        for limit in &mut self.limits {
            limit.rect.translate_x(dx);
        }
        for coin in &mut self.coins {
            coin.rect.translate_x(dx);
        }
        for enemy in &mut self.enemies {
            enemy.rect.translate_x(dx);
        }
        if let Some(door) = &mut self.door {
            door.rect.translate_x(dx);
        }
        self.player_start.x += dx;
    }

    /// Remove an enemy by id. Returns `None` if it was already removed.
    pub fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.swap_remove(index))
    }

    /// Remove a coin by id. Returns `None` if it was already collected.
    pub fn remove_coin(&mut self, id: u32) -> Option<Coin> {
        let index = self.coins.iter().position(|c| c.id == id)?;
        Some(self.coins.swap_remove(index))
    }
}
