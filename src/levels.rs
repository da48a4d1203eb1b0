//! Data-driven level layouts
//!
//! A level is a grid of single-character cells, one block per cell. Rows are
//! listed top to bottom as they appear on screen; the last row sits on the
//! bottom edge of the screen. Cell codes:
//!
//! | code | meaning                  |
//! |------|--------------------------|
//! | `X`  | platform block           |
//! | `E`  | enemy                    |
//! | `C`  | coin                     |
//! | `#`  | enemy patrol limit       |
//! | `P`  | player spawn point       |
//! | `D`  | door to the next level   |
//!
//! Anything else is empty space. Rows may have different lengths.

use serde::{Deserialize, Serialize};

use crate::sim::LevelFormatError;

/// How platform blocks are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformStyle {
    /// Solid fill in the block color
    #[default]
    Flat,
    /// Brick/pattern texture tinted with the block color
    Pattern,
}

/// Per-level colors and platform style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: [u8; 3],
    pub block: [u8; 3],
    pub platform_style: PlatformStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: [42, 135, 191],
            block: [18, 102, 79],
            platform_style: PlatformStyle::Flat,
        }
    }
}

/// One entry of the level table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    /// Layout rows, top row first
    pub rows: Vec<String>,
    #[serde(default)]
    pub theme: Theme,
    /// Also place a coin under every enemy (collectable once it is stomped)
    #[serde(default)]
    pub coins_under_enemies: bool,
}

impl LevelDef {
    pub fn new(name: &str, rows: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            theme: Theme::default(),
            coins_under_enemies: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_coins_under_enemies(mut self) -> Self {
        self.coins_under_enemies = true;
        self
    }
}

/// Parse a level table from JSON (an array of level definitions)
pub fn from_json(json: &str) -> Result<Vec<LevelDef>, LevelFormatError> {
    let levels: Vec<LevelDef> = serde_json::from_str(json)?;
    if levels.is_empty() {
        return Err(LevelFormatError::NoLevels);
    }
    Ok(levels)
}

/// The built-in level table
pub fn default_levels() -> Vec<LevelDef> {
    vec![
        LevelDef::new(
            "Green Hills",
            &[
                "",
                "                 C  C  C",
                "              XXXXXXXXXXX           C C",
                "                                 XXXXXXX",
                "  P      C     #   E     #                  D",
                "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX    XXXXXXXXXXXXXXX",
            ],
        ),
        LevelDef::new(
            "Crystal Caves",
            &[
                "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
                "",
                "                        C C",
                "                     XXXXXXXX",
                "             C                 #  E   E  #",
                "   P    #  E    #            XXXXXXXXXXXXX        D",
                "XXXXXXXXXXXXXXXXXXXX    XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
            ],
        )
        .with_theme(Theme {
            background: [30, 24, 48],
            block: [120, 96, 160],
            platform_style: PlatformStyle::Pattern,
        })
        .with_coins_under_enemies(),
        LevelDef::new(
            "Summit",
            &[
                "",
                "                                    C",
                "                               XXXXXXXXX",
                "                  #  E  #                      C    #   E  #",
                "          C     XXXXXXXXXXX      XXXX      XXXXXXXXXXXXXXXXXXX",
                "  P     XXXX                                                        D",
                "XXXXXXXXXXXXXX     XXXXXXXXX     XXXXXXX   XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
            ],
        )
        .with_theme(Theme {
            background: [200, 220, 240],
            block: [90, 90, 100],
            platform_style: PlatformStyle::Pattern,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_have_one_spawn_each() {
        for level in default_levels() {
            let spawns: usize = level.rows.iter().map(|r| r.matches('P').count()).sum();
            assert_eq!(spawns, 1, "{}", level.name);
        }
    }

    #[test]
    fn test_from_json_applies_theme_default() {
        let json = r#"[{ "name": "tiny", "rows": ["P  D", "XXXX"] }]"#;
        let levels = from_json(json).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].theme, Theme::default());
        assert!(!levels[0].coins_under_enemies);
    }

    #[test]
    fn test_from_json_rejects_empty_table() {
        assert!(matches!(from_json("[]"), Err(LevelFormatError::NoLevels)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(from_json("{"), Err(LevelFormatError::Json(_))));
    }
}
