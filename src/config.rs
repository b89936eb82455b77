/// Tunable game rules, loaded from TOML.
///
/// Every field has a default matching the classic board: a 505 px field,
/// three 75 px lanes of bugs, and a 5 × 6 grid of 101 × 75 px player cells.
/// A config file only needs to name the values it changes.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Largest grid the terminal front end can lay out.
pub const MAX_GRID_ROWS: usize = 100;
pub const MAX_GRID_COLS: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub enemy: EnemyConfig,
    pub player: PlayerConfig,
    /// Target frame period of the terminal front end.
    pub frame_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Canvas width in pixels; enemies wrap once they pass it.
    pub width: f32,
    pub height: f32,
    /// Entity width assumed before the first render reports a real one.
    pub default_width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    pub lanes: usize,
    pub lane_height: f32,
    /// Speed range in px/s, `min_speed` inclusive, `max_speed` exclusive.
    pub min_speed: u32,
    pub max_speed: u32,
    /// Spawn gap to the previous enemy of the same lane, in body widths.
    pub stagger_min: u32,
    pub stagger_max: u32,
    /// How many body widths left of the field a wrapped enemy restarts.
    pub wrap_offset_widths: f32,
    pub respawn: RespawnPolicy,
}

/// What an enemy redraws when it wraps around the right edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnPolicy {
    pub reassign_lane: bool,
    pub reroll_speed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub rows: usize,
    pub cols: usize,
    pub start_row: usize,
    pub start_col: usize,
    pub h_step: f32,
    pub v_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            enemy: EnemyConfig::default(),
            player: PlayerConfig::default(),
            frame_ms: 16,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 505.0,
            height: 606.0,
            default_width: 101.0,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 9,
            lanes: 3,
            lane_height: 75.0,
            min_speed: 30,
            max_speed: 80,
            stagger_min: 1,
            stagger_max: 3,
            wrap_offset_widths: 3.0,
            respawn: RespawnPolicy::default(),
        }
    }
}

impl Default for RespawnPolicy {
    fn default() -> Self {
        Self {
            reassign_lane: true,
            reroll_speed: false,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 5,
            start_row: 5,
            start_col: 2,
            h_step: 101.0,
            v_step: 75.0,
        }
    }
}

impl GameConfig {
    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let e = &self.enemy;
        let p = &self.player;

        ensure!(self.field.width > 0.0, "field.width must be positive");
        ensure!(
            self.field.default_width >= 0.0,
            "field.default_width must not be negative"
        );
        ensure!(e.lanes > 0, "enemy.lanes must be at least 1");
        ensure!(e.lane_height > 0.0, "enemy.lane_height must be positive");
        ensure!(
            e.min_speed < e.max_speed,
            "enemy speed range [{}, {}) is empty",
            e.min_speed,
            e.max_speed
        );
        ensure!(
            e.stagger_min >= 1 && e.stagger_min <= e.stagger_max,
            "enemy stagger range [{}, {}] must start at 1 or more and not be reversed",
            e.stagger_min,
            e.stagger_max
        );
        ensure!(p.rows > 0 && p.cols > 0, "player grid must be non-empty");
        ensure!(
            p.rows <= MAX_GRID_ROWS && p.cols <= MAX_GRID_COLS,
            "player grid {}x{} exceeds the {}x{} maximum",
            p.rows,
            p.cols,
            MAX_GRID_ROWS,
            MAX_GRID_COLS
        );
        ensure!(
            p.start_row < p.rows && p.start_col < p.cols,
            "player start cell ({}, {}) lies outside the {}x{} grid",
            p.start_row,
            p.start_col,
            p.rows,
            p.cols
        );
        ensure!(p.h_step > 0.0 && p.v_step > 0.0, "player steps must be positive");
        ensure!(self.frame_ms > 0, "frame_ms must be positive");
        Ok(())
    }
}
