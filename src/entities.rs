/// All game entity types.  Behaviour lives in `compute`; the only logic here
/// is the `Entity` capability set shared by everything drawn on the field.

use crate::config::GameConfig;
use crate::sprite::{ResourceCache, SpriteId, Surface};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Visual size in pixels, taken from the sprite image at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
}

/// Things that happened during the most recent `tick` or `restart`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player touched enemy `enemy` and went back to the start cell.
    Crashed { enemy: usize },
    /// The player reached the top row.  The front end shows its overlay.
    Won,
    /// Enemy `enemy` left the right edge and re-entered from the left.
    Wrapped { enemy: usize },
    Restarted,
}

// ── Shared capability set ─────────────────────────────────────────────────────

pub trait Entity {
    fn position(&self) -> Position;
    fn footprint(&self) -> Footprint;
    fn sprite(&self) -> &SpriteId;
    fn set_sprite(&mut self, id: SpriteId);
    fn set_footprint(&mut self, width: f32, height: f32);

    /// Draw the sprite at the current position, then adopt the image's
    /// natural size as the footprint.
    fn render(
        &mut self,
        cache: &dyn ResourceCache,
        surface: &mut dyn Surface,
    ) -> std::io::Result<()> {
        let image = cache.get(self.sprite());
        let Position { x, y } = self.position();
        surface.draw_image(image, x, y)?;
        self.set_footprint(image.width, image.height);
        Ok(())
    }
}

macro_rules! impl_entity {
    ($ty:ty) => {
        impl Entity for $ty {
            fn position(&self) -> Position {
                self.pos
            }

            fn footprint(&self) -> Footprint {
                self.footprint
            }

            fn sprite(&self) -> &SpriteId {
                &self.sprite
            }

            fn set_sprite(&mut self, id: SpriteId) {
                self.sprite = id;
            }

            fn set_footprint(&mut self, width: f32, height: f32) {
                self.footprint = Footprint { width, height };
            }
        }
    };
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Position,
    pub footprint: Footprint,
    pub sprite: SpriteId,
    pub lane_height: f32,
    /// Pixels per second, always positive.
    pub speed: f32,
}

impl Enemy {
    /// Lane index derived from the vertical position (1-based on the road).
    pub fn lane(&self) -> i64 {
        (self.pos.y / self.lane_height).floor() as i64
    }
}

impl_entity!(Enemy);

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Position,
    pub footprint: Footprint,
    pub sprite: SpriteId,
    /// Authoritative position; `pos` is only its projection.
    pub cell: GridCell,
    pub start: GridCell,
    pub rows: usize,
    pub cols: usize,
    pub h_step: f32,
    pub v_step: f32,
}

impl Player {
    pub fn lane(&self) -> i64 {
        (self.pos.y / self.v_step).floor() as i64
    }
}

impl_entity!(Player);

// ── Stagger table ─────────────────────────────────────────────────────────────

/// Most recently assigned spawn x per lane.  Lanes are 1-based; every lane
/// starts at 0 so the first enemy of a lane spawns just left of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerTable {
    last_x: Vec<f32>,
}

impl StaggerTable {
    pub fn new(lanes: usize) -> Self {
        StaggerTable {
            last_x: vec![0.0; lanes],
        }
    }

    pub fn lanes(&self) -> usize {
        self.last_x.len()
    }

    pub fn last_x(&self, lane: usize) -> f32 {
        self.last_x[lane - 1]
    }

    pub fn record(&mut self, lane: usize, x: f32) {
        self.last_x[lane - 1] = x;
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One game session.  Owns every entity and the spawn bookkeeping, so two
/// worlds never share stagger state.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    /// Update and draw order.
    pub enemies: Vec<Enemy>,
    pub lanes: StaggerTable,
    pub status: GameStatus,
    /// Wraparound boundary, normally the canvas width.
    pub field_width: f32,
    pub frame: u64,
    /// Raised by the last `tick` or `restart`.  The front end shows the win
    /// overlay on `Won` and hides it on `Restarted`.
    pub events: Vec<GameEvent>,
    pub config: GameConfig,
}
