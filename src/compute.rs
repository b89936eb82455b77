/// Game-logic functions.
///
/// Every public state transition takes an immutable reference to the current
/// `World` (and, where needed, an RNG handle) and returns a brand-new `World`.
/// Side effects are limited to the injected RNG.  The one exception is
/// `render_entities`: drawing is what teaches each entity its footprint.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{EnemyConfig, GameConfig};
use crate::entities::{
    Direction, Enemy, Entity, Footprint, GameEvent, GameStatus, GridCell, Player, Position,
    StaggerTable, World,
};
use crate::sprite::{ResourceCache, SpriteId, Surface, CHAR_BOY, ENEMY_BUG};

// ── Spawn rules ──────────────────────────────────────────────────────────────

/// Uniform lane in `1..=lanes`.
pub fn roll_lane(config: &EnemyConfig, rng: &mut impl Rng) -> usize {
    rng.gen_range(1..=config.lanes)
}

/// Vertical position of a freshly drawn lane.
pub fn init_y(config: &EnemyConfig, rng: &mut impl Rng) -> f32 {
    roll_lane(config, rng) as f32 * config.lane_height
}

/// Starting x for a new enemy in `lane`: one to three body widths left of the
/// previous spawn in that lane.  Records the result in the table.
pub fn init_x(
    lanes: &mut StaggerTable,
    lane: usize,
    width: f32,
    config: &EnemyConfig,
    rng: &mut impl Rng,
) -> f32 {
    let offset = rng.gen_range(config.stagger_min..=config.stagger_max);
    let x = lanes.last_x(lane) - offset as f32 * width;
    lanes.record(lane, x);
    x
}

/// Uniform integer speed in `[min_speed, max_speed)` px/s.
pub fn roll_speed(config: &EnemyConfig, rng: &mut impl Rng) -> f32 {
    rng.gen_range(config.min_speed..config.max_speed) as f32
}

pub fn spawn_enemy(config: &GameConfig, lanes: &mut StaggerTable, rng: &mut impl Rng) -> Enemy {
    let ec = &config.enemy;
    let footprint = Footprint {
        width: config.field.default_width,
        height: 0.0,
    };
    let lane = roll_lane(ec, rng);
    let y = lane as f32 * ec.lane_height;
    let x = init_x(lanes, lane, footprint.width, ec, rng);
    Enemy {
        pos: Position { x, y },
        footprint,
        sprite: SpriteId::from(ENEMY_BUG),
        lane_height: ec.lane_height,
        speed: roll_speed(ec, rng),
    }
}

pub fn new_player(config: &GameConfig) -> Player {
    let pc = &config.player;
    let start = GridCell {
        row: pc.start_row,
        col: pc.start_col,
    };
    let player = Player {
        pos: Position::default(),
        footprint: Footprint {
            width: config.field.default_width,
            height: 0.0,
        },
        sprite: SpriteId::from(CHAR_BOY),
        cell: start,
        start,
        rows: pc.rows,
        cols: pc.cols,
        h_step: pc.h_step,
        v_step: pc.v_step,
    };
    project(&player)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: `enemy.count` staggered enemies and the player on
/// the start cell.  `field_width` is the surface's right boundary.
pub fn init_state(config: &GameConfig, field_width: f32, rng: &mut impl Rng) -> World {
    let mut lanes = StaggerTable::new(config.enemy.lanes);
    let enemies = (0..config.enemy.count)
        .map(|_| spawn_enemy(config, &mut lanes, rng))
        .collect();

    World {
        player: new_player(config),
        enemies,
        lanes,
        status: GameStatus::Playing,
        field_width,
        frame: 0,
        events: Vec::new(),
        config: config.clone(),
    }
}

// ── Enemy motion ─────────────────────────────────────────────────────────────

/// Advance one enemy by `dt` seconds.  Returns the new enemy and whether it
/// wrapped around the right edge this frame.
pub fn update_enemy(
    enemy: &Enemy,
    dt: f32,
    field_width: f32,
    config: &EnemyConfig,
    rng: &mut impl Rng,
) -> (Enemy, bool) {
    let mut next = enemy.clone();
    next.pos.x += next.speed * dt;

    if next.pos.x <= field_width {
        return (next, false);
    }

    next.pos.x = -config.wrap_offset_widths * next.footprint.width;
    if config.respawn.reassign_lane {
        next.pos.y = init_y(config, rng);
    }
    if config.respawn.reroll_speed {
        next.speed = roll_speed(config, rng);
    }
    (next, true)
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Recompute the pixel position from the grid cell.
pub fn project(player: &Player) -> Player {
    Player {
        pos: Position {
            x: player.cell.col as f32 * player.h_step,
            y: player.cell.row as f32 * player.v_step,
        },
        ..player.clone()
    }
}

/// Index of the first enemy touching the player, if any.
///
/// Only enemies in the player's lane count.  An enemy on the player's left
/// hits within half the enemy's width; one on the right hits within half the
/// player's width.
pub fn detect_crash(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let px = player.pos.x;
    let lane = player.lane();

    enemies.iter().position(|enemy| {
        if enemy.lane() != lane {
            return false;
        }
        let ex = enemy.pos.x;
        if ex < px && px - ex < enemy.footprint.width / 2.0 {
            return true;
        }
        ex > px && ex - px < player.footprint.width / 2.0
    })
}

/// Player half of a frame: project, collide, check for the win.
fn update_player(
    player: &Player,
    enemies: &[Enemy],
    status: GameStatus,
    events: &mut Vec<GameEvent>,
) -> (Player, GameStatus) {
    let mut player = project(player);

    if let Some(enemy) = detect_crash(&player, enemies) {
        debug!(enemy, row = player.cell.row, col = player.cell.col, "player crashed");
        player.cell = player.start;
        player = project(&player);
        events.push(GameEvent::Crashed { enemy });
    }

    let mut status = status;
    if player.cell.row == 0 && status == GameStatus::Playing {
        info!(col = player.cell.col, "player reached the far side");
        status = GameStatus::Won;
        events.push(GameEvent::Won);
    }

    (player, status)
}

/// Move the player one cell.  Ignored after a win, and at the grid edges.
pub fn handle_input(state: &World, direction: Option<Direction>) -> World {
    let Some(direction) = direction else {
        return state.clone();
    };
    if state.status == GameStatus::Won {
        return state.clone();
    }

    let p = &state.player;
    let mut cell = p.cell;
    match direction {
        Direction::Left if cell.col > 0 => cell.col -= 1,
        Direction::Right if cell.col + 1 < p.cols => cell.col += 1,
        Direction::Up if cell.row > 0 => cell.row -= 1,
        Direction::Down if cell.row + 1 < p.rows => cell.row += 1,
        _ => {}
    }

    World {
        player: Player {
            cell,
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Leave the won state and put the player back on the start cell.
pub fn restart(state: &World) -> World {
    if state.status != GameStatus::Won {
        return state.clone();
    }
    debug!(frame = state.frame, "restarting round");

    let player = project(&Player {
        cell: state.player.start,
        ..state.player.clone()
    });
    World {
        player,
        status: GameStatus::Playing,
        events: vec![GameEvent::Restarted],
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ────────────────────────────

/// Advance the simulation by `dt` seconds: every enemy first, then the player
/// against the enemies' new positions.
pub fn tick(state: &World, dt: f32, rng: &mut impl Rng) -> World {
    let dt = dt.max(0.0);
    let mut events = Vec::new();

    let mut enemies = Vec::with_capacity(state.enemies.len());
    for (i, enemy) in state.enemies.iter().enumerate() {
        let (next, wrapped) =
            update_enemy(enemy, dt, state.field_width, &state.config.enemy, rng);
        if wrapped {
            debug!(enemy = i, lane = next.lane(), "enemy wrapped");
            events.push(GameEvent::Wrapped { enemy: i });
        }
        enemies.push(next);
    }

    let (player, status) = update_player(&state.player, &enemies, state.status, &mut events);

    World {
        player,
        enemies,
        status,
        frame: state.frame + 1,
        events,
        ..state.clone()
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Draw every entity in fixed order: enemies, then the player.
pub fn render_entities(
    state: &mut World,
    cache: &dyn ResourceCache,
    surface: &mut dyn Surface,
) -> std::io::Result<()> {
    for enemy in &mut state.enemies {
        enemy.render(cache, surface)?;
    }
    state.player.render(cache, surface)
}
