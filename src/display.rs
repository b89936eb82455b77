/// Terminal front end for the road: border, lanes, HUD and the win overlay.
///
/// The field is drawn in pixel space by the game core; `Canvas` projects
/// those pixels onto character cells.  One grid column is `CHARS_PER_COL`
/// characters wide and one lane is `ROWS_PER_LANE` rows tall.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use road_crossing::compute::render_entities;
use road_crossing::config::GameConfig;
use road_crossing::entities::{GameEvent, GameStatus, World};
use road_crossing::sprite::{Image, ResourceCache, Surface};

const CHARS_PER_COL: u16 = 10;
const ROWS_PER_LANE: u16 = 2;

/// Top-left terminal cell of the play field (inside the border).
const FIELD_LEFT: u16 = 1;
const FIELD_TOP: u16 = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_WATER: Color = Color::DarkBlue;
const C_ROAD: Color = Color::DarkGrey;
const C_GRASS: Color = Color::DarkGreen;

// ── Pixel → cell projection ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Layout {
    cols: u16,
    rows: u16,
    px_per_char: f32,
    px_per_row: f32,
    road_lanes: usize,
}

impl Layout {
    fn new(config: &GameConfig) -> Self {
        Layout {
            cols: (config.player.cols as u16).saturating_mul(CHARS_PER_COL),
            rows: (config.player.rows as u16).saturating_mul(ROWS_PER_LANE),
            px_per_char: config.player.h_step / CHARS_PER_COL as f32,
            px_per_row: config.player.v_step / ROWS_PER_LANE as f32,
            road_lanes: config.enemy.lanes,
        }
    }

    fn background(&self, row: u16) -> Color {
        match (row / ROWS_PER_LANE) as usize {
            0 => C_WATER,
            lane if lane <= self.road_lanes => C_ROAD,
            _ => C_GRASS,
        }
    }
}

/// Terminal drawing surface for the game core.
pub struct Canvas<'a, W: Write> {
    out: &'a mut W,
    layout: Layout,
    field_width: f32,
}

impl<'a, W: Write> Canvas<'a, W> {
    pub fn new(out: &'a mut W, config: &GameConfig) -> Self {
        Canvas {
            out,
            layout: Layout::new(config),
            field_width: config.field.width,
        }
    }
}

impl<W: Write> Surface for Canvas<'_, W> {
    fn draw_image(&mut self, image: &Image, x: f32, y: f32) -> std::io::Result<()> {
        let l = self.layout;
        let col0 = (x / l.px_per_char).floor() as i32;
        let row0 = (y / l.px_per_row).floor() as i32;

        for (i, line) in image.art.iter().enumerate() {
            let row = row0 + i as i32;
            if row < 0 || row >= l.rows as i32 {
                continue;
            }
            // Clip against both side walls; enemies spend time off-field.
            let skip = (-col0).max(0);
            let visible: String = line
                .chars()
                .enumerate()
                .filter(|(j, _)| {
                    let c = col0 + *j as i32;
                    c >= 0 && c < l.cols as i32
                })
                .map(|(_, ch)| ch)
                .collect();
            if visible.is_empty() {
                continue;
            }

            let col = (col0 + skip) as u16;
            self.out
                .queue(cursor::MoveTo(FIELD_LEFT + col, FIELD_TOP + row as u16))?;
            self.out
                .queue(style::SetBackgroundColor(l.background(row as u16)))?;
            self.out.queue(style::SetForegroundColor(image.color))?;
            self.out.queue(Print(visible))?;
        }
        self.out.queue(style::ResetColor)?;
        Ok(())
    }

    fn canvas_width(&self) -> f32 {
        self.field_width
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `overlay` shows the win banner on top.
pub fn render<W: Write>(
    out: &mut W,
    state: &mut World,
    cache: &dyn ResourceCache,
    overlay: bool,
) -> std::io::Result<()> {
    let layout = Layout::new(&state.config);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &layout)?;
    draw_hud(out, &layout, state)?;
    draw_background(out, &layout)?;

    {
        let mut canvas = Canvas::new(out, &state.config);
        render_entities(state, cache, &mut canvas)?;
    }

    draw_controls_hint(out, &layout)?;

    if overlay {
        draw_win_overlay(out, &layout)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FIELD_TOP + layout.rows + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let w = layout.cols as usize;
    let bottom = FIELD_TOP + layout.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in FIELD_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FIELD_LEFT + layout.cols, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Lanes ─────────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let blank = " ".repeat(layout.cols as usize);
    for row in 0..layout.rows {
        out.queue(cursor::MoveTo(FIELD_LEFT, FIELD_TOP + row))?;
        out.queue(style::SetBackgroundColor(layout.background(row)))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, layout: &Layout, state: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("ROAD CROSSING"))?;

    let goal = match state.status {
        GameStatus::Playing => "Reach the water!",
        GameStatus::Won => "★ Safe! ★",
    };
    let gx = (FIELD_LEFT + layout.cols).saturating_sub(goal.chars().count() as u16);
    out.queue(cursor::MoveTo(gx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(goal))?;
    Ok(())
}

// ── Controls hint (below the field) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, FIELD_TOP + layout.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Move   Q : Quit"))?;
    Ok(())
}

// ── Win overlay ───────────────────────────────────────────────────────────────

const OVERLAY_LINES: &[(&str, Color)] = &[
    ("╔══════════════════════════╗", Color::Green),
    ("║        YOU  WIN!         ║", Color::Green),
    ("╚══════════════════════════╝", Color::Green),
    ("Click or press R to continue", Color::White),
];

/// Terminal-cell rectangle, used for hit-testing clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.col
            && row >= self.row
            && col - self.col < self.width
            && row - self.row < self.height
    }
}

fn overlay_rect(layout: &Layout) -> Rect {
    let width = OVERLAY_LINES
        .iter()
        .map(|(msg, _)| msg.chars().count() as u16)
        .max()
        .unwrap_or(0);
    let height = OVERLAY_LINES.len() as u16;
    let cx = FIELD_LEFT + layout.cols / 2;
    Rect {
        col: cx.saturating_sub(width / 2),
        row: (FIELD_TOP + layout.rows / 2).saturating_sub(height / 2),
        width,
        height,
    }
}

/// Where the win banner sits for this config; clicks inside it restart.
pub fn win_overlay_rect(config: &GameConfig) -> Rect {
    overlay_rect(&Layout::new(config))
}

/// Overlay visibility after a batch of game events: `Won` shows it,
/// `Restarted` hides it, anything else leaves it as it was.
pub fn overlay_after(shown: bool, events: &[GameEvent]) -> bool {
    events.iter().fold(shown, |shown, event| match event {
        GameEvent::Won => true,
        GameEvent::Restarted => false,
        _ => shown,
    })
}

fn draw_win_overlay<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let rect = overlay_rect(layout);
    let cx = rect.col + rect.width / 2;

    for (i, (msg, color)) in OVERLAY_LINES.iter().enumerate() {
        let row = rect.row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    out.queue(style::ResetColor)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_rect_is_centred_on_the_field() {
        // Default grid: 5 columns x 10 chars, 6 lanes x 2 rows
        let rect = win_overlay_rect(&GameConfig::default());
        assert_eq!(rect, Rect { col: 12, row: 6, width: 28, height: 4 });
    }

    #[test]
    fn clicks_inside_the_overlay_hit_it() {
        let rect = win_overlay_rect(&GameConfig::default());
        assert!(rect.contains(12, 6));
        assert!(rect.contains(39, 9));
        assert!(rect.contains(25, 7));
    }

    #[test]
    fn clicks_outside_the_overlay_miss_it() {
        let rect = win_overlay_rect(&GameConfig::default());
        assert!(!rect.contains(11, 7));
        assert!(!rect.contains(40, 7));
        assert!(!rect.contains(25, 5));
        assert!(!rect.contains(25, 10));
        assert!(!rect.contains(0, 0));
    }

    #[test]
    fn won_shows_and_restarted_hides_the_overlay() {
        assert!(overlay_after(false, &[GameEvent::Won]));
        assert!(!overlay_after(true, &[GameEvent::Restarted]));
        assert!(overlay_after(true, &[GameEvent::Wrapped { enemy: 0 }]));
        assert!(!overlay_after(false, &[]));
        assert!(!overlay_after(false, &[GameEvent::Won, GameEvent::Restarted]));
    }

    #[test]
    fn huge_grids_saturate_instead_of_overflowing() {
        let mut config = GameConfig::default();
        config.player.cols = 10_000;
        config.player.rows = 40_000;
        let layout = Layout::new(&config);
        assert_eq!(layout.cols, u16::MAX);
        assert_eq!(layout.rows, u16::MAX);
    }
}
