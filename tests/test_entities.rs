use road_crossing::compute::new_player;
use road_crossing::config::GameConfig;
use road_crossing::entities::*;
use road_crossing::sprite::*;

use crossterm::style::Color;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Won);
    assert_ne!(Direction::Up, Direction::Down);
    assert_eq!(GameEvent::Crashed { enemy: 2 }, GameEvent::Crashed { enemy: 2 });
    assert_ne!(GameEvent::Crashed { enemy: 2 }, GameEvent::Wrapped { enemy: 2 });
}

#[test]
fn set_sprite_keeps_footprint() {
    let mut player = new_player(&GameConfig::default());
    player.set_footprint(90.0, 120.0);
    player.set_sprite(SpriteId::from("images/char-cat-girl.png"));

    assert_eq!(player.sprite().as_str(), "images/char-cat-girl.png");
    assert_eq!(player.footprint(), Footprint { width: 90.0, height: 120.0 });
}

#[test]
fn enemy_lane_is_floor_of_y_over_lane_height() {
    let enemy = Enemy {
        pos: Position { x: 0.0, y: 149.0 },
        footprint: Footprint::default(),
        sprite: SpriteId::from(ENEMY_BUG),
        lane_height: 75.0,
        speed: 40.0,
    };
    assert_eq!(enemy.lane(), 1);
}

#[test]
fn stagger_table_starts_at_zero_per_lane() {
    let mut table = StaggerTable::new(3);
    assert_eq!(table.lanes(), 3);
    assert!((1..=3).all(|lane| table.last_x(lane) == 0.0));

    table.record(3, -202.0);
    assert_eq!(table.last_x(3), -202.0);
    assert_eq!(table.last_x(1), 0.0);
}

struct FixedCache(Image);

impl ResourceCache for FixedCache {
    fn get(&self, _id: &SpriteId) -> &Image {
        &self.0
    }
}

struct NullSurface;

impl Surface for NullSurface {
    fn draw_image(&mut self, _image: &Image, _x: f32, _y: f32) -> std::io::Result<()> {
        Ok(())
    }

    fn canvas_width(&self) -> f32 {
        505.0
    }
}

struct BrokenSurface;

impl Surface for BrokenSurface {
    fn draw_image(&mut self, _image: &Image, _x: f32, _y: f32) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
    }

    fn canvas_width(&self) -> f32 {
        505.0
    }
}

fn image(width: f32, height: f32) -> Image {
    Image {
        width,
        height,
        art: vec!["@"],
        color: Color::White,
    }
}

#[test]
fn render_sets_footprint_from_image() {
    let mut player = new_player(&GameConfig::default());
    player
        .render(&FixedCache(image(70.0, 90.0)), &mut NullSurface)
        .unwrap();
    assert_eq!(player.footprint(), Footprint { width: 70.0, height: 90.0 });
}

#[test]
fn failed_draw_leaves_footprint_alone() {
    let mut player = new_player(&GameConfig::default());
    let before = player.footprint();
    let result = player.render(&FixedCache(image(70.0, 90.0)), &mut BrokenSurface);
    assert!(result.is_err());
    assert_eq!(player.footprint(), before);
}

#[test]
fn sprite_cache_falls_back_to_placeholder() {
    let cache = SpriteCache::with_builtin();
    let bug = cache.get(&SpriteId::from(ENEMY_BUG));
    assert_eq!((bug.width, bug.height), (101.0, 171.0));

    let unknown = SpriteId::from("images/rock.png");
    let placeholder = cache.get(&unknown);
    assert_eq!(placeholder, cache.get(&unknown));
    assert_ne!(placeholder, bug);
}

#[test]
fn preload_reports_missing_sprites_once() {
    let cache = SpriteCache::with_builtin();
    let rock = SpriteId::from("images/rock.png");
    let boy = SpriteId::from(CHAR_BOY);
    let missing = cache.preload([&boy, &rock, &rock]);
    assert_eq!(missing, vec![rock]);
}

#[test]
fn world_clone_is_independent() {
    let config = GameConfig::default();
    let original = World {
        player: new_player(&config),
        enemies: Vec::new(),
        lanes: StaggerTable::new(3),
        status: GameStatus::Playing,
        field_width: 505.0,
        frame: 0,
        events: Vec::new(),
        config,
    };
    let mut cloned = original.clone();

    cloned.player.cell.col = 4;
    cloned.lanes.record(1, -101.0);
    cloned.events.push(GameEvent::Won);

    assert_eq!(original.player.cell.col, 2);
    assert_eq!(original.lanes.last_x(1), 0.0);
    assert!(original.events.is_empty());
}
