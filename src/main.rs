//! Headless demo: an autopilot plays the standard dungeon and prints a summary.
//!
//! Usage: `room-crawler [balance.json] [seed]`

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use glam::Vec2;

use room_crawler::entity::Combatant;
use room_crawler::factory::BOSS_ROOM_ID;
use room_crawler::input::InputState;
use room_crawler::{BalanceConfig, Direction, Dungeon, GameLogger, ScoreTracker};

const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60 * 3;
/// How close an enemy must be before the autopilot turns to fight it
const ENGAGE_RANGE: f32 = 220.0;
/// Per-axis dead zone when steering, so the autopilot does not jitter
const STEER_SLACK: f32 = 4.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => BalanceConfig::load(Path::new(&path))?,
        None => BalanceConfig::default(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => 7,
    };

    let mut dungeon = Dungeon::standard(config, seed)?;
    let score = Rc::new(RefCell::new(ScoreTracker::new()));
    dungeon.events_mut().subscribe(Box::new(Rc::clone(&score)));
    dungeon.events_mut().subscribe(Box::new(GameLogger::new(false)));

    let mut frames = 0;
    while frames < MAX_FRAMES && !dungeon.is_over() && !boss_room_cleared(&dungeon) {
        let input = steer(&dungeon);
        dungeon.update(FRAME, &input);
        frames += 1;
        if frames % 600 == 0 {
            log::info!(
                "t={:.0}s room {} health {}",
                frames as f32 * FRAME,
                dungeon.current_room_id(),
                dungeon.player().health()
            );
        }
    }

    let player = dungeon.player();
    let score = score.borrow();
    let outcome = if boss_room_cleared(&dungeon) {
        "victory"
    } else if dungeon.is_over() {
        "defeat"
    } else {
        "out of time"
    };
    println!("outcome:          {outcome} after {:.1}s", frames as f32 * FRAME);
    println!("final room:       {}", dungeon.current_room_id());
    println!("health:           {}/{}", player.health(), player.stats().max_health());
    println!("attack damage:    {}", player.stats().attack_damage);
    println!("keys / gold:      {} / {}", player.keys(), player.gold());
    println!("enemies killed:   {}", score.enemies_killed);
    println!("items collected:  {}", score.items_collected);
    println!("rooms cleared:    {}", score.rooms_cleared);
    println!("score gold:       {}", score.gold);
    if let Some(notice) = dungeon.notice() {
        println!("last message:     {notice}");
    }

    dungeon.dispose();
    Ok(())
}

fn boss_room_cleared(dungeon: &Dungeon) -> bool {
    dungeon
        .rooms()
        .all()
        .any(|room| room.id() == BOSS_ROOM_ID && room.is_cleared())
}

/// Decide this frame's input: fight nearby enemies, then sweep up items,
/// then head for the door on the route to the boss room.
fn steer(dungeon: &Dungeon) -> InputState {
    let mut input = InputState::new();
    let Some(room) = dungeon.current_room() else {
        return input;
    };
    let player = dungeon.player();
    let here = player.hitbox().center();

    let nearest_enemy = room
        .enemies()
        .iter()
        .filter(|e| !e.is_dead())
        .map(|e| e.hitbox().center())
        .min_by(|a, b| a.distance(here).total_cmp(&b.distance(here)));
    if let Some(target) = nearest_enemy {
        if target.distance(here) < ENGAGE_RANGE || room.id() == BOSS_ROOM_ID {
            push_towards(&mut input, here, target);
            input.attack_pressed = true;
            return input;
        }
    }

    let nearest_item = room
        .items()
        .iter()
        .filter(|i| !i.is_collected())
        .map(|i| i.hitbox().center())
        .min_by(|a, b| a.distance(here).total_cmp(&b.distance(here)));
    if let Some(target) = nearest_item {
        push_towards(&mut input, here, target);
        return input;
    }

    if let Some(next) = dungeon.next_room_toward(BOSS_ROOM_ID) {
        if let Some(door) = room.doors().find(|d| d.target() == next) {
            // Aim past the door centre so the player keeps pushing into it
            let (dx, dy) = door.direction().offset();
            let target = door.hitbox().center() + Vec2::new(dx as f32, dy as f32) * 100.0;
            push_towards(&mut input, here, target);
        }
    }
    input
}

fn push_towards(input: &mut InputState, from: Vec2, to: Vec2) {
    let delta = to - from;
    if delta.x > STEER_SLACK {
        input.press(Direction::East);
    } else if delta.x < -STEER_SLACK {
        input.press(Direction::West);
    }
    if delta.y > STEER_SLACK {
        input.press(Direction::North);
    } else if delta.y < -STEER_SLACK {
        input.press(Direction::South);
    }
}
