//! Rooms: containers of enemies, items and up to four doors, with the
//! visited/cleared lifecycle and clear rewards.

use glam::Vec2;
use rand::{Rng, RngCore};

use crate::ai::StrategyContext;
use crate::config::BalanceConfig;
use crate::door::Door;
use crate::enemy::Enemy;
use crate::entity::{Combatant, Entity};
use crate::events::EventBus;
use crate::geometry::Direction;
use crate::item::{Item, ItemKind};
use crate::player::Player;
use crate::render::{Drawable, Sprite, Surface};

pub type RoomId = u32;

/// Lifecycle of a room. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoomState {
    Unvisited,
    Visited,
    Cleared,
}

/// Short gameplay message for a HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    DoorLocked { direction: Direction },
    DoorUnlocked { direction: Direction },
    ItemCollected { item: ItemKind, value: u32 },
    RoomCleared { room: RoomId, rewards: u32 },
    EnteredRoom { room: RoomId },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::DoorLocked { .. } => write!(f, "This door is locked. You need a key!"),
            Notice::DoorUnlocked { .. } => write!(f, "Door unlocked with a key!"),
            Notice::ItemCollected { item, value } => match item {
                ItemKind::HealthPotion => write!(f, "You found a {}! +{} health.", item.name(), value),
                ItemKind::DamageBoost => write!(f, "You found an {}! +{} damage.", item.name(), value),
                ItemKind::Key => write!(f, "You found a {}!", item.name()),
                ItemKind::GoldCoin => write!(f, "You found {} gold.", value),
            },
            Notice::RoomCleared { rewards, .. } => write!(f, "Room cleared! {} rewards appeared!", rewards),
            Notice::EnteredRoom { room } => write!(f, "Entered room {}", room),
        }
    }
}

/// Everything a room needs from its owner for one update.
pub struct RoomContext<'a> {
    pub dt: f32,
    pub config: &'a BalanceConfig,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventBus,
}

#[derive(Debug)]
pub struct Room {
    id: RoomId,
    size: Vec2,
    enemies: Vec<Enemy>,
    items: Vec<Item>,
    doors: [Option<Door>; 4],
    visited: bool,
    cleared: bool,
    disposed: bool,
}

impl Room {
    pub fn new(id: RoomId, size: Vec2) -> Self {
        Self {
            id,
            size,
            enemies: Vec::new(),
            items: Vec::new(),
            doors: [None, None, None, None],
            visited: false,
            cleared: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn state(&self) -> RoomState {
        if self.cleared {
            RoomState::Cleared
        } else if self.visited {
            RoomState::Visited
        } else {
            RoomState::Unvisited
        }
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_item(&mut self, mut item: Item) {
        item.keep_within(self.size);
        self.items.push(item);
    }

    /// Put a door in the slot for its wall. Returns the door it replaced.
    pub fn set_door(&mut self, door: Door) -> Option<Door> {
        let slot = door.direction().index();
        self.doors[slot].replace(door)
    }

    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.doors[direction.index()].as_ref()
    }

    pub fn door_mut(&mut self, direction: Direction) -> Option<&mut Door> {
        self.doors[direction.index()].as_mut()
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter().flatten()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_dead()).count()
    }

    /// One tick of room logic, in order: mark visited, resolve the player's
    /// strike, run enemies, animate and collect items, check for the clear,
    /// then test doors. Returns the notices raised this tick.
    pub fn update(&mut self, player: &mut Player, ctx: &mut RoomContext<'_>) -> Vec<Notice> {
        puffin::profile_function!();
        let mut notices = Vec::new();
        if self.disposed {
            return notices;
        }

        if !self.visited {
            self.visited = true;
            log::debug!("room {} visited", self.id);
        }

        self.resolve_strike(player, ctx);
        self.update_enemies(player, ctx);
        self.update_items(player, ctx, &mut notices);

        if let Some(rewards) = self.check_cleared(ctx) {
            notices.push(Notice::RoomCleared {
                room: self.id,
                rewards,
            });
        }

        self.check_doors(player, ctx, &mut notices);
        notices
    }

    fn resolve_strike(&mut self, player: &mut Player, ctx: &mut RoomContext<'_>) {
        let Some(damage) = player.take_strike() else {
            return;
        };
        let reach = player.hitbox();
        let mut drops = Vec::new();

        for enemy in self.enemies.iter_mut() {
            if enemy.is_dead() || enemy.is_disposed() || !enemy.hitbox().overlaps(&reach) {
                continue;
            }
            enemy.take_damage(damage);
            log::trace!("player hits {} for {}", enemy.kind().name(), damage);
            if enemy.is_dead() {
                ctx.events.notify_enemy_defeated(self.id, enemy.kind(), enemy.gold_value());
                if let Some(kind) = enemy.roll_drop(&ctx.config.drops, &mut *ctx.rng) {
                    log::debug!("{} dropped {}", enemy.kind().name(), kind.name());
                    drops.push(Item::new(kind, enemy.position(), &ctx.config.items));
                }
            }
        }
        for item in drops {
            self.add_item(item);
        }
    }

    fn update_enemies(&mut self, player: &mut Player, ctx: &mut RoomContext<'_>) {
        for enemy in self.enemies.iter_mut() {
            if enemy.is_dead() || enemy.is_disposed() {
                continue;
            }
            enemy.update(ctx.dt);
            let mut strategy_ctx = StrategyContext {
                dt: ctx.dt,
                player: player.position(),
                bounds: self.size,
                rng: &mut *ctx.rng,
            };
            if let Some(damage) = enemy.act(player, &mut strategy_ctx) {
                ctx.events.notify_player_damaged(enemy.kind(), damage, player.health());
            }
        }
    }

    fn update_items(&mut self, player: &mut Player, ctx: &mut RoomContext<'_>, notices: &mut Vec<Notice>) {
        let reach = player.hitbox();
        for item in self.items.iter_mut() {
            item.update(ctx.dt);
            if item.touches(&reach) && item.collect() {
                let value = item.apply_to(player, &ctx.config.items);
                log::info!("collected {} in room {}", item.kind().name(), self.id);
                ctx.events.notify_item_collected(self.id, item.kind(), value);
                notices.push(Notice::ItemCollected {
                    item: item.kind(),
                    value,
                });
            }
        }
    }

    /// Flip to cleared the first time every enemy is dead, spawning rewards.
    /// Returns the number of rewards spawned, or `None` if nothing changed.
    pub fn check_cleared(&mut self, ctx: &mut RoomContext<'_>) -> Option<u32> {
        if self.cleared || self.enemies.iter().any(|e| !e.is_dead()) {
            return None;
        }
        self.cleared = true;
        let rewards = self.generate_rewards(ctx.config, &mut *ctx.rng);
        log::info!("room {} cleared, {} rewards", self.id, rewards);
        ctx.events.notify_room_cleared(self.id, rewards);
        Some(rewards)
    }

    fn generate_rewards(&mut self, config: &BalanceConfig, rng: &mut dyn RngCore) -> u32 {
        let rewards = &config.rewards;
        let count = rng.gen_range(rewards.min_count..=rewards.max_count);
        let room = (self.size - Vec2::splat(config.items.size)).max(Vec2::ZERO);

        let mut spawned = 0;
        for _ in 0..count {
            let position = Vec2::new(rng.gen::<f32>() * room.x, rng.gen::<f32>() * room.y);
            if let Some(kind) = rewards.table.roll(rng) {
                self.add_item(Item::new(kind, position, &config.items));
                spawned += 1;
            }
        }
        spawned
    }

    fn check_doors(&mut self, player: &mut Player, ctx: &mut RoomContext<'_>, notices: &mut Vec<Notice>) {
        let reach = player.hitbox();
        for door in self.doors.iter_mut().flatten() {
            if !door.touches(&reach) {
                continue;
            }
            let direction = door.direction();
            if !door.is_locked() {
                player.request_transition(direction);
            } else if player.use_key() {
                door.unlock();
                log::info!("room {}: {} door unlocked with a key", self.id, direction);
                ctx.events.notify_door_unlocked(self.id, direction, door.target());
                notices.push(Notice::DoorUnlocked { direction });
            } else {
                log::debug!("room {}: {} door is locked", self.id, direction);
                notices.push(Notice::DoorLocked { direction });
            }
        }
    }

    /// Background, doors, items, then living enemies.
    pub fn render(&self, surface: &mut dyn Surface) {
        if self.disposed {
            return;
        }
        surface.draw(Drawable {
            sprite: Sprite::RoomBackground { room: self.id },
            position: Vec2::ZERO,
            size: self.size,
        });
        for door in self.doors() {
            door.render(surface);
        }
        for item in &self.items {
            item.render(surface);
        }
        for enemy in &self.enemies {
            enemy.render(surface);
        }
    }

    /// Tear down every owned entity. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_disposed()) {
            enemy.dispose();
        }
        for item in self.items.iter_mut().filter(|i| !i.is_disposed()) {
            item.dispose();
        }
        for door in self.doors.iter_mut().flatten() {
            door.dispose();
        }
        self.disposed = true;
        log::trace!("room {} disposed", self.id);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Follower;
    use crate::enemy::EnemyKind;
    use crate::events::ScoreTracker;
    use crate::input::InputState;
    use crate::render::RenderList;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        config: BalanceConfig,
        rng: StdRng,
        events: EventBus,
        score: Rc<RefCell<ScoreTracker>>,
    }

    impl Harness {
        fn new() -> Self {
            let mut events = EventBus::new();
            let score = Rc::new(RefCell::new(ScoreTracker::new()));
            events.subscribe(Box::new(Rc::clone(&score)));
            Self {
                config: BalanceConfig::default(),
                rng: StdRng::seed_from_u64(7),
                events,
                score,
            }
        }

        fn tick(&mut self, room: &mut Room, player: &mut Player, dt: f32) -> Vec<Notice> {
            let mut ctx = RoomContext {
                dt,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
            };
            room.update(player, &mut ctx)
        }

        fn check_cleared(&mut self, room: &mut Room) -> Option<u32> {
            let mut ctx = RoomContext {
                dt: 0.0,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
            };
            room.check_cleared(&mut ctx)
        }
    }

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn zombie(config: &BalanceConfig, at: Vec2) -> Enemy {
        Enemy::new(
            EnemyKind::Zombie,
            at,
            config.enemies.stats(EnemyKind::Zombie),
            Box::new(Follower::new(config.ai.follow_range)),
        )
    }

    fn player_at(config: &BalanceConfig, at: Vec2) -> Player {
        Player::new(at, &config.player)
    }

    #[test]
    fn test_first_update_marks_visited() {
        let mut h = Harness::new();
        let mut room = Room::new(0, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::ZERO));
        let mut player = player_at(&h.config, Vec2::new(600.0, 400.0));
        assert_eq!(room.state(), RoomState::Unvisited);
        h.tick(&mut room, &mut player, 0.016);
        assert_eq!(room.state(), RoomState::Visited);
    }

    #[test]
    fn test_reward_generation_is_one_shot() {
        let mut h = Harness::new();
        let mut room = Room::new(1, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::ZERO));
        assert_eq!(h.check_cleared(&mut room), None, "a live enemy remains");

        room.enemies_mut()[0].take_damage(u32::MAX);
        let rewards = h.check_cleared(&mut room).expect("clears once");
        assert!((1..=3).contains(&rewards));
        let items = room.items().len();

        for _ in 0..5 {
            assert_eq!(h.check_cleared(&mut room), None);
        }
        assert_eq!(room.items().len(), items);
        assert_eq!(h.score.borrow().rooms_cleared, 1);
        assert!(room.is_cleared());
    }

    #[test]
    fn test_rewards_spawn_inside_room() {
        for seed in 0..20 {
            let mut h = Harness::new();
            h.rng = StdRng::seed_from_u64(seed);
            let mut room = Room::new(0, BOUNDS);
            h.check_cleared(&mut room);
            for item in room.items() {
                let p = item.position();
                assert!(p.x >= 0.0 && p.x <= BOUNDS.x - item.size().x);
                assert!(p.y >= 0.0 && p.y <= BOUNDS.y - item.size().y);
            }
        }
    }

    #[test]
    fn test_strike_kills_and_reports() {
        let mut h = Harness::new();
        let mut room = Room::new(2, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::new(300.0, 300.0)));
        let mut player = player_at(&h.config, Vec2::new(320.0, 300.0));
        player.increase_damage(1_000);

        player.advance(1.0, &InputState::attacking(), BOUNDS);
        let notices = h.tick(&mut room, &mut player, 0.016);

        assert_eq!(room.living_enemies(), 0);
        assert!(room.is_cleared());
        assert_eq!(h.score.borrow().enemies_killed, 1);
        assert_eq!(h.score.borrow().rooms_cleared, 1);
        assert!(notices.iter().any(|n| matches!(n, Notice::RoomCleared { room: 2, .. })));
        assert_eq!(player.take_strike(), None);
    }

    #[test]
    fn test_strike_misses_distant_enemies() {
        let mut h = Harness::new();
        let mut room = Room::new(0, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::new(650.0, 450.0)));
        let mut player = player_at(&h.config, Vec2::ZERO);
        player.advance(1.0, &InputState::attacking(), BOUNDS);
        h.tick(&mut room, &mut player, 0.016);
        assert_eq!(room.enemies()[0].health(), h.config.enemies.zombie.health);
        assert_eq!(player.take_strike(), None, "strike consumed even on a miss");
    }

    #[test]
    fn test_item_collected_once() {
        let mut h = Harness::new();
        let mut room = Room::new(0, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::new(650.0, 450.0)));
        room.add_item(Item::new(ItemKind::GoldCoin, Vec2::new(50.0, 50.0), &h.config.items));
        let mut player = player_at(&h.config, Vec2::ZERO);

        let notices = h.tick(&mut room, &mut player, 0.016);
        assert_eq!(player.gold(), h.config.items.gold_coin_value);
        assert!(notices.contains(&Notice::ItemCollected {
            item: ItemKind::GoldCoin,
            value: h.config.items.gold_coin_value,
        }));

        h.tick(&mut room, &mut player, 0.016);
        assert_eq!(player.gold(), h.config.items.gold_coin_value);
        assert_eq!(h.score.borrow().items_collected, 1);
    }

    #[test]
    fn test_locked_door_needs_key() {
        let mut h = Harness::new();
        let mut room = Room::new(2, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::new(0.0, 0.0)));
        room.set_door(Door::on_wall(Direction::East, 3, true, BOUNDS, &h.config.world));
        let mut player = player_at(&h.config, Vec2::new(672.0, 236.0));

        let notices = h.tick(&mut room, &mut player, 0.016);
        assert!(notices.contains(&Notice::DoorLocked {
            direction: Direction::East
        }));
        assert_eq!(player.transition_request(), None);

        player.add_key();
        let notices = h.tick(&mut room, &mut player, 0.016);
        assert!(notices.contains(&Notice::DoorUnlocked {
            direction: Direction::East
        }));
        assert_eq!(player.keys(), 0);
        assert_eq!(player.transition_request(), None, "unlocking takes the whole touch");

        h.tick(&mut room, &mut player, 0.016);
        assert_eq!(player.transition_request(), Some(Direction::East));
    }

    #[test]
    fn test_render_order_and_skips() {
        let h = Harness::new();
        let mut room = Room::new(4, BOUNDS);
        room.set_door(Door::on_wall(Direction::North, 1, false, BOUNDS, &h.config.world));
        room.add_item(Item::new(ItemKind::Key, Vec2::new(10.0, 10.0), &h.config.items));
        room.add_enemy(zombie(&h.config, Vec2::new(300.0, 300.0)));
        let mut dead = zombie(&h.config, Vec2::new(500.0, 300.0));
        dead.take_damage(u32::MAX);
        room.add_enemy(dead);

        let mut list = RenderList::new();
        room.render(&mut list);
        let sprites: Vec<_> = list.iter().map(|d| d.sprite).collect();
        assert_eq!(sprites.len(), 4);
        assert!(matches!(sprites[0], Sprite::RoomBackground { room: 4 }));
        assert!(matches!(sprites[1], Sprite::Door { .. }));
        assert!(matches!(sprites[2], Sprite::Item { .. }));
        assert!(matches!(sprites[3], Sprite::Enemy { .. }));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let h = Harness::new();
        let mut room = Room::new(0, BOUNDS);
        room.add_enemy(zombie(&h.config, Vec2::ZERO));
        room.set_door(Door::on_wall(Direction::West, 1, false, BOUNDS, &h.config.world));
        room.dispose();
        room.dispose();
        assert!(room.is_disposed());
        assert!(room.enemies()[0].is_disposed());

        let mut list = RenderList::new();
        room.render(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_dispose_with_already_disposed_children() {
        let h = Harness::new();
        let mut room = Room::new(0, BOUNDS);

        let mut gone = zombie(&h.config, Vec2::ZERO);
        gone.dispose();
        room.add_enemy(gone);
        room.add_enemy(zombie(&h.config, Vec2::new(300.0, 300.0)));

        let mut coin = Item::new(ItemKind::GoldCoin, Vec2::new(50.0, 50.0), &h.config.items);
        coin.dispose();
        room.add_item(coin);

        let mut door = Door::on_wall(Direction::North, 1, false, BOUNDS, &h.config.world);
        door.dispose();
        room.set_door(door);

        room.dispose();
        assert!(room.is_disposed());
        assert!(room.enemies().iter().all(|e| e.is_disposed()));
        assert!(room.items().iter().all(|i| i.is_disposed()));
        assert!(room.doors().all(|d| d.is_disposed()));
        room.dispose();
        assert!(room.is_disposed());
    }

    #[test]
    fn test_set_door_replaces_slot() {
        let world = BalanceConfig::default().world;
        let mut room = Room::new(0, BOUNDS);
        assert!(room.set_door(Door::on_wall(Direction::South, 1, false, BOUNDS, &world)).is_none());
        let old = room.set_door(Door::on_wall(Direction::South, 2, false, BOUNDS, &world));
        assert_eq!(old.map(|d| d.target()), Some(1));
        assert_eq!(room.door(Direction::South).map(|d| d.target()), Some(2));
        assert!(room.door(Direction::North).is_none());
        assert_eq!(room.doors().count(), 1);
    }
}
