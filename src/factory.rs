//! Room construction by archetype.
//!
//! Every room goes through the same four steps, in order: build the empty
//! room, populate enemies, populate items, attach doors. An archetype is
//! just a [`RoomFactory`] with its own four steps plugged in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ai::StrategyKind;
use crate::config::BalanceConfig;
use crate::door::Door;
use crate::enemy::{Enemy, EnemyKind};
use crate::geometry::{clamp_to_bounds, Direction};
use crate::item::{Item, ItemKind};
use crate::repository::{InMemoryRoomRepository, RoomRepository};
use crate::room::{Room, RoomId};

type BuildStep = Box<dyn Fn(RoomId, &BalanceConfig) -> Room>;
type PopulateStep = Box<dyn Fn(&mut Room, &BalanceConfig)>;

/// Where an enemy starts and how it moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub strategy: StrategyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub direction: Direction,
    pub target: RoomId,
    pub locked: bool,
}

impl DoorSpec {
    pub fn open(direction: Direction, target: RoomId) -> Self {
        Self {
            direction,
            target,
            locked: false,
        }
    }

    pub fn locked(direction: Direction, target: RoomId) -> Self {
        Self {
            direction,
            target,
            locked: true,
        }
    }
}

/// A four-step room recipe.
pub struct RoomFactory {
    name: &'static str,
    build: BuildStep,
    populate_enemies: PopulateStep,
    populate_items: PopulateStep,
    add_doors: PopulateStep,
}

impl RoomFactory {
    pub fn new(
        name: &'static str,
        build: BuildStep,
        populate_enemies: PopulateStep,
        populate_items: PopulateStep,
        add_doors: PopulateStep,
    ) -> Self {
        Self {
            name,
            build,
            populate_enemies,
            populate_items,
            add_doors,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the four steps. The room is fully wired when this returns.
    pub fn create_room(&self, id: RoomId, config: &BalanceConfig) -> Room {
        let mut room = (self.build)(id, config);
        (self.populate_enemies)(&mut room, config);
        (self.populate_items)(&mut room, config);
        (self.add_doors)(&mut room, config);
        log::debug!(
            "{} room {} built: {} enemies, {} items, {} doors",
            self.name,
            id,
            room.enemies().len(),
            room.items().len(),
            room.doors().count()
        );
        room
    }

    /// Gentle first room: one following zombie, a potion and a key.
    pub fn starting(doors: Vec<DoorSpec>) -> Self {
        Self::new(
            "starting",
            Box::new(empty_room),
            Box::new(|room, config| {
                spawn_enemy(room, config, EnemyKind::Zombie, Vec2::new(500.0, 300.0), StrategyKind::Follower);
            }),
            Box::new(|room, config| {
                spawn_item(room, config, ItemKind::HealthPotion, Vec2::new(200.0, 200.0));
                spawn_item(room, config, ItemKind::Key, Vec2::new(600.0, 400.0));
            }),
            attach_doors(doors),
        )
    }

    /// A fight room with explicit enemies and loot.
    pub fn combat(enemies: Vec<EnemySpawn>, items: Vec<ItemSpawn>, doors: Vec<DoorSpec>) -> Self {
        Self::new(
            "combat",
            Box::new(empty_room),
            Box::new(move |room, config| {
                for spawn in &enemies {
                    spawn_enemy(room, config, spawn.kind, spawn.position, spawn.strategy);
                }
            }),
            Box::new(move |room, config| {
                for spawn in &items {
                    spawn_item(room, config, spawn.kind, spawn.position);
                }
            }),
            attach_doors(doors),
        )
    }

    /// The boss and its four guards, placed relative to the room size, with
    /// a potion, gold and a damage boost.
    pub fn boss(doors: Vec<DoorSpec>) -> Self {
        Self::new(
            "boss",
            Box::new(empty_room),
            Box::new(|room, config| {
                let formation = [
                    (EnemyKind::Boss, 0.7, 0.5),
                    (EnemyKind::Skeleton, 0.8, 0.3),
                    (EnemyKind::Skeleton, 0.8, 0.7),
                    (EnemyKind::Zombie, 0.6, 0.2),
                    (EnemyKind::Zombie, 0.6, 0.8),
                ];
                let size = room.size();
                for (kind, fx, fy) in formation {
                    let at = Vec2::new(size.x * fx, size.y * fy);
                    spawn_enemy(room, config, kind, at, StrategyKind::Follower);
                }
            }),
            Box::new(|room, config| {
                let size = room.size();
                let loot = [
                    (ItemKind::HealthPotion, 0.6, 0.3),
                    (ItemKind::GoldCoin, 0.8, 0.3),
                    (ItemKind::DamageBoost, 0.7, 0.2),
                ];
                for (kind, fx, fy) in loot {
                    spawn_item(room, config, kind, Vec2::new(size.x * fx, size.y * fy));
                }
            }),
            attach_doors(doors),
        )
    }
}

fn empty_room(id: RoomId, config: &BalanceConfig) -> Room {
    Room::new(id, config.bounds())
}

fn attach_doors(doors: Vec<DoorSpec>) -> PopulateStep {
    Box::new(move |room, config| {
        let bounds = room.size();
        for spec in &doors {
            room.set_door(Door::on_wall(spec.direction, spec.target, spec.locked, bounds, &config.world));
        }
    })
}

/// Add an enemy, nudged inside the room if its spawn point would overhang a wall.
fn spawn_enemy(room: &mut Room, config: &BalanceConfig, kind: EnemyKind, at: Vec2, strategy: StrategyKind) {
    let stats = config.enemies.stats(kind);
    let position = clamp_to_bounds(at, Vec2::splat(stats.size), room.size());
    let strategy = strategy.build(&config.ai, room.size());
    room.add_enemy(Enemy::new(kind, position, stats, strategy));
}

fn spawn_item(room: &mut Room, config: &BalanceConfig, kind: ItemKind, at: Vec2) {
    let position = clamp_to_bounds(at, Vec2::splat(config.items.size), room.size());
    room.add_item(Item::new(kind, position, &config.items));
}

pub const BOSS_ROOM_ID: RoomId = 3;

/// The four-room layout:
///
/// ```text
///   [1]
///    |
///   [0] -- [2] =locked= [3 boss]
/// ```
pub fn standard_dungeon(config: &BalanceConfig) -> InMemoryRoomRepository {
    let recipes: [(RoomId, RoomFactory); 4] = [
        (
            0,
            RoomFactory::starting(vec![
                DoorSpec::open(Direction::North, 1),
                DoorSpec::open(Direction::East, 2),
            ]),
        ),
        (
            1,
            RoomFactory::combat(
                vec![
                    EnemySpawn {
                        kind: EnemyKind::Skeleton,
                        position: Vec2::new(300.0, 300.0),
                        strategy: StrategyKind::RandomMovement,
                    },
                    EnemySpawn {
                        kind: EnemyKind::Zombie,
                        position: Vec2::new(500.0, 200.0),
                        strategy: StrategyKind::Follower,
                    },
                ],
                vec![
                    ItemSpawn {
                        kind: ItemKind::Key,
                        position: Vec2::new(300.0, 400.0),
                    },
                    ItemSpawn {
                        kind: ItemKind::GoldCoin,
                        position: Vec2::new(400.0, 350.0),
                    },
                ],
                vec![DoorSpec::open(Direction::South, 0)],
            ),
        ),
        (
            2,
            RoomFactory::combat(
                vec![
                    EnemySpawn {
                        kind: EnemyKind::Skeleton,
                        position: Vec2::new(300.0, 400.0),
                        strategy: StrategyKind::Patrol,
                    },
                    EnemySpawn {
                        kind: EnemyKind::Skeleton,
                        position: Vec2::new(500.0, 300.0),
                        strategy: StrategyKind::RandomMovement,
                    },
                ],
                vec![ItemSpawn {
                    kind: ItemKind::GoldCoin,
                    position: Vec2::new(400.0, 350.0),
                }],
                vec![
                    DoorSpec::open(Direction::West, 0),
                    DoorSpec::locked(Direction::East, BOSS_ROOM_ID),
                ],
            ),
        ),
        (BOSS_ROOM_ID, RoomFactory::boss(vec![DoorSpec::open(Direction::West, 2)])),
    ];

    let mut repo = InMemoryRoomRepository::new();
    for (id, factory) in &recipes {
        repo.save(factory.create_room(*id, config));
    }
    log::info!("standard dungeon ready with {} rooms", repo.count());
    repo
}
