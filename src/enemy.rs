//! Enemies: archetype stats, a swappable movement strategy and a melee attack.

use glam::Vec2;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::ai::{EnemyStrategy, StrategyContext};
use crate::config::EnemyStats;
use crate::entity::{CombatStats, Combatant, Entity};
use crate::item::ItemKind;
use crate::loot::LootTable;
use crate::player::Player;
use crate::render::{Drawable, Sprite, Surface};

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Zombie,
    Skeleton,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Zombie, EnemyKind::Skeleton, EnemyKind::Boss];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Zombie => "Zombie",
            EnemyKind::Skeleton => "Skeleton",
            EnemyKind::Boss => "Boss",
        }
    }

    /// Path of this archetype's stats inside the balance file.
    pub fn config_key(&self) -> &'static str {
        match self {
            EnemyKind::Zombie => "enemies.zombie",
            EnemyKind::Skeleton => "enemies.skeleton",
            EnemyKind::Boss => "enemies.boss",
        }
    }
}

pub struct Enemy {
    kind: EnemyKind,
    stats: CombatStats,
    attack_cooldown: f32,
    time_since_attack: f32,
    gold_value: u32,
    strategy: Box<dyn EnemyStrategy>,
    disposed: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec2, archetype: &EnemyStats, strategy: Box<dyn EnemyStrategy>) -> Self {
        let stats = CombatStats::new(
            position,
            Vec2::splat(archetype.size),
            archetype.health,
            archetype.damage,
            archetype.move_speed,
        );
        let mut enemy = Self {
            kind,
            stats,
            attack_cooldown: archetype.attack_cooldown,
            time_since_attack: 0.0,
            gold_value: archetype.gold_value,
            strategy,
            disposed: false,
        };
        enemy.strategy.init(&enemy.stats);
        enemy
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn gold_value(&self) -> u32 {
        self.gold_value
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Replace the movement strategy. The new one is initialised against the
    /// enemy's current state before its first tick.
    pub fn set_strategy(&mut self, mut strategy: Box<dyn EnemyStrategy>) {
        strategy.init(&self.stats);
        log::trace!("{} switches to {}", self.kind.name(), strategy.name());
        self.strategy = strategy;
    }

    /// Run the strategy, then hit the player if touching and off cooldown.
    /// Returns the damage dealt, if any.
    pub fn act(&mut self, player: &mut Player, ctx: &mut StrategyContext<'_>) -> Option<u32> {
        puffin::profile_function!();
        if self.disposed || self.is_dead() {
            return None;
        }
        self.strategy.update(&mut self.stats, ctx);

        if !player.is_dead() && self.can_attack() && self.hitbox().overlaps(&player.hitbox()) {
            self.time_since_attack = 0.0;
            return Some(player.take_damage(self.stats.attack_damage));
        }
        None
    }

    /// One draw against the drop table. Meant to be called once, on death.
    pub fn roll_drop(&self, table: &LootTable, rng: &mut dyn RngCore) -> Option<ItemKind> {
        table.roll(rng)
    }
}

impl std::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enemy")
            .field("kind", &self.kind)
            .field("stats", &self.stats)
            .field("strategy", &self.strategy.name())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.stats.position()
    }

    fn update(&mut self, dt: f32) {
        self.time_since_attack += dt;
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.disposed || self.is_dead() {
            return;
        }
        surface.draw(Drawable {
            sprite: Sprite::Enemy {
                kind: self.kind,
                health_fraction: self.stats.health_fraction(),
            },
            position: self.position(),
            size: self.stats.size(),
        });
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Combatant for Enemy {
    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }

    fn can_attack(&self) -> bool {
        self.time_since_attack >= self.attack_cooldown
    }
}
