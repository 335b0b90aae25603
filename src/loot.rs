//! Weighted loot tables for enemy drops and room rewards.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::item::ItemKind;

/// One outcome of a loot roll. `item: None` is the "nothing dropped" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: Option<ItemKind>,
    pub weight: u32,
}

impl LootEntry {
    pub fn item(kind: ItemKind, weight: u32) -> Self {
        Self {
            item: Some(kind),
            weight,
        }
    }

    pub fn nothing(weight: u32) -> Self {
        Self { item: None, weight }
    }
}

/// Mutually exclusive outcomes picked by one uniform draw in `[0, 1)`
/// against cumulative thresholds, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LootTable {
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(entries: Vec<LootEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    /// Sum of all weights. Widened so any number of `u32` weights fits.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Roll the table once.
    pub fn roll(&self, rng: &mut dyn RngCore) -> Option<ItemKind> {
        let draw: f64 = rng.gen();
        self.pick(draw)
    }

    /// Resolve a draw in `[0, 1)` to an outcome.
    pub fn pick(&self, draw: f64) -> Option<ItemKind> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }

        let mut threshold = 0.0;
        for entry in &self.entries {
            threshold += entry.weight as f64 / total as f64;
            if draw < threshold {
                return entry.item;
            }
        }
        // Rounding can leave the final threshold a hair under 1.0
        self.entries.iter().rev().find(|e| e.weight > 0).and_then(|e| e.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_uses_cumulative_thresholds() {
        let drops = BalanceConfig::default().drops;
        assert_eq!(drops.pick(0.0), Some(ItemKind::HealthPotion));
        assert_eq!(drops.pick(0.39), Some(ItemKind::HealthPotion));
        assert_eq!(drops.pick(0.41), Some(ItemKind::GoldCoin));
        assert_eq!(drops.pick(0.69), Some(ItemKind::GoldCoin));
        assert_eq!(drops.pick(0.75), Some(ItemKind::Key));
        assert_eq!(drops.pick(0.85), None);
        assert_eq!(drops.pick(0.999_999), None);
    }

    #[test]
    fn test_empty_table_drops_nothing() {
        let table = LootTable::new(vec![]);
        assert_eq!(table.pick(0.5), None);
    }

    #[test]
    fn test_zero_weight_entries_never_win() {
        let table = LootTable::new(vec![
            LootEntry::item(ItemKind::Key, 0),
            LootEntry::item(ItemKind::GoldCoin, 5),
        ]);
        for draw in [0.0, 0.25, 0.5, 0.999] {
            assert_eq!(table.pick(draw), Some(ItemKind::GoldCoin));
        }
    }

    #[test]
    fn test_drop_distribution_matches_weights() {
        let drops = BalanceConfig::default().drops;
        let mut rng = StdRng::seed_from_u64(0xD0D0);
        let rolls = 20_000;
        let (mut potion, mut gold, mut key, mut nothing) = (0, 0, 0, 0);
        for _ in 0..rolls {
            match drops.roll(&mut rng) {
                Some(ItemKind::HealthPotion) => potion += 1,
                Some(ItemKind::GoldCoin) => gold += 1,
                Some(ItemKind::Key) => key += 1,
                Some(ItemKind::DamageBoost) => panic!("damage boost is not in the drop table"),
                None => nothing += 1,
            }
        }
        let share = |n: i32| n as f64 / rolls as f64;
        assert!((share(potion) - 0.40).abs() < 0.02);
        assert!((share(gold) - 0.30).abs() < 0.02);
        assert!((share(key) - 0.10).abs() < 0.02);
        assert!((share(nothing) - 0.20).abs() < 0.02);
    }
}
