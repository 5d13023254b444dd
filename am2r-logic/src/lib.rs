pub mod helpers;
pub mod options;
pub mod requirement;

use am2r_game::{Capacity, Item, PlayerId};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub use options::{AmmoLogic, LogicDifficulty, LogicOptions, MissileLauncher};

/// Read-only view of the items collected by each player.
///
/// This is the seam to the host's collection state: the logic only ever queries it.
pub trait ItemState {
    fn count(&self, item: Item, player: PlayerId) -> Capacity;

    fn has(&self, item: Item, player: PlayerId) -> bool {
        self.count(item, player) >= 1
    }

    /// True when at least `amount` copies are held. Non-positive amounts are always satisfied.
    fn has_count(&self, item: Item, player: PlayerId, amount: Capacity) -> bool {
        amount <= 0 || self.count(item, player) >= amount
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: HashMap<PlayerId, HashMap<Item, Capacity>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_player(player: PlayerId, items: HashMap<Item, Capacity>) -> Self {
        let mut inventory = Self::default();
        for (item, count) in items {
            inventory.collect_count(player, item, count);
        }
        inventory
    }

    pub fn collect(&mut self, player: PlayerId, item: Item) {
        self.collect_count(player, item, 1);
    }

    pub fn collect_count(&mut self, player: PlayerId, item: Item, count: Capacity) {
        if count <= 0 {
            return;
        }
        *self
            .items
            .entry(player)
            .or_default()
            .entry(item)
            .or_insert(0) += count;
    }
}

impl ItemState for Inventory {
    fn count(&self, item: Item, player: PlayerId) -> Capacity {
        self.items
            .get(&player)
            .and_then(|items| items.get(&item))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_counts() {
        let mut inventory = Inventory::new();
        inventory.collect(1, Item::Missile);
        inventory.collect_count(1, Item::Missile, 2);
        inventory.collect(2, Item::Bombs);
        inventory.collect_count(1, Item::EnergyTank, 0);

        assert_eq!(inventory.count(Item::Missile, 1), 3);
        assert_eq!(inventory.count(Item::Missile, 2), 0);
        assert!(inventory.has(Item::Bombs, 2));
        assert!(!inventory.has(Item::Bombs, 1));
        assert!(!inventory.has(Item::EnergyTank, 1));
        assert!(inventory.has_count(Item::Missile, 1, 3));
        assert!(!inventory.has_count(Item::Missile, 1, 4));
        assert!(inventory.has_count(Item::SuperMissile, 1, 0));
        assert!(inventory.has_count(Item::SuperMissile, 1, -1));
    }
}
