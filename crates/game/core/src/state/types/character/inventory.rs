//! Carried items (the bag).
//!
//! Items are kept in insertion order. Invlets ride along on the items for UI
//! convenience but nothing in here looks items up by invlet.

use crate::state::types::item::{extract_item, partition_items};
use crate::state::types::{Item, ItemUid};

#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Stores `item` at the end of the bag and returns the stored item.
    pub fn push(&mut self, item: Item) -> &mut Item {
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Index of the top-level item with identity `uid`.
    pub fn position_of(&self, uid: ItemUid) -> Option<usize> {
        self.items.iter().position(|it| it.uid() == uid)
    }

    /// Detaches the item with identity `uid`, wherever it is nested.
    pub fn extract(&mut self, uid: ItemUid) -> Option<Item> {
        extract_item(&mut self.items, uid)
    }

    pub fn has_item_with<F>(&self, filter: &F) -> bool
    where
        F: Fn(&Item) -> bool,
    {
        self.items.iter().any(|it| it.has_item_with(filter))
    }

    pub fn collect_items_with<'a, F>(&'a self, filter: &F, out: &mut Vec<&'a Item>)
    where
        F: Fn(&Item) -> bool,
    {
        for it in &self.items {
            it.collect_items_with(filter, out);
        }
    }

    /// Removes every matching item at any depth. Un-matched contents of a
    /// removed top-level item stay in the bag where it used to be.
    pub fn remove_items_with<F>(&mut self, filter: &F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        let (kept, removed) = partition_items(std::mem::take(&mut self.items), filter);
        self.items = kept;
        removed
    }

    pub fn weight(&self) -> i32 {
        self.items.iter().map(Item::total_weight).sum()
    }

    pub fn volume(&self) -> i32 {
        self.items.iter().map(Item::total_volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut inv = Inventory::new();
        inv.push(Item::new("apple"));
        assert!(inv.remove(3).is_none());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn unmatched_contents_of_removed_container_stay_in_place() {
        let mut inv = Inventory::new();
        inv.push(Item::new("apple"));
        inv.push(Item::new("jar").containing(Item::new("pickle")));
        inv.push(Item::new("pear"));

        let removed = inv.remove_items_with(&|it: &Item| it.type_id.as_str() == "jar");

        assert_eq!(removed.len(), 1);
        let order: Vec<_> = inv.iter().map(|it| it.type_id.as_str()).collect();
        assert_eq!(order, ["apple", "pickle", "pear"]);
    }
}
