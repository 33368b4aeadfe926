//! The possession tree: wielded weapon, worn items and the inventory bag.
//!
//! Every item is owned by exactly one of those roots or by exactly one other
//! item. Queries hand out borrows that end before the next mutation; anything
//! extracted from the tree is returned by value.

use std::collections::{BTreeMap, BTreeSet};

use super::Inventory;
use crate::config::CharacterConfig;
use crate::state::types::item::extract_item;
use crate::state::types::{BodyPart, BodyParts, Item, ItemFlags, ItemTypeId, ItemUid};

/// Address of a top-level possession.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemPosition {
    Weapon,
    /// Index into the worn sequence.
    Worn(usize),
    /// Index into the inventory bag.
    Inventory(usize),
}

impl ItemPosition {
    /// Decodes the integer positions used by save files and UI code:
    /// `-1` is the weapon, `-2` the first worn item, `-3` the second, and
    /// non-negative values index the inventory.
    pub fn from_legacy(position: i32) -> Self {
        match position {
            -1 => Self::Weapon,
            p if p < -1 => Self::Worn(worn_position_to_index(p) as usize),
            p => Self::Inventory(p as usize),
        }
    }

    pub fn to_legacy(self) -> i32 {
        match self {
            Self::Weapon => -1,
            Self::Worn(index) => worn_position_to_index(index as i32),
            Self::Inventory(index) => index as i32,
        }
    }
}

/// `-2` is worn index 0, `-3` is worn index 1, etc. The mapping is its own inverse.
#[inline]
pub const fn worn_position_to_index(position: i32) -> i32 {
    -2 - position
}

#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Possessions {
    weapon: Option<Item>,
    /// Wear order: outermost layers last.
    worn: Vec<Item>,
    inv: Inventory,
    /// Preferred invlet per item type, chosen by the player.
    assigned_invlet: BTreeMap<char, ItemTypeId>,
}

impl Possessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    pub fn worn(&self) -> &[Item] {
        &self.worn
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inv
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// True iff `filter` matches any possession or anything nested inside one.
    ///
    /// If this returns true, [`Self::items_with`] with the same filter is non-empty.
    pub fn has_item_with<F>(&self, filter: F) -> bool
    where
        F: Fn(&Item) -> bool,
    {
        self.inv.has_item_with(&filter)
            || self.weapon.iter().any(|w| w.has_item_with(&filter))
            || self.worn.iter().any(|w| w.has_item_with(&filter))
    }

    /// All matching items at any depth: inventory first, then the weapon,
    /// then worn items.
    pub fn items_with<F>(&self, filter: F) -> Vec<&Item>
    where
        F: Fn(&Item) -> bool,
    {
        let mut result = Vec::new();
        self.inv.collect_items_with(&filter, &mut result);
        if let Some(weapon) = &self.weapon {
            weapon.collect_items_with(&filter, &mut result);
        }
        for article in &self.worn {
            article.collect_items_with(&filter, &mut result);
        }
        result
    }

    /// True iff `item` is (identically) one of the worn items.
    pub fn is_worn(&self, item: &Item) -> bool {
        self.worn.iter().any(|w| w.is_same(item))
    }

    /// Top-level position of `item`, compared by identity.
    pub fn position_of(&self, item: &Item) -> Option<ItemPosition> {
        if self.weapon.as_ref().is_some_and(|w| w.is_same(item)) {
            return Some(ItemPosition::Weapon);
        }
        if let Some(index) = self.worn.iter().position(|w| w.is_same(item)) {
            return Some(ItemPosition::Worn(index));
        }
        self.inv.position_of(item.uid()).map(ItemPosition::Inventory)
    }

    /// Whether a carried item of the given type is switched on.
    pub fn has_active_item(&self, type_id: &ItemTypeId) -> bool {
        self.has_item_with(|it| it.active && it.type_id == *type_id)
    }

    pub fn has_mission_item(&self, mission_id: u32) -> bool {
        self.has_item_with(|it| it.mission_id == Some(mission_id))
    }

    /// Invlets currently used by the inventory, the weapon and worn items.
    pub fn allocated_invlets(&self) -> BTreeSet<char> {
        self.inv
            .iter()
            .chain(self.weapon.iter())
            .chain(self.worn.iter())
            .filter_map(|it| it.invlet)
            .collect()
    }

    /// Calls `visit` on every possession and everything nested inside them.
    pub fn visit_all<V>(&self, visit: &mut V)
    where
        V: FnMut(&Item),
    {
        for it in self.inv.iter().chain(self.weapon.iter()).chain(self.worn.iter()) {
            it.visit(visit);
        }
    }

    // ========================================================================
    // Clothing
    // ========================================================================

    pub fn is_wearing(&self, type_id: &ItemTypeId) -> bool {
        self.worn.iter().any(|w| w.type_id == *type_id)
    }

    pub fn is_wearing_on_bp(&self, type_id: &ItemTypeId, part: BodyPart) -> bool {
        let part = BodyParts::from(part);
        self.worn
            .iter()
            .any(|w| w.type_id == *type_id && w.covers.contains(part))
    }

    pub fn worn_with_flag(&self, flag: ItemFlags) -> bool {
        self.worn.iter().any(|w| w.has_flag(flag))
    }

    /// Carrying space provided by worn items.
    pub fn worn_storage(&self) -> i32 {
        self.worn.iter().map(|w| w.storage).sum()
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    pub fn weight_carried(&self) -> i32 {
        self.inv.weight()
            + self.weapon.as_ref().map_or(0, Item::total_weight)
            + self.worn.iter().map(Item::total_weight).sum::<i32>()
    }

    pub fn volume_carried(&self) -> i32 {
        self.inv.volume()
            + self.weapon.as_ref().map_or(0, Item::total_volume)
            + self.worn.iter().map(Item::total_volume).sum::<i32>()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Stores `item` in the inventory, handing out an invlet if one is free.
    pub fn i_add(&mut self, mut item: Item) -> &mut Item {
        item.invlet = self.pick_invlet(&item);
        self.inv.push(item)
    }

    /// Removes the addressed top-level item; its contents travel with it.
    ///
    /// Returns `None` if nothing is stored at `position`.
    pub fn i_rem(&mut self, position: ItemPosition) -> Option<Item> {
        let removed = match position {
            ItemPosition::Weapon => self.weapon.take(),
            ItemPosition::Worn(index) => {
                (index < self.worn.len()).then(|| self.worn.remove(index))
            }
            ItemPosition::Inventory(index) => self.inv.remove(index),
        };
        if removed.is_none() {
            tracing::warn!(?position, "i_rem: no item at position");
        }
        removed
    }

    /// Removes the item with identity `uid` from wherever it is in the tree;
    /// its contents travel with it.
    ///
    /// Returns `None` if the item is not owned by this tree.
    pub fn i_rem_uid(&mut self, uid: ItemUid) -> Option<Item> {
        if self.weapon.as_ref().is_some_and(|w| w.uid() == uid) {
            return self.weapon.take();
        }
        let removed = self
            .inv
            .extract(uid)
            .or_else(|| extract_item(&mut self.worn, uid))
            .or_else(|| {
                self.weapon
                    .as_mut()
                    .and_then(|w| extract_item(&mut w.contents, uid))
            });
        if removed.is_none() {
            tracing::warn!(%uid, "i_rem: item is not in this possession tree");
        }
        removed
    }

    /// Removes the addressed item but keeps its contents: they are put back
    /// into the inventory. Returns the emptied item.
    pub fn i_rem_keep_contents(&mut self, position: ItemPosition) -> Option<Item> {
        let mut removed = self.i_rem(position)?;
        for content in std::mem::take(&mut removed.contents) {
            self.i_add(content);
        }
        Some(removed)
    }

    /// Removes every matching item at any depth.
    ///
    /// A matching weapon leaves the weapon slot empty, a matching worn item is
    /// cut out of the worn sequence, and matching inventory items leave the
    /// bag. Containers that do not match are still searched. Un-matched
    /// contents of a removed item take its place inside its parent; for a
    /// removed top-level item they go into the inventory.
    pub fn remove_items_with<F>(&mut self, filter: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        // The player usually interacts with the inventory the most.
        let mut result = self.inv.remove_items_with(&filter);
        let mut orphans = Vec::new();

        let mut kept = Vec::with_capacity(self.worn.len());
        for mut article in std::mem::take(&mut self.worn) {
            let matched = filter(&article);
            result.extend(article.remove_items_with(&filter));
            if matched {
                orphans.append(&mut article.contents);
                result.push(article);
            } else {
                kept.push(article);
            }
        }
        self.worn = kept;

        let weapon_matched = self.weapon.as_ref().is_some_and(|w| filter(w));
        if let Some(weapon) = self.weapon.as_mut() {
            result.extend(weapon.remove_items_with(&filter));
        }
        if weapon_matched {
            if let Some(mut weapon) = self.weapon.take() {
                orphans.append(&mut weapon.contents);
                result.push(weapon);
            }
        }

        for orphan in orphans {
            self.i_add(orphan);
        }
        if !result.is_empty() {
            tracing::debug!(count = result.len(), "removed matching possessions");
        }
        result
    }

    /// Like [`Self::remove_items_with`] but only looks at the worn items
    /// themselves: their contents are never inspected and travel with a
    /// removed item.
    pub fn remove_worn_items_with<F>(&mut self, filter: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        let (removed, kept): (Vec<Item>, Vec<Item>) =
            std::mem::take(&mut self.worn).into_iter().partition(|w| filter(w));
        self.worn = kept;
        removed
    }

    /// Removes every item belonging to the given mission.
    pub fn remove_mission_items(&mut self, mission_id: u32) -> Vec<Item> {
        self.remove_items_with(|it| it.mission_id == Some(mission_id))
    }

    /// Puts `item` in the weapon slot, returning the previous weapon.
    pub fn wield(&mut self, mut item: Item) -> Option<Item> {
        let previous = self.weapon.take();
        item.invlet = self.pick_invlet(&item);
        self.weapon = Some(item);
        previous
    }

    pub fn remove_weapon(&mut self) -> Option<Item> {
        self.weapon.take()
    }

    /// Adds `item` as the outermost worn layer.
    pub fn wear(&mut self, mut item: Item) -> &Item {
        item.invlet = self.pick_invlet(&item);
        self.worn.push(item);
        let last = self.worn.len() - 1;
        &self.worn[last]
    }

    pub fn take_off(&mut self, index: usize) -> Option<Item> {
        (index < self.worn.len()).then(|| self.worn.remove(index))
    }

    // ========================================================================
    // Invlets
    // ========================================================================

    /// Reserves `invlet` for items of `type_id`.
    pub fn assign_invlet(&mut self, invlet: char, type_id: ItemTypeId) {
        self.assigned_invlet.insert(invlet, type_id);
    }

    pub fn assigned_invlets(&self) -> &BTreeMap<char, ItemTypeId> {
        &self.assigned_invlet
    }

    /// Keeps the item's own invlet if it is free, then tries the letter
    /// reserved for its type, then the first unreserved free letter.
    fn pick_invlet(&self, item: &Item) -> Option<char> {
        let used = self.allocated_invlets();
        if let Some(own) = item.invlet.filter(|ch| !used.contains(ch)) {
            return Some(own);
        }
        let reserved = self
            .assigned_invlet
            .iter()
            .find(|(ch, type_id)| **type_id == item.type_id && !used.contains(ch))
            .map(|(ch, _)| *ch);
        reserved.or_else(|| {
            CharacterConfig::INVLETS
                .chars()
                .find(|ch| !used.contains(ch) && !self.assigned_invlet.contains_key(ch))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str) -> Item {
        Item::new(id)
    }

    fn is(id: &'static str) -> impl Fn(&Item) -> bool {
        move |it| it.type_id.as_str() == id
    }

    #[test]
    fn legacy_positions_round_trip() {
        assert_eq!(ItemPosition::from_legacy(-1), ItemPosition::Weapon);
        assert_eq!(ItemPosition::from_legacy(-2), ItemPosition::Worn(0));
        assert_eq!(ItemPosition::from_legacy(-4), ItemPosition::Worn(2));
        assert_eq!(ItemPosition::from_legacy(5), ItemPosition::Inventory(5));
        assert_eq!(ItemPosition::Worn(1).to_legacy(), -3);
        assert_eq!(worn_position_to_index(worn_position_to_index(7)), 7);
    }

    #[test]
    fn items_with_walks_every_root() {
        let mut tree = Possessions::new();
        tree.i_add(named("apple"));
        tree.wield(named("rifle").containing(named("apple")));
        tree.wear(named("coat").containing(named("wallet").containing(named("apple"))));

        assert_eq!(tree.items_with(is("apple")).len(), 3);
        assert!(tree.has_item_with(is("wallet")));
        assert!(!tree.has_item_with(is("banana")));
    }

    #[test]
    fn invlets_skip_used_and_reserved_letters() {
        let mut tree = Possessions::new();
        tree.assign_invlet('a', ItemTypeId::from("knife"));

        let apple = tree.i_add(named("apple")).invlet;
        let knife = tree.i_add(named("knife")).invlet;
        let pear = tree.i_add(named("pear")).invlet;

        assert_eq!(apple, Some('b'));
        assert_eq!(knife, Some('a'));
        assert_eq!(pear, Some('c'));
        assert_eq!(tree.allocated_invlets().len(), 3);
    }

    #[test]
    fn invlets_run_out_after_the_alphabet() {
        let mut tree = Possessions::new();
        for _ in 0..CharacterConfig::INVLETS.len() {
            assert!(tree.i_add(named("pebble")).invlet.is_some());
        }
        assert_eq!(tree.i_add(named("pebble")).invlet, None);
        assert_eq!(tree.inventory().len(), CharacterConfig::INVLETS.len() + 1);
    }

    #[test]
    fn i_rem_on_missing_position_returns_none() {
        let mut tree = Possessions::new();
        assert!(tree.i_rem(ItemPosition::Weapon).is_none());
        assert!(tree.i_rem(ItemPosition::Worn(0)).is_none());
        assert!(tree.i_rem(ItemPosition::Inventory(0)).is_none());
    }

    #[test]
    fn i_rem_uid_takes_contents_along() {
        let mut tree = Possessions::new();
        let holster = named("holster").containing(named("pistol"));
        let uid = holster.uid();
        tree.wear(named("belt").containing(holster));

        let removed = tree.i_rem_uid(uid).expect("holster is inside the belt");
        assert_eq!(removed.contents.len(), 1);
        assert!(!tree.has_item_with(is("pistol")));
        assert!(tree.has_item_with(is("belt")));
        assert!(tree.i_rem_uid(uid).is_none());
    }

    #[test]
    fn i_rem_keep_contents_rehomes_into_inventory() {
        let mut tree = Possessions::new();
        tree.wield(named("quiver").containing(named("arrow")).containing(named("arrow")));

        let quiver = tree.i_rem_keep_contents(ItemPosition::Weapon).unwrap();
        assert!(quiver.contents.is_empty());
        assert!(tree.weapon().is_none());
        assert_eq!(tree.inventory().len(), 2);
    }

    #[test]
    fn matching_weapon_empties_the_slot_and_rehomes_contents() {
        let mut tree = Possessions::new();
        tree.wield(named("rifle").containing(named("magazine")));

        let removed = tree.remove_items_with(is("rifle"));
        assert_eq!(removed.len(), 1);
        assert!(tree.weapon().is_none());
        assert_eq!(tree.inventory().get(0).map(|it| it.type_id.as_str()), Some("magazine"));
    }

    #[test]
    fn matching_worn_container_rehomes_contents_into_inventory() {
        let mut tree = Possessions::new();
        tree.wear(named("vest").containing(named("pouch")).containing(named("flare")));
        tree.wear(named("boots"));

        let removed = tree.remove_items_with(is("vest"));
        assert_eq!(removed.len(), 1);
        assert!(removed[0].contents.is_empty());
        assert_eq!(tree.worn().len(), 1);
        assert_eq!(tree.worn()[0].type_id.as_str(), "boots");
        let bag: Vec<_> = tree.inventory().iter().map(|it| it.type_id.as_str()).collect();
        assert_eq!(bag, ["pouch", "flare"]);
    }

    #[test]
    fn is_worn_uses_identity() {
        let mut tree = Possessions::new();
        tree.wear(named("sock"));
        let twin = named("sock");
        assert!(!tree.is_worn(&twin));
        let worn = &tree.worn()[0];
        assert!(tree.is_worn(worn));
        assert_eq!(tree.position_of(worn), Some(ItemPosition::Worn(0)));
    }

    #[test]
    fn clothing_queries() {
        let mut tree = Possessions::new();
        tree.wear(
            named("glasses_eye")
                .covering(BodyParts::EYES)
                .with_flags(ItemFlags::FIX_NEARSIGHT),
        );
        let glasses = ItemTypeId::from("glasses_eye");
        assert!(tree.is_wearing(&glasses));
        assert!(tree.is_wearing_on_bp(&glasses, BodyPart::Eyes));
        assert!(!tree.is_wearing_on_bp(&glasses, BodyPart::Head));
        assert!(tree.worn_with_flag(ItemFlags::FIX_NEARSIGHT));
        assert!(!tree.worn_with_flag(ItemFlags::BLIND));
    }

    #[test]
    fn mission_items_are_found_and_removed() {
        let mut tree = Possessions::new();
        tree.i_add(named("box").containing(named("package").with_mission(7)));
        assert!(tree.has_mission_item(7));
        assert_eq!(tree.remove_mission_items(7).len(), 1);
        assert!(!tree.has_mission_item(7));
        assert!(tree.has_item_with(is("box")));
    }

    #[test]
    fn active_items_are_detected_when_nested() {
        let mut tree = Possessions::new();
        tree.wear(named("backpack").containing(named("ups").activated()));
        assert!(tree.has_active_item(&ItemTypeId::from("ups")));
        assert!(!tree.has_active_item(&ItemTypeId::from("backpack")));
    }
}
