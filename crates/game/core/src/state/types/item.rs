//! Item nodes.
//!
//! An [`Item`] exclusively owns its contents, so the possession tree is a
//! plain owned tree: no sharing, no cycles. Everything in here walks that tree
//! depth-first, parent before children.

use bitflags::bitflags;

use super::{BodyParts, ItemTypeId, ItemUid};

bitflags! {
    /// Behavioural flags of an item that the character core cares about.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ItemFlags: u16 {
        /// Wearing it blinds the wearer (blindfolds, welding masks down).
        const BLIND = 1 << 0;
        /// Lets the wearer see underwater.
        const SWIM_GOGGLES = 1 << 1;
        /// Corrects nearsightedness while worn.
        const FIX_NEARSIGHT = 1 << 2;
        /// Grants goggle-class night vision while worn and active.
        const NIGHT_VISION = 1 << 3;
        /// Grants top-tier night vision while worn and active (powered armor visors).
        const ENHANCED_VISION = 1 << 4;
        /// Fits any body shape; never pushed off by a mutation.
        const OVERSIZE = 1 << 5;
        /// Container with a fixed volume: contents do not add to it.
        const RIGID = 1 << 6;
    }
}

/// A single possessable item, possibly holding other items.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    #[cfg_attr(feature = "serde", serde(skip))]
    uid: ItemUid,
    pub type_id: ItemTypeId,
    /// UI shortcut. Never used as a key by the core.
    pub invlet: Option<char>,
    pub weight: i32,
    pub volume: i32,
    /// Volume of carrying space the item provides while worn.
    pub storage: i32,
    pub covers: BodyParts,
    pub flags: ItemFlags,
    /// Turned on (lit lamp, powered goggles).
    pub active: bool,
    pub mission_id: Option<u32>,
    pub charges: u32,
    pub contents: Vec<Item>,
}

impl Item {
    pub fn new(type_id: impl Into<ItemTypeId>) -> Self {
        Self {
            uid: ItemUid::fresh(),
            type_id: type_id.into(),
            invlet: None,
            weight: 0,
            volume: 0,
            storage: 0,
            covers: BodyParts::empty(),
            flags: ItemFlags::empty(),
            active: false,
            mission_id: None,
            charges: 0,
            contents: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_storage(mut self, storage: i32) -> Self {
        self.storage = storage;
        self
    }

    pub fn covering(mut self, parts: BodyParts) -> Self {
        self.covers = parts;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_mission(mut self, mission_id: u32) -> Self {
        self.mission_id = Some(mission_id);
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    /// Puts `item` inside this one.
    pub fn containing(mut self, item: Item) -> Self {
        self.contents.push(item);
        self
    }

    #[inline]
    pub fn uid(&self) -> ItemUid {
        self.uid
    }

    /// Identity comparison: true only for the very same item instance.
    #[inline]
    pub fn is_same(&self, other: &Item) -> bool {
        self.uid == other.uid
    }

    #[inline]
    pub fn has_flag(&self, flag: ItemFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Deep copy with fresh identities for the copy and everything inside it.
    pub fn duplicate(&self) -> Item {
        Item {
            uid: ItemUid::fresh(),
            type_id: self.type_id.clone(),
            invlet: self.invlet,
            weight: self.weight,
            volume: self.volume,
            storage: self.storage,
            covers: self.covers,
            flags: self.flags,
            active: self.active,
            mission_id: self.mission_id,
            charges: self.charges,
            contents: self.contents.iter().map(Item::duplicate).collect(),
        }
    }

    /// Weight of the item including everything inside it.
    pub fn total_weight(&self) -> i32 {
        self.weight + self.contents.iter().map(Item::total_weight).sum::<i32>()
    }

    /// Volume the item occupies; rigid containers do not grow with their contents.
    pub fn total_volume(&self) -> i32 {
        if self.has_flag(ItemFlags::RIGID) {
            self.volume
        } else {
            self.volume + self.contents.iter().map(Item::total_volume).sum::<i32>()
        }
    }

    /// True if this item or anything nested inside it matches `filter`.
    ///
    /// `filter` must be side-effect free; it may be called on any subset of
    /// the nodes in any order.
    pub fn has_item_with<F>(&self, filter: &F) -> bool
    where
        F: Fn(&Item) -> bool,
    {
        filter(self) || self.contents.iter().any(|it| it.has_item_with(filter))
    }

    /// Pushes a reference to every matching node (self included) onto `out`.
    pub fn collect_items_with<'a, F>(&'a self, filter: &F, out: &mut Vec<&'a Item>)
    where
        F: Fn(&Item) -> bool,
    {
        if filter(self) {
            out.push(self);
        }
        for it in &self.contents {
            it.collect_items_with(filter, out);
        }
    }

    /// Removes every matching node strictly inside this item.
    ///
    /// Un-matched contents of a removed node stay behind in its place.
    pub fn remove_items_with<F>(&mut self, filter: &F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        let (kept, removed) = partition_items(std::mem::take(&mut self.contents), filter);
        self.contents = kept;
        removed
    }

    /// Calls `visit` on this item and every nested item.
    pub fn visit<V>(&self, visit: &mut V)
    where
        V: FnMut(&Item),
    {
        visit(self);
        for it in &self.contents {
            it.visit(visit);
        }
    }

    /// Finds the item with the given identity in this subtree.
    pub fn find(&self, uid: ItemUid) -> Option<&Item> {
        if self.uid == uid {
            return Some(self);
        }
        self.contents.iter().find_map(|it| it.find(uid))
    }
}

/// Value equality; identity is deliberately ignored (see [`Item::is_same`]).
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
            && self.invlet == other.invlet
            && self.weight == other.weight
            && self.volume == other.volume
            && self.storage == other.storage
            && self.covers == other.covers
            && self.flags == other.flags
            && self.active == other.active
            && self.mission_id == other.mission_id
            && self.charges == other.charges
            && self.contents == other.contents
    }
}

/// Splits a sibling sequence into `(kept, removed)`.
///
/// A matching node goes to `removed` without its contents; its un-matched
/// contents are spliced into `kept` at the node's former position and its
/// matching contents are removed as well. Non-matching nodes are kept and
/// filtered recursively.
pub(crate) fn partition_items<F>(items: Vec<Item>, filter: &F) -> (Vec<Item>, Vec<Item>)
where
    F: Fn(&Item) -> bool,
{
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = Vec::new();
    for mut item in items {
        let matched = filter(&item);
        let (inner_kept, inner_removed) =
            partition_items(std::mem::take(&mut item.contents), filter);
        removed.extend(inner_removed);
        if matched {
            kept.extend(inner_kept);
            removed.push(item);
        } else {
            item.contents = inner_kept;
            kept.push(item);
        }
    }
    (kept, removed)
}

/// Detaches the item with identity `uid` from anywhere in `items`, contents included.
pub(crate) fn extract_item(items: &mut Vec<Item>, uid: ItemUid) -> Option<Item> {
    if let Some(index) = items.iter().position(|it| it.uid == uid) {
        return Some(items.remove(index));
    }
    items
        .iter_mut()
        .find_map(|it| extract_item(&mut it.contents, uid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock() -> Item {
        Item::new("rock").with_weight(500).with_volume(1)
    }

    #[test]
    fn duplicate_gets_new_identity_but_equal_value() {
        let bag = Item::new("bag").containing(rock());
        let copy = bag.duplicate();
        assert!(!copy.is_same(&bag));
        assert!(!copy.contents[0].is_same(&bag.contents[0]));
        assert_eq!(copy, bag);
    }

    #[test]
    fn rigid_containers_do_not_grow() {
        let soft = Item::new("sack").with_volume(2).containing(rock()).containing(rock());
        let rigid = Item::new("crate")
            .with_volume(2)
            .with_flags(ItemFlags::RIGID)
            .containing(rock());
        assert_eq!(soft.total_volume(), 4);
        assert_eq!(rigid.total_volume(), 2);
        assert_eq!(soft.total_weight(), 1000);
    }

    #[test]
    fn removed_node_leaves_unmatched_contents_in_place() {
        let inner = Item::new("pouch").containing(rock()).containing(Item::new("coin"));
        let mut outer = Item::new("backpack")
            .containing(Item::new("map"))
            .containing(inner)
            .containing(Item::new("rope"));

        let removed = outer.remove_items_with(&|it: &Item| {
            it.type_id.as_str() == "pouch" || it.type_id.as_str() == "coin"
        });

        let removed_ids: Vec<_> = removed.iter().map(|it| it.type_id.as_str()).collect();
        assert_eq!(removed_ids, ["coin", "pouch"]);
        assert!(removed.iter().all(|it| it.contents.is_empty()));

        let kept: Vec<_> = outer.contents.iter().map(|it| it.type_id.as_str()).collect();
        assert_eq!(kept, ["map", "rock", "rope"]);
    }

    #[test]
    fn extract_item_finds_nested_items_with_contents() {
        let pouch = Item::new("pouch").containing(rock());
        let uid = pouch.uid();
        let mut items = vec![Item::new("backpack").containing(pouch)];

        let pouch = extract_item(&mut items, uid).expect("pouch is nested in the backpack");
        assert_eq!(pouch.contents.len(), 1);
        assert!(items[0].contents.is_empty());
        assert!(extract_item(&mut items, uid).is_none());
    }
}
