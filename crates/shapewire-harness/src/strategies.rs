//! Proptest strategies for the sample model.
//!
//! Floats are drawn from a finite range: the codec preserves NaN bit patterns,
//! but `NaN != NaN` would make the round-trip oracle useless.

use proptest::{array, collection, prelude::*};

use crate::model::{Inventory, ItemStack, Player, Snapshot, Vec3, Waypoint};

/// Finite `f32` in a game-world range.
pub fn coord() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

/// Arbitrary short text, including non-ASCII.
pub fn text() -> impl Strategy<Value = String> {
    "\\PC{0,12}"
}

/// Any [`Vec3`] with finite components.
pub fn vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Any [`Player`].
pub fn player() -> impl Strategy<Value = Player> {
    (text(), coord(), vec3()).prop_map(|(name, hp, pos)| Player { name, hp, pos })
}

/// Any [`ItemStack`].
pub fn item_stack() -> impl Strategy<Value = ItemStack> {
    (any::<u32>(), any::<u16>()).prop_map(|(item, count)| ItemStack { item, count })
}

/// Inventory with up to eight occupied slots.
pub fn inventory() -> impl Strategy<Value = Inventory> {
    collection::hash_map(any::<u16>(), item_stack(), 0..8)
        .prop_map(|slots| slots.into_iter().collect())
}

/// Any [`Waypoint`].
pub fn waypoint() -> impl Strategy<Value = Waypoint> {
    (text(), vec3()).prop_map(|(label, pos)| Waypoint { label, pos })
}

/// Any [`Snapshot`] with small collections.
pub fn snapshot() -> impl Strategy<Value = Snapshot> {
    (
        any::<u64>(),
        collection::vec(player(), 0..4),
        proptest::option::of(text()),
        proptest::option::of(vec3()),
        array::uniform2(text()),
        array::uniform2(vec3()),
        collection::vec(waypoint(), 0..4),
        inventory(),
        collection::vec(any::<bool>(), 0..16),
    )
        .prop_map(|(tick, players, leader, spawn, banner, bounds, route, inventory, flags)| Snapshot {
            tick,
            players,
            leader,
            spawn,
            banner,
            bounds,
            route,
            inventory,
            flags,
        })
}
