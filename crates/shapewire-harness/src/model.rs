//! Sample game-state model covering every shape category.
//!
//! - [`Vec3`]: padding-free `#[repr(C)]` struct, Primitive.
//! - [`Player`], [`ItemStack`], [`Snapshot`]: field-list composites.
//! - [`Inventory`]: custom routine, in-memory map written as sorted pairs.
//! - [`Waypoint`]: field list declared alongside a custom routine that
//!   reorders it.

use std::collections::HashMap;

use shapewire::{ByteSink, ByteSource, CustomCodec, Decode, DecodeError, Encode};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Position in world space.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
#[repr(C)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Vec3 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

shapewire::primitive!(Vec3);

/// A player entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Hit points.
    pub hp: f32,
    /// Current position.
    pub pos: Vec3,
}

shapewire::composite!(Player { name, hp, pos });

/// A stack of identical items.
///
/// `u32` followed by `u16` leaves trailing padding in memory, so this cannot
/// be Primitive; it is registered field by field instead and encodes to six
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemStack {
    /// Item identifier.
    pub item: u32,
    /// Number of items in the stack.
    pub count: u16,
}

shapewire::composite!(ItemStack { item, count });

/// Slot-indexed item storage.
///
/// Held as a hash map, written as a `usize` count followed by `(slot, stack)`
/// pairs in ascending slot order so equal inventories encode identically. A
/// repeated slot on the wire fails the decode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    slots: HashMap<u16, ItemStack>,
}

impl Inventory {
    /// Empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `stack` in `slot`, returning what was there.
    pub fn insert(&mut self, slot: u16, stack: ItemStack) -> Option<ItemStack> {
        self.slots.insert(slot, stack)
    }

    /// Stack in `slot`, if any.
    pub fn get(&self, slot: u16) -> Option<&ItemStack> {
        self.slots.get(&slot)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots in ascending order.
    pub fn sorted(&self) -> Vec<(u16, ItemStack)> {
        let mut entries: Vec<(u16, ItemStack)> =
            self.slots.iter().map(|(slot, stack)| (*slot, *stack)).collect();
        entries.sort_unstable_by_key(|(slot, _)| *slot);
        entries
    }
}

impl FromIterator<(u16, ItemStack)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (u16, ItemStack)>>(iter: I) -> Self {
        Self { slots: iter.into_iter().collect() }
    }
}

impl CustomCodec for Inventory {
    fn write<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        self.sorted().encode(sink);
    }

    fn read<R: ByteSource + ?Sized>(source: &mut R) -> shapewire::Result<Self> {
        let entries = Vec::<(u16, ItemStack)>::decode(source)?;
        let mut slots = HashMap::with_capacity(entries.len());
        for (slot, stack) in entries {
            if slots.insert(slot, stack).is_some() {
                return Err(DecodeError);
            }
        }
        Ok(Self { slots })
    }
}

shapewire::composite!(Inventory => custom);

/// Named point on a route.
///
/// Declared fields are `label, pos`, but the wire puts the fixed-size position
/// first.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Human-readable label.
    pub label: String,
    /// Location.
    pub pos: Vec3,
}

impl CustomCodec for Waypoint {
    fn write<S: ByteSink + ?Sized>(&self, sink: &mut S) {
        self.pos.encode(sink);
        self.label.encode(sink);
    }

    fn read<R: ByteSource + ?Sized>(source: &mut R) -> shapewire::Result<Self> {
        let pos = Vec3::decode(source)?;
        let label = String::decode(source)?;
        Ok(Self { label, pos })
    }
}

shapewire::composite!(Waypoint { label, pos } => custom);

/// Full world state at one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Simulation tick.
    pub tick: u64,
    /// All connected players.
    pub players: Vec<Player>,
    /// Name of the leading player, if any.
    pub leader: Option<String>,
    /// Respawn point, if set.
    pub spawn: Option<Vec3>,
    /// Two-line banner text.
    pub banner: [String; 2],
    /// Axis-aligned world bounds, min then max.
    pub bounds: [Vec3; 2],
    /// Patrol route.
    pub route: Vec<Waypoint>,
    /// Shared stash.
    pub inventory: Inventory,
    /// Feature toggles.
    pub flags: Vec<bool>,
}

shapewire::composite!(Snapshot {
    tick,
    players,
    leader,
    spawn,
    banner,
    bounds,
    route,
    inventory,
    flags,
});
