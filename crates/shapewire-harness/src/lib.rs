//! Test harness for the shapewire codec.
//!
//! Sample model types covering every shape category, proptest strategies for
//! them, fault-injecting sources and streams, and a scenario framework that
//! checks the codec laws over a set of values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod model;
pub mod scenario;
pub mod strategies;

pub use faults::{ClosingWriter, FaultySource, StutteringReader};
pub use model::{Inventory, ItemStack, Player, Snapshot, Vec3, Waypoint};
