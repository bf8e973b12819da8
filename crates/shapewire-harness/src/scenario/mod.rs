//! Scenario-based codec testing.
//!
//! A scenario names a set of values, exercises each one against the codec
//! (encode, decode, decode every truncation) and hands the observations to a
//! mandatory oracle.
//!
//! ```
//! use shapewire_harness::scenario::{Scenario, oracle};
//!
//! let result = Scenario::new("numbers")
//!     .case("answer", 42u32)
//!     .case("list", vec![1u16, 2, 3])
//!     .oracle(oracle::codec_laws())
//!     .run();
//! assert!(result.is_ok());
//! ```

mod builder;
pub mod oracle;
pub mod world;

pub use builder::{RunnableScenario, Scenario};
pub use world::{CaseRecord, World};

/// Verification run over the [`World`] once every case has been exercised.
pub type OracleFn = Box<dyn Fn(&World) -> Result<(), String>>;
