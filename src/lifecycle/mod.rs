//! Runtime orchestration and lifecycle management.
//!
//! - [`MarketplaceSystem`] spawns the order actor, wires in the assistant and
//!   shuts everything down again.
//! - [`DeferredOrder`] tracks a smart order whose commit is still scheduled.
//! - [`setup_tracing`] initializes logging for the binary.

pub mod marketplace;
pub mod seed;
pub mod tracing;

pub use marketplace::*;
pub use self::tracing::setup_tracing;
