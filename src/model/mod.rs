//! Pure data structures (DTOs) managed by the order actor.

pub mod order;
pub mod role;
pub mod status;

pub use order::*;
pub use role::*;
pub use status::*;
