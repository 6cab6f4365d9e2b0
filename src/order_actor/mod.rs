//! Order-specific resource logic: the lifecycle state machine and its entity implementation.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its generic client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
