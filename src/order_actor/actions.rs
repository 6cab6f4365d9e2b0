//! Custom actions for the Order actor.
//!
//! These are the courier and admin operations that go beyond a plain status
//! replacement. They are handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::{CourierId, OrderStatus};

/// Replaces the status of an order (`advanceStatus`).
///
/// Used by merchants ("accept and print") and by any caller that already knows
/// the target status. The state machine is still enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Sets status to `Accepted` and assigns the courier in one step.
    ///
    /// # Errors
    /// Fails unless the order is `Pending`.
    Accept(CourierId),
    /// Moves an assigned order one step along the courier chain.
    ///
    /// # Errors
    /// Fails if the order belongs to another courier or is not in
    /// `Accepted`, `PickingUp` or `Delivering`.
    Advance(CourierId),
    /// Moves a non-terminal order to `Cancelled`.
    Cancel,
}
