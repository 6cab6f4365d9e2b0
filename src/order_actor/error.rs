//! Error types for the Order actor.

use crate::framework::FrameworkError;
use crate::model::{CourierId, OrderId, OrderStatus, Role};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// No order with this id exists in the collection.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The requested status change is not an edge of the order state machine.
    #[error("Invalid transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// A courier tried to move an order assigned to someone else (or to nobody).
    #[error("Order {id} is not assigned to courier {courier}")]
    NotAssigned { id: OrderId, courier: CourierId },

    /// The role is not allowed to set this status.
    #[error("Role {role} may not move an order to {status}")]
    NotPermitted { role: Role, status: OrderStatus },

    /// The order request itself is unusable (e.g. a blank smart-order text).
    #[error("Order validation error: {0}")]
    Validation(String),

    /// A scheduled order commit was cancelled before it ran.
    #[error("Order commit was cancelled")]
    CommitCancelled,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            // Entity hooks only ever fail with OrderError; recover it intact.
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
