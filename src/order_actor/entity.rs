//! ActorEntity trait implementation for the Order domain type.
//!
//! This is where the order state machine is enforced. Every hook works on a
//! private copy of the order (see [`ActorEntity::on_update`]), so a rejected
//! transition never becomes visible.

use super::{OrderAction, OrderError, StatusUpdate};
use crate::framework::ActorEntity;
use crate::model::{CourierId, Order, OrderDraft, OrderId, OrderStatus, UserId};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

/// Defaults injected into the order actor at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderContext {
    /// Owner assigned to drafts that do not name a user.
    pub default_user: UserId,
}

impl Default for OrderContext {
    fn default() -> Self {
        Self {
            default_user: UserId::from("user_1"),
        }
    }
}

impl Order {
    fn transition(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(to) {
            return Err(OrderError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }
        debug!(order_id = %self.id, from = %self.status, %to, "Transition");
        self.status = to;
        Ok(())
    }

    fn ensure_assigned_to(&self, courier: &CourierId) -> Result<(), OrderError> {
        if self.courier_id.as_ref() != Some(courier) {
            return Err(OrderError::NotAssigned {
                id: self.id,
                courier: courier.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = StatusUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Fills unset draft fields with defaults and stamps the creation time.
    fn from_create_params(
        id: OrderId,
        draft: OrderDraft,
        ctx: &OrderContext,
    ) -> Result<Self, OrderError> {
        Ok(Order::from_draft(id, draft, &ctx.default_user, Utc::now()))
    }

    /// Replaces the status, subject to the state machine.
    async fn on_update(&mut self, update: StatusUpdate, _ctx: &OrderContext) -> Result<(), OrderError> {
        self.transition(update.status)
    }

    /// Handles courier and admin actions.
    ///
    /// # Actions
    /// - `Accept`: `Pending -> Accepted` and assigns the courier
    /// - `Advance`: moves to [`OrderStatus::next`] for the assigned courier
    /// - `Cancel`: any non-terminal status to `Cancelled`
    async fn handle_action(&mut self, action: OrderAction, _ctx: &OrderContext) -> Result<Order, OrderError> {
        match action {
            OrderAction::Accept(courier) => {
                self.transition(OrderStatus::Accepted)?;
                self.courier_id = Some(courier);
            }
            OrderAction::Advance(courier) => {
                self.ensure_assigned_to(&courier)?;
                match self.status {
                    OrderStatus::Accepted | OrderStatus::PickingUp | OrderStatus::Delivering => {
                        self.transition(self.status.next())?;
                    }
                    OrderStatus::Pending | OrderStatus::Completed | OrderStatus::Cancelled => {
                        return Err(OrderError::InvalidTransition {
                            id: self.id,
                            from: self.status,
                            to: self.status.next(),
                        });
                    }
                }
            }
            OrderAction::Cancel => self.transition(OrderStatus::Cancelled)?,
        }
        Ok(self.clone())
    }
}
