use crate::clients::actor_client::ActorClient;
use crate::framework::{ResourceClient, Snapshot};
use crate::model::{CourierId, Order, OrderDraft, OrderId, OrderStatus, RoleView};
use crate::order_actor::{OrderAction, OrderError, StatusUpdate};
use crate::views;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Every write is a single request to the actor, so callers never observe a
/// half-applied change. The state machine itself lives in the entity hooks.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Creates an order from a draft; unset fields get their defaults.
    #[instrument(skip(self, draft))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, OrderError> {
        debug!(?draft, "create_order called");
        let id = self.inner.create(draft).await?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    /// Replaces the status of an order.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `InvalidTransition` for a move the state
    /// machine forbids. In both cases the collection is unchanged.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        Ok(self.inner.update(id, StatusUpdate { status }).await?)
    }

    /// Assigns the courier and marks the order accepted in one step.
    #[instrument(skip(self))]
    pub async fn accept_order(&self, id: OrderId, courier: CourierId) -> Result<Order, OrderError> {
        Ok(self.inner.perform_action(id, OrderAction::Accept(courier)).await?)
    }

    /// Moves an assigned order one step along the courier chain.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, courier: CourierId) -> Result<Order, OrderError> {
        Ok(self.inner.perform_action(id, OrderAction::Advance(courier)).await?)
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        Ok(self.inner.perform_action(id, OrderAction::Cancel).await?)
    }

    /// The orders visible to `view`, newest first.
    pub async fn orders_for(&self, view: &RoleView) -> Result<Vec<Order>, OrderError> {
        let snapshot: Snapshot<Order> = self.list().await?;
        Ok(views::orders_for(view, &snapshot))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }
}
