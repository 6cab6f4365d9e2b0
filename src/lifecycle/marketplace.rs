use crate::assistant::{Analysis, Assistant};
use crate::clients::{ActorClient, OrderClient};
use crate::config::Config;
use crate::model::{Order, OrderDraft, OrderId, OrderStatus, Role, RoleView, ServiceType, UserId};
use crate::order_actor::{OrderContext, OrderError};
use crate::views::{self, DashboardStats};
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::seed;

/// Description used by one-tap orders.
pub const QUICK_ORDER_DESCRIPTION: &str = "Quick order";
pub const QUICK_ORDER_PRICE: f64 = 15.0;
pub const QUICK_ORDER_DISTANCE_KM: f64 = 3.2;
pub const QUICK_ORDER_TAG: &str = "daily";

/// Distance assumed for smart orders until real routing exists.
pub const SMART_ORDER_DISTANCE_KM: f64 = 2.5;

/// The marketplace coordinator.
///
/// `MarketplaceSystem` owns the running order actor and everything that sits
/// in front of it:
/// - **Lifecycle**: spawning the actor and shutting it down again
/// - **Order entry**: demo seeding, quick orders and assistant-backed smart orders
/// - **Views**: role-scoped lists and dashboard figures over the latest snapshot
///
/// # Example
///
/// ```ignore
/// let system = MarketplaceSystem::new(Config::from_env()?);
/// system.seed_demo_orders().await?;
///
/// let pending = system.smart_order(UserId::from("user_1"), "two lattes, oat milk").await?;
/// let order_id = pending.wait().await?;
///
/// system.order_client.accept_order(order_id, CourierId::from("rider_1")).await?;
/// system.shutdown().await?;
/// ```
pub struct MarketplaceSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    assistant: Assistant,
    config: Config,

    /// Task handles for the running actors
    handles: Vec<JoinHandle<()>>,
}

impl MarketplaceSystem {
    /// Starts the system with the assistant described by `config`.
    pub fn new(config: Config) -> Self {
        let assistant = Assistant::from_config(&config);
        Self::with_assistant(config, assistant)
    }

    /// Starts the system with an explicit assistant.
    pub fn with_assistant(config: Config, assistant: Assistant) -> Self {
        let (order_actor, order_client) = crate::order_actor::new(config.channel_capacity);

        let context = OrderContext {
            default_user: config.current_user.clone(),
        };
        let order_handle = tokio::spawn(order_actor.run(context));

        info!(
            current_user = %config.current_user,
            assistant = assistant.is_enabled(),
            "Marketplace started"
        );

        Self {
            order_client: OrderClient::new(order_client),
            assistant,
            config,
            handles: vec![order_handle],
        }
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the demo fixtures and returns their ids, oldest first.
    pub async fn seed_demo_orders(&self) -> Result<Vec<OrderId>, OrderError> {
        let mut ids = Vec::new();
        for draft in seed::demo_orders() {
            ids.push(self.order_client.create_order(draft).await?);
        }
        info!(count = ids.len(), "Demo orders seeded");
        Ok(ids)
    }

    /// One-tap order for a service type, with fixed price and distance.
    #[instrument(skip(self))]
    pub async fn quick_order(&self, user: UserId, service_type: ServiceType) -> Result<OrderId, OrderError> {
        let draft = OrderDraft::new()
            .user(user)
            .service_type(service_type)
            .description(QUICK_ORDER_DESCRIPTION)
            .price(QUICK_ORDER_PRICE)
            .distance_km(QUICK_ORDER_DISTANCE_KM)
            .tags([QUICK_ORDER_TAG]);
        self.order_client.create_order(draft).await
    }

    /// Analyzes a free-text request and schedules the resulting order.
    ///
    /// The summary and tags are fetched concurrently; assistant failures fall
    /// back to placeholder text and never fail the order. The commit runs after
    /// the configured delay and can be cancelled until then.
    ///
    /// # Errors
    /// `Validation` if `text` is blank. Nothing is scheduled in that case.
    #[instrument(skip(self, text))]
    pub async fn smart_order(&self, user: UserId, text: &str) -> Result<DeferredOrder, OrderError> {
        if text.trim().is_empty() {
            return Err(OrderError::Validation("order text is empty".to_string()));
        }

        let analysis = self.assistant.analyze(text).await;
        let price = rand::thread_rng().gen_range(10..30) as f64;

        let draft = OrderDraft::new()
            .user(user)
            .service_type(ServiceType::BuyForMe)
            .description(analysis.summary.clone())
            .price(price)
            .distance_km(SMART_ORDER_DISTANCE_KM)
            .tags(analysis.tags.clone());

        let client = self.order_client.clone();
        let delay = self.config.commit_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            client.create_order(draft).await
        });

        info!(delay_ms = delay.as_millis() as u64, "Smart order scheduled");
        Ok(DeferredOrder { analysis, handle })
    }

    /// Sets a status on behalf of `role`.
    ///
    /// Only the role is checked, not the identity behind it: the courier
    /// assignment is left untouched. Couriers taking or running an order go
    /// through [`OrderClient::accept_order`] and [`OrderClient::advance`], which
    /// assign the courier and enforce ownership. An order moved to `Accepted`
    /// here leaves the courier hall without a courier.
    ///
    /// # Errors
    /// `NotPermitted` if the role may not set `status` at all; otherwise the
    /// state-machine errors of [`OrderClient::advance_status`].
    pub async fn advance_status_as(&self, role: Role, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        if !role.may_trigger(status) {
            return Err(OrderError::NotPermitted { role, status });
        }
        self.order_client.advance_status(id, status).await
    }

    pub async fn orders_for(&self, view: &RoleView) -> Result<Vec<Order>, OrderError> {
        self.order_client.orders_for(view).await
    }

    /// Pending orders no courier has taken yet.
    pub async fn available_orders(&self) -> Result<Vec<Order>, OrderError> {
        let snapshot = self.order_client.list().await?;
        Ok(views::available_orders(&snapshot))
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, OrderError> {
        let snapshot = self.order_client.list().await?;
        Ok(DashboardStats::from_orders(&snapshot))
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the actor's channel once every outstanding
    /// [`DeferredOrder`] has finished, been cancelled or been dropped. A
    /// [`DeferredOrder`] still held by the caller keeps its commit alive, so
    /// shutdown waits out the rest of its delay. Returns an error if an actor
    /// task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace...");
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}

/// A smart order waiting for its scheduled commit.
///
/// Dropping it aborts a commit that has not run yet.
#[derive(Debug)]
pub struct DeferredOrder {
    analysis: Analysis,
    handle: JoinHandle<Result<OrderId, OrderError>>,
}

impl DeferredOrder {
    /// What the assistant made of the request.
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Aborts the commit. Has no effect if the order was already created.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the commit and returns the new order's id.
    ///
    /// # Errors
    /// `CommitCancelled` if [`cancel`](Self::cancel) won the race, or the
    /// creation error itself.
    pub async fn wait(mut self) -> Result<OrderId, OrderError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(OrderError::CommitCancelled),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl Drop for DeferredOrder {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{MISSING_KEY_SUMMARY, MISSING_KEY_TAG};
    use crate::model::{CourierId, MerchantId};
    use std::time::Duration;

    fn system(delay: Duration) -> MarketplaceSystem {
        MarketplaceSystem::with_assistant(
            Config::default().with_commit_delay(delay),
            Assistant::disabled(),
        )
    }

    #[tokio::test]
    async fn seeding_puts_the_pending_order_first() {
        let system = system(Duration::ZERO);
        let ids = system.seed_demo_orders().await.unwrap();
        assert_eq!(ids, vec![OrderId(1), OrderId(2)]);

        let all = system.orders_for(&RoleView::Admin).await.unwrap();
        assert_eq!(all[0].status, OrderStatus::Pending);
        assert_eq!(all[0].merchant_id, Some(MerchantId::from("mer_1")));
        assert_eq!(all[1].courier_id, Some(CourierId::from("rider_1")));

        let hall = system.available_orders().await.unwrap();
        assert_eq!(hall.len(), 1);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn quick_order_uses_fixed_values() {
        let system = system(Duration::ZERO);
        let id = system
            .quick_order(UserId::from("user_3"), ServiceType::Cleaning)
            .await
            .unwrap();

        let order = system.order_client.get(id).await.unwrap().unwrap();
        assert_eq!(order.description, QUICK_ORDER_DESCRIPTION);
        assert_eq!(order.price, 15.0);
        assert_eq!(order.distance_km, 3.2);
        assert_eq!(order.tags, vec!["daily"]);
        assert_eq!(order.service_type, ServiceType::Cleaning);
        assert_eq!(order.user_id, UserId::from("user_3"));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn smart_order_without_key_commits_placeholder() {
        let system = system(Duration::ZERO);
        let pending = system
            .smart_order(UserId::from("user_1"), "two lattes, oat milk")
            .await
            .unwrap();
        assert_eq!(pending.analysis().summary, MISSING_KEY_SUMMARY);

        let id = pending.wait().await.unwrap();
        let order = system.order_client.get(id).await.unwrap().unwrap();
        assert_eq!(order.description, MISSING_KEY_SUMMARY);
        assert_eq!(order.tags, vec![MISSING_KEY_TAG]);
        assert_eq!(order.service_type, ServiceType::BuyForMe);
        assert_eq!(order.distance_km, SMART_ORDER_DISTANCE_KM);
        assert!((10.0..30.0).contains(&order.price));
        assert_eq!(order.price.fract(), 0.0);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn blank_smart_order_is_rejected() {
        let system = system(Duration::ZERO);
        let err = system.smart_order(UserId::from("user_1"), "   ").await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
        assert!(system.orders_for(&RoleView::Admin).await.unwrap().is_empty());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_smart_order_never_lands() {
        let system = system(Duration::from_secs(3600));
        let pending = system
            .smart_order(UserId::from("user_1"), "a bag of oranges")
            .await
            .unwrap();
        pending.cancel();
        assert_eq!(pending.wait().await, Err(OrderError::CommitCancelled));
        assert!(system.orders_for(&RoleView::Admin).await.unwrap().is_empty());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn dropped_smart_order_does_not_hold_up_shutdown() {
        let system = system(Duration::from_secs(3600));
        let pending = system
            .smart_order(UserId::from("user_1"), "flowers for reception")
            .await
            .unwrap();
        drop(pending);

        assert!(system.orders_for(&RoleView::Admin).await.unwrap().is_empty());
        tokio::time::timeout(Duration::from_secs(5), system.shutdown())
            .await
            .expect("shutdown should not wait for a dropped commit")
            .unwrap();
    }

    #[tokio::test]
    async fn role_gated_accept_leaves_courier_unassigned() {
        let system = system(Duration::ZERO);
        let id = system
            .quick_order(UserId::from("user_1"), ServiceType::Deliver)
            .await
            .unwrap();

        let order = system
            .advance_status_as(Role::Merchant, id, OrderStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);
        assert!(order.courier_id.is_none());
        assert!(system.available_orders().await.unwrap().is_empty());

        // Ownership still applies on the courier path.
        let err = system
            .order_client
            .advance(id, CourierId::from("rider_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotAssigned { .. }));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn roles_are_checked_before_the_actor() {
        let system = system(Duration::ZERO);
        let id = system
            .quick_order(UserId::from("user_1"), ServiceType::Deliver)
            .await
            .unwrap();

        let err = system
            .advance_status_as(Role::Consumer, id, OrderStatus::Accepted)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::NotPermitted {
                role: Role::Consumer,
                status: OrderStatus::Accepted
            }
        );

        let cancelled = system
            .advance_status_as(Role::Consumer, id, OrderStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        system.shutdown().await.unwrap();
    }
}
