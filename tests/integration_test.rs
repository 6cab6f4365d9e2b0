use async_trait::async_trait;
use errand_market::assistant::{Assistant, AssistantError, TextAssistant, MAX_TAGS, SUMMARY_LIMIT};
use errand_market::clients::actor_client::ActorClient;
use errand_market::config::Config;
use errand_market::lifecycle::MarketplaceSystem;
use errand_market::model::{
    CourierId, MerchantId, OrderDraft, OrderStatus, Role, RoleView, ServiceType, UserId,
    DEFAULT_DROPOFF_ADDRESS, DEFAULT_PICKUP_ADDRESS,
};
use errand_market::order_actor::OrderError;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn test_system() -> MarketplaceSystem {
    MarketplaceSystem::with_assistant(
        Config::default().with_commit_delay(Duration::ZERO),
        Assistant::disabled(),
    )
}

/// Full courier run against the real actor.
#[tokio::test]
async fn test_courier_runs_an_order_to_completion() {
    let system = test_system();
    let courier = CourierId::from("rider_7");

    let order_id = system
        .order_client
        .create_order(OrderDraft::new().description("Pick up dry cleaning"))
        .await
        .expect("Failed to create order");

    // Defaults fill everything but the description
    let order = system
        .order_client
        .get(order_id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(order.user_id, UserId::from("user_1"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.service_type, ServiceType::BuyForMe);
    assert_eq!(order.price, 0.0);
    assert_eq!(order.pickup.address, DEFAULT_PICKUP_ADDRESS);
    assert_eq!(order.dropoff.address, DEFAULT_DROPOFF_ADDRESS);
    assert!(order.courier_id.is_none());
    assert!(order.tags.is_empty());

    let accepted = system
        .order_client
        .accept_order(order_id, courier.clone())
        .await
        .expect("Failed to accept");
    assert_eq!(accepted.status, OrderStatus::Accepted);

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let order = system
            .order_client
            .advance(order_id, courier.clone())
            .await
            .expect("Failed to advance");
        statuses.push(order.status);
    }
    assert_eq!(
        statuses,
        vec![OrderStatus::PickingUp, OrderStatus::Delivering, OrderStatus::Completed]
    );

    let done = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(done.courier_id, Some(courier.clone()));

    // Terminal: neither cancel nor another advance goes through
    let err = system.order_client.cancel_order(order_id).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
    let err = system.order_client.advance(order_id, courier).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Failed writes leave the collection exactly as it was.
#[tokio::test]
async fn test_rejected_writes_leave_collection_unchanged() {
    let system = test_system();
    system.seed_demo_orders().await.unwrap();
    let before = system.order_client.list().await.unwrap();

    let missing = errand_market::model::OrderId(999);
    let err = system
        .order_client
        .advance_status(missing, OrderStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::NotFound("ord_999".to_string()));

    // Skipping straight to Completed is not an edge
    let pending_id = before[0].id;
    let err = system
        .order_client
        .advance_status(pending_id, OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    // Wrong courier on the delivering fixture
    let delivering_id = before[1].id;
    let err = system
        .order_client
        .advance(delivering_id, CourierId::from("rider_2"))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotAssigned { .. }));

    let after = system.order_client.list().await.unwrap();
    assert_eq!(*before, *after);

    system.shutdown().await.unwrap();
}

/// Snapshots taken earlier never see later writes.
#[tokio::test]
async fn test_snapshots_are_immutable() {
    let system = test_system();
    let first = system
        .quick_order(UserId::from("user_1"), ServiceType::QueueForMe)
        .await
        .unwrap();
    let snapshot = system.order_client.list().await.unwrap();

    system
        .order_client
        .accept_order(first, CourierId::from("rider_1"))
        .await
        .unwrap();
    system
        .quick_order(UserId::from("user_1"), ServiceType::Cleaning)
        .await
        .unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].status, OrderStatus::Pending);

    let latest = system.order_client.list().await.unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[1].status, OrderStatus::Accepted);

    system.shutdown().await.unwrap();
}

/// Concurrent creates all land with distinct ids, newest first.
#[tokio::test]
async fn test_concurrent_orders() {
    let system = test_system();

    let mut handles = vec![];
    for i in 0..10 {
        let order_client = system.order_client.clone();
        handles.push(tokio::spawn(async move {
            order_client
                .create_order(OrderDraft::new().description(format!("errand {i}")))
                .await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 10);

    let all = system.order_client.list().await.unwrap();
    assert_eq!(all.len(), 10);
    let listed: Vec<u32> = all.iter().map(|o| o.id.0).collect();
    let mut sorted = listed.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(listed, sorted, "Newest order should be at the head");

    system.shutdown().await.unwrap();
}

/// Two couriers race for the same order; exactly one wins.
#[tokio::test]
async fn test_concurrent_accepts_assign_one_courier() {
    let system = test_system();
    let order_id = system
        .quick_order(UserId::from("user_1"), ServiceType::Deliver)
        .await
        .unwrap();

    let mut handles = vec![];
    for rider in ["rider_1", "rider_2", "rider_3"] {
        let order_client = system.order_client.clone();
        handles.push(tokio::spawn(async move {
            order_client.accept_order(order_id, CourierId::from(rider)).await
        }));
    }

    let mut winners = vec![];
    for handle in handles {
        if let Ok(order) = handle.await.unwrap() {
            winners.push(order.courier_id);
        }
    }
    assert_eq!(winners.len(), 1);

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.courier_id, winners[0]);
    assert_eq!(order.status, OrderStatus::Accepted);

    system.shutdown().await.unwrap();
}

/// Each role sees only its slice of the seeded market.
#[tokio::test]
async fn test_role_views_over_seeded_orders() {
    let system = test_system();
    system.seed_demo_orders().await.unwrap();

    let consumer = system
        .orders_for(&RoleView::Consumer(UserId::from("user_1")))
        .await
        .unwrap();
    assert_eq!(consumer.len(), 1);
    assert_eq!(consumer[0].status, OrderStatus::Pending);

    let courier = system
        .orders_for(&RoleView::Courier(CourierId::from("rider_1")))
        .await
        .unwrap();
    assert_eq!(courier.len(), 1);
    assert_eq!(courier[0].status, OrderStatus::Delivering);

    // The merchant queue holds every order still in progress
    let merchant = system
        .orders_for(&RoleView::Merchant(MerchantId::from("mer_1")))
        .await
        .unwrap();
    assert_eq!(merchant.len(), 2);
    assert!(merchant.iter().all(|o| o.is_active()));

    let other_merchant = system
        .orders_for(&RoleView::Merchant(MerchantId::from("mer_404")))
        .await
        .unwrap();
    assert_eq!(other_merchant, merchant);

    // Cancelling drops the order from the merchant queue but not the consumer list
    system
        .advance_status_as(Role::Admin, consumer[0].id, OrderStatus::Cancelled)
        .await
        .unwrap();
    let merchant = system
        .orders_for(&RoleView::Merchant(MerchantId::from("mer_1")))
        .await
        .unwrap();
    assert_eq!(merchant.len(), 1);
    assert_eq!(merchant[0].status, OrderStatus::Delivering);
    assert_eq!(
        system
            .orders_for(&RoleView::Consumer(UserId::from("user_1")))
            .await
            .unwrap()
            .len(),
        1
    );

    let stats = system.dashboard().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.by_status[&OrderStatus::Cancelled], 1);
    assert_eq!(stats.by_status[&OrderStatus::Delivering], 1);
    assert_eq!(stats.gross_value, 69.0);

    system.shutdown().await.unwrap();
}

/// Orders placed by consumers land in the merchant queue, ready to accept.
#[tokio::test]
async fn test_consumer_orders_reach_the_merchant() {
    let system = test_system();
    let quick = system
        .quick_order(UserId::from("user_1"), ServiceType::BuyForMe)
        .await
        .unwrap();
    let smart = system
        .smart_order(UserId::from("user_1"), "a dozen eggs")
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    let view = RoleView::Merchant(MerchantId::from("mer_1"));
    let queue = system.orders_for(&view).await.unwrap();
    let ids: Vec<_> = queue.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![smart, quick]);

    let accepted = system
        .advance_status_as(Role::Merchant, quick, OrderStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, OrderStatus::Accepted);
    assert_eq!(system.orders_for(&view).await.unwrap().len(), 2);

    system.shutdown().await.unwrap();
}

/// A chatty backend gets trimmed to the summary and tag limits.
struct Verbose;

#[async_trait]
impl TextAssistant for Verbose {
    async fn summarize(&self, _text: &str) -> Result<String, AssistantError> {
        Ok("x".repeat(400))
    }

    async fn suggest_tags(&self, _text: &str) -> Result<Vec<String>, AssistantError> {
        Ok(vec!["drinks".into(), " ".into(), "urgent".into(), "fragile".into(), "late-night".into()])
    }
}

#[tokio::test]
async fn test_smart_order_with_backend() {
    let system = MarketplaceSystem::with_assistant(
        Config::default().with_commit_delay(Duration::from_millis(10)),
        Assistant::new(Arc::new(Verbose)),
    );

    let pending = system
        .smart_order(UserId::from("user_5"), "coffee for the whole floor")
        .await
        .unwrap();
    let order_id = pending.wait().await.unwrap();

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, UserId::from("user_5"));
    assert_eq!(order.description.chars().count(), SUMMARY_LIMIT);
    assert_eq!(order.tags.len(), MAX_TAGS);
    assert_eq!(order.tags, vec!["drinks", "urgent", "fragile"]);

    system.shutdown().await.unwrap();
}
