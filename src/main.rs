//! # Errand Market demo
//!
//! Walks one errand through the whole marketplace:
//! 1. Seeds the demo orders.
//! 2. Places a smart order (placeholder analysis without an API key).
//! 3. Has a courier accept it and carry it to completion.
//! 4. Prints the admin dashboard.
//!
//! Configure with `GEMINI_API_KEY`, `MARKET_COMMIT_DELAY_MS` and `RUST_LOG`.

use errand_market::config::Config;
use errand_market::lifecycle::{setup_tracing, MarketplaceSystem};
use errand_market::model::{CourierId, RoleView};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    let current_user = config.current_user.clone();
    info!("Starting errand marketplace");

    let system = MarketplaceSystem::new(config);
    system.seed_demo_orders().await.map_err(|e| e.to_string())?;

    let span = tracing::info_span!("smart_order");
    let order_id = async {
        info!("Analyzing request");
        let pending = system
            .smart_order(current_user.clone(), "Two iced americanos from the cafe downstairs, no sugar")
            .await
            .map_err(|e| e.to_string())?;
        info!(summary = %pending.analysis().summary, tags = ?pending.analysis().tags, "Analysis ready");
        pending.wait().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let courier = CourierId::from("rider_1");
    let span = tracing::info_span!("courier_run", %courier);
    let run = async {
        let mut order = system.order_client.accept_order(order_id, courier.clone()).await?;
        while order.is_active() {
            info!(status = %order.status, next = order.status.next_action_label(), "Courier step");
            order = system.order_client.advance(order_id, courier.clone()).await?;
        }
        Ok::<_, errand_market::order_actor::OrderError>(order)
    }
    .instrument(span)
    .await;

    match run {
        Ok(order) => info!(order_id = %order.id, status = %order.status, "Errand finished"),
        Err(e) => error!(error = %e, "Courier run failed"),
    }

    let mine = system
        .orders_for(&RoleView::Consumer(current_user))
        .await
        .map_err(|e| e.to_string())?;
    info!(count = mine.len(), "Orders for current user");

    let stats = system.dashboard().await.map_err(|e| e.to_string())?;
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Could not render dashboard"),
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
