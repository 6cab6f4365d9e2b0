//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter whose
//! level is taken from `RUST_LOG`.
//!
//! ```bash
//! # Lifecycle and order writes
//! RUST_LOG=info cargo run
//!
//! # Full draft payloads and actor requests
//! RUST_LOG=debug cargo run
//!
//! # Only the actor loop
//! RUST_LOG=errand_market::framework=debug cargo run
//! ```
//!
//! Client methods are wrapped in `#[instrument]` spans and the actor loop logs
//! with an `entity_type` field, so a courier run reads like:
//!
//! ```text
//! INFO accept_order{id=OrderId(1) courier=CourierId("rider_1")}: Action ok entity_type="Order" id=ord_1
//! INFO advance{id=OrderId(1) courier=CourierId("rider_1")}: Action ok entity_type="Order" id=ord_1
//! ```
//!
//! Assistant failures are logged at `warn` and never abort an order.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
