//! # Errand Market
//!
//! > **An errand-running marketplace on resource-oriented actors.**
//!
//! Consumers post errands ("buy me a coffee", "deliver this document"),
//! couriers pick them up and carry them through a fixed lifecycle, merchants
//! watch their queue and an admin sees everything. All of it runs against a
//! single in-memory order collection.
//!
//! ## 🏗️ Design
//!
//! ### One writer, many snapshots
//! The order collection is owned by one [`ResourceActor`](framework::ResourceActor)
//! running in its own Tokio task. Every write is one message, handled to
//! completion before the next. Readers get an `Arc<Vec<Order>>` snapshot that
//! later writes never touch (copy-on-write through `Arc::make_mut`).
//!
//! ### The state machine lives in the entity
//! `Pending -> Accepted -> PickingUp -> Delivering -> Completed`, with
//! `Cancelled` reachable from any non-terminal state. The rules are enforced in
//! the `ActorEntity` hooks of [`Order`](model::Order); a rejected move leaves
//! the collection exactly as it was.
//!
//! ### Best-effort assistant
//! Smart orders ask a hosted language model for a summary and tags. The
//! [`Assistant`](assistant::Assistant) facade turns every failure into a fixed
//! fallback, so a missing key or a flaky network never blocks an order.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` and its client, plus [`framework::mock`] for
//! testing clients without spawning an actor.
//!
//! ### 2. The Domain ([`model`], [`order_actor`], [`views`])
//! Order data, statuses and roles; the `ActorEntity` implementation with its
//! transition rules; pure role-scoped projections and dashboard figures.
//!
//! ### 3. The Interface ([`clients`])
//! [`OrderClient`](clients::OrderClient) wraps the generic client with typed
//! order operations.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`], [`assistant`])
//! [`MarketplaceSystem`](lifecycle::MarketplaceSystem) spawns the actor, wires in
//! the assistant and configuration and handles shutdown.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # With a real model behind smart orders
//! GEMINI_API_KEY=... RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod assistant;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod views;
