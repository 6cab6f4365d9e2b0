//! Generic single-writer actor framework.
//!
//! This module provides the building blocks for type-safe actors that own an
//! ordered, copy-on-write collection of resource entities.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the collection
//! - [`ResourceClient`] - Type-safe client for sending requests to an actor
//! - [`Snapshot`] - Immutable view of the collection handed to readers
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
