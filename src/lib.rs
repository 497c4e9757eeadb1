// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Megaverse: reconciles a remote astral-object map with its goal state.
//!
//! This crate provides:
//! - A validated model of Polyanets, Soloons and Comeths on a grid
//! - Decoders for the map and goal wire formats
//! - A rate-limited dispatcher for concurrent remote calls
//! - A clear-then-apply reconciler
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           Reconciler                │
//! ├──────────────────┬──────────────────┤
//! │   Wire decoders  │    Dispatcher    │
//! ├──────────────────┼──────────────────┤
//! │   Model / Grid   │  MegaverseApi    │
//! └──────────────────┴──────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod wire;

pub use error::{ApiError, ModelError};

// Re-export key types at crate root for convenience
pub use api::{HttpApi, MegaverseApi, Mutation};
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, RateLimiter};
pub use model::{Entity, Goal, Grid, Map, Phase, Position};
pub use reconcile::{Plan, Reconciler, RunReport};
