//! Remote service interface.
//!
//! [`MegaverseApi`] is the seam between the reconciler and the transport.
//! [`HttpApi`] talks to the real service; tests substitute in-memory fakes.

mod http;
mod mutation;

pub use http::HttpApi;
pub use mutation::{Endpoint, Method, Mutation, MutationBody};

use crate::error::ApiError;
use crate::wire::{RawGoalResponse, RawMapResponse};

/// Operations the reconciler needs from the remote service.
///
/// Implementations are shared across dispatcher workers, hence `Sync`.
pub trait MegaverseApi: Sync {
    /// Candidate the map belongs to.
    fn candidate_id(&self) -> &str;

    /// Read the current map.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 status or an
    /// unparseable body.
    fn fetch_map(&self) -> Result<RawMapResponse, ApiError>;

    /// Read the goal.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 status or an
    /// unparseable body.
    fn fetch_goal(&self) -> Result<RawGoalResponse, ApiError>;

    /// Issue one create or delete call.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-200 status.
    fn send(&self, mutation: &Mutation) -> Result<(), ApiError>;
}
