//! Create/delete call payloads.

use std::fmt;

use serde::Serialize;

use crate::model::{ComethDirection, Position, SoloonColor};

/// HTTP method of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Create an entity.
    Post,
    /// Delete whatever occupies a position.
    Delete,
}

impl Method {
    /// HTTP method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Mutation endpoint, relative to the service base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `api/polyanets`, also the universal delete endpoint.
    Polyanets,
    /// `api/soloons`.
    Soloons,
    /// `api/comeths`.
    Comeths,
}

impl Endpoint {
    /// Path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Polyanets => "api/polyanets",
            Self::Soloons => "api/soloons",
            Self::Comeths => "api/comeths",
        }
    }
}

/// JSON body shared by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationBody {
    /// Candidate owning the map.
    pub candidate_id: String,
    /// Target row.
    pub row: u32,
    /// Target column.
    pub column: u32,
    /// Soloon color, creates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SoloonColor>,
    /// Cometh direction, creates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ComethDirection>,
}

impl MutationBody {
    /// Body addressing a position with no variant attributes.
    #[must_use]
    pub fn at(candidate_id: &str, position: Position) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            row: position.row(),
            column: position.column(),
            color: None,
            direction: None,
        }
    }

    /// Position addressed by the body.
    #[must_use]
    pub const fn position(&self) -> (u32, u32) {
        (self.row, self.column)
    }
}

/// One remote create or delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// HTTP method.
    pub method: Method,
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// JSON body.
    pub body: MutationBody,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.method.as_str(),
            self.endpoint.path(),
            self.body.row,
            self.body.column
        )?;
        if let Some(color) = self.body.color {
            write!(f, " color={color}")?;
        }
        if let Some(direction) = self.body.direction {
            write!(f, " direction={direction}")?;
        }
        Ok(())
    }
}
