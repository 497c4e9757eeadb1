//! Astral objects that can be placed on the grid.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::api::{Endpoint, Method, Mutation, MutationBody};
use crate::error::ModelError;
use crate::model::Position;

/// Color of a Soloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoloonColor {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Purple.
    Purple,
    /// White.
    White,
}

impl SoloonColor {
    /// All colors, in declaration order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Purple, Self::White];

    /// Wire name of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::White => "white",
        }
    }
}

impl FromStr for SoloonColor {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| ModelError::InvalidArgument(format!("Invalid Soloon color {s}")))
    }
}

impl fmt::Display for SoloonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction a Cometh is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComethDirection {
    /// Left.
    Left,
    /// Right.
    Right,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl ComethDirection {
    /// All directions, in declaration order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl FromStr for ComethDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| ModelError::InvalidArgument(format!("Invalid Cometh direction {s}")))
    }
}

impl fmt::Display for ComethDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant tag of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A Polyanet.
    Polyanet,
    /// A Soloon.
    Soloon,
    /// A Cometh.
    Cometh,
}

impl EntityKind {
    /// Endpoint that creates entities of this kind.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Polyanet => Endpoint::Polyanets,
            Self::Soloon => Endpoint::Soloons,
            Self::Cometh => Endpoint::Comeths,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Polyanet => "polyanet",
            Self::Soloon => "soloon",
            Self::Cometh => "cometh",
        };
        f.write_str(name)
    }
}

/// An astral object occupying one cell.
///
/// Positions and attributes are validated types, so every entity in
/// circulation is valid by construction. A changed cell is expressed by
/// deleting the old entity and creating a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A Polyanet.
    Polyanet {
        /// Cell occupied.
        position: Position,
    },
    /// A Soloon of some color.
    Soloon {
        /// Cell occupied.
        position: Position,
        /// Soloon color.
        color: SoloonColor,
    },
    /// A Cometh facing some direction.
    Cometh {
        /// Cell occupied.
        position: Position,
        /// Cometh direction.
        direction: ComethDirection,
    },
}

impl Entity {
    /// Create a Polyanet.
    #[must_use]
    pub const fn polyanet(position: Position) -> Self {
        Self::Polyanet { position }
    }

    /// Create a Soloon from its wire color name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the color is not one of
    /// `red`, `blue`, `purple`, `white`.
    pub fn soloon(position: Position, color: &str) -> Result<Self, ModelError> {
        Ok(Self::Soloon {
            position,
            color: color.parse()?,
        })
    }

    /// Create a Cometh from its wire direction name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the direction is not one of
    /// `left`, `right`, `up`, `down`.
    pub fn cometh(position: Position, direction: &str) -> Result<Self, ModelError> {
        Ok(Self::Cometh {
            position,
            direction: direction.parse()?,
        })
    }

    /// Cell this entity occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Polyanet { position }
            | Self::Soloon { position, .. }
            | Self::Cometh { position, .. } => *position,
        }
    }

    /// Variant tag.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Polyanet { .. } => EntityKind::Polyanet,
            Self::Soloon { .. } => EntityKind::Soloon,
            Self::Cometh { .. } => EntityKind::Cometh,
        }
    }

    /// Single-character picture of the entity used by grid rendering.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Polyanet { .. } => 'P',
            Self::Soloon { color, .. } => match color {
                SoloonColor::Red => 'r',
                SoloonColor::Blue => 'b',
                SoloonColor::Purple => 'p',
                SoloonColor::White => 'w',
            },
            Self::Cometh { direction, .. } => match direction {
                ComethDirection::Left => '<',
                ComethDirection::Right => '>',
                ComethDirection::Up => '^',
                ComethDirection::Down => 'v',
            },
        }
    }

    /// Mutation that creates this entity on the remote map.
    #[must_use]
    pub fn create_mutation(&self, candidate_id: &str) -> Mutation {
        let mut body = MutationBody::at(candidate_id, self.position());
        match self {
            Self::Polyanet { .. } => {}
            Self::Soloon { color, .. } => body.color = Some(*color),
            Self::Cometh { direction, .. } => body.direction = Some(*direction),
        }
        Mutation {
            method: Method::Post,
            endpoint: self.kind().endpoint(),
            body,
        }
    }

    /// Mutation that removes this entity from the remote map.
    ///
    /// Deletion is by position only; the Polyanet endpoint removes any kind.
    #[must_use]
    pub fn delete_mutation(&self, candidate_id: &str) -> Mutation {
        Mutation {
            method: Method::Delete,
            endpoint: Endpoint::Polyanets,
            body: MutationBody::at(candidate_id, self.position()),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polyanet { position } => write!(f, "polyanet at {position}"),
            Self::Soloon { position, color } => write!(f, "{color} soloon at {position}"),
            Self::Cometh {
                position,
                direction,
            } => write!(f, "{direction} cometh at {position}"),
        }
    }
}
