//! Grid positions.

use std::fmt;

use crate::error::ModelError;

/// A cell address on the Megaverse grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Create a position from signed coordinates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either coordinate is negative or does not
    /// fit the grid's index range.
    pub fn new(row: i64, column: i64) -> Result<Self, ModelError> {
        Ok(Self {
            row: coordinate("row", row)?,
            column: coordinate("column", column)?,
        })
    }

    /// Create a position from grid indices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an index does not fit the grid's index range.
    pub fn from_indices(row: usize, column: usize) -> Result<Self, ModelError> {
        let row = u32::try_from(row)
            .map_err(|_| ModelError::InvalidArgument(format!("Invalid row {row}")))?;
        let column = u32::try_from(column)
            .map_err(|_| ModelError::InvalidArgument(format!("Invalid column {column}")))?;
        Ok(Self { row, column })
    }

    /// Row index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

fn coordinate(name: &str, value: i64) -> Result<u32, ModelError> {
    u32::try_from(value).map_err(|_| ModelError::InvalidArgument(format!("Invalid {name} {value}")))
}
