//! Grids of cells, the current map and the goal.

use std::fmt;

use crate::error::ModelError;
use crate::model::{Entity, Position};

/// A grid cell: an entity or empty space.
pub type Cell = Option<Entity>;

/// A rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    columns: usize,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if there are no rows, the first row is empty,
    /// or any row differs in length from the first. Returns `InvalidArgument`
    /// if an entity's position does not match the cell holding it.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ModelError> {
        let Some(first) = rows.first() else {
            return Err(ModelError::InvalidShape("Cannot have an empty map".to_string()));
        };
        let columns = first.len();
        if columns == 0 {
            return Err(ModelError::InvalidShape("Cannot have an empty row".to_string()));
        }

        let row_count = rows.len();
        let mut cells = Vec::with_capacity(row_count * columns);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(ModelError::InvalidShape(format!(
                    "Row {row_idx} has {} columns, expected {columns}",
                    row.len()
                )));
            }
            for (col_idx, cell) in row.into_iter().enumerate() {
                if let Some(entity) = &cell {
                    let expected = Position::from_indices(row_idx, col_idx)?;
                    if entity.position() != expected {
                        return Err(ModelError::InvalidArgument(format!(
                            "{entity} placed in cell {expected}"
                        )));
                    }
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: row_count,
            columns,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns (every row has this length).
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns
    }

    /// Get the entity at the given cell, if any.
    ///
    /// Out-of-bounds addresses are treated as empty.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Entity> {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column].as_ref()
        } else {
            None
        }
    }

    /// Iterate over all occupied cells in row-major order.
    pub fn flatten_occupied(&self) -> impl Iterator<Item = &Entity> {
        self.cells.iter().flatten()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.flatten_occupied().count()
    }

    /// Iterate over every cell with its `(row, column)` indices.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Option<&Entity>)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / columns, idx % columns), cell.as_ref()))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: String = row
                .iter()
                .map(|cell| cell.as_ref().map_or('.', Entity::glyph))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Challenge stage carried by the current map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    /// Phase 1 (Polyanets only).
    One = 1,
    /// Phase 2 (all astral objects).
    Two = 2,
}

impl TryFrom<i64> for Phase {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(ModelError::InvalidArgument(format!(
                "The phase of the challenge can only be 1 or 2, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// The current state of the remote map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    phase: Phase,
    grid: Grid,
}

impl Map {
    /// Create a map.
    #[must_use]
    pub const fn new(phase: Phase, grid: Grid) -> Self {
        Self { phase, grid }
    }

    /// Challenge phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Cells of the map.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// The desired end state of the remote map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    grid: Grid,
}

impl Goal {
    /// Create a goal.
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Cells of the goal.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}
