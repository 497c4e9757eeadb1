//! Domain model for the Megaverse.
//!
//! - Positions on the grid
//! - Astral objects (Polyanets, Soloons, Comeths)
//! - Rectangular grids of cells, the current map and the goal

mod entity;
mod grid;
mod position;

pub use entity::{ComethDirection, Entity, EntityKind, SoloonColor};
pub use grid::{Cell, Goal, Grid, Map, Phase};
pub use position::Position;
