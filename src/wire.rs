//! Wire decoding for the two read endpoints.
//!
//! The map endpoint and the goal endpoint serialize the same astral objects
//! in incompatible ways, so each has its own raw types and decoder:
//!
//! ```text
//! GET map/{id}       {"map": {"phase": 2, "content": [[null, {"type": 1, "color": "red"}]]}}
//! GET map/{id}/goal  {"goal": [["SPACE", "RED_SOLOON"]]}
//! ```
//!
//! Both decoders walk row-major, take positions from the cell indices and
//! leave shape validation to [`Grid::from_rows`](crate::model::Grid::from_rows).

mod goal;
mod map;

pub use goal::{decode_goal, RawGoalResponse};
pub use map::{decode_map, RawCell, RawMap, RawMapResponse};
