//! Decoder for the goal endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Cell, Entity, Goal, Grid, Position};

/// Token for empty space.
const SPACE: &str = "SPACE";
/// Token for a Polyanet.
const POLYANET: &str = "POLYANET";
/// Type suffix of a Soloon token, as in `RED_SOLOON`.
const SOLOON: &str = "SOLOON";
/// Type suffix of a Cometh token, as in `UP_COMETH`.
const COMETH: &str = "COMETH";

/// Body of `GET map/{candidateId}/goal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGoalResponse {
    /// Rows of cell tokens.
    pub goal: Vec<Vec<String>>,
}

/// Decode the goal.
///
/// # Errors
///
/// - `UnrecognizedType` for a token that is not `SPACE`, `POLYANET`,
///   `<COLOR>_SOLOON` or `<DIRECTION>_COMETH`
/// - `InvalidArgument` for a color or direction outside its domain
/// - `InvalidShape` if the goal is empty or jagged
pub fn decode_goal(raw: &RawGoalResponse) -> Result<Goal, ModelError> {
    let rows = raw
        .goal
        .iter()
        .enumerate()
        .map(|(row, tokens)| {
            tokens
                .iter()
                .enumerate()
                .map(|(column, token)| decode_token(row, column, token))
                .collect::<Result<Vec<Cell>, ModelError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Goal::new(Grid::from_rows(rows)?))
}

fn decode_token(row: usize, column: usize, token: &str) -> Result<Cell, ModelError> {
    if token == SPACE {
        return Ok(None);
    }
    let position = Position::from_indices(row, column)?;
    if token == POLYANET {
        return Ok(Some(Entity::polyanet(position)));
    }

    let unrecognized = || ModelError::UnrecognizedType(token.to_string());
    let (characteristic, kind) = token.split_once('_').ok_or_else(unrecognized)?;
    let characteristic = characteristic.to_lowercase();
    let entity = match kind {
        SOLOON => Entity::soloon(position, &characteristic)?,
        COMETH => Entity::cometh(position, &characteristic)?,
        _ => return Err(unrecognized()),
    };
    Ok(Some(entity))
}
