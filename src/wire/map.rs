//! Decoder for the current-map endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Cell, Entity, Grid, Map, Phase, Position};

/// Wire discriminant of a Polyanet.
const TYPE_POLYANET: i64 = 0;
/// Wire discriminant of a Soloon.
const TYPE_SOLOON: i64 = 1;
/// Wire discriminant of a Cometh.
const TYPE_COMETH: i64 = 2;

/// Body of `GET map/{candidateId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMapResponse {
    /// The map itself.
    pub map: RawMap,
}

/// Raw map: challenge phase and rows of optional cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMap {
    /// Challenge phase (1 or 2).
    pub phase: i64,
    /// Rows of cells, `null` for empty space.
    pub content: Vec<Vec<Option<RawCell>>>,
}

/// Raw occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    /// Type discriminant (0 Polyanet, 1 Soloon, 2 Cometh).
    #[serde(rename = "type")]
    pub kind: i64,
    /// Soloon color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Cometh direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// Decode the current map.
///
/// # Errors
///
/// - `UnrecognizedType` for a discriminant outside `0..=2`
/// - `InvalidArgument` for a bad phase, color or direction, or a missing attribute
/// - `InvalidShape` if the content is empty or jagged
pub fn decode_map(raw: &RawMapResponse) -> Result<Map, ModelError> {
    let phase = Phase::try_from(raw.map.phase)?;

    let rows = raw
        .map
        .content
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| decode_cell(row, column, cell.as_ref()))
                .collect::<Result<Vec<Cell>, ModelError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Map::new(phase, Grid::from_rows(rows)?))
}

fn decode_cell(row: usize, column: usize, cell: Option<&RawCell>) -> Result<Cell, ModelError> {
    let Some(cell) = cell else {
        return Ok(None);
    };
    let position = Position::from_indices(row, column)?;

    let entity = match cell.kind {
        TYPE_POLYANET => Entity::polyanet(position),
        TYPE_SOLOON => {
            let color = cell.color.as_deref().ok_or_else(|| {
                ModelError::InvalidArgument(format!("Soloon at {position} has no color"))
            })?;
            Entity::soloon(position, color)?
        }
        TYPE_COMETH => {
            let direction = cell.direction.as_deref().ok_or_else(|| {
                ModelError::InvalidArgument(format!("Cometh at {position} has no direction"))
            })?;
            Entity::cometh(position, direction)?
        }
        other => return Err(ModelError::UnrecognizedType(other.to_string())),
    };
    Ok(Some(entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComethDirection, SoloonColor};

    fn parse(json: &str) -> RawMapResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_map_all_kinds() {
        let raw = parse(
            r#"{"map": {"phase": 2, "content": [
                [null, {"type": 0}],
                [{"type": 1, "color": "red"}, {"type": 2, "direction": "up"}]
            ]}}"#,
        );
        let map = decode_map(&raw).unwrap();
        assert_eq!(map.phase(), Phase::Two);

        let grid = map.grid();
        assert_eq!(grid.get(0, 0), None);
        assert!(matches!(grid.get(0, 1), Some(Entity::Polyanet { .. })));
        assert!(matches!(
            grid.get(1, 0),
            Some(Entity::Soloon { color: SoloonColor::Red, .. })
        ));
        assert!(matches!(
            grid.get(1, 1),
            Some(Entity::Cometh { direction: ComethDirection::Up, .. })
        ));
    }

    #[test]
    fn test_decode_map_positions_from_indices() {
        let raw = parse(r#"{"map": {"phase": 1, "content": [[null, null], [null, {"type": 0}]]}}"#);
        let map = decode_map(&raw).unwrap();
        let entity = map.grid().flatten_occupied().next().unwrap();
        assert_eq!(entity.position(), Position::new(1, 1).unwrap());
    }

    #[test]
    fn test_decode_map_unknown_type() {
        let raw = parse(r#"{"map": {"phase": 1, "content": [[{"type": 9}]]}}"#);
        let err = decode_map(&raw).unwrap_err();
        assert_eq!(err, ModelError::UnrecognizedType("9".to_string()));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_decode_map_bad_color() {
        let raw = parse(r#"{"map": {"phase": 2, "content": [[{"type": 1, "color": "green"}]]}}"#);
        assert!(matches!(decode_map(&raw), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_map_missing_direction() {
        let raw = parse(r#"{"map": {"phase": 2, "content": [[{"type": 2}]]}}"#);
        assert!(matches!(decode_map(&raw), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_map_bad_phase() {
        let raw = parse(r#"{"map": {"phase": 3, "content": [[null]]}}"#);
        assert!(matches!(decode_map(&raw), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_map_jagged() {
        let raw = parse(r#"{"map": {"phase": 1, "content": [[null, null], [null]]}}"#);
        assert!(matches!(decode_map(&raw), Err(ModelError::InvalidShape(_))));
    }

    #[test]
    fn test_decode_map_empty() {
        let raw = parse(r#"{"map": {"phase": 1, "content": []}}"#);
        assert!(matches!(decode_map(&raw), Err(ModelError::InvalidShape(_))));
    }

    #[test]
    fn test_decode_map_deterministic() {
        let raw = parse(r#"{"map": {"phase": 2, "content": [[{"type": 2, "direction": "left"}, null]]}}"#);
        assert_eq!(decode_map(&raw).unwrap(), decode_map(&raw).unwrap());
    }
}
