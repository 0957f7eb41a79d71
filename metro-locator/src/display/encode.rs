//! Fixed-width encoding for a 64x32 LED matrix.
//!
//! Each destination becomes one cell of at most 10 characters:
//!
//! ```text
//! Glen   1,2
//! ^^^^ ^^^^^
//! name times (right-justified, width 5)
//! ```
//!
//! The name is the first four characters of the destination with spaces
//! removed; the times are the two soonest arrivals. Longer cells are cut
//! to 10 characters, except that a cell of exactly 11 characters is
//! rejected outright.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Minutes;
use crate::locator::{PredictionDocument, Report};

/// Characters of the destination name kept.
const NAME_WIDTH: usize = 4;

/// Width the arrival times are right-justified to.
const TIMES_WIDTH: usize = 5;

/// Arrivals shown per destination.
const MAX_ARRIVALS: usize = 2;

/// Longest cell the display renders.
const MAX_CELL_WIDTH: usize = 10;

/// Cell width that is never expected and always rejected.
const OVERFLOW_CELL_WIDTH: usize = 11;

/// Line name used when the pipeline failed.
pub const ERROR_LINE: &str = "ERROR";

/// Errors encoding a prediction document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("cell {cell:?} is 11 characters wide")]
    CellOverflow { cell: String },
}

/// What the display firmware parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub line: Vec<DisplayLine>,
    /// 12-hour clock, e.g. "01:25:00AM".
    pub timestamp: String,
}

impl DisplayPayload {
    /// Whether this is the single-line ERROR payload.
    pub fn is_error(&self) -> bool {
        matches!(
            self.line.as_slice(),
            [DisplayLine { name, destinations: None }] if name == ERROR_LINE
        )
    }
}

/// One rail line and its destination cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<String>>,
}

/// Encode a pipeline report for the display.
///
/// Pure: the output depends only on `report`.
pub fn encode(report: &Report) -> Result<DisplayPayload, EncodeError> {
    match report {
        Report::Error(doc) => Ok(encode_error(doc.timestamp)),
        Report::Predictions(doc) => encode_predictions(doc),
    }
}

/// The single-line payload shown when the pipeline failed.
pub fn encode_error(timestamp: NaiveDateTime) -> DisplayPayload {
    DisplayPayload {
        line: vec![DisplayLine {
            name: ERROR_LINE.to_string(),
            destinations: None,
        }],
        timestamp: format_timestamp(timestamp),
    }
}

fn encode_predictions(doc: &PredictionDocument) -> Result<DisplayPayload, EncodeError> {
    let line = doc
        .by_line
        .iter()
        .map(|(name, destinations)| {
            let mut cells = destinations
                .iter()
                .map(|(destination, minutes)| encode_cell(destination, minutes))
                .collect::<Result<Vec<_>, _>>()?;

            // Stable: cells sharing a first letter keep their order
            cells.sort_by_key(|cell| cell.chars().next());

            Ok(DisplayLine {
                name: name.clone(),
                destinations: Some(cells),
            })
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;

    Ok(DisplayPayload {
        line,
        timestamp: format_timestamp(doc.timestamp),
    })
}

/// Encode one destination and its arrivals.
pub fn encode_cell(destination: &str, minutes: &[Minutes]) -> Result<String, EncodeError> {
    let name: String = destination
        .chars()
        .take(NAME_WIDTH)
        .filter(|c| *c != ' ')
        .collect();

    let times = minutes
        .iter()
        .take(MAX_ARRIVALS)
        .map(Minutes::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let cell = format!("{name} {times:>width$}", width = TIMES_WIDTH);

    if cell.chars().count() == OVERFLOW_CELL_WIDTH {
        return Err(EncodeError::CellOverflow { cell });
    }

    let truncated: String = cell.chars().take(MAX_CELL_WIDTH).collect();
    Ok(truncated.trim().to_string())
}

/// Format as a 12-hour clock with seconds, e.g. "01:25:00AM".
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%I:%M:%S%p").to_string()
}
