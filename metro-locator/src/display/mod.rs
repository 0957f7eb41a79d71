//! Output for the embedded LED display.
//!
//! [`encode`] compresses a prediction report into fixed-width cells;
//! [`DisplaySink`] delivers the result to the device.

mod encode;
mod sink;

pub use encode::{
    DisplayLine, DisplayPayload, ERROR_LINE, EncodeError, encode, encode_cell, encode_error,
    format_timestamp,
};
pub use sink::{DisplaySink, SinkError};

use tracing::error;

use crate::locator::Report;

/// Encode `report`, falling back to the error payload if a cell overflows.
pub fn encode_or_error(report: &Report) -> DisplayPayload {
    encode(report).unwrap_or_else(|e| {
        error!(error = %e, "failed to encode predictions");
        encode_error(report.timestamp())
    })
}
