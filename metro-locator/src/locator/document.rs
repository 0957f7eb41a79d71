//! Prediction documents handed from the locator to the display encoder.

use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Minutes, ServiceStatus, ServiceWindow};

/// Arrivals grouped by line, then destination, each in the order the feed
/// first mentions it. Each sequence is sorted soonest first with unknown
/// arrivals last.
pub type LineMap = IndexMap<String, IndexMap<String, Vec<Minutes>>>;

/// Live arrivals at one station.
///
/// Serialized form:
///
/// ```json
/// {
///   "line": { "RD": { "Glenmont": [3, 9], "Shady Gr": [1, "N"] } },
///   "timestamp": "2024-08-10T13:25:00.293639",
///   "first_train": "2024-08-10T05:14:00",
///   "last_train": "2024-08-10T23:52:00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDocument {
    #[serde(rename = "line")]
    pub by_line: LineMap,
    /// When the predictions were requested (local time).
    pub timestamp: NaiveDateTime,
    pub first_train: NaiveDateTime,
    pub last_train: NaiveDateTime,
}

impl PredictionDocument {
    /// Today's service window at the station.
    pub fn service_window(&self) -> ServiceWindow {
        ServiceWindow {
            first_train: self.first_train,
            last_train: self.last_train,
        }
    }

    /// Where `now` falls relative to today's service window.
    pub fn service_status(&self, now: NaiveDateTime) -> ServiceStatus {
        self.service_window().status(now)
    }
}

/// A failed pipeline run, in the shape a display can still render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: String,
    pub timestamp: NaiveDateTime,
}

/// The result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report {
    // Tried first, so any document carrying an `error` field is an error.
    Error(ErrorDocument),
    Predictions(PredictionDocument),
}

impl Report {
    /// Wrap an error raised at `timestamp`.
    pub fn error(error: &dyn fmt::Display, timestamp: NaiveDateTime) -> Self {
        Report::Error(ErrorDocument {
            error: error.to_string(),
            timestamp,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Report::Error(doc) => doc.timestamp,
            Report::Predictions(doc) => doc.timestamp,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Report::Error(_))
    }
}

impl From<PredictionDocument> for Report {
    fn from(doc: PredictionDocument) -> Self {
        Report::Predictions(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prediction_document_json_shape() {
        let doc: PredictionDocument = serde_json::from_value(json!({
            "line": { "RD": { "Glenmont": [3, 9], "Shady Gr": [1, "N"] } },
            "timestamp": "2024-08-10T13:25:00.293639",
            "first_train": "2024-08-10T05:14:00",
            "last_train": "2024-08-10T23:52:00"
        }))
        .unwrap();

        assert_eq!(
            doc.by_line["RD"]["Shady Gr"],
            vec![Minutes::Known(1), Minutes::Unknown]
        );

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["line"]["RD"]["Glenmont"], json!([3, 9]));
        assert_eq!(back["timestamp"], "2024-08-10T13:25:00.293639");
    }

    #[test]
    fn report_with_error_field_is_an_error() {
        let report: Report = serde_json::from_value(json!({
            "error": "boom",
            "line": { "RD": { "Glenmont": [1] } },
            "timestamp": "2024-08-10T01:25:00.293639",
            "first_train": "2024-08-10T05:14:00",
            "last_train": "2024-08-10T23:52:00"
        }))
        .unwrap();
        assert!(report.is_error());
    }

    #[test]
    fn report_without_error_field_is_predictions() {
        let report: Report = serde_json::from_value(json!({
            "line": {},
            "timestamp": "2024-08-10T01:25:00.293639",
            "first_train": "2024-08-10T05:14:00",
            "last_train": "2024-08-10T23:52:00"
        }))
        .unwrap();
        assert!(!report.is_error());
    }

    #[test]
    fn error_report_carries_message() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 8, 10)
            .unwrap()
            .and_hms_opt(1, 25, 0)
            .unwrap();
        let report = Report::error(&"station directory is empty", ts);
        assert_eq!(report.timestamp(), ts);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({ "error": "station directory is empty", "timestamp": "2024-08-10T01:25:00" })
        );
    }

    #[test]
    fn service_status_against_window() {
        let doc: PredictionDocument = serde_json::from_value(json!({
            "line": {},
            "timestamp": "2024-08-10T13:25:00",
            "first_train": "2024-08-10T05:14:00",
            "last_train": "2024-08-10T23:52:00"
        }))
        .unwrap();
        let at = |hh, mm| {
            chrono::NaiveDate::from_ymd_opt(2024, 8, 10)
                .unwrap()
                .and_hms_opt(hh, mm, 0)
                .unwrap()
        };

        assert_eq!(doc.service_status(at(4, 0)), ServiceStatus::BeforeFirstTrain);
        assert_eq!(doc.service_status(at(13, 25)), ServiceStatus::InService);
        assert_eq!(doc.service_status(at(23, 59)), ServiceStatus::AfterLastTrain);
    }
}
