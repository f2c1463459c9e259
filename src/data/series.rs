use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{CellValue, Dataset};
use super::predict::SENSOR_COLUMN;
use crate::error::ViewerError;

/// Column holding the reading time.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Date-time layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts; the time is taken as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse a timestamp cell. Offsets in RFC 3339 strings are dropped and the
/// wall-clock time they describe is kept.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Seconds since the Unix epoch, the x coordinate used on the chart.
pub fn to_plot_seconds(dt: NaiveDateTime) -> f64 {
    dt.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`to_plot_seconds`], for axis and hover labels.
pub fn from_plot_seconds(secs: f64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64).map(|dt| dt.naive_utc())
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Build the `[seconds, sensor_value]` points for the chart, ordered by time.
///
/// * `Ok(None)` when either column is missing (nothing to plot).
/// * `Err(ViewerError::Plot)` when any timestamp fails to parse; no partial
///   series is returned.
///
/// Rows with a blank timestamp or a non-numeric reading are skipped.
pub fn build_series(dataset: &Dataset) -> Result<Option<Vec<[f64; 2]>>, ViewerError> {
    let (Some(ts_idx), Some(value_idx)) = (
        dataset.column_index(TIMESTAMP_COLUMN),
        dataset.column_index(SENSOR_COLUMN),
    ) else {
        return Ok(None);
    };

    let mut points = Vec::with_capacity(dataset.len());
    for (row_no, row) in dataset.rows.iter().enumerate() {
        // A blank timestamp is a missing reading time, not a malformed one.
        if matches!(row[ts_idx], CellValue::Null) {
            continue;
        }
        let ts = parse_timestamp(&row[ts_idx].to_string()).ok_or_else(|| {
            ViewerError::Plot(format!(
                "row {row_no}: cannot parse '{}' as a timestamp",
                row[ts_idx]
            ))
        })?;

        if let Some(y) = row[value_idx].as_f64() {
            points.push([to_plot_seconds(ts), y]);
        }
    }

    // Stable sort keeps source order for equal timestamps.
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Ok(Some(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[(&str, CellValue)]) -> Dataset {
        Dataset::new(
            vec![TIMESTAMP_COLUMN.into(), SENSOR_COLUMN.into()],
            rows.iter()
                .map(|(ts, v)| vec![CellValue::Text(ts.to_string()), v.clone()])
                .collect(),
        )
    }

    #[test]
    fn test_parse_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        for text in [
            "2024-03-05 14:30:00",
            "2024-03-05T14:30:00",
            "2024-03-05 14:30",
            "2024/03/05 14:30:00",
            "03/05/2024 14:30",
            "2024-03-05T14:30:00+02:00",
        ] {
            assert_eq!(parse_timestamp(text), Some(expected), "{text}");
        }
        assert_eq!(
            parse_timestamp("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_plot_seconds_round_trip() {
        let dt = parse_timestamp("2024-01-01 12:00:00.250").unwrap();
        assert_eq!(from_plot_seconds(to_plot_seconds(dt)), Some(dt));
    }

    #[test]
    fn test_series_is_ordered_by_time() {
        let ds = dataset(&[
            ("2024-01-01 02:00:00", CellValue::Integer(30)),
            ("2024-01-01 00:00:00", CellValue::Integer(10)),
            ("2024-01-01 01:00:00", CellValue::Integer(20)),
        ]);
        let points = build_series(&ds).unwrap().unwrap();
        let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
        assert_eq!(ys, vec![10.0, 20.0, 30.0]);
        assert!(points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn test_non_numeric_readings_are_skipped() {
        let ds = dataset(&[
            ("2024-01-01", CellValue::Integer(1)),
            ("2024-01-02", CellValue::Null),
            ("2024-01-03", CellValue::Float(3.0)),
        ]);
        assert_eq!(build_series(&ds).unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_timestamp_rows_are_skipped() {
        let ds = Dataset::new(
            vec![TIMESTAMP_COLUMN.into(), SENSOR_COLUMN.into()],
            vec![
                vec![CellValue::Text("2024-01-01 00:00:00".into()), CellValue::Integer(10)],
                vec![CellValue::Null, CellValue::Integer(20)],
                vec![CellValue::Text("2024-01-01 02:00:00".into()), CellValue::Integer(30)],
            ],
        );
        let points = build_series(&ds).unwrap().unwrap();
        let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
        assert_eq!(ys, vec![10.0, 30.0]);
    }

    #[test]
    fn test_bad_timestamp_fails_whole_series() {
        let ds = dataset(&[
            ("2024-01-01", CellValue::Integer(1)),
            ("not a date", CellValue::Integer(2)),
        ]);
        match build_series(&ds) {
            Err(ViewerError::Plot(msg)) => assert!(msg.contains("not a date"), "{msg}"),
            other => panic!("expected Plot error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_columns_is_nothing_to_plot() {
        let ds = Dataset::new(
            vec![SENSOR_COLUMN.into()],
            vec![vec![CellValue::Integer(5)]],
        );
        assert_eq!(build_series(&ds), Ok(None));
    }
}
