//! JSON and CSV export
//!
//! JSON exports serialize the typed records as-is. CSV exports write a
//! simplified, flattened view with one row per record.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::data::{Launch, Launchpad, Rocket};

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize records to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes any record list (or report) to pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn opt_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

/// Writes launches as CSV, one row per launch plus a header
pub fn launches_csv<W: Write>(launches: &[Launch], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "flight_number",
        "name",
        "date_utc",
        "rocket",
        "launchpad",
        "success",
        "upcoming",
        "details",
    ])?;
    for launch in launches {
        csv_writer.write_record(&[
            launch.id.clone(),
            launch.flight_number.to_string(),
            launch.name.clone(),
            launch.date_utc.clone(),
            launch.rocket.clone(),
            launch.launchpad.clone(),
            opt_bool(launch.success).to_string(),
            launch.upcoming.to_string(),
            launch.details.clone().unwrap_or_default(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes rockets as CSV, one row per rocket plus a header
pub fn rockets_csv<W: Write>(rockets: &[Rocket], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "name",
        "type",
        "active",
        "stages",
        "cost_per_launch",
        "success_rate_pct",
        "first_flight",
        "country",
        "company",
    ])?;
    for rocket in rockets {
        csv_writer.write_record(&[
            rocket.id.clone(),
            rocket.name.clone(),
            rocket.rocket_type.clone(),
            rocket.active.to_string(),
            rocket.stages.to_string(),
            rocket.cost_per_launch.to_string(),
            rocket.success_rate_pct.to_string(),
            rocket.first_flight.clone(),
            rocket.country.clone(),
            rocket.company.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes launchpads as CSV, one row per pad plus a header
pub fn launchpads_csv<W: Write>(launchpads: &[Launchpad], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "name",
        "full_name",
        "status",
        "locality",
        "region",
        "latitude",
        "longitude",
        "launch_attempts",
        "launch_successes",
    ])?;
    for pad in launchpads {
        csv_writer.write_record(&[
            pad.id.clone(),
            pad.name.clone(),
            pad.full_name.clone(),
            pad.status.clone(),
            pad.locality.clone(),
            pad.region.clone(),
            pad.latitude.to_string(),
            pad.longitude.to_string(),
            pad.launch_attempts.to_string(),
            pad.launch_successes.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;
    use serde_json::json;

    fn launch(id: &str, success: Option<bool>) -> Launch {
        let raw: RawRecord = json!({
            "id": id,
            "flight_number": 7,
            "name": "CRS-1, resupply",
            "date_utc": "2012-10-08T00:35:00.000Z",
            "date_unix": 1349656500,
            "date_local": "2012-10-07T20:35:00-04:00",
            "date_precision": "hour",
            "rocket": "falcon9",
            "launchpad": "slc40",
            "success": success,
            "upcoming": false
        })
        .as_object()
        .expect("object")
        .clone();
        Launch::from_raw(&raw).expect("fixture should project")
    }

    #[test]
    fn test_launches_csv_has_header_and_one_row_per_launch() {
        let mut buffer = Vec::new();
        launches_csv(&[launch("a", Some(true)), launch("b", Some(false))], &mut buffer)
            .expect("export should succeed");

        let text = String::from_utf8(buffer).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,flight_number,name"));
        assert!(lines[1].contains("\"CRS-1, resupply\""), "commas must be quoted: {}", lines[1]);
        assert!(lines[1].ends_with("true,false,"));
        assert!(lines[2].contains("false"));
    }

    #[test]
    fn test_unknown_success_exports_as_empty_field() {
        let mut buffer = Vec::new();
        launches_csv(&[launch("a", None)], &mut buffer).expect("export should succeed");

        let text = String::from_utf8(buffer).expect("utf-8");
        let row = text.lines().nth(1).expect("one data row");
        assert!(row.contains(",falcon9,slc40,,false,"));
    }

    #[test]
    fn test_to_json_roundtrips_launches() {
        let launches = vec![launch("a", Some(true))];
        let json_text = to_json(&launches).expect("serialize");

        let parsed: Vec<Launch> = serde_json::from_str(&json_text).expect("deserialize");
        assert_eq!(parsed, launches);
    }
}
