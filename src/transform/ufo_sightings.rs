//! Cleans raw UFO sighting reports into the canonical column layout
//!
//! Every source format carries the same logical report fields, but the
//! raw exports combine the date and time into one column and include
//! sightings from anywhere in the world. This transform normalizes all of
//! them to one shape so every loader can assume it.

use crate::error::TransformError;
use crate::etl::{RecordSet, Transformer};
use serde_json::Value;

/// Canonical column order shared by every load target.
pub const SIGHTING_COLUMNS: [&str; 10] = [
    "Date", "Time", "City", "State", "Country", "Shape", "Duration", "Summary", "Posted", "Images",
];

const COMBINED_STAMP: &str = "Date / Time";
const KEPT_COUNTRIES: [&str; 2] = ["USA", "Canada"];

/// Transformer for raw sighting reports:
/// 1. splits the combined `Date / Time` column on its first space into
///    separate `Date` and `Time` columns, dropping the original
/// 2. keeps only rows whose `Country` is exactly `USA` or `Canada`
/// 3. narrows and reorders to [`SIGHTING_COLUMNS`]
pub struct UfoSightingTransform;

impl Transformer for UfoSightingTransform {
    fn transform(&self, mut records: RecordSet) -> Result<RecordSet, TransformError> {
        let combined = records
            .remove_column(COMBINED_STAMP)
            .ok_or_else(|| TransformError::missing(COMBINED_STAMP))?;

        let mut dates = Vec::with_capacity(combined.values().len());
        let mut times = Vec::with_capacity(combined.values().len());
        for value in combined.values() {
            let stamp = value.as_str().unwrap_or_default();
            let (date, time) = stamp.split_once(' ').unwrap_or((stamp, ""));
            dates.push(Value::String(date.trim().to_string()));
            times.push(Value::String(time.trim().to_string()));
        }
        records.add_column("Date", dates)?;
        records.add_column("Time", times)?;

        let keep: Vec<bool> = records
            .column("Country")
            .ok_or_else(|| TransformError::missing("Country"))?
            .iter()
            .map(|value| matches!(value.as_str(), Some(c) if KEPT_COUNTRIES.contains(&c)))
            .collect();
        records.retain_rows(|index| keep[index]);

        Ok(records.select(&SIGHTING_COLUMNS)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(rows: &[(&str, &str, &str)]) -> RecordSet {
        let mut records = RecordSet::with_columns([
            "Date / Time",
            "City",
            "State",
            "Country",
            "Shape",
            "Duration",
            "Summary",
            "Posted",
            "Images",
        ])
        .unwrap();
        for (stamp, city, country) in rows {
            records
                .push_row(vec![
                    json!(stamp),
                    json!(city),
                    json!("MN"),
                    json!(country),
                    json!("Disk"),
                    json!("10 minutes"),
                    json!("A bright disk"),
                    json!("6/22/2022"),
                    json!(""),
                ])
                .unwrap();
        }
        records
    }

    #[test]
    fn test_splits_combined_date_time() {
        let records = UfoSightingTransform
            .transform(raw(&[("6/1/2022 21:00", "Duluth", "USA")]))
            .unwrap();

        assert_eq!(records.column("Date").unwrap()[0], json!("6/1/2022"));
        assert_eq!(records.column("Time").unwrap()[0], json!("21:00"));
        assert!(records.column("Date / Time").is_none());
    }

    #[test]
    fn test_keeps_usa_and_canada_only() {
        let records = UfoSightingTransform
            .transform(raw(&[
                ("6/1/2022 21:00", "Duluth", "USA"),
                ("6/2/2022 22:00", "Tijuana", "Mexico"),
                ("6/3/2022 23:00", "Winnipeg", "Canada"),
            ]))
            .unwrap();

        assert_eq!(records.row_count(), 2);
        assert_eq!(
            records.column("City").unwrap(),
            &[json!("Duluth"), json!("Winnipeg")]
        );
    }

    #[test]
    fn test_country_match_is_exact() {
        // aliases are not normalized
        let records = UfoSightingTransform
            .transform(raw(&[("6/1/2022 21:00", "Duluth", "United States")]))
            .unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_canonical_column_order() {
        let records = UfoSightingTransform
            .transform(raw(&[("6/1/2022 21:00", "Duluth", "USA")]))
            .unwrap();

        let names: Vec<&str> = records.column_names().collect();
        assert_eq!(names, SIGHTING_COLUMNS);
    }

    #[test]
    fn test_missing_combined_column_is_an_error() {
        let records = RecordSet::with_columns(["City", "Country"]).unwrap();
        let err = UfoSightingTransform.transform(records).unwrap_err();

        assert!(matches!(
            err,
            TransformError::MissingColumn { column } if column == "Date / Time"
        ));
    }

    #[test]
    fn test_missing_country_column_is_an_error() {
        let mut records = RecordSet::with_columns(["Date / Time", "City"]).unwrap();
        records
            .push_row(vec![json!("6/1/2022 21:00"), json!("Duluth")])
            .unwrap();

        let err = UfoSightingTransform.transform(records).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumn { column } if column == "Country"
        ));
    }
}
