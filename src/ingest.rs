//! Typed coercion boundary between external ingestion and the core.
//!
//! CSV/file IO stays with the caller; this module owns turning raw text
//! fields into the [`Row`] shape exactly once, so nothing downstream
//! re-checks field presence or types.

use chrono::NaiveDate;

use crate::{
    error::{ScrollyError, ScrollyResult},
    model::{Dataset, Row},
};

/// One record as delivered by an external adapter, all fields still text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub region: String,
    pub cases: String,
    pub deaths: String,
}

impl RawRecord {
    /// Coerces text fields into a typed [`Row`]. Dates must be ISO
    /// `YYYY-MM-DD`; counts must parse as non-negative integers.
    pub fn coerce(&self) -> ScrollyResult<Row> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            ScrollyError::ingest(format!("bad date '{}': {e}", self.date))
        })?;
        let cases = parse_count("cases", &self.cases)?;
        let deaths = parse_count("deaths", &self.deaths)?;
        let row = Row {
            date,
            region: self.region.trim().to_string(),
            cases,
            deaths,
        };
        row.validate()?;
        Ok(row)
    }
}

fn parse_count(field: &str, value: &str) -> ScrollyResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ScrollyError::ingest(format!("bad {field} '{value}': {e}")))
}

/// Coerces a whole batch and builds the session [`Dataset`].
pub fn dataset_from_raw(records: &[RawRecord]) -> ScrollyResult<Dataset> {
    let rows = records
        .iter()
        .map(RawRecord::coerce)
        .collect::<ScrollyResult<Vec<_>>>()?;
    Dataset::from_rows(rows)
}

/// Builds the session [`Dataset`] from a JSON array of raw records, the
/// wire shape upstream adapters hand over.
pub fn dataset_from_json(json: &str) -> ScrollyResult<Dataset> {
    let records: Vec<RawRecord> = serde_json::from_str(json)
        .map_err(|e| ScrollyError::ingest(format!("bad record array: {e}")))?;
    dataset_from_raw(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, region: &str, cases: &str, deaths: &str) -> RawRecord {
        RawRecord {
            date: date.to_string(),
            region: region.to_string(),
            cases: cases.to_string(),
            deaths: deaths.to_string(),
        }
    }

    #[test]
    fn coerce_accepts_iso_dates_and_counts() {
        let row = raw("2020-01-21", "WA", "1", "0").coerce().unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 1, 21).unwrap());
        assert_eq!((row.cases, row.deaths), (1, 0));
    }

    #[test]
    fn coerce_rejects_bad_date() {
        let err = raw("01/21/2020", "WA", "1", "0").coerce().unwrap_err();
        assert!(matches!(err, ScrollyError::Ingest(_)));
        assert!(err.to_string().contains("bad date"));
    }

    #[test]
    fn coerce_rejects_negative_and_non_numeric_counts() {
        assert!(raw("2020-01-21", "WA", "-3", "0").coerce().is_err());
        assert!(raw("2020-01-21", "WA", "1", "n/a").coerce().is_err());
    }

    #[test]
    fn batch_from_json_adapter() {
        let ds = dataset_from_json(
            r#"[
                {"date": "2020-03-04", "region": "NY", "cases": "89", "deaths": "2"},
                {"date": "2020-01-21", "region": "WA", "cases": "1", "deaths": "0"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].region, "WA");
    }

    #[test]
    fn json_adapter_rejects_malformed_input() {
        let err = dataset_from_json("[{\"date\": 3}]").unwrap_err();
        assert!(matches!(err, ScrollyError::Ingest(_)));
        assert!(err.to_string().contains("bad record array"));
    }

    #[test]
    fn batch_fails_on_empty_input() {
        assert!(matches!(
            dataset_from_raw(&[]),
            Err(ScrollyError::EmptyDataset)
        ));
    }
}
