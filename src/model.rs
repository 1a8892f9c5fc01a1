use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    aggregate,
    error::{ScrollyError, ScrollyResult},
};

/// One observation: a region's counts on a calendar date.
///
/// Rows are immutable once constructed; the ingestion boundary
/// ([`crate::ingest`]) is the only place field-level coercion happens, so
/// nothing downstream re-validates field presence or types.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub date: NaiveDate,
    pub region: String,
    pub cases: u64,
    pub deaths: u64,
}

impl Row {
    pub fn validate(&self) -> ScrollyResult<()> {
        if self.region.trim().is_empty() {
            return Err(ScrollyError::validation(format!(
                "row at {} has an empty region label",
                self.date
            )));
        }
        Ok(())
    }
}

/// Which count an aggregation or scene folds over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Metric {
    Cases,
    Deaths,
}

impl Metric {
    pub fn of_row(self, row: &Row) -> u64 {
        match self {
            Metric::Cases => row.cases,
            Metric::Deaths => row.deaths,
        }
    }

    pub fn of_summary(self, summary: &RegionSummary) -> u64 {
        match self {
            Metric::Cases => summary.total_cases,
            Metric::Deaths => summary.total_deaths,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }
}

/// The immutable row sequence shared read-only by the aggregator and every
/// scene for the whole session.
///
/// Construction stably sorts by date. Stable sort preserves source order
/// within equal dates, which pins down both fold tie policies: `peak`'s
/// earliest-maximum and `latest_per_region`'s last-write-wins.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn from_rows(mut rows: Vec<Row>) -> ScrollyResult<Self> {
        if rows.is_empty() {
            return Err(ScrollyError::EmptyDataset);
        }
        for row in &rows {
            row.validate()?;
        }
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.rows[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.rows[self.rows.len() - 1].date
    }
}

/// Derived per-region aggregate: totals plus the latest reported values.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub total_cases: u64,
    pub total_deaths: u64,
    pub latest_cases: u64,
    pub latest_deaths: u64,
}

/// All derived summaries, computed once per dataset load and shared
/// read-only with every scene. Stable across navigation: the dataset does
/// not change mid-session.
#[derive(Clone, Debug)]
pub struct Summaries {
    pub by_region: BTreeMap<String, RegionSummary>,
    pub peak_cases: Row,
    pub peak_deaths: Row,
    pub first_case: Option<Row>,
    pub first_death: Option<Row>,
}

impl Summaries {
    pub fn compute(dataset: &Dataset) -> ScrollyResult<Self> {
        let rows = dataset.rows();
        Ok(Self {
            by_region: aggregate::totals_by_region(rows)?,
            peak_cases: aggregate::peak(rows, Metric::Cases)?.clone(),
            peak_deaths: aggregate::peak(rows, Metric::Deaths)?.clone(),
            first_case: aggregate::first_nonzero(rows, Metric::Cases)?.cloned(),
            first_death: aggregate::first_nonzero(rows, Metric::Deaths)?.cloned(),
        })
    }
}
