//! Pure aggregation over row slices.
//!
//! Every operation here is a total function of its inputs: no mutation of
//! the dataset, freshly computed results, and an [`ScrollyError::EmptyDataset`]
//! on the zero-row precondition violation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    error::{ScrollyError, ScrollyResult},
    model::{Metric, RegionSummary, Row},
};

/// Groups rows by region, summing both metrics and folding in the latest
/// reported values per region.
pub fn totals_by_region(rows: &[Row]) -> ScrollyResult<BTreeMap<String, RegionSummary>> {
    if rows.is_empty() {
        return Err(ScrollyError::EmptyDataset);
    }

    let latest = latest_per_region(rows)?;
    let mut out: BTreeMap<String, RegionSummary> = BTreeMap::new();
    for row in rows {
        let entry = out
            .entry(row.region.clone())
            .or_insert_with(|| RegionSummary {
                region: row.region.clone(),
                total_cases: 0,
                total_deaths: 0,
                latest_cases: 0,
                latest_deaths: 0,
            });
        entry.total_cases += row.cases;
        entry.total_deaths += row.deaths;
    }
    for (region, summary) in &mut out {
        if let Some(row) = latest.get(region) {
            summary.latest_cases = row.cases;
            summary.latest_deaths = row.deaths;
        }
    }
    Ok(out)
}

/// For each region, the row with the maximum date. Rows sharing that maximum
/// date resolve to the one appearing last in input order (last-write-wins
/// fold, `>=` comparison).
pub fn latest_per_region(rows: &[Row]) -> ScrollyResult<BTreeMap<String, Row>> {
    if rows.is_empty() {
        return Err(ScrollyError::EmptyDataset);
    }

    let mut out: BTreeMap<String, Row> = BTreeMap::new();
    for row in rows {
        match out.get(&row.region) {
            Some(current) if row.date < current.date => {}
            _ => {
                out.insert(row.region.clone(), row.clone());
            }
        }
    }
    Ok(out)
}

/// The earliest-dated row where `metric > 0`, or `Ok(None)` when every value
/// is zero. Equal earliest dates resolve to the first in input order.
pub fn first_nonzero(rows: &[Row], metric: Metric) -> ScrollyResult<Option<&Row>> {
    if rows.is_empty() {
        return Err(ScrollyError::EmptyDataset);
    }

    let mut found: Option<&Row> = None;
    for row in rows {
        if metric.of_row(row) == 0 {
            continue;
        }
        match found {
            Some(best) if row.date >= best.date => {}
            _ => found = Some(row),
        }
    }
    Ok(found)
}

/// The row with the maximum value of `metric`.
///
/// Strict `>` during a left-to-right fold keeps the first row encountered at
/// the maximum; over a date-sorted dataset that is the earliest one.
pub fn peak(rows: &[Row], metric: Metric) -> ScrollyResult<&Row> {
    let mut iter = rows.iter();
    let mut best = iter.next().ok_or(ScrollyError::EmptyDataset)?;
    for row in iter {
        if metric.of_row(row) > metric.of_row(best) {
            best = row;
        }
    }
    Ok(best)
}

/// Descending ranking of region summaries by `metric`, ties broken by region
/// name ascending, truncated to `n` (all entries if fewer exist).
pub fn top_n(
    summaries: &BTreeMap<String, RegionSummary>,
    metric: Metric,
    n: usize,
) -> Vec<RegionSummary> {
    let mut ranked: Vec<RegionSummary> = summaries.values().cloned().collect();
    ranked.sort_by(|a, b| {
        metric
            .of_summary(b)
            .cmp(&metric.of_summary(a))
            .then_with(|| a.region.cmp(&b.region))
    });
    ranked.truncate(n);
    ranked
}

/// Total of `metric` per calendar date, ascending by date. The series the
/// over-time line scenes plot.
pub fn series_by_date(rows: &[Row], metric: Metric) -> ScrollyResult<Vec<(NaiveDate, u64)>> {
    if rows.is_empty() {
        return Err(ScrollyError::EmptyDataset);
    }

    let mut per_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for row in rows {
        *per_date.entry(row.date).or_insert(0) += metric.of_row(row);
    }
    Ok(per_date.into_iter().collect())
}
