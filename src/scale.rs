//! Scene-local scale transforms mapping data domain to surface coordinates.
//!
//! Plain copyable values, constructed per render call and never retained
//! between cycles. Degenerate domains map every input to the start of the
//! range rather than dividing by zero.

use chrono::NaiveDate;

/// Affine map from a numeric domain onto a coordinate range. Ranges may be
/// inverted (pixel y axes grow downward).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// `count + 1` evenly spaced domain values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 || self.domain.0 == self.domain.1 {
            return vec![self.domain.0];
        }
        let span = self.domain.1 - self.domain.0;
        (0..=count)
            .map(|i| self.domain.0 + span * (i as f64) / (count as f64))
            .collect()
    }
}

/// Linear map over calendar dates, measured in days since the domain start.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    inner: LinearScale,
}

impl TimeScale {
    /// A reversed domain is normalized to ascending order; flip the range
    /// to invert the axis instead.
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let domain = if domain.1 < domain.0 {
            (domain.1, domain.0)
        } else {
            domain
        };
        let days = (domain.1 - domain.0).num_days() as f64;
        Self {
            domain,
            inner: LinearScale::new((0.0, days), range),
        }
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        self.inner.map((date - self.domain.0).num_days() as f64)
    }

    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        if count == 0 || self.domain.0 == self.domain.1 {
            return vec![self.domain.0];
        }
        let days = (self.domain.1 - self.domain.0).num_days();
        (0..=count)
            .map(|i| self.domain.0 + chrono::Days::new((days as u64 * i as u64) / count as u64))
            .collect()
    }
}

/// Ordinal bands for categorical axes: each key gets an equal slot of the
/// range, with a fraction of every slot held back as padding.
#[derive(Clone, Debug)]
pub struct BandScale {
    keys: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    pub fn new(keys: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            keys,
            range,
            padding: padding.clamp(0.0, 1.0),
        }
    }

    fn step(&self) -> f64 {
        if self.keys.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.keys.len() as f64
    }

    /// Leading edge of the band for `key`, or `None` for unknown keys.
    pub fn position(&self, key: &str) -> Option<f64> {
        let idx = self.keys.iter().position(|k| k == key)?;
        Some(self.range.0 + self.step() * idx as f64 + self.step() * self.padding / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn linear_maps_endpoints_and_midpoint() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 800.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(100.0), 800.0);
        assert_eq!(s.map(50.0), 400.0);
    }

    #[test]
    fn linear_supports_inverted_pixel_ranges() {
        // d3-style y axis: domain 0..max maps bottom..top.
        let s = LinearScale::new((0.0, 100.0), (540.0, 0.0));
        assert_eq!(s.map(0.0), 540.0);
        assert_eq!(s.map(100.0), 0.0);
    }

    #[test]
    fn linear_degenerate_domain_maps_to_range_start() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 800.0));
        assert_eq!(s.map(5.0), 0.0);
        assert_eq!(s.ticks(4), vec![5.0]);
    }

    #[test]
    fn time_maps_days_linearly() {
        let s = TimeScale::new((date(2020, 1, 1), date(2020, 1, 11)), (0.0, 100.0));
        assert_eq!(s.map(date(2020, 1, 1)), 0.0);
        assert_eq!(s.map(date(2020, 1, 11)), 100.0);
        assert_eq!(s.map(date(2020, 1, 6)), 50.0);
    }

    #[test]
    fn time_reversed_domain_is_normalized() {
        let s = TimeScale::new((date(2020, 1, 11), date(2020, 1, 1)), (0.0, 100.0));
        assert_eq!(s.map(date(2020, 1, 1)), 0.0);
        assert_eq!(s.map(date(2020, 1, 11)), 100.0);
        let ticks = s.ticks(2);
        assert_eq!(ticks.first(), Some(&date(2020, 1, 1)));
        assert_eq!(ticks.last(), Some(&date(2020, 1, 11)));
    }

    #[test]
    fn time_ticks_span_the_domain() {
        let s = TimeScale::new((date(2020, 1, 1), date(2020, 1, 31)), (0.0, 100.0));
        let ticks = s.ticks(3);
        assert_eq!(ticks.first(), Some(&date(2020, 1, 1)));
        assert_eq!(ticks.last(), Some(&date(2020, 1, 31)));
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn band_positions_and_bandwidth() {
        let s = BandScale::new(
            vec!["NY".to_string(), "WA".to_string()],
            (0.0, 100.0),
            0.2,
        );
        assert_eq!(s.bandwidth(), 40.0);
        assert_eq!(s.position("NY"), Some(5.0));
        assert_eq!(s.position("WA"), Some(55.0));
        assert_eq!(s.position("TX"), None);
    }
}
