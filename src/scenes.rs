//! The built-in chart scenes and the standard narrative registry.
//!
//! Every scene draws exclusively through the [`Surface`] vocabulary and
//! scene-local [`crate::scale`] transforms; nothing here retains state
//! between render calls.

use chrono::NaiveDate;
use kurbo::{Point, Rect};

use crate::{
    aggregate,
    error::ScrollyResult,
    model::{Dataset, Metric, Summaries},
    scale::{BandScale, LinearScale, TimeScale},
    scene::{RegistryBuilder, Scene, SceneRegistry},
    surface::{AxisOrient, Surface, TextAnchor, Tick},
};

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MARGIN_LEFT: f64 = 40.0;

const CASES_COLOR: [u8; 4] = [70, 130, 180, 255]; // steelblue
const DEATHS_COLOR: [u8; 4] = [178, 34, 34, 255]; // firebrick
const BAR_COLOR: [u8; 4] = [100, 120, 160, 255];
const MARKER_COLOR: [u8; 4] = [255, 140, 0, 255];

const TITLE_SIZE: f64 = 16.0;
const LABEL_SIZE: f64 = 12.0;

fn plot_area(surface: &dyn Surface) -> Rect {
    let b = surface.bounds();
    Rect::new(
        b.x0 + MARGIN_LEFT,
        b.y0 + MARGIN_TOP,
        b.x1 - MARGIN_RIGHT,
        b.y1 - MARGIN_BOTTOM,
    )
}

fn draw_title(surface: &mut dyn Surface, area: Rect, title: &str) {
    surface.text(
        Point::new((area.x0 + area.x1) / 2.0, area.y0 - 5.0),
        title,
        TITLE_SIZE,
        TextAnchor::Middle,
    );
}

fn draw_axes(surface: &mut dyn Surface, area: Rect, x: &TimeScale, y: &LinearScale) {
    let x_ticks: Vec<Tick> = x
        .ticks(6)
        .into_iter()
        .map(|d| Tick {
            offset: x.map(d) - area.x0,
            label: d.format("%Y-%m-%d").to_string(),
        })
        .collect();
    surface.axis(
        AxisOrient::Bottom,
        Point::new(area.x0, area.y1),
        area.width(),
        &x_ticks,
    );

    let y_ticks: Vec<Tick> = y
        .ticks(5)
        .into_iter()
        .map(|v| Tick {
            // Left-axis offsets run upward from the origin at the bottom.
            offset: area.y1 - y.map(v),
            label: format_count(v.round() as u64),
        })
        .collect();
    surface.axis(
        AxisOrient::Left,
        Point::new(area.x0, area.y1),
        area.height(),
        &y_ticks,
    );
}

/// Digit grouping for tick and annotation labels ("12,345").
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shared line-chart body for the over-time scenes. Returns the scales so
/// callers can place annotations in the same coordinate space.
fn draw_time_series(
    surface: &mut dyn Surface,
    dataset: &Dataset,
    series: &[(NaiveDate, u64)],
    rgba8: [u8; 4],
    title: &str,
) -> (TimeScale, LinearScale) {
    let area = plot_area(surface);
    let max = series.iter().map(|&(_, v)| v).max().unwrap_or(0);

    let x = TimeScale::new(
        (dataset.first_date(), dataset.last_date()),
        (area.x0, area.x1),
    );
    let y = LinearScale::new((0.0, max as f64), (area.y1, area.y0));

    draw_axes(surface, area, &x, &y);

    let points: Vec<Point> = series
        .iter()
        .map(|&(d, v)| Point::new(x.map(d), y.map(v as f64)))
        .collect();
    surface.path(&points, rgba8, 1.5);
    draw_title(surface, area, title);

    (x, y)
}

/// Line chart of total reported cases per date.
pub struct CasesOverTime;

impl Scene for CasesOverTime {
    fn render(
        &self,
        surface: &mut dyn Surface,
        dataset: &Dataset,
        _summaries: &Summaries,
    ) -> ScrollyResult<()> {
        let series = aggregate::series_by_date(dataset.rows(), Metric::Cases)?;
        draw_time_series(surface, dataset, &series, CASES_COLOR, "Total cases over time");
        Ok(())
    }
}

/// Line chart of total reported deaths per date.
pub struct DeathsOverTime;

impl Scene for DeathsOverTime {
    fn render(
        &self,
        surface: &mut dyn Surface,
        dataset: &Dataset,
        _summaries: &Summaries,
    ) -> ScrollyResult<()> {
        let series = aggregate::series_by_date(dataset.rows(), Metric::Deaths)?;
        draw_time_series(surface, dataset, &series, DEATHS_COLOR, "Total deaths over time");
        Ok(())
    }
}

/// Vertical bar chart comparing the top regions by a metric's total.
pub struct RegionTotals {
    pub metric: Metric,
    pub limit: usize,
}

impl Scene for RegionTotals {
    fn render(
        &self,
        surface: &mut dyn Surface,
        _dataset: &Dataset,
        summaries: &Summaries,
    ) -> ScrollyResult<()> {
        let area = plot_area(surface);
        let ranked = aggregate::top_n(&summaries.by_region, self.metric, self.limit);
        let max = ranked
            .iter()
            .map(|s| self.metric.of_summary(s))
            .max()
            .unwrap_or(0);

        let x = BandScale::new(
            ranked.iter().map(|s| s.region.clone()).collect(),
            (area.x0, area.x1),
            0.2,
        );
        let y = LinearScale::new((0.0, max as f64), (area.y1, area.y0));

        for summary in &ranked {
            let Some(x0) = x.position(&summary.region) else {
                continue;
            };
            let top = y.map(self.metric.of_summary(summary) as f64);
            surface.rect(Rect::new(x0, top, x0 + x.bandwidth(), area.y1), BAR_COLOR);
            surface.text(
                Point::new(x0 + x.bandwidth() / 2.0, area.y1 + 15.0),
                &summary.region,
                LABEL_SIZE,
                TextAnchor::Middle,
            );
        }

        let y_ticks: Vec<Tick> = y
            .ticks(5)
            .into_iter()
            .map(|v| Tick {
                offset: area.y1 - y.map(v),
                label: format_count(v.round() as u64),
            })
            .collect();
        surface.axis(
            AxisOrient::Left,
            Point::new(area.x0, area.y1),
            area.height(),
            &y_ticks,
        );
        draw_title(
            surface,
            area,
            &format!("Total {} by region", self.metric.label()),
        );
        Ok(())
    }
}

/// Ranked horizontal bars for the hardest-hit regions.
pub struct TopRegions {
    pub metric: Metric,
    pub limit: usize,
}

impl Scene for TopRegions {
    fn render(
        &self,
        surface: &mut dyn Surface,
        _dataset: &Dataset,
        summaries: &Summaries,
    ) -> ScrollyResult<()> {
        let area = plot_area(surface);
        let ranked = aggregate::top_n(&summaries.by_region, self.metric, self.limit);
        let max = ranked
            .iter()
            .map(|s| self.metric.of_summary(s))
            .max()
            .unwrap_or(0);

        let band = BandScale::new(
            ranked.iter().map(|s| s.region.clone()).collect(),
            (area.y0, area.y1),
            0.3,
        );
        let width = LinearScale::new((0.0, max as f64), (0.0, area.width() - 120.0));

        for (rank, summary) in ranked.iter().enumerate() {
            let Some(y0) = band.position(&summary.region) else {
                continue;
            };
            let w = width.map(self.metric.of_summary(summary) as f64);
            surface.rect(
                Rect::new(area.x0 + 100.0, y0, area.x0 + 100.0 + w, y0 + band.bandwidth()),
                BAR_COLOR,
            );
            surface.text(
                Point::new(area.x0 + 90.0, y0 + band.bandwidth() / 2.0),
                &format!("{}. {}", rank + 1, summary.region),
                LABEL_SIZE,
                TextAnchor::End,
            );
            surface.text(
                Point::new(area.x0 + 105.0 + w, y0 + band.bandwidth() / 2.0),
                &format!(
                    "{} {}",
                    format_count(self.metric.of_summary(summary)),
                    self.metric.label()
                ),
                LABEL_SIZE,
                TextAnchor::Start,
            );
        }

        draw_title(surface, area, "Hardest-hit regions");
        Ok(())
    }
}

/// The cases line annotated with the first reported case and the peak day,
/// both placed through the same scale transforms as the line itself.
pub struct Milestones;

impl Milestones {
    fn annotate(
        surface: &mut dyn Surface,
        series: &[(NaiveDate, u64)],
        x: &TimeScale,
        y: &LinearScale,
        date: NaiveDate,
        label: &str,
    ) {
        // Anchor the marker to the series total for that date, not the
        // single row's value, so it sits on the drawn line.
        let Some(&(_, total)) = series.iter().find(|&&(d, _)| d == date) else {
            return;
        };
        let at = Point::new(x.map(date), y.map(total as f64));
        surface.circle(at, 4.0, MARKER_COLOR);
        surface.text(
            Point::new(at.x, at.y - 10.0),
            label,
            LABEL_SIZE,
            TextAnchor::Middle,
        );
    }
}

impl Scene for Milestones {
    fn render(
        &self,
        surface: &mut dyn Surface,
        dataset: &Dataset,
        summaries: &Summaries,
    ) -> ScrollyResult<()> {
        let series = aggregate::series_by_date(dataset.rows(), Metric::Cases)?;
        let (x, y) = draw_time_series(surface, dataset, &series, CASES_COLOR, "Milestones");

        if let Some(first) = &summaries.first_case {
            Self::annotate(
                surface,
                &series,
                &x,
                &y,
                first.date,
                &format!("First case ({})", first.region),
            );
        }
        let peak = &summaries.peak_cases;
        Self::annotate(
            surface,
            &series,
            &x,
            &y,
            peak.date,
            &format!("Peak: {} ({})", format_count(peak.cases), peak.region),
        );
        Ok(())
    }
}

/// The five-scene narrative in its fixed order.
pub fn standard_registry() -> ScrollyResult<SceneRegistry> {
    RegistryBuilder::new()
        .scene(
            "Reported cases climb steadily over the course of the outbreak.",
            CasesOverTime,
        )
        .scene(
            "Deaths follow the same curve, trailing cases by several weeks.",
            DeathsOverTime,
        )
        .scene(
            "A handful of regions account for most of the reported burden.",
            RegionTotals {
                metric: Metric::Cases,
                limit: 10,
            },
        )
        .scene(
            "The hardest-hit regions, ranked.",
            TopRegions {
                metric: Metric::Cases,
                limit: 5,
            },
        )
        .scene(
            "Two milestones frame the story: the first reported case and the single worst day.",
            Milestones,
        )
        .build()
}
