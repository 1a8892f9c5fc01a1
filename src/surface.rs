//! The abstract drawing capability scenes render into.
//!
//! Real surfaces (SVG, canvas, terminal) live outside this crate; the only
//! implementation shipped here is [`Recorder`], which captures every call so
//! scenes and the navigator's render cycle can be asserted on without a live
//! drawing stack.

use kurbo::{Point, Rect};

/// Horizontal anchoring for drawn text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Which edge of the plot an axis hangs off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AxisOrient {
    Bottom,
    Left,
}

/// One axis tick: offset along the axis from its origin, plus its label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Drawing operations available to scene render functions.
///
/// `clear` wipes all prior content; the navigator calls it exactly once per
/// render cycle, before the scene draws.
pub trait Surface {
    /// Full drawable area in surface coordinates.
    fn bounds(&self) -> Rect;

    fn clear(&mut self);

    /// Polyline through `points`, stroked with `rgba8` at `width` px.
    fn path(&mut self, points: &[Point], rgba8: [u8; 4], width: f64);

    fn rect(&mut self, rect: Rect, rgba8: [u8; 4]);

    fn circle(&mut self, center: Point, radius: f64, rgba8: [u8; 4]);

    fn text(&mut self, at: Point, text: &str, size_px: f64, anchor: TextAnchor);

    fn axis(&mut self, orient: AxisOrient, origin: Point, length: f64, ticks: &[Tick]);
}

/// Everything a [`Recorder`] captures, one variant per [`Surface`] call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum SurfaceOp {
    Clear,
    Path {
        points: Vec<Point>,
        rgba8: [u8; 4],
        width: f64,
    },
    Rect {
        rect: Rect,
        rgba8: [u8; 4],
    },
    Circle {
        center: Point,
        radius: f64,
        rgba8: [u8; 4],
    },
    Text {
        at: Point,
        text: String,
        size_px: f64,
        anchor: TextAnchor,
    },
    Axis {
        orient: AxisOrient,
        origin: Point,
        length: f64,
        ticks: Vec<Tick>,
    },
}

/// A [`Surface`] that records calls instead of drawing.
#[derive(Clone, Debug)]
pub struct Recorder {
    bounds: Rect,
    ops: Vec<SurfaceOp>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Clear))
            .count()
    }

    /// Operations recorded after the most recent `clear` (the current
    /// scene's drawing, under the render-cycle contract).
    pub fn draw_ops_since_last_clear(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }
}

impl Surface for Recorder {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn path(&mut self, points: &[Point], rgba8: [u8; 4], width: f64) {
        self.ops.push(SurfaceOp::Path {
            points: points.to_vec(),
            rgba8,
            width,
        });
    }

    fn rect(&mut self, rect: Rect, rgba8: [u8; 4]) {
        self.ops.push(SurfaceOp::Rect { rect, rgba8 });
    }

    fn circle(&mut self, center: Point, radius: f64, rgba8: [u8; 4]) {
        self.ops.push(SurfaceOp::Circle {
            center,
            radius,
            rgba8,
        });
    }

    fn text(&mut self, at: Point, text: &str, size_px: f64, anchor: TextAnchor) {
        self.ops.push(SurfaceOp::Text {
            at,
            text: text.to_string(),
            size_px,
            anchor,
        });
    }

    fn axis(&mut self, orient: AxisOrient, origin: Point, length: f64, ticks: &[Tick]) {
        self.ops.push(SurfaceOp::Axis {
            orient,
            origin,
            length,
            ticks: ticks.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_captures_calls_in_order() {
        let mut rec = Recorder::new(800.0, 600.0);
        rec.clear();
        rec.text(Point::new(400.0, 10.0), "t", 16.0, TextAnchor::Middle);
        rec.clear();
        rec.rect(Rect::new(0.0, 0.0, 10.0, 10.0), [0, 0, 0, 255]);

        assert_eq!(rec.ops().len(), 4);
        assert_eq!(rec.clear_count(), 2);
        assert_eq!(rec.draw_ops_since_last_clear().len(), 1);
        assert!(matches!(
            rec.draw_ops_since_last_clear()[0],
            SurfaceOp::Rect { .. }
        ));
    }

    #[test]
    fn bounds_reflect_construction_size() {
        let rec = Recorder::new(800.0, 600.0);
        assert_eq!(rec.bounds().width(), 800.0);
        assert_eq!(rec.bounds().height(), 600.0);
    }
}
