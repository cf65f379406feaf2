use crate::geometry::{CanvasBounds, Point};

/// Result of translating a viewport point into canvas-local coordinates.
///
/// `point` is always the unclamped translation. `clamped` is set only when the
/// translation fell outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pub point: Point,
    pub in_bounds: bool,
    pub clamped: Option<Point>,
}

pub fn map_to_canvas(raw: Point, bounds: CanvasBounds) -> CanvasMapping {
    let point = raw.translate(-bounds.left, -bounds.top);
    let clamped = Point::new(
        clamp_axis(point.x, bounds.width),
        clamp_axis(point.y, bounds.height),
    );

    if point.approx_eq(clamped) {
        CanvasMapping {
            point,
            in_bounds: true,
            clamped: None,
        }
    } else {
        CanvasMapping {
            point,
            in_bounds: false,
            clamped: Some(clamped),
        }
    }
}

fn clamp_axis(value: f64, extent: f64) -> f64 {
    value.max(0.0).min(extent.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> CanvasBounds {
        CanvasBounds::new(100.0, 40.0, 64.0, 48.0)
    }

    #[test]
    fn in_bounds_point_is_translated_without_clamp() {
        let mapping = map_to_canvas(Point::new(110.0, 50.0), bounds());
        assert!(mapping.in_bounds);
        assert_eq!(mapping.point, Point::new(10.0, 10.0));
        assert_eq!(mapping.clamped, None);
    }

    #[test]
    fn remapping_an_in_bounds_point_leaves_it_unchanged() {
        let origin = CanvasBounds::new(0.0, 0.0, 64.0, 48.0);
        let first = map_to_canvas(Point::new(12.5, 47.0), origin);
        let second = map_to_canvas(first.point, origin);
        assert!(second.in_bounds);
        assert_eq!(second.point, first.point);
    }

    #[test]
    fn canvas_edges_are_inclusive() {
        let mapping = map_to_canvas(Point::new(164.0, 88.0), bounds());
        assert!(mapping.in_bounds);
        assert_eq!(mapping.point, Point::new(64.0, 48.0));
    }

    #[test]
    fn out_of_bounds_point_keeps_raw_translation_and_reports_clamp() {
        let mapping = map_to_canvas(Point::new(90.0, 200.0), bounds());
        assert!(!mapping.in_bounds);
        assert_eq!(mapping.point, Point::new(-10.0, 160.0));
        assert_eq!(mapping.clamped, Some(Point::new(0.0, 48.0)));
    }

    #[test]
    fn each_axis_clamps_independently() {
        let mapping = map_to_canvas(Point::new(120.0, 10.0), bounds());
        assert!(!mapping.in_bounds);
        assert_eq!(mapping.clamped, Some(Point::new(20.0, 0.0)));
    }
}
