use crate::geometry::{CanvasBounds, Point};

/// Height of the button rows above (close) and below (copy) each canvas.
pub const PANEL_CONTROL_ROW_HEIGHT: f64 = 24.0;
/// Dashed frame drawn around each panel.
pub const PANEL_BORDER: f64 = 1.0;
pub const DEFAULT_PANEL_GAP: f64 = 8.0;

/// Stacks panels top to bottom in paste order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    origin: Point,
    gap: f64,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), DEFAULT_PANEL_GAP)
    }
}

impl PanelLayout {
    pub fn new(origin: Point, gap: f64) -> Self {
        Self {
            origin,
            gap: gap.max(0.0),
        }
    }

    /// Canvas bounds for panels holding images of the given sizes.
    pub fn canvas_bounds<I>(&self, image_sizes: I) -> Vec<CanvasBounds>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut panel_top = self.origin.y;
        image_sizes
            .into_iter()
            .map(|(width, height)| {
                let canvas_top = panel_top + PANEL_BORDER + PANEL_CONTROL_ROW_HEIGHT;
                let bounds = CanvasBounds::new(
                    self.origin.x + PANEL_BORDER,
                    canvas_top,
                    f64::from(width),
                    f64::from(height),
                );
                panel_top = canvas_top
                    + f64::from(height)
                    + PANEL_CONTROL_ROW_HEIGHT
                    + PANEL_BORDER
                    + self.gap;
                bounds
            })
            .collect()
    }
}
