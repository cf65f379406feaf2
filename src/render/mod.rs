//! Per-frame compositing of the base image, drag feedback and blur boxes.

mod frame;
mod raster;

pub use frame::{FrameQueue, FrameScheduler};
pub use raster::RasterSurface;

use image::RgbaImage;

use crate::geometry::{Color, Rect};

pub const DEFAULT_BLUR_SIGMA: f32 = 7.0;
/// Largest blur sigma, in pixels, a surface will apply.
pub const MAX_BLUR_SIGMA: f32 = 100.0;
pub const DEFAULT_OUTLINE_WIDTH: u32 = 1;

/// Sticky filter applied by subsequent image draws, like a canvas context filter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Filter {
    #[default]
    None,
    Blur {
        sigma: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: u32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            width: DEFAULT_OUTLINE_WIDTH,
        }
    }
}

/// Drawing primitives the compositor needs from a host surface.
///
/// Coordinates are the surface's own pixel space.
pub trait Surface {
    fn dimensions(&self) -> (u32, u32);
    fn set_filter(&mut self, filter: Filter);
    fn filter(&self) -> Filter;
    /// Draws `image` scaled to exactly fill the surface.
    fn draw_image(&mut self, image: &RgbaImage);
    /// Draws the `rect` part of `image` onto the same `rect` of the surface.
    fn draw_image_region(&mut self, image: &RgbaImage, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorStyle {
    pub outline: StrokeStyle,
    pub blur_sigma: f32,
}

impl Default for CompositorStyle {
    fn default() -> Self {
        Self {
            outline: StrokeStyle::default(),
            blur_sigma: DEFAULT_BLUR_SIGMA,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor {
    style: CompositorStyle,
}

impl Compositor {
    pub fn new(style: CompositorStyle) -> Self {
        Self { style }
    }

    /// Redraws a full frame from the base image. Nothing carries over from the previous frame.
    pub fn render_frame<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        image: &RgbaImage,
        active: Option<Rect>,
        committed: &[Rect],
    ) {
        if surface.filter() != Filter::None {
            surface.set_filter(Filter::None);
        }
        surface.draw_image(image);

        if let Some(rect) = active {
            surface.stroke_rect(rect, self.style.outline);
        }

        if !committed.is_empty() {
            surface.set_filter(Filter::Blur {
                sigma: self.style.blur_sigma,
            });
            for rect in committed {
                surface.draw_image_region(image, *rect);
            }
        }
        surface.set_filter(Filter::None);
    }
}
