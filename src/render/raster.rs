use image::{imageops, Rgba, RgbaImage};

use super::{Filter, StrokeStyle, Surface, MAX_BLUR_SIGMA};
use crate::geometry::{Rect, POINT_EPSILON};

/// In-memory RGBA surface backed by `image`.
///
/// Every draw overwrites pixels, so a frame never blends with what the
/// previous frame left behind.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    filter: Filter,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            filter: Filter::None,
        }
    }

    /// Surface sized to the image's natural pixel dimensions.
    pub fn for_image(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Point-in-time copy of the current pixels.
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.clone()
    }

    fn apply_filter(&self, layer: RgbaImage) -> RgbaImage {
        match self.filter {
            Filter::None => layer,
            Filter::Blur { sigma } => blur_with_transparent_padding(&layer, sigma),
        }
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn filter(&self) -> Filter {
        self.filter
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }

        let layer = if image.dimensions() == (width, height) {
            image.clone()
        } else {
            imageops::resize(image, width, height, imageops::FilterType::Triangle)
        };
        self.pixels = self.apply_filter(layer);
    }

    fn draw_image_region(&mut self, image: &RgbaImage, rect: Rect) {
        let (width, height) = self.dimensions();
        let Some((x, y, region_width, region_height)) = pixel_span(
            rect,
            width.min(image.width()),
            height.min(image.height()),
        ) else {
            return;
        };

        let region = imageops::crop_imm(image, x, y, region_width, region_height).to_image();
        let painted = self.apply_filter(region);
        imageops::replace(&mut self.pixels, &painted, i64::from(x), i64::from(y));
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        if rect.width() < POINT_EPSILON && rect.height() < POINT_EPSILON {
            return;
        }

        let thickness = i64::from(style.width.max(1));
        let left = rect.top_left().x.round() as i64;
        let top = rect.top_left().y.round() as i64;
        let right = rect.bottom_right().x.round() as i64;
        let bottom = rect.bottom_right().y.round() as i64;
        let max_x = i64::from(width) - 1;
        let max_y = i64::from(height) - 1;
        let color = Rgba(style.color.rgba());

        for y in top.max(0)..=bottom.min(max_y) {
            let full_row = y - top < thickness || bottom - y < thickness;
            for x in left.max(0)..=right.min(max_x) {
                let on_border = full_row || x - left < thickness || right - x < thickness;
                if on_border {
                    // Both coordinates are inside 0..=max by the loop bounds.
                    self.pixels.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Whole-pixel span of `rect` clipped to `width` x `height`, or `None` when nothing is left.
fn pixel_span(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let max_x = f64::from(width);
    let max_y = f64::from(height);
    let left = rect.top_left().x.round().clamp(0.0, max_x);
    let top = rect.top_left().y.round().clamp(0.0, max_y);
    let right = rect.bottom_right().x.round().clamp(0.0, max_x);
    let bottom = rect.bottom_right().y.round().clamp(0.0, max_y);

    let has_area = right > left && bottom > top;
    if !has_area {
        return None;
    }
    Some((
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

/// Blurs `region` as if it were drawn alone on a transparent layer.
///
/// Pixels near the edges pick up transparency from outside the region. Sigma is
/// capped at [`MAX_BLUR_SIGMA`] and the padding never exceeds the region's longer side.
fn blur_with_transparent_padding(region: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma <= 0.0 || !sigma.is_finite() {
        return region.clone();
    }

    let sigma = sigma.min(MAX_BLUR_SIGMA);
    let pad = ((sigma * 3.0).ceil() as u32).min(region.width().max(region.height()));
    let mut layer = RgbaImage::new(
        region.width().saturating_add(pad.saturating_mul(2)),
        region.height().saturating_add(pad.saturating_mul(2)),
    );
    imageops::replace(&mut layer, region, i64::from(pad), i64::from(pad));
    let blurred = imageops::blur(&layer, sigma);
    imageops::crop_imm(&blurred, pad, pad, region.width(), region.height()).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Point};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::from_points(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn draw_image_overwrites_previous_contents() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&solid(4, 4, Rgba([0, 0, 255, 255])));
        surface.draw_image(&solid(4, 4, Rgba([10, 20, 30, 128])));
        assert_eq!(*surface.pixels().get_pixel(2, 2), Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn draw_image_scales_to_fill_surface() {
        let mut surface = RasterSurface::new(8, 6);
        surface.draw_image(&solid(2, 2, RED));
        assert_eq!(surface.pixels().dimensions(), (8, 6));
        assert_eq!(*surface.pixels().get_pixel(7, 5), RED);
    }

    #[test]
    fn unfiltered_region_copies_source_pixels() {
        let mut surface = RasterSurface::new(4, 4);
        let mut source = solid(4, 4, RED);
        source.put_pixel(1, 1, Rgba([1, 2, 3, 255]));

        surface.draw_image_region(&source, rect(1.0, 1.0, 2.0, 2.0));

        assert_eq!(*surface.pixels().get_pixel(1, 1), Rgba([1, 2, 3, 255]));
        assert_eq!(*surface.pixels().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn blurred_region_changes_only_pixels_inside_box() {
        let source = solid(6, 6, RED);
        let mut surface = RasterSurface::for_image(&source);
        surface.draw_image(&source);
        surface.set_filter(Filter::Blur { sigma: 2.0 });

        surface.draw_image_region(&source, rect(0.0, 0.0, 3.0, 3.0));

        assert_ne!(*surface.pixels().get_pixel(1, 1), RED);
        assert_eq!(*surface.pixels().get_pixel(3, 3), RED);
        assert_eq!(*surface.pixels().get_pixel(5, 0), RED);
    }

    #[test]
    fn region_outside_surface_is_clipped() {
        let source = solid(4, 4, RED);
        let mut surface = RasterSurface::new(4, 4);

        surface.draw_image_region(&source, rect(2.0, 2.0, 40.0, 40.0));
        surface.draw_image_region(&source, rect(-9.0, -9.0, -1.0, -1.0));

        assert_eq!(*surface.pixels().get_pixel(3, 3), RED);
        assert_eq!(*surface.pixels().get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn huge_blur_sigma_is_capped_and_renders() {
        let source = solid(4, 4, RED);
        let mut surface = RasterSurface::for_image(&source);
        surface.draw_image(&source);
        surface.set_filter(Filter::Blur { sigma: 1.0e9 });

        surface.draw_image_region(&source, rect(0.0, 0.0, 2.0, 2.0));

        assert_eq!(surface.pixels().dimensions(), (4, 4));
        assert_ne!(*surface.pixels().get_pixel(0, 0), RED);
        assert_eq!(*surface.pixels().get_pixel(3, 3), RED);
    }

    #[test]
    fn blur_padding_is_bounded_by_region_size() {
        let region = solid(3, 2, RED);
        let blurred = blur_with_transparent_padding(&region, MAX_BLUR_SIGMA * 10.0);
        assert_eq!(blurred.dimensions(), (3, 2));
    }

    #[test]
    fn zero_area_region_draws_nothing() {
        let source = solid(4, 4, RED);
        let mut surface = RasterSurface::new(4, 4);
        surface.set_filter(Filter::Blur { sigma: 2.0 });

        surface.draw_image_region(&source, Rect::at(Point::new(1.0, 1.0)));

        assert!(surface.pixels().pixels().all(|pixel| pixel[3] == 0));
    }

    #[test]
    fn stroke_rect_paints_outline_but_not_interior() {
        let mut surface = RasterSurface::new(10, 10);
        let style = StrokeStyle {
            color: Color::new(0, 255, 0),
            width: 1,
        };

        surface.stroke_rect(rect(2.0, 2.0, 7.0, 6.0), style);

        let green = Rgba([0, 255, 0, 255]);
        assert_eq!(*surface.pixels().get_pixel(2, 2), green);
        assert_eq!(*surface.pixels().get_pixel(7, 6), green);
        assert_eq!(*surface.pixels().get_pixel(4, 2), green);
        assert_eq!(*surface.pixels().get_pixel(4, 4), Rgba([0, 0, 0, 0]));
        assert_eq!(*surface.pixels().get_pixel(8, 8), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn stroke_rect_far_outside_surface_is_clipped() {
        let mut surface = RasterSurface::new(4, 4);
        surface.stroke_rect(rect(1.0, 1.0, 5000.0, 5000.0), StrokeStyle::default());
        assert_eq!(*surface.pixels().get_pixel(1, 3), RED);
        assert_eq!(*surface.pixels().get_pixel(3, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn pixel_span_rounds_and_clips() {
        assert_eq!(pixel_span(rect(0.4, 0.6, 2.6, 3.2), 10, 10), Some((0, 1, 3, 2)));
        assert_eq!(pixel_span(rect(8.0, 8.0, 20.0, 9.0), 10, 10), Some((8, 8, 2, 1)));
        assert_eq!(pixel_span(rect(1.2, 1.0, 1.4, 5.0), 10, 10), None);
    }
}
