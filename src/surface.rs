use crate::stroke::{BlendMode, DrawOp, QuadSegment, Style};
use egui::{Color32, ColorImage};

/// Raster target the history engine reconciles against.
///
/// Only two primitives are required: composite one curve piece, and reset
/// to the base background. Replay is expressed entirely in these, which is
/// what makes the timeline testable against a recording mock.
pub trait Surface {
    fn paint_segment(&mut self, segment: &QuadSegment, style: &Style);

    /// Reset every pixel to the base background.
    fn clear(&mut self);

    /// Composite a whole committed operation.
    fn paint(&mut self, op: &DrawOp) {
        let style = op.style();
        for segment in op.segments() {
            self.paint_segment(segment, &style);
        }
    }
}

/// Software raster: an opaque pixel buffer with a fixed background color.
///
/// The rasterizer is deliberately simple and deterministic: quadratics are
/// flattened by an arc-length bound and round-capped discs are stamped
/// along the samples. Determinism is load-bearing; undo/redo correctness
/// rests on replaying a prefix always producing identical pixels.
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
    background: Color32,
}

/// Spacing between disc stamps, in pixels.
const STAMP_SPACING: f32 = 1.0;

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(1, 1, Color32::WHITE)
    }
}

impl RasterSurface {
    pub fn new(width: usize, height: usize, background: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
            background,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Recreate the backing buffer at a new size, cleared to background.
    /// The caller is expected to replay the timeline afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; width * height];
    }

    /// Snapshot as an egui image for texture upload.
    pub fn color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }

    fn stamp_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color32) {
        let r2 = radius * radius;
        let x0 = ((cx - radius).floor().max(0.0)) as usize;
        let y0 = ((cy - radius).floor().max(0.0)) as usize;
        let x1 = ((cx + radius).ceil() as isize).clamp(0, self.width as isize) as usize;
        let y1 = ((cy + radius).ceil() as isize).clamp(0, self.height as isize) as usize;
        for y in y0..y1 {
            let row = y * self.width;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[row + x] = color;
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn paint_segment(&mut self, segment: &QuadSegment, style: &Style) {
        let color = match style.blend {
            BlendMode::Paint => style.color,
            BlendMode::Erase => self.background,
        };
        let radius = (style.width / 2.0).max(0.5);
        let steps = (segment.length_bound() / STAMP_SPACING).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = segment.point_at(t);
            self.stamp_disc(p.x, p.y, radius, color);
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn segment(from: (f32, f32), to: (f32, f32)) -> QuadSegment {
        QuadSegment {
            from: Pos2::new(from.0, from.1),
            ctrl: Pos2::new(from.0, from.1),
            to: Pos2::new(to.0, to.1),
        }
    }

    #[test]
    fn paint_marks_pixels_and_clear_restores_background() {
        let mut surface = RasterSurface::new(16, 16, Color32::WHITE);
        surface.paint_segment(&segment((4.0, 8.0), (12.0, 8.0)), &Style::paint(Color32::RED, 3.0));
        assert!(surface.pixels().iter().any(|&p| p == Color32::RED));

        surface.clear();
        assert!(surface.pixels().iter().all(|&p| p == Color32::WHITE));
    }

    #[test]
    fn erase_stamps_background_color() {
        let mut surface = RasterSurface::new(16, 16, Color32::WHITE);
        let path = segment((0.0, 8.0), (16.0, 8.0));
        surface.paint_segment(&path, &Style::paint(Color32::BLACK, 6.0));
        surface.paint_segment(&path, &Style::erase(8.0));
        assert!(surface.pixels().iter().all(|&p| p == Color32::WHITE));
    }

    #[test]
    fn stamps_clip_at_surface_edges() {
        let mut surface = RasterSurface::new(8, 8, Color32::WHITE);
        // Segment mostly outside the buffer; must not panic or wrap.
        surface.paint_segment(
            &segment((-10.0, -10.0), (20.0, 20.0)),
            &Style::paint(Color32::BLUE, 4.0),
        );
        assert!(surface.pixels().iter().any(|&p| p == Color32::BLUE));
    }
}
