use egui::{Color32, Pos2};
use std::sync::Arc;

/// How a stroke composites onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    /// Normal paint: the stroke color replaces what is underneath.
    Paint,
    /// Erase-as-clear: the stroke restores the surface background color.
    /// Destructive, which is why undo must replay rather than un-paint.
    Erase,
}

/// Immutable brush snapshot captured at `begin` time.
///
/// Copied by value into each committed operation so later tool changes
/// never retroactively alter history entries. Caps and joins are always
/// round; that is baked into the rasterizer rather than stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color32,
    pub width: f32,
    pub blend: BlendMode,
}

impl Style {
    pub fn paint(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            blend: BlendMode::Paint,
        }
    }

    pub fn erase(width: f32) -> Self {
        Self {
            // Color is ignored for erasing; the surface substitutes its
            // own background at paint time.
            color: Color32::TRANSPARENT,
            width,
            blend: BlendMode::Erase,
        }
    }
}

/// One quadratic curve piece of a smoothed stroke path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub from: Pos2,
    pub ctrl: Pos2,
    pub to: Pos2,
}

impl QuadSegment {
    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Pos2 {
        let u = 1.0 - t;
        let x = u * u * self.from.x + 2.0 * u * t * self.ctrl.x + t * t * self.to.x;
        let y = u * u * self.from.y + 2.0 * u * t * self.ctrl.y + t * t * self.to.y;
        Pos2::new(x, y)
    }

    /// Upper bound on the curve length (sum of the control polygon legs).
    pub fn length_bound(&self) -> f32 {
        self.from.distance(self.ctrl) + self.ctrl.distance(self.to)
    }
}

/// The atomic, immutable unit of history: a finished smoothed path plus
/// the style that was active when it was drawn.
#[derive(Debug, Clone)]
pub struct DrawOp {
    segments: Vec<QuadSegment>,
    style: Style,
}

/// Reference-counted handle; the timeline and the renderer share
/// operations without cloning the path data.
pub type DrawOpRef = Arc<DrawOp>;

impl DrawOp {
    pub fn new(segments: Vec<QuadSegment>, style: Style) -> Self {
        Self { segments, style }
    }

    pub fn new_ref(segments: Vec<QuadSegment>, style: Style) -> DrawOpRef {
        Arc::new(Self::new(segments, style))
    }

    pub fn segments(&self) -> &[QuadSegment] {
        &self.segments
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// A tap with no movement commits an operation with no segments; it
    /// paints nothing but still occupies a history slot.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
