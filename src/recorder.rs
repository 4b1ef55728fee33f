use crate::stroke::{DrawOp, DrawOpRef, QuadSegment, Style};
use egui::Pos2;

/// Working state for the gesture currently under the pointer.
struct WorkingStroke {
    /// End of the smoothed path so far (the previous segment midpoint).
    anchor: Pos2,
    /// Last raw pointer position; becomes the next segment's control point.
    last_raw: Pos2,
    segments: Vec<QuadSegment>,
    style: Style,
}

/// Turns raw pointer input into one immutable [`DrawOp`].
///
/// A gesture runs `begin` → `extend`* → `commit`. Each `extend` applies
/// midpoint smoothing: the new piece is a quadratic from the previous
/// anchor, through the previous raw point, to the midpoint of the previous
/// and current raw points. The returned segment lets the caller paint live
/// feedback; replay later repaints the identical segments from the
/// committed operation.
#[derive(Default)]
pub struct StrokeRecorder {
    current: Option<WorkingStroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// True between `begin` and `commit`. History commands must be
    /// rejected while this holds, since a replay would race the live
    /// preview for the surface.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Start a new working path at `point` with a snapshot of `style`.
    ///
    /// A `begin` while a gesture is already active discards the orphaned
    /// working path; the pointer-up for it was never delivered.
    pub fn begin(&mut self, point: Pos2, style: Style) {
        if self.current.is_some() {
            log::warn!("begin during active gesture; dropping unfinished stroke");
        }
        self.current = Some(WorkingStroke {
            anchor: point,
            last_raw: point,
            segments: Vec::new(),
            style,
        });
    }

    /// Append `point` to the working path, returning the new curve piece
    /// for immediate painting. No-op before `begin`.
    pub fn extend(&mut self, point: Pos2) -> Option<QuadSegment> {
        let working = self.current.as_mut()?;
        let mid = Pos2::new(
            (working.last_raw.x + point.x) / 2.0,
            (working.last_raw.y + point.y) / 2.0,
        );
        let segment = QuadSegment {
            from: working.anchor,
            ctrl: working.last_raw,
            to: mid,
        };
        working.segments.push(segment);
        working.anchor = mid;
        working.last_raw = point;
        Some(segment)
    }

    /// Style snapshot of the gesture in progress, if any. The live
    /// preview paints returned segments with exactly this style.
    pub fn active_style(&self) -> Option<Style> {
        self.current.as_ref().map(|working| working.style)
    }

    /// Freeze the working path and style into an immutable operation and
    /// reset for the next gesture. `None` when no gesture was begun.
    pub fn commit(&mut self) -> Option<DrawOpRef> {
        let working = self.current.take()?;
        Some(DrawOp::new_ref(working.segments, working.style))
    }
}
