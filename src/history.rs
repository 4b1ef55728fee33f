use crate::stroke::DrawOpRef;
use crate::surface::Surface;

/// Default maximum number of retained operations.
pub const DEFAULT_RETENTION: usize = 20;

/// Ordered, bounded history of committed draw operations with an
/// undo/redo cursor.
///
/// One sequence plus one cursor, never two parallel lists: the visible
/// raster is always exactly the replay of `ops[..committed]`. Undo and
/// redo move the cursor and trigger a full replay from a cleared surface;
/// erasing is a destructive composite, so incremental un-painting cannot
/// be correct.
pub struct Timeline {
    ops: Vec<DrawOpRef>,
    /// Length of the visible prefix. Invariant: `committed <= ops.len()`.
    committed: usize,
    /// Retention cap; the oldest operation is evicted when a commit at
    /// full undo depth would exceed it.
    cap: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RETENTION)
    }

    pub fn with_capacity(cap: usize) -> Self {
        assert!(cap > 0, "retention cap must be at least 1");
        Self {
            ops: Vec::new(),
            committed: 0,
            cap,
        }
    }

    /// Commit a finished operation to the timeline.
    ///
    /// Any redo tail past the cursor is discarded first (a fresh stroke
    /// invalidates redo history). Eviction of the oldest operation only
    /// happens at full undo depth: if undone operations were just
    /// truncated the visible count is below the cap and nothing is
    /// dropped. No raster work happens here; the caller already painted
    /// the stroke live during the gesture.
    pub fn append(&mut self, op: DrawOpRef) {
        if self.committed < self.ops.len() {
            log::debug!(
                "append: dropping {} redo operation(s)",
                self.ops.len() - self.committed
            );
            self.ops.truncate(self.committed);
        }
        if self.ops.len() == self.cap {
            log::debug!("append: retention cap {} reached, evicting oldest", self.cap);
            self.ops.remove(0);
        }
        self.ops.push(op);
        self.committed = self.ops.len();
    }

    /// Step the cursor back one operation and replay. No-op at depth 0.
    /// Returns whether the visible state changed.
    pub fn undo(&mut self, surface: &mut dyn Surface) -> bool {
        if self.committed == 0 {
            return false;
        }
        self.committed -= 1;
        self.replay(surface);
        true
    }

    /// Step the cursor forward one operation and replay. No-op when no
    /// undone tail exists. Returns whether the visible state changed.
    pub fn redo(&mut self, surface: &mut dyn Surface) -> bool {
        if self.committed == self.ops.len() {
            return false;
        }
        self.committed += 1;
        self.replay(surface);
        true
    }

    /// Drop the whole history and clear the surface. Not undoable; the UI
    /// gates this behind a confirmation.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        self.ops.clear();
        self.committed = 0;
        surface.clear();
    }

    /// Rebuild the surface from scratch: clear to background, then paint
    /// the committed prefix in order. Also the recovery path when the
    /// backing raster is externally invalidated (e.g. a resize).
    pub fn replay(&self, surface: &mut dyn Surface) {
        surface.clear();
        for op in &self.ops[..self.committed] {
            surface.paint(op);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.committed > 0
    }

    pub fn can_redo(&self) -> bool {
        self.committed < self.ops.len()
    }

    /// Number of operations in the visible prefix.
    pub fn committed_count(&self) -> usize {
        self.committed
    }

    /// Total retained operations, including any undone tail.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The currently visible operations, oldest first.
    pub fn visible_ops(&self) -> &[DrawOpRef] {
        &self.ops[..self.committed]
    }
}
