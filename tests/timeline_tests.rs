use egui::{Color32, Pos2};
use sketchboard::{DrawOp, DrawOpRef, QuadSegment, RasterSurface, Style, Surface, Timeline};
use std::sync::Arc;

/// Records every primitive call so tests can compare replays structurally.
#[derive(Default)]
struct RecordingSurface {
    log: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Clear,
    Segment(QuadSegment),
}

impl Surface for RecordingSurface {
    fn paint_segment(&mut self, segment: &QuadSegment, _style: &Style) {
        self.log.push(Event::Segment(*segment));
    }

    fn clear(&mut self) {
        self.log.push(Event::Clear);
    }
}

// One-segment operation keyed by `tag` so replays are distinguishable.
fn op(tag: f32) -> DrawOpRef {
    let segment = QuadSegment {
        from: Pos2::new(tag, 0.0),
        ctrl: Pos2::new(tag, 1.0),
        to: Pos2::new(tag, 2.0),
    };
    DrawOp::new_ref(vec![segment], Style::paint(Color32::BLACK, 2.0))
}

fn replay_log(timeline: &Timeline) -> Vec<Event> {
    let mut surface = RecordingSurface::default();
    timeline.replay(&mut surface);
    surface.log
}

#[test]
fn append_advances_cursor_without_raster_work() {
    let mut timeline = Timeline::new();
    timeline.append(op(1.0));
    timeline.append(op(2.0));

    assert_eq!(timeline.committed_count(), 2);
    assert_eq!(timeline.len(), 2);
    assert!(timeline.can_undo());
    assert!(!timeline.can_redo());
}

#[test]
fn undo_then_redo_restores_cursor_and_replay() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::new();
    timeline.append(op(1.0));
    timeline.append(op(2.0));

    let before = replay_log(&timeline);

    assert!(timeline.undo(&mut surface));
    assert_eq!(timeline.committed_count(), 1);
    assert!(timeline.redo(&mut surface));
    assert_eq!(timeline.committed_count(), 2);

    assert_eq!(replay_log(&timeline), before);
}

#[test]
fn undo_and_redo_are_noops_at_the_bounds() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::new();

    assert!(!timeline.undo(&mut surface));
    assert!(!timeline.redo(&mut surface));
    assert!(surface.log.is_empty(), "no-ops must not touch the surface");

    timeline.append(op(1.0));
    assert!(!timeline.redo(&mut surface));
    assert!(surface.log.is_empty());
}

#[test]
fn undo_replays_committed_prefix_from_cleared_surface() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::new();
    let first = op(1.0);
    timeline.append(first.clone());
    timeline.append(op(2.0));

    timeline.undo(&mut surface);

    assert_eq!(
        surface.log,
        vec![Event::Clear, Event::Segment(first.segments()[0])]
    );
}

#[test]
fn append_after_undo_drops_redo_tail() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::new();
    timeline.append(op(1.0));
    timeline.append(op(2.0));
    timeline.undo(&mut surface);

    timeline.append(op(3.0));

    assert_eq!(timeline.len(), timeline.committed_count());
    assert!(!timeline.redo(&mut surface), "old redo tail must be gone");
}

#[test]
fn retention_cap_evicts_oldest_at_full_depth() {
    let cap = 20;
    let mut timeline = Timeline::new();
    let first = op(0.0);
    timeline.append(first.clone());
    for i in 1..=cap {
        timeline.append(op(i as f32));
    }

    assert_eq!(timeline.len(), cap);
    assert_eq!(timeline.committed_count(), cap);
    assert!(
        !timeline.visible_ops().iter().any(|o| Arc::ptr_eq(o, &first)),
        "earliest operation must be unrecoverable"
    );
}

#[test]
fn no_eviction_while_redo_tail_pending() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::with_capacity(3);
    let a = op(1.0);
    timeline.append(a.clone());
    timeline.append(op(2.0));
    timeline.append(op(3.0));

    // Undo leaves a pending tail; the next append truncates it, so the
    // visible count is below the cap and nothing is evicted.
    timeline.undo(&mut surface);
    timeline.append(op(4.0));

    assert_eq!(timeline.len(), 3);
    assert!(Arc::ptr_eq(&timeline.visible_ops()[0], &a));
}

#[test]
fn clear_is_irreversible() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::new();
    timeline.append(op(1.0));
    timeline.append(op(2.0));

    timeline.clear(&mut surface);

    assert!(timeline.is_empty());
    assert_eq!(timeline.committed_count(), 0);
    assert_eq!(surface.log, vec![Event::Clear]);
    assert!(!timeline.undo(&mut surface));
    // Surface untouched by the rejected undo.
    assert_eq!(surface.log, vec![Event::Clear]);
}

// The walkthrough from the design discussion, with a cap of 3:
// append A, B, C, D -> [B, C, D]; undo twice -> [B]; append E -> [B, E];
// redo -> no-op.
#[test]
fn bounded_history_scenario() {
    let mut surface = RecordingSurface::default();
    let mut timeline = Timeline::with_capacity(3);
    let (a, b, c, d, e) = (op(1.0), op(2.0), op(3.0), op(4.0), op(5.0));

    timeline.append(a.clone());
    timeline.append(b.clone());
    timeline.append(c.clone());
    timeline.append(d.clone());

    let visible: Vec<_> = timeline.visible_ops().to_vec();
    assert_eq!(visible.len(), 3);
    assert!(Arc::ptr_eq(&visible[0], &b));
    assert!(Arc::ptr_eq(&visible[1], &c));
    assert!(Arc::ptr_eq(&visible[2], &d));

    timeline.undo(&mut surface);
    timeline.undo(&mut surface);
    assert_eq!(timeline.committed_count(), 1);
    assert!(Arc::ptr_eq(&timeline.visible_ops()[0], &b));

    timeline.append(e.clone());
    let visible: Vec<_> = timeline.visible_ops().to_vec();
    assert_eq!(visible.len(), 2);
    assert!(Arc::ptr_eq(&visible[0], &b));
    assert!(Arc::ptr_eq(&visible[1], &e));

    assert!(!timeline.redo(&mut surface));
}

#[test]
fn replay_is_pixel_deterministic() {
    let mut timeline = Timeline::new();
    timeline.append(op(5.0));
    timeline.append(op(9.0));

    let mut first = RasterSurface::new(24, 24, Color32::WHITE);
    let mut second = RasterSurface::new(24, 24, Color32::WHITE);
    timeline.replay(&mut first);
    timeline.replay(&mut second);

    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn undo_redo_restores_raster_after_erase() {
    let mut surface = RasterSurface::new(24, 24, Color32::WHITE);
    let mut timeline = Timeline::new();

    let stroke = DrawOp::new_ref(
        vec![QuadSegment {
            from: Pos2::new(2.0, 12.0),
            ctrl: Pos2::new(12.0, 12.0),
            to: Pos2::new(22.0, 12.0),
        }],
        Style::paint(Color32::BLACK, 4.0),
    );
    let erase = DrawOp::new_ref(
        vec![QuadSegment {
            from: Pos2::new(8.0, 12.0),
            ctrl: Pos2::new(12.0, 12.0),
            to: Pos2::new(16.0, 12.0),
        }],
        Style::erase(8.0),
    );

    timeline.append(stroke);
    timeline.append(erase);
    timeline.replay(&mut surface);
    let with_erase = surface.pixels().to_vec();

    timeline.undo(&mut surface);
    timeline.redo(&mut surface);

    assert_eq!(surface.pixels(), &with_erase[..]);
}
