use crate::app::SketchApp;
use egui::{Color32, Pos2, Rect, Sense};

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;

        // The backing raster tracks the canvas rect; resizing it replays
        // the timeline onto the fresh buffer.
        app.sync_surface_size(rect);

        let to_canvas = |pos: Pos2| (pos - rect.min).to_pos2();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                app.pointer_down(to_canvas(pos));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                app.pointer_move(to_canvas(pos));
            }
        }
        if response.drag_stopped() {
            app.pointer_up();
        }

        let texture = app.canvas_texture(ctx);
        painter.image(
            texture,
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    });
}
