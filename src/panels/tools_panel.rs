use crate::app::{SketchApp, ToolMode};
use egui::Slider;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            if ui
                .selectable_label(app.settings.mode == ToolMode::Pen, "🖊 Pen")
                .clicked()
            {
                app.settings.mode = ToolMode::Pen;
            }
            if ui
                .selectable_label(app.settings.mode == ToolMode::Eraser, "Eraser")
                .clicked()
            {
                app.settings.mode = ToolMode::Eraser;
            }

            ui.separator();

            ui.label("Pen color");
            ui.color_edit_button_srgba(&mut app.settings.pen_color);
            ui.add(Slider::new(&mut app.settings.pen_width, 1.0..=40.0).text("Pen width"));
            ui.add(Slider::new(&mut app.settings.eraser_width, 4.0..=80.0).text("Eraser width"));

            ui.separator();

            // Stepping the history mid-gesture would orphan the working
            // path, so the buttons are disabled while drawing.
            let gesture = app.gesture_active();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(app.can_undo() && !gesture, egui::Button::new("Undo"))
                    .clicked()
                {
                    app.undo();
                }
                if ui
                    .add_enabled(app.can_redo() && !gesture, egui::Button::new("Redo"))
                    .clicked()
                {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!gesture, egui::Button::new("Clear"))
                    .clicked()
                {
                    app.show_clear_confirm = true;
                }
                if ui.add_enabled(!gesture, egui::Button::new("Save")).clicked() {
                    app.save_image();
                }
            });

            ui.separator();

            let timeline = app.timeline();
            ui.label(format!(
                "Strokes: {} visible / {} retained",
                timeline.committed_count(),
                timeline.len()
            ));

            if let Some(status) = &app.status {
                ui.separator();
                ui.label(status);
            }
        });
}
