use crate::export;
use crate::history::Timeline;
use crate::panels;
use crate::recorder::StrokeRecorder;
use crate::stroke::Style;
use crate::surface::{RasterSurface, Surface};
use egui::{Color32, Pos2, Rect, TextureOptions};
use std::path::PathBuf;

const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToolMode {
    Pen,
    Eraser,
}

/// Current tool state, read by the recorder at gesture start only.
/// Persisted across runs; the timeline and surface never are.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub mode: ToolMode,
    pub pen_color: Color32,
    pub pen_width: f32,
    pub eraser_width: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            mode: ToolMode::Pen,
            pen_color: Color32::RED,
            pen_width: 5.0,
            eraser_width: 36.0,
        }
    }
}

impl ToolSettings {
    /// Snapshot the style the next gesture will be recorded with.
    pub fn active_style(&self) -> Style {
        match self.mode {
            ToolMode::Pen => Style::paint(self.pen_color, self.pen_width),
            ToolMode::Eraser => Style::erase(self.eraser_width),
        }
    }
}

/// We derive Deserialize/Serialize so we can persist tool settings on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    pub(crate) settings: ToolSettings,

    // Session state: never persisted, rebuilt on startup.
    #[serde(skip)]
    recorder: StrokeRecorder,
    #[serde(skip)]
    timeline: Timeline,
    #[serde(skip)]
    surface: RasterSurface,
    #[serde(skip)]
    texture: Option<egui::TextureHandle>,
    #[serde(skip)]
    canvas_dirty: bool,
    #[serde(skip)]
    pub(crate) show_clear_confirm: bool,
    #[serde(skip)]
    pub(crate) status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            settings: ToolSettings::default(),
            recorder: StrokeRecorder::new(),
            timeline: Timeline::new(),
            // Resized to the canvas rect on the first frame.
            surface: RasterSurface::new(1, 1, CANVAS_BACKGROUND),
            texture: None,
            canvas_dirty: true,
            show_clear_confirm: false,
            status: None,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }
        Self::default()
    }

    /// True from pointer-down to pointer-up. History commands and export
    /// are rejected while this holds.
    pub fn gesture_active(&self) -> bool {
        self.recorder.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Start recording a gesture at `pos` (canvas coordinates).
    pub(crate) fn pointer_down(&mut self, pos: Pos2) {
        self.recorder.begin(pos, self.settings.active_style());
    }

    /// Extend the gesture and paint the new curve piece immediately. The
    /// live paint is not history; replay repaints it from the committed
    /// operation.
    pub(crate) fn pointer_move(&mut self, pos: Pos2) {
        let Some(style) = self.recorder.active_style() else {
            return;
        };
        if let Some(segment) = self.recorder.extend(pos) {
            self.surface.paint_segment(&segment, &style);
            self.canvas_dirty = true;
        }
    }

    /// Commit the gesture to the timeline. No raster work: the stroke is
    /// already on the surface from the live preview.
    pub(crate) fn pointer_up(&mut self) {
        if let Some(op) = self.recorder.commit() {
            self.timeline.append(op);
        }
    }

    pub fn undo(&mut self) {
        if self.gesture_active() {
            return;
        }
        if self.timeline.undo(&mut self.surface) {
            self.canvas_dirty = true;
        }
    }

    pub fn redo(&mut self) {
        if self.gesture_active() {
            return;
        }
        if self.timeline.redo(&mut self.surface) {
            self.canvas_dirty = true;
        }
    }

    pub fn clear(&mut self) {
        if self.gesture_active() {
            return;
        }
        self.timeline.clear(&mut self.surface);
        self.canvas_dirty = true;
    }

    /// Export the surface as a timestamped JPEG in the working directory.
    pub fn save_image(&mut self) {
        if self.gesture_active() {
            return;
        }
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match export::save_jpeg(&self.surface, &dir) {
            Ok(path) => {
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("export failed: {err}");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    /// Keep the surface sized to the canvas rect. A resize recreates the
    /// backing raster, so the timeline is replayed onto the fresh buffer.
    pub(crate) fn sync_surface_size(&mut self, rect: Rect) {
        let width = (rect.width().round() as usize).max(1);
        let height = (rect.height().round() as usize).max(1);
        if (width, height) != self.surface.size() {
            self.surface.resize(width, height);
            self.timeline.replay(&mut self.surface);
            self.canvas_dirty = true;
        }
    }

    /// Upload the raster to the GPU when it changed since the last frame.
    pub(crate) fn canvas_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let dirty = std::mem::take(&mut self.canvas_dirty);
        match &mut self.texture {
            Some(texture) => {
                if dirty {
                    texture.set(self.surface.color_image(), TextureOptions::NEAREST);
                }
                texture.id()
            }
            None => {
                let texture =
                    ctx.load_texture("canvas", self.surface.color_image(), TextureOptions::NEAREST);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        // Clearing wipes the undo history too, so it is confirmation-gated.
        if self.show_clear_confirm {
            egui::Window::new("Clear drawing?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("This erases the canvas and the undo history. It cannot be undone.");
                    ui.horizontal(|ui| {
                        if ui.button("Clear").clicked() {
                            self.clear();
                            self.show_clear_confirm = false;
                        }
                        if ui.button("Cancel").clicked() {
                            self.show_clear_confirm = false;
                        }
                    });
                });
        }
    }
}
