#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod error;
pub mod export;
pub mod history;
pub mod panels;
pub mod recorder;
pub mod stroke;
pub mod surface;

pub use app::SketchApp;
pub use error::ExportError;
pub use history::Timeline;
pub use recorder::StrokeRecorder;
pub use stroke::{BlendMode, DrawOp, DrawOpRef, QuadSegment, Style};
pub use surface::{RasterSurface, Surface};
