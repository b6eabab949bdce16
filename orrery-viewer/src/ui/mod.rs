//! UI modules for the viewer

mod canvas;
mod details_panel;

pub use canvas::{canvas_events, paint_frame};
pub use details_panel::render_details_window;
