//! Painting composed frames and translating canvas input.

use eframe::egui;
use glam::DVec2;
use orrery::render::Shape;
use orrery::{InputEvent, KeyCode, MouseButton, Rgb};

const LABEL_FONT_SIZE: f32 = 12.0;

const KEYS: [(egui::Key, KeyCode); 5] = [
    (egui::Key::ArrowUp, KeyCode::Up),
    (egui::Key::ArrowDown, KeyCode::Down),
    (egui::Key::ArrowLeft, KeyCode::Left),
    (egui::Key::ArrowRight, KeyCode::Right),
    (egui::Key::Space, KeyCode::Space),
];

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

fn to_screen(origin: egui::Pos2, point: DVec2) -> egui::Pos2 {
    origin + egui::vec2(point.x as f32, point.y as f32)
}

fn to_canvas(origin: egui::Pos2, pos: egui::Pos2) -> DVec2 {
    DVec2::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

/// Paint shapes in order, with canvas coordinates relative to `origin`.
pub fn paint_frame(painter: &egui::Painter, origin: egui::Pos2, shapes: &[Shape]) {
    let font = egui::FontId::proportional(LABEL_FONT_SIZE);

    for shape in shapes {
        match shape {
            Shape::Disk { center, radius, color: rgb } => {
                painter.circle_filled(to_screen(origin, *center), *radius as f32, color(*rgb));
            }
            Shape::Ring { center, radius, color: rgb } => {
                painter.circle_stroke(
                    to_screen(origin, *center),
                    *radius as f32,
                    egui::Stroke::new(1.0, color(*rgb)),
                );
            }
            Shape::Label { anchor, text, color: rgb } => {
                painter.text(
                    to_screen(origin, *anchor),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    font.clone(),
                    color(*rgb),
                );
            }
        }
    }
}

/// Collect this frame's key presses and left-button drag as input events.
///
/// Pointer positions are reported relative to the canvas `origin`.
pub fn canvas_events(ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) -> Vec<InputEvent> {
    let mut events = Vec::new();

    if !ctx.wants_keyboard_input() {
        ctx.input(|i| {
            for (key, code) in KEYS {
                if i.key_pressed(key) {
                    events.push(InputEvent::KeyPressed(code));
                }
            }
        });
    }

    let primary = egui::PointerButton::Primary;

    if response.drag_started_by(primary) {
        // The drag only starts once the pointer has moved; anchor at the press.
        let anchor = ctx
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = anchor {
            events.push(InputEvent::PointerPressed {
                button: MouseButton::Left,
                position: to_canvas(origin, pos),
            });
        }
    }

    if response.dragged_by(primary) && response.drag_delta() != egui::Vec2::ZERO {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(InputEvent::PointerMoved(to_canvas(origin, pos)));
        }
    }

    if response.drag_stopped_by(primary) {
        events.push(InputEvent::PointerReleased(MouseButton::Left));
    }

    events
}
