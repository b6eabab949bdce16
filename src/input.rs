//! Input handling for the orrery view.
//!
//! The `Input` struct turns toolkit-neutral events into scene actions: arrow
//! keys pan by a fixed step, dragging pans by a fixed step per axis in the
//! direction the pointer moved relative to where the drag started, and
//! Space toggles freeze.
//!
//! # Usage
//!
//! ```ignore
//! let mut input = Input::new(config.pan);
//!
//! for event in events {
//!     match input.handle_event(event) {
//!         Some(Action::Pan(delta)) => scene.pan(delta),
//!         Some(Action::ToggleFreeze) => { scene.toggle_freeze(); }
//!         None => {}
//!     }
//! }
//! ```

use crate::config::PanConfig;
use glam::DVec2;

/// Keys the orrery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Space,
    Other,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A raw input event, already translated out of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    PointerPressed { button: MouseButton, position: DVec2 },
    PointerMoved(DVec2),
    PointerReleased(MouseButton),
}

/// What the scene should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Pan(DVec2),
    ToggleFreeze,
}

/// Input state tracking for panning.
#[derive(Debug, Clone)]
pub struct Input {
    pan: PanConfig,
    /// Where the current left-button drag started, if one is in progress.
    drag_anchor: Option<DVec2>,
}

impl Input {
    pub fn new(pan: PanConfig) -> Self {
        Self {
            pan,
            drag_anchor: None,
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn pan_config(&self) -> PanConfig {
        self.pan
    }

    /// Process one event.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::KeyPressed(key) => self.key_action(key),

            InputEvent::PointerPressed {
                button: MouseButton::Left,
                position,
            } => {
                self.drag_anchor = Some(position);
                None
            }
            InputEvent::PointerPressed { .. } => None,

            InputEvent::PointerMoved(position) => {
                let anchor = self.drag_anchor?;
                Some(Action::Pan(drag_step(anchor, position, self.pan.drag_step)))
            }

            InputEvent::PointerReleased(MouseButton::Left) => {
                self.drag_anchor = None;
                None
            }
            InputEvent::PointerReleased(_) => None,
        }
    }

    fn key_action(&self, key: KeyCode) -> Option<Action> {
        let step = self.pan.key_step;
        match key {
            KeyCode::Up => Some(Action::Pan(DVec2::new(0.0, -step))),
            KeyCode::Down => Some(Action::Pan(DVec2::new(0.0, step))),
            KeyCode::Left => Some(Action::Pan(DVec2::new(-step, 0.0))),
            KeyCode::Right => Some(Action::Pan(DVec2::new(step, 0.0))),
            KeyCode::Space => Some(Action::ToggleFreeze),
            KeyCode::Other => None,
        }
    }
}

/// One drag step per axis towards where the pointer is relative to the anchor.
///
/// Each axis moves by exactly `step`; a pointer level with the anchor counts
/// as the negative direction.
fn drag_step(anchor: DVec2, position: DVec2, step: f64) -> DVec2 {
    let axis = |from: f64, to: f64| if to <= from { -step } else { step };
    DVec2::new(axis(anchor.x, position.x), axis(anchor.y, position.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> Input {
        Input::new(PanConfig {
            key_step: 10.0,
            drag_step: 5.0,
        })
    }

    #[test]
    fn test_arrow_keys_pan() {
        let mut input = input();
        assert_eq!(
            input.handle_event(InputEvent::KeyPressed(KeyCode::Up)),
            Some(Action::Pan(DVec2::new(0.0, -10.0)))
        );
        assert_eq!(
            input.handle_event(InputEvent::KeyPressed(KeyCode::Right)),
            Some(Action::Pan(DVec2::new(10.0, 0.0)))
        );
        assert_eq!(input.handle_event(InputEvent::KeyPressed(KeyCode::Other)), None);
    }

    #[test]
    fn test_space_toggles_freeze() {
        let mut input = input();
        assert_eq!(
            input.handle_event(InputEvent::KeyPressed(KeyCode::Space)),
            Some(Action::ToggleFreeze)
        );
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let mut input = input();
        assert_eq!(input.handle_event(InputEvent::PointerMoved(DVec2::new(3.0, 3.0))), None);
    }

    #[test]
    fn test_drag_pans_towards_pointer() {
        let mut input = input();
        input.handle_event(InputEvent::PointerPressed {
            button: MouseButton::Left,
            position: DVec2::new(100.0, 100.0),
        });
        assert!(input.is_dragging());

        assert_eq!(
            input.handle_event(InputEvent::PointerMoved(DVec2::new(140.0, 60.0))),
            Some(Action::Pan(DVec2::new(5.0, -5.0)))
        );
        assert_eq!(
            input.handle_event(InputEvent::PointerMoved(DVec2::new(100.0, 101.0))),
            Some(Action::Pan(DVec2::new(-5.0, 5.0)))
        );

        input.handle_event(InputEvent::PointerReleased(MouseButton::Left));
        assert!(!input.is_dragging());
        assert_eq!(input.handle_event(InputEvent::PointerMoved(DVec2::new(200.0, 200.0))), None);
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut input = input();
        input.handle_event(InputEvent::PointerPressed {
            button: MouseButton::Right,
            position: DVec2::ZERO,
        });
        assert!(!input.is_dragging());
    }
}
