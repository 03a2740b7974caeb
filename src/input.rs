//! Frame input collection over the macroquad backend.
//!
//! Screens consume an ordered [`InputEvent`] list per frame; the match
//! simulator samples held movement keys separately as a [`MatchInput`]
//! snapshot. Both forms are plain data, so screen transitions and the
//! update step stay testable without a window.

use macroquad::prelude::*;

/// One input event, in arrival order within a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    KeyDown(KeyCode),
    Char(char),
    Wheel { dy: f32 },
    Quit,
}

// Keys surfaced as discrete events; movement keys are sampled as held state.
const EVENT_KEYS: [KeyCode; 5] = [
    KeyCode::Enter,
    KeyCode::KpEnter,
    KeyCode::Escape,
    KeyCode::Backspace,
    KeyCode::R,
];

/// Drains the backend's pending input into an ordered event list.
pub fn collect_events() -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }

    let (mx, my) = mouse_position();
    events.push(InputEvent::PointerMove { x: mx, y: my });
    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::PointerDown { x: mx, y: my });
    }
    if is_mouse_button_released(MouseButton::Left) {
        events.push(InputEvent::PointerUp { x: mx, y: my });
    }

    let (_, wheel_y) = mouse_wheel();
    if wheel_y.abs() > f32::EPSILON {
        events.push(InputEvent::Wheel { dy: wheel_y });
    }

    for key in EVENT_KEYS {
        if is_key_pressed(key) {
            events.push(InputEvent::KeyDown(key));
        }
    }
    while let Some(ch) = get_char_pressed() {
        if !ch.is_control() {
            events.push(InputEvent::Char(ch));
        }
    }

    events
}

/// Held direction keys for one combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Movement state for both combatants, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchInput {
    pub p1: HeldKeys,
    pub p2: HeldKeys,
}

/// Samples the fixed key bindings: WASD for slot 0, arrow keys for slot 1.
pub fn sample_movement() -> MatchInput {
    MatchInput {
        p1: HeldKeys {
            up: is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::D),
        },
        p2: HeldKeys {
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
        },
    }
}
