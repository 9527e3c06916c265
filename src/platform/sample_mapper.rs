//=========================================================================
// Platform Sample Mapper
//
// Converts Winit window events into dispatcher samples.
//
// Responsibilities:
// - Translate keyboard and mouse button transitions
// - Drop everything else (motion, focus, resize) before it can reach
//   the dispatcher
// - Produce stable identifier tokens: the Debug names of Winit physical
//   key codes ("KeyQ", "Escape", "Space") and fixed "Mouse*" names for
//   buttons
//
// OS key-repeat events are mapped like any other press on purpose:
// debouncing sustained-press spam into a single edge is the single-fire
// category's job, not the mapper's.
//
//=========================================================================

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::core::sample::InputSample;

//=== Event Conversion ====================================================

/// Maps a window event to a sample, or `None` for non-input events and
/// keys Winit itself cannot identify.
pub(crate) fn map_window_event(event: &WindowEvent) -> Option<InputSample> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let identifier = key_identifier(&key_event.physical_key)?;
            Some(InputSample::new(identifier, is_pressed(key_event.state)))
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputSample::new(
            button_identifier(*button),
            is_pressed(*state),
        )),

        _ => None,
    }
}

//=== Token Helpers =======================================================

/// Identifier token for a physical key, or `None` for unidentified keys.
///
/// Tokens are the `Debug` names of `winit::keyboard::KeyCode` variants,
/// which are stable across layouts (physical location, not character).
fn key_identifier(key: &PhysicalKey) -> Option<String> {
    match key {
        PhysicalKey::Code(code) => Some(format!("{:?}", code)),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Identifier token for a mouse button.
fn button_identifier(button: MouseButton) -> String {
    match button {
        MouseButton::Left => "MouseLeft".to_string(),
        MouseButton::Right => "MouseRight".to_string(),
        MouseButton::Middle => "MouseMiddle".to_string(),
        MouseButton::Back => "MouseBack".to_string(),
        MouseButton::Forward => "MouseForward".to_string(),
        MouseButton::Other(id) => format!("MouseOther{}", id),
    }
}

fn is_pressed(state: ElementState) -> bool {
    matches!(state, ElementState::Pressed)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{KeyCode, NativeKeyCode};

    #[test]
    fn key_tokens_use_physical_code_names() {
        let token = key_identifier(&PhysicalKey::Code(KeyCode::KeyQ));
        assert_eq!(token.as_deref(), Some("KeyQ"));

        let token = key_identifier(&PhysicalKey::Code(KeyCode::Escape));
        assert_eq!(token.as_deref(), Some("Escape"));

        let token = key_identifier(&PhysicalKey::Code(KeyCode::Space));
        assert_eq!(token.as_deref(), Some("Space"));
    }

    #[test]
    fn unidentified_keys_map_to_nothing() {
        let token = key_identifier(&PhysicalKey::Unidentified(NativeKeyCode::Unidentified));
        assert_eq!(token, None);
    }

    #[test]
    fn button_tokens_are_fixed_names() {
        assert_eq!(button_identifier(MouseButton::Left), "MouseLeft");
        assert_eq!(button_identifier(MouseButton::Right), "MouseRight");
        assert_eq!(button_identifier(MouseButton::Middle), "MouseMiddle");
        assert_eq!(button_identifier(MouseButton::Back), "MouseBack");
        assert_eq!(button_identifier(MouseButton::Forward), "MouseForward");
        assert_eq!(button_identifier(MouseButton::Other(7)), "MouseOther7");
    }

    #[test]
    fn element_state_maps_to_pressed_flag() {
        assert!(is_pressed(ElementState::Pressed));
        assert!(!is_pressed(ElementState::Released));
    }

    #[test]
    fn mouse_input_becomes_sample() {
        let event = WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        };

        let sample = map_window_event(&event).expect("mouse input must map");
        assert_eq!(sample.identifier, "MouseLeft");
        assert!(sample.pressed);
    }

    #[test]
    fn non_input_events_are_dropped() {
        let event = WindowEvent::Focused(true);
        assert_eq!(map_window_event(&event), None);
    }
}
