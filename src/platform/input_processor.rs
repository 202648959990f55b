//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit events into the game's InputEvents.
//
// Architecture:
//   winit events → InputProcessor → InputEvent → InputBuffer
//
// Stateful touch tracking: the first finger down owns the gesture until it
// lifts or is cancelled; other fingers are ignored. The owning finger
// reports as a left button press, drag and release. Keys outside the
// small bound set are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Converts winit events to InputEvents, tracking the active touch.
pub(crate) struct InputProcessor {
    active_touch: Option<u64>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { active_touch: None }
    }

    pub(crate) fn active_touch(&self) -> Option<u64> {
        self.active_touch
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(key_event.physical_key, key_event.state)
    }

    pub(crate) fn process_key(&self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button },
            ElementState::Released => InputEvent::MouseButtonUp { button },
        }
    }

    /// Cursor position in physical window pixels.
    pub(crate) fn process_cursor_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    /// Single-touch gestures. Returns `None` for fingers other than the
    /// one that started the gesture.
    pub(crate) fn process_touch(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_some() {
                    return None;
                }
                self.active_touch = Some(id);
                Some(InputEvent::MouseButtonDown { button: MouseButton::Left })
            }
            TouchPhase::Moved => {
                (self.active_touch == Some(id)).then_some(InputEvent::TouchMoved { x, y })
            }
            TouchPhase::Ended => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                Some(InputEvent::MouseButtonUp { button: MouseButton::Left })
            }
            TouchPhase::Cancelled => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                }
                None
            }
        }
    }

    /// Physical surface size.
    pub(crate) fn process_resize(&self, width: u32, height: u32) -> InputEvent {
        InputEvent::Resized { width, height }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps the bound keys; everything else is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            //--- Controls -----------------------------------------------------

            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,

            //--- Arrows -------------------------------------------------------

            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle map directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    //=====================================================================
    // Keys
    //=====================================================================

    #[test]
    fn space_press_and_release() {
        let processor = InputProcessor::new();
        let code = PhysicalKey::Code(WinitKeyCode::Space);

        assert_eq!(
            processor.process_key(code, ElementState::Pressed),
            Some(InputEvent::KeyDown { key: KeyCode::Space })
        );
        assert_eq!(
            processor.process_key(code, ElementState::Released),
            Some(InputEvent::KeyUp { key: KeyCode::Space })
        );
    }

    #[test]
    fn unbound_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(processor.process_key(PhysicalKey::Code(WinitKeyCode::KeyQ), ElementState::Pressed), None);
        assert_eq!(
            processor.process_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified), ElementState::Pressed),
            None,
            "keys without a code are dropped"
        );
    }

    #[test]
    fn key_conversions() {
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    //=====================================================================
    // Pointer
    //=====================================================================

    #[test]
    fn mouse_buttons() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown { button: MouseButton::Left }
        );
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp { button: MouseButton::Other }
        );
    }

    #[test]
    fn first_finger_owns_the_gesture() {
        let mut processor = InputProcessor::new();

        assert_eq!(
            processor.process_touch(1, TouchPhase::Started, 10.0, 10.0),
            Some(InputEvent::MouseButtonDown { button: MouseButton::Left })
        );
        assert_eq!(processor.process_touch(2, TouchPhase::Started, 50.0, 50.0), None, "second finger ignored");
        assert_eq!(processor.process_touch(2, TouchPhase::Moved, 60.0, 60.0), None);

        match processor.process_touch(1, TouchPhase::Moved, 12.0, 14.0) {
            Some(InputEvent::TouchMoved { x, y }) => assert_eq!((x, y), (12.0, 14.0)),
            other => panic!("Expected TouchMoved, got {:?}", other),
        }

        assert_eq!(
            processor.process_touch(1, TouchPhase::Ended, 12.0, 14.0),
            Some(InputEvent::MouseButtonUp { button: MouseButton::Left })
        );
        assert_eq!(processor.active_touch(), None);
    }

    #[test]
    fn cancelled_touch_releases_without_click() {
        let mut processor = InputProcessor::new();
        processor.process_touch(4, TouchPhase::Started, 0.0, 0.0);

        assert_eq!(processor.process_touch(4, TouchPhase::Cancelled, 0.0, 0.0), None);
        assert_eq!(processor.active_touch(), None, "a new gesture can start");
    }
}
