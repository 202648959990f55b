//=========================================================================
// Input Event Types
//
// Portable representation of the raw inputs the game reacts to.
//
// Responsibilities:
// - Represent keys, pointer buttons, cursor/touch motion and surface
//   resizes independently of the windowing backend
// - Provide equality and hashing semantics that let continuous events
//   coalesce (several CursorMoved in a frame → last position wins)
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputBuffer → PlatformEvent::Inputs → EventCollector
//         ↓
//    Game::dispatch_input → wired node listeners
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; also what a tap reports.
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Physical key identifier, independent of keyboard layout.
///
/// Only the keys the game binds are listed; everything else arrives as
/// `Unidentified` and is dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Controls ---------------------------------------------------------

    /// Fire.
    Space,
    Enter,
    Escape,

    //--- Arrows -----------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    /// Fallback for keys the input layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Discrete events compare by kind + payload. Continuous events
/// (`CursorMoved`, `TouchMoved`, `Resized`) compare by kind only so a
/// `HashSet` keeps just the latest one per frame.
///
/// ```text
/// KeyDown{Space}     == KeyDown{Space}       ✓
/// KeyDown{Space}     == KeyUp{Space}         ✗
/// CursorMoved{1, 2}  == CursorMoved{5, 9}    ✓ (coalesced)
/// CursorMoved{..}    == TouchMoved{..}       ✗
/// ```
///
/// Coordinates are window pixels, top-left origin. They are translated to
/// canvas-relative coordinates by the game, which knows where the canvas
/// sits inside the window.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },

    /// Cursor entered or moved over the window.
    CursorMoved { x: f64, y: f64 },

    /// Cursor left the window.
    CursorLeft,

    /// Single-touch drag.
    TouchMoved { x: f64, y: f64 },

    /// Window surface resized (physical pixels).
    Resized { width: u32, height: u32 },

    /// Unrecognized event; ignored by the game.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// True for events that are coalesced to their latest value.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::CursorMoved { .. } | Self::TouchMoved { .. } | Self::Resized { .. }
        )
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a }, KeyDown { key: b }) | (KeyUp { key: a }, KeyUp { key: b }) => a == b,
            (MouseButtonDown { button: a }, MouseButtonDown { button: b })
            | (MouseButtonUp { button: a }, MouseButtonUp { button: b }) => a == b,
            // Continuous: payload ignored so the latest value replaces older ones
            (CursorMoved { .. }, CursorMoved { .. })
            | (TouchMoved { .. }, TouchMoved { .. })
            | (Resized { .. }, Resized { .. }) => true,
            (CursorLeft, CursorLeft) | (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: coordinates and sizes are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => key.hash(state),
            Self::MouseButtonDown { button } | Self::MouseButtonUp { button } => {
                button.hash(state)
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
