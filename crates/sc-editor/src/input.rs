//! Input abstraction layer.
//!
//! Normalizes host pointer and key events into the `InputEvent` enum the
//! gesture drivers consume. Positions are in screen coordinates; gestures
//! map them to canvas coordinates through `Document::to_canvas`.

use kurbo::Point;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Extend-selection / constrain modifier.
    pub shift: bool,
    /// Suppress-guides / variant modifier.
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
        ctrl: false,
        meta: false,
    };

    pub const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
        ctrl: false,
        meta: false,
    };
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self {
            pos: Point::new(x, y),
            modifiers,
        }
    }
}

/// A key, reduced to what gestures care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Cancels the active gesture.
    Escape,
    Character(char),
    Other(String),
}

/// A normalized input event from the host shell.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerPressed(PointerEvent),
    PointerMoved(PointerEvent),
    PointerReleased(PointerEvent),
    /// Pointer left the target element (single-shot drag variant only).
    PointerExited(PointerEvent),
    KeyPressed { key: Key, modifiers: Modifiers },
    KeyReleased { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    /// Pointer position, if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerPressed(ev)
            | Self::PointerMoved(ev)
            | Self::PointerReleased(ev)
            | Self::PointerExited(ev) => Some(ev.pos),
            _ => None,
        }
    }
}
