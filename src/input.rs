//! High level input events as delivered to a shell widget
use crate::pure::geometry::Point;
use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

bitflags! {
    /// Modifier key and pointer button state held at the time of an input event.
    ///
    /// The bit layout matches the core X protocol `KeyButMask` so that values can be
    /// passed through to synthetic events unchanged.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Shift
        const SHIFT   = 1 << 0;
        /// Caps lock
        const LOCK    = 1 << 1;
        /// Control
        const CONTROL = 1 << 2;
        /// Mod1 (usually Alt)
        const MOD1    = 1 << 3;
        /// Mod2 (usually Num lock)
        const MOD2    = 1 << 4;
        /// Mod3
        const MOD3    = 1 << 5;
        /// Mod4 (usually Super)
        const MOD4    = 1 << 6;
        /// Mod5
        const MOD5    = 1 << 7;
        /// Mouse button 1 is held
        const BUTTON1 = 1 << 8;
        /// Mouse button 2 is held
        const BUTTON2 = 1 << 9;
        /// Mouse button 3 is held
        const BUTTON3 = 1 << 10;
        /// Mouse button 4 is held
        const BUTTON4 = 1 << 11;
        /// Mouse button 5 is held
        const BUTTON5 = 1 << 12;
    }
}

/// The kinds of input event that may be received by a widget in the shell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(AsRefStr, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A mouse button was pressed
    ButtonPress,
    /// A mouse button was released
    ButtonRelease,
    /// A key was pressed
    KeyPress,
    /// A key was released
    KeyRelease,
    /// The pointer moved
    Motion,
    /// The pointer entered the widget
    Enter,
    /// The pointer left the widget
    Leave,
    /// A scroll wheel or touchpad scroll
    Scroll,
}

/// An input event received by a widget, carrying the details that can be forwarded
/// on to an embedded client.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    /// What kind of event this is
    pub kind: InputKind,
    /// The server timestamp of the event
    pub time: u32,
    /// Modifier and button state at the time of the event
    pub state: ModMask,
    /// The mouse button involved (0 for events that are not button events)
    pub button: u8,
    /// The hardware keycode involved (0 for events that are not key events)
    pub keycode: u8,
    /// Where the pointer was, in stage coordinates
    pub position: Point,
}

impl InputEvent {
    /// Create a new event of the given kind with no button, keycode or modifiers.
    pub fn new(kind: InputKind, time: u32, position: Point) -> Self {
        Self {
            kind,
            time,
            state: ModMask::empty(),
            button: 0,
            keycode: 0,
            position,
        }
    }

    /// A mouse button release.
    pub fn button_release(button: u8, time: u32, position: Point) -> Self {
        Self {
            button,
            ..Self::new(InputKind::ButtonRelease, time, position)
        }
    }

    /// A key press.
    pub fn key_press(keycode: u8, time: u32) -> Self {
        Self {
            keycode,
            ..Self::new(InputKind::KeyPress, time, Point::default())
        }
    }

    /// A key release.
    pub fn key_release(keycode: u8, time: u32) -> Self {
        Self {
            keycode,
            ..Self::new(InputKind::KeyRelease, time, Point::default())
        }
    }

    /// Set the modifier state for this event.
    pub fn with_state(mut self, state: ModMask) -> Self {
        self.state = state;
        self
    }
}
