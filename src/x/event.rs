//! Low level X events that we construct by hand and deliver directly to a client window
use crate::{input::ModMask, pure::geometry::Point, Xid};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The positional data shared by all of the pointer and key events we synthesize.
///
/// This mirrors the common header of the core X protocol device events: the window the
/// event is reported relative to, the root of its screen and the pointer position in both
/// coordinate spaces.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventTarget {
    /// The window receiving the event
    pub id: Xid,
    /// The root window of the screen containing `id`
    pub root: Xid,
    /// The server timestamp to report for the event
    pub time: u32,
    /// Pointer position relative to the root window
    pub abs: Point,
    /// Pointer position relative to `id`
    pub relative: Point,
    /// Modifier and pointer button state at the time of the event
    pub state: ModMask,
}

/// The kind of pointer crossing being reported.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// The pointer entered the window (EnterNotify)
    Enter,
    /// The pointer left the window (LeaveNotify)
    Leave,
}

/// An event that we send to a client window as if it had come from the X server.
///
/// Synthetic crossing events are always reported with mode `NotifyNormal`, detail
/// `NotifyNonlinear` and with the same-screen flag set. No child window is ever set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticEvent {
    /// The pointer crossed into or out of the target window
    Crossing(Crossing, EventTarget),
    /// A mouse button was pressed
    ButtonPress {
        /// Where the event is being delivered
        target: EventTarget,
        /// The button number (1 = left, 2 = middle, 3 = right, ...)
        button: u8,
    },
    /// A mouse button was released
    ButtonRelease {
        /// Where the event is being delivered
        target: EventTarget,
        /// The button number (1 = left, 2 = middle, 3 = right, ...)
        button: u8,
    },
    /// A key was pressed
    KeyPress {
        /// Where the event is being delivered
        target: EventTarget,
        /// The hardware keycode of the key
        keycode: u8,
    },
    /// A key was released
    KeyRelease {
        /// Where the event is being delivered
        target: EventTarget,
        /// The hardware keycode of the key
        keycode: u8,
    },
}

impl SyntheticEvent {
    /// The positional data for this event
    pub fn target(&self) -> &EventTarget {
        match self {
            Self::Crossing(_, target)
            | Self::ButtonPress { target, .. }
            | Self::ButtonRelease { target, .. }
            | Self::KeyPress { target, .. }
            | Self::KeyRelease { target, .. } => target,
        }
    }

    /// The X protocol name of this event type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crossing(Crossing::Enter, _) => "EnterNotify",
            Self::Crossing(Crossing::Leave, _) => "LeaveNotify",
            Self::ButtonPress { .. } => "ButtonPress",
            Self::ButtonRelease { .. } => "ButtonRelease",
            Self::KeyPress { .. } => "KeyPress",
            Self::KeyRelease { .. } => "KeyRelease",
        }
    }
}
