//! Building the sequence of X events used to fake a click on an embedded window
use crate::{
    input::{InputEvent, InputKind},
    pure::geometry::{Point, Rect},
    x::{Crossing, EventTarget, SyntheticEvent},
    Error, Xid,
};

/// The input events that can be forwarded to an embedded window as a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    /// A completed mouse click: forwarded as a press followed by a release
    Button,
    /// A key press: forwarded as a press only
    KeyPress,
    /// A key release: forwarded as a press followed by a release
    KeyRelease,
}

impl TryFrom<InputKind> for ClickKind {
    type Error = Error;

    fn try_from(kind: InputKind) -> Result<Self, Self::Error> {
        match kind {
            InputKind::ButtonRelease => Ok(Self::Button),
            InputKind::KeyPress => Ok(Self::KeyPress),
            InputKind::KeyRelease => Ok(Self::KeyRelease),
            kind => Err(Error::UnsupportedClickEvent { kind }),
        }
    }
}

/// Where a synthetic click will be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickTarget {
    /// The window being clicked
    pub id: Xid,
    /// The root window of the screen containing `id`
    pub root: Xid,
    /// The geometry of `id`
    pub geometry: Rect,
    /// The top left corner of `id` in root window coordinates
    pub root_origin: Point,
}

impl ClickTarget {
    fn event_target(&self, event: &InputEvent) -> EventTarget {
        let relative = self.geometry.local_midpoint();

        EventTarget {
            id: self.id,
            root: self.root,
            time: event.time,
            abs: self.root_origin + relative,
            relative,
            state: event.state,
        }
    }
}

/// Build the events that fake `event` on `target`.
///
/// The pointer is always placed at the centre of the target window: the position of the
/// triggering event is ignored. The sequence is bracketed by an enter and leave
/// notification so that the client believes the pointer was inside of it for the click.
///
/// A key press is forwarded without a matching release as the client may take a grab on
/// seeing the press.
pub fn click_sequence(
    kind: ClickKind,
    event: &InputEvent,
    target: &ClickTarget,
) -> Vec<SyntheticEvent> {
    let t = target.event_target(event);
    let mut events = vec![SyntheticEvent::Crossing(Crossing::Enter, t)];

    match kind {
        ClickKind::Button => {
            let button = event.button;
            events.push(SyntheticEvent::ButtonPress { target: t, button });
            events.push(SyntheticEvent::ButtonRelease { target: t, button });
        }

        ClickKind::KeyPress | ClickKind::KeyRelease => {
            let keycode = event.keycode;
            events.push(SyntheticEvent::KeyPress { target: t, keycode });
            if kind == ClickKind::KeyRelease {
                events.push(SyntheticEvent::KeyRelease { target: t, keycode });
            }
        }
    }

    events.push(SyntheticEvent::Crossing(Crossing::Leave, t));

    events
}
