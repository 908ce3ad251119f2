//! Serialising synthetic events into their X11 wire format
use crate::x::{Crossing, EventTarget, SyntheticEvent};
use x11rb::protocol::xproto::{
    ButtonPressEvent, EnterNotifyEvent, KeyButMask, KeyPressEvent, NotifyDetail, NotifyMode,
    BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, ENTER_NOTIFY_EVENT, KEY_PRESS_EVENT,
    KEY_RELEASE_EVENT, LEAVE_NOTIFY_EVENT,
};

// same-screen is bit 1 of the same-screen/focus byte in crossing events
const SAME_SCREEN: u8 = 1 << 1;

pub(crate) fn to_wire(event: &SyntheticEvent) -> [u8; 32] {
    let t = event.target();

    match *event {
        SyntheticEvent::Crossing(crossing, _) => crossing_event(crossing, t).into(),
        SyntheticEvent::ButtonPress { button, .. } => {
            button_event(BUTTON_PRESS_EVENT, button, t).into()
        }
        SyntheticEvent::ButtonRelease { button, .. } => {
            button_event(BUTTON_RELEASE_EVENT, button, t).into()
        }
        SyntheticEvent::KeyPress { keycode, .. } => key_event(KEY_PRESS_EVENT, keycode, t).into(),
        SyntheticEvent::KeyRelease { keycode, .. } => {
            key_event(KEY_RELEASE_EVENT, keycode, t).into()
        }
    }
}

fn crossing_event(crossing: Crossing, t: &EventTarget) -> EnterNotifyEvent {
    let response_type = match crossing {
        Crossing::Enter => ENTER_NOTIFY_EVENT,
        Crossing::Leave => LEAVE_NOTIFY_EVENT,
    };
    let (root_x, root_y) = t.abs.as_wire();
    let (event_x, event_y) = t.relative.as_wire();

    EnterNotifyEvent {
        response_type,
        detail: NotifyDetail::NONLINEAR,
        sequence: 0,
        time: t.time,
        root: *t.root,
        event: *t.id,
        child: x11rb::NONE,
        root_x,
        root_y,
        event_x,
        event_y,
        state: KeyButMask::from(t.state.bits()),
        mode: NotifyMode::NORMAL,
        same_screen_focus: SAME_SCREEN,
    }
}

fn button_event(response_type: u8, button: u8, t: &EventTarget) -> ButtonPressEvent {
    let (root_x, root_y) = t.abs.as_wire();
    let (event_x, event_y) = t.relative.as_wire();

    ButtonPressEvent {
        response_type,
        detail: button,
        sequence: 0,
        time: t.time,
        root: *t.root,
        event: *t.id,
        child: x11rb::NONE,
        root_x,
        root_y,
        event_x,
        event_y,
        state: KeyButMask::from(t.state.bits()),
        same_screen: true,
    }
}

fn key_event(response_type: u8, keycode: u8, t: &EventTarget) -> KeyPressEvent {
    let (root_x, root_y) = t.abs.as_wire();
    let (event_x, event_y) = t.relative.as_wire();

    KeyPressEvent {
        response_type,
        detail: keycode,
        sequence: 0,
        time: t.time,
        root: *t.root,
        event: *t.id,
        child: x11rb::NONE,
        root_x,
        root_y,
        event_x,
        event_y,
        state: KeyButMask::from(t.state.bits()),
        same_screen: true,
    }
}
