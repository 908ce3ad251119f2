//! An adapter for a legacy system tray icon embedded in a socket
use crate::{
    click::{click_sequence, ClickKind, ClickTarget},
    config::Config,
    embed::Socket,
    input::InputEvent,
    x::{ErrorTrap, XConn},
    Error, Result, Xid,
};
use std::str::FromStr;
use strum::EnumString;
use tracing::{debug, error, trace, warn};

/// The read-only properties exposed by a [TrayIcon].
#[derive(EnumString, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The process id of the icon's application
    #[strum(serialize = "pid")]
    Pid,
    /// The icon's window title
    #[strum(serialize = "title")]
    Title,
    /// The class name from the icon's WM_CLASS
    #[strum(serialize = "wm-class")]
    WmClass,
}

/// The value of a [TrayIcon] [Property].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// An unsigned integer value
    Uint(u32),
    /// A string value (possibly empty)
    Str(String),
}

/// A legacy X11 tray icon: a window belonging to another application that has been
/// embedded in a [Socket] owned by the shell.
///
/// The pid, title and class of the icon are looked up once when the TrayIcon is created
/// and remain available for the lifetime of the TrayIcon, even after the plug window has
/// been removed from its socket.
#[derive(Debug)]
pub struct TrayIcon<S> {
    socket: S,
    pid: u32,
    title: String,
    wm_class: String,
    flush_after_click: bool,
}

impl<S> TrayIcon<S>
where
    S: Socket,
{
    /// Create a new TrayIcon for the plug window held in `socket` using the default
    /// [Config].
    ///
    /// # Errors
    /// Returns [Error::NoPlugWindow] if `socket` is not currently holding a plug window.
    pub fn new<X: XConn>(socket: S, x: &X) -> Result<Self> {
        Self::new_with_config(socket, &Config::default(), x)
    }

    /// Create a new TrayIcon for the plug window held in `socket`.
    ///
    /// # Errors
    /// Returns [Error::NoPlugWindow] if `socket` is not currently holding a plug window.
    pub fn new_with_config<X: XConn>(socket: S, config: &Config, x: &X) -> Result<Self> {
        let id = socket.plug_window().ok_or(Error::NoPlugWindow)?;

        let title = socket.title(x).unwrap_or_default();
        let wm_class = socket.wm_class(x).unwrap_or_default();
        let pid = plug_pid(id, &config.pid_property, x);
        debug!(%id, pid, %title, %wm_class, "new tray icon");

        Ok(Self {
            socket,
            pid,
            title,
            wm_class,
            flush_after_click: config.flush_after_click,
        })
    }

    /// The process id of the icon's application, or 0 if it is not known.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// The icon's window title. This will be empty if the window did not have one.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The class name from the icon's WM_CLASS. This will be empty if the window did
    /// not have one.
    pub fn wm_class(&self) -> &str {
        &self.wm_class
    }

    /// The [Socket] holding this icon.
    pub fn socket(&self) -> &S {
        &self.socket
    }

    /// Look up one of the properties of this icon by name: `pid`, `title` or `wm-class`.
    ///
    /// # Errors
    /// Returns [Error::UnknownProperty] if `name` is not a known property.
    pub fn get_property(&self, name: &str) -> Result<PropertyValue> {
        let prop =
            Property::from_str(name).map_err(|_| Error::UnknownProperty(name.to_owned()))?;

        let val = match prop {
            Property::Pid => PropertyValue::Uint(self.pid),
            Property::Title => PropertyValue::Str(self.title.clone()),
            Property::WmClass => PropertyValue::Str(self.wm_class.clone()),
        };

        Ok(val)
    }

    /// Fake a press and release on this icon.
    ///
    /// `event` must be a button release, key press or key release: its time, modifier
    /// state, button and keycode are passed on to the icon but its coordinates are
    /// ignored. The click is always made on the centre of the icon.
    ///
    /// Delivery is best effort: errors from the X server are discarded. If the icon's
    /// plug window has already gone then a warning is logged and nothing is sent.
    pub fn click<X: XConn>(&self, event: &InputEvent, x: &X) {
        let kind = match ClickKind::try_from(event.kind) {
            Ok(kind) => kind,
            Err(e) => {
                error!(%e, "invalid event passed to TrayIcon::click");
                return;
            }
        };

        let id = match self.socket.plug_window() {
            Some(id) => id,
            None => {
                warn!(title = %self.title, "unable to click tray icon: plug window is gone");
                return;
            }
        };

        let mut trap = ErrorTrap::new("tray icon click");
        let target = ClickTarget {
            id,
            root: x.root(),
            geometry: trap.capture(x.client_geometry(id)).unwrap_or_default(),
            root_origin: trap.capture(x.root_origin(id)).unwrap_or_default(),
        };

        for e in click_sequence(kind, event, &target) {
            trace!(%id, event = e.name(), "sending synthetic event to tray icon");
            trap.capture(x.send_event(e));
        }

        if self.flush_after_click {
            x.flush();
        }

        trap.pop_ignored();
    }
}

// The pid is only accepted if the property is a single CARDINAL: anything else
// (including an error from the X server) is treated as unknown.
fn plug_pid<X: XConn>(id: Xid, prop: &str, x: &X) -> u32 {
    let mut trap = ErrorTrap::new("plug pid");
    let val = trap.capture(x.get_prop(id, prop)).flatten();

    if trap.pop() {
        return 0;
    }

    val.and_then(|p| p.single_cardinal()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        embed::EmbeddedWindow,
        input::{InputKind, ModMask},
        pure::geometry::{Point, Rect},
        x::{mock::RecordingConn, Prop, SyntheticEvent},
    };
    use quickcheck_macros::quickcheck;
    use simple_test_case::test_case;
    use std::{
        rc::Rc,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };
    use strum::IntoEnumIterator;
    use tracing::Level;
    use tracing_subscriber::{
        layer::{Context, Layer},
        prelude::*,
    };

    const PLUG: Xid = Xid(42);

    fn conn_with_pid(pid: Option<Prop>) -> RecordingConn {
        let mut conn = RecordingConn::with_window(PLUG, Rect::new(10, 20, 24, 30));
        conn.origins.insert(PLUG, Point::new(1500, 3));
        conn.set_prop(PLUG, "_NET_WM_NAME", Prop::UTF8String(vec!["Volume".into()]));
        conn.set_prop(
            PLUG,
            "WM_CLASS",
            Prop::UTF8String(vec!["pasystray".into(), "Pasystray".into()]),
        );
        if let Some(prop) = pid {
            conn.set_prop(PLUG, "_NET_WM_PID", prop);
        }

        conn
    }

    fn icon(conn: &RecordingConn) -> TrayIcon<EmbeddedWindow> {
        TrayIcon::new(EmbeddedWindow::new(PLUG), conn).unwrap()
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings(f: impl FnOnce()) -> usize {
        let n = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&n)));
        tracing::subscriber::with_default(subscriber, f);

        n.load(Ordering::SeqCst)
    }

    #[test_case(Some(Prop::Cardinal(vec![1234])), 1234; "single cardinal")]
    #[test_case(Some(Prop::Cardinal(vec![0])), 0; "zero")]
    #[test_case(Some(Prop::Cardinal(vec![])), 0; "no values")]
    #[test_case(Some(Prop::Cardinal(vec![1234, 5678])), 0; "multiple values")]
    #[test_case(Some(Prop::Bytes(vec![1234])), 0; "wrong type")]
    #[test_case(Some(Prop::UTF8String(vec!["1234".into()])), 0; "string")]
    #[test_case(None, 0; "absent")]
    #[test]
    fn pid_is_read_from_net_wm_pid(prop: Option<Prop>, expected: u32) {
        let conn = conn_with_pid(prop);

        assert_eq!(icon(&conn).pid(), expected);
    }

    #[test]
    fn pid_is_zero_on_x_error() {
        let mut conn = conn_with_pid(Some(Prop::Cardinal(vec![1234])));
        conn.failing_props.push("_NET_WM_PID".into());

        assert_eq!(icon(&conn).pid(), 0);
    }

    #[quickcheck]
    fn pid_is_only_set_for_single_values(vals: Vec<u32>) -> bool {
        let conn = conn_with_pid(Some(Prop::Cardinal(vals.clone())));
        let expected = if vals.len() == 1 { vals[0] } else { 0 };

        icon(&conn).pid() == expected
    }

    #[test]
    fn pid_property_can_be_configured() {
        let mut conn = conn_with_pid(Some(Prop::Cardinal(vec![1])));
        conn.set_prop(PLUG, "_CUSTOM_PID", Prop::Cardinal(vec![99]));
        let config = Config {
            pid_property: "_CUSTOM_PID".into(),
            ..Default::default()
        };
        let icon = TrayIcon::new_with_config(EmbeddedWindow::new(PLUG), &config, &conn).unwrap();

        assert_eq!(icon.pid(), 99);
    }

    #[test]
    fn title_and_wm_class_are_read_from_the_socket() {
        let conn = conn_with_pid(None);
        let icon = icon(&conn);

        assert_eq!(icon.title(), "Volume");
        assert_eq!(icon.wm_class(), "Pasystray");
    }

    #[test]
    fn missing_title_and_wm_class_are_empty() {
        let conn = RecordingConn::with_window(PLUG, Rect::new(0, 0, 10, 10));
        let icon = icon(&conn);

        assert_eq!(icon.title(), "");
        assert_eq!(icon.wm_class(), "");
        assert_eq!(icon.pid(), 0);
    }

    #[test]
    fn socket_without_a_plug_is_rejected() {
        let conn = conn_with_pid(None);
        let socket = EmbeddedWindow::new(PLUG);
        socket.plug_removed();

        let res = TrayIcon::new(socket, &conn);

        assert!(matches!(res, Err(Error::NoPlugWindow)));
        assert!(conn.requests.borrow().is_empty());
    }

    #[test]
    fn attributes_survive_removal_of_the_plug() {
        let conn = conn_with_pid(Some(Prop::Cardinal(vec![1234])));
        let socket = Rc::new(EmbeddedWindow::new(PLUG));
        let icon = TrayIcon::new(Rc::clone(&socket), &conn).unwrap();
        let before = (icon.pid(), icon.title().to_owned(), icon.wm_class().to_owned());

        socket.plug_removed();
        let after = (icon.pid(), icon.title().to_owned(), icon.wm_class().to_owned());

        assert_eq!(before, (1234, "Volume".to_owned(), "Pasystray".to_owned()));
        assert_eq!(before, after);
    }

    #[test_case("pid", PropertyValue::Uint(1234); "pid")]
    #[test_case("title", PropertyValue::Str("Volume".into()); "title")]
    #[test_case("wm-class", PropertyValue::Str("Pasystray".into()); "wm class")]
    #[test]
    fn get_property(name: &str, expected: PropertyValue) {
        let conn = conn_with_pid(Some(Prop::Cardinal(vec![1234])));

        assert_eq!(icon(&conn).get_property(name).unwrap(), expected);
    }

    #[test]
    fn unknown_properties_are_an_error() {
        let conn = conn_with_pid(None);
        let res = icon(&conn).get_property("window");

        assert!(matches!(res, Err(Error::UnknownProperty(s)) if s == "window"));
    }

    #[test_case(InputEvent::button_release(1, 10, Point::new(0, 0)), &["EnterNotify", "ButtonPress", "ButtonRelease", "LeaveNotify"]; "button release")]
    #[test_case(InputEvent::key_press(36, 10), &["EnterNotify", "KeyPress", "LeaveNotify"]; "key press")]
    #[test_case(InputEvent::key_release(36, 10), &["EnterNotify", "KeyPress", "KeyRelease", "LeaveNotify"]; "key release")]
    #[test]
    fn click_sends_the_expected_events(event: InputEvent, expected: &[&str]) {
        let conn = conn_with_pid(None);
        icon(&conn).click(&event, &conn);

        assert_eq!(conn.sent_names(), expected);
        assert!(conn.sent.borrow().iter().all(|e| e.target().id == PLUG));
        assert_eq!(*conn.flushes.borrow(), 1);
    }

    #[test]
    fn click_is_made_at_the_centre_of_the_plug() {
        let conn = conn_with_pid(None);
        let event = InputEvent::button_release(1, 10, Point::new(300, 400))
            .with_state(ModMask::CONTROL);
        icon(&conn).click(&event, &conn);

        for e in conn.sent.borrow().iter() {
            let t = e.target();
            assert_eq!(t.relative, Point::new(12, 15));
            assert_eq!(t.abs, Point::new(1512, 18));
            assert_eq!(t.root, Xid(1));
            assert_eq!(t.state, ModMask::CONTROL);
        }
    }

    #[test]
    fn unsupported_events_are_rejected_before_any_requests() {
        let conn = conn_with_pid(None);
        let icon = icon(&conn);
        conn.requests.borrow_mut().clear();

        let rejected = InputKind::iter().filter(|&k| ClickKind::try_from(k).is_err());
        for kind in rejected {
            icon.click(&InputEvent::new(kind, 10, Point::new(1, 1)), &conn);
        }

        assert!(conn.requests.borrow().is_empty());
        assert!(conn.sent.borrow().is_empty());
        assert_eq!(*conn.flushes.borrow(), 0);
    }

    #[test]
    fn clicking_a_removed_plug_warns_and_sends_nothing() {
        let conn = conn_with_pid(None);
        let socket = Rc::new(EmbeddedWindow::new(PLUG));
        let icon = TrayIcon::new(Rc::clone(&socket), &conn).unwrap();
        conn.requests.borrow_mut().clear();
        socket.plug_removed();

        let warnings = count_warnings(|| {
            icon.click(&InputEvent::button_release(1, 10, Point::new(0, 0)), &conn)
        });

        assert_eq!(warnings, 1);
        assert!(conn.requests.borrow().is_empty());
        assert!(conn.sent.borrow().is_empty());
    }

    #[test]
    fn x_errors_while_clicking_are_discarded() {
        let mut conn = conn_with_pid(None);
        conn.fail_sends = true;
        let icon = icon(&conn);
        conn.geometry.clear();
        conn.origins.clear();

        icon.click(&InputEvent::key_release(36, 10), &conn);

        // every event is still attempted, aimed at the origin as the geometry is unknown
        assert_eq!(conn.sent.borrow().len(), 4);
        assert!(conn
            .sent
            .borrow()
            .iter()
            .all(|e| e.target().abs == Point::default()));
    }

    #[test]
    fn flushing_can_be_disabled() {
        let conn = conn_with_pid(None);
        let config = Config {
            flush_after_click: false,
            ..Default::default()
        };
        let icon = TrayIcon::new_with_config(EmbeddedWindow::new(PLUG), &config, &conn).unwrap();

        icon.click(&InputEvent::key_press(36, 10), &conn);

        assert_eq!(conn.sent.borrow().len(), 3);
        assert_eq!(*conn.flushes.borrow(), 0);
    }

    #[test]
    fn key_press_never_sends_a_release() {
        let conn = conn_with_pid(None);
        icon(&conn).click(&InputEvent::key_press(36, 10), &conn);

        assert!(!conn
            .sent
            .borrow()
            .iter()
            .any(|e| matches!(e, SyntheticEvent::KeyRelease { .. })));
    }
}
