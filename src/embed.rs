//! The embedding container that a tray icon lives inside of
use crate::{
    x::{ErrorTrap, XConn, XConnExt},
    Xid,
};
use std::{cell::Cell, rc::Rc};
use tracing::debug;

/// An embedding container ("socket") holding a foreign plug window.
///
/// Sockets are owned by whatever is managing the set of tray icons: it is responsible for
/// running the embedding protocol and for noticing when the plug window goes away. A
/// [TrayIcon][crate::TrayIcon] only ever reads from its socket.
pub trait Socket {
    /// The plug window currently embedded in this socket, if it is still present.
    fn plug_window(&self) -> Option<Xid>;

    /// The title of the embedded application's window.
    fn title<X: XConn>(&self, x: &X) -> Option<String>;

    /// The class name from the `WM_CLASS` of the embedded application's window.
    fn wm_class<X: XConn>(&self, x: &X) -> Option<String>;
}

impl<S: Socket> Socket for &S {
    fn plug_window(&self) -> Option<Xid> {
        S::plug_window(self)
    }

    fn title<X: XConn>(&self, x: &X) -> Option<String> {
        S::title(self, x)
    }

    fn wm_class<X: XConn>(&self, x: &X) -> Option<String> {
        S::wm_class(self, x)
    }
}

impl<S: Socket> Socket for Rc<S> {
    fn plug_window(&self) -> Option<Xid> {
        S::plug_window(self)
    }

    fn title<X: XConn>(&self, x: &X) -> Option<String> {
        S::title(self, x)
    }

    fn wm_class<X: XConn>(&self, x: &X) -> Option<String> {
        S::wm_class(self, x)
    }
}

/// A [Socket] for a plug window that has already been embedded by the tray manager.
///
/// The title and class are read directly from the properties of the plug window. Once the
/// tray manager sees the plug being destroyed or reparented away it should call
/// [EmbeddedWindow::plug_removed]; shared ownership via an [Rc] allows it to do so while a
/// tray icon still holds the socket.
#[derive(Debug)]
pub struct EmbeddedWindow {
    plug: Cell<Option<Xid>>,
}

impl EmbeddedWindow {
    /// Wrap an embedded plug window.
    pub fn new(plug: Xid) -> Self {
        Self {
            plug: Cell::new(Some(plug)),
        }
    }

    /// Mark the plug window as no longer being embedded in this socket.
    pub fn plug_removed(&self) {
        if let Some(id) = self.plug.take() {
            debug!(%id, "plug window removed from socket");
        }
    }

    fn read<X, F>(&self, x: &X, scope: &'static str, f: F) -> Option<String>
    where
        X: XConn,
        F: FnOnce(&X, Xid) -> crate::Result<Option<String>>,
    {
        let id = self.plug.get()?;
        let mut trap = ErrorTrap::new(scope);
        let s = trap.capture(f(x, id)).flatten();
        trap.pop_ignored();

        s
    }
}

impl Socket for EmbeddedWindow {
    fn plug_window(&self) -> Option<Xid> {
        self.plug.get()
    }

    fn title<X: XConn>(&self, x: &X) -> Option<String> {
        self.read(x, "plug title", |x, id| x.window_title(id))
    }

    fn wm_class<X: XConn>(&self, x: &X) -> Option<String> {
        self.read(x, "plug wm class", |x, id| x.window_class(id))
    }
}
