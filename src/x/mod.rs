//! Logic for interacting with the X server
use crate::{
    pure::geometry::{Point, Rect},
    Result, Xid,
};
use tracing::{debug, trace};

pub mod atom;
pub mod event;
#[cfg(test)]
pub mod mock;
pub mod property;
pub mod trap;

pub use atom::Atom;
pub use event::{Crossing, EventTarget, SyntheticEvent};
pub use property::Prop;
pub use trap::ErrorTrap;

/// A handle on a running X11 connection that we can use for issuing X requests.
///
/// XConn is intended as an abstraction layer to allow for communication with the underlying
/// display system using whatever mechanism the implementer wishes. Only the small number of
/// requests needed for inspecting and poking at embedded tray icons are required.
pub trait XConn {
    /// The ID of the root window of the screen we are running on.
    fn root(&self) -> Xid;
    /// Flush any pending requests to the X server.
    fn flush(&self);

    /// Look up the [Xid] of a given [Atom] name. If it is not currently interned, intern it.
    fn intern_atom(&self, atom: &str) -> Result<Xid>;
    /// Look up the string name of a given [Atom] by its [Xid].
    fn atom_name(&self, xid: Xid) -> Result<String>;

    /// Look up the current dimensions and position of a given client window relative
    /// to its parent.
    fn client_geometry(&self, client: Xid) -> Result<Rect>;
    /// Translate the top left corner of a client window into root window coordinates.
    fn root_origin(&self, client: Xid) -> Result<Point>;

    /// Look up a specific property on a given client window.
    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>>;

    /// Deliver a [SyntheticEvent] directly to the window it targets, bypassing the
    /// normal input routing of the X server.
    fn send_event(&self, event: SyntheticEvent) -> Result<()>;
}

/// Extended functionality for [XConn] impls.
pub trait XConnExt: XConn + Sized {
    /// Fetch the first string value of the named property for a client, if it is set
    /// and non-empty.
    fn str_prop(&self, client: Xid, prop_name: &str) -> Result<Option<String>> {
        let s = match self.get_prop(client, prop_name)? {
            Some(prop) => prop.first_str().map(String::from),
            None => None,
        };

        Ok(s.filter(|s| !s.is_empty()))
    }

    /// Fetch the title of a client window following EWMH / ICCCM conventions: the UTF-8
    /// `_NET_WM_NAME` is preferred with `WM_NAME` used as a fallback.
    fn window_title(&self, client: Xid) -> Result<Option<String>> {
        match self.str_prop(client, Atom::NetWmName.as_ref()) {
            Ok(Some(title)) => return Ok(Some(title)),
            Ok(None) => trace!(%client, "no _NET_WM_NAME set: falling back to WM_NAME"),
            Err(e) => debug!(%client, %e, "unable to read _NET_WM_NAME: falling back to WM_NAME"),
        }

        self.str_prop(client, Atom::WmName.as_ref())
    }

    /// Fetch the class name of a client window: the second string in its `WM_CLASS`
    /// property.
    fn window_class(&self, client: Xid) -> Result<Option<String>> {
        match self.get_prop(client, Atom::WmClass.as_ref())? {
            Some(Prop::UTF8String(strs)) if strs.len() > 1 => Ok(Some(strs[1].clone())),
            _ => Ok(None),
        }
    }
}

impl<X> XConnExt for X where X: XConn {}
