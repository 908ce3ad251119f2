//! Helpers and utilities for using x11rb as a back end for xembed_tray
//!
//! The [Conn] struct implements [XConn] for any x11rb [Connection], with [RustConn] being
//! provided as a convenience alias for the pure Rust [RustConnection].
use crate::{
    pure::geometry::{Point, Rect},
    x::{
        property::{split_latin1, split_null_separated},
        Atom, Prop, SyntheticEvent, XConn,
    },
    Error, Result, Xid,
};
use tracing::{error, trace};
use x11rb::{
    connection::Connection,
    protocol::xproto::{AtomEnum, ConnectionExt as _, EventMask, Screen},
    rust_connection::RustConnection,
};

mod atom;
mod event;

use atom::Atoms;

/// Handles communication with an X server via the x11rb crate.
#[derive(Debug)]
pub struct Conn<C: Connection> {
    conn: C,
    root: Xid,
    atoms: Atoms,
}

/// An x11rb backed [Conn] using the pure Rust [RustConnection].
pub type RustConn = Conn<RustConnection>;

impl RustConn {
    /// Connect to the display named by the `DISPLAY` environment variable.
    pub fn new() -> Result<Self> {
        Self::connect(None)
    }

    /// Connect to the named display, falling back to the `DISPLAY` environment variable
    /// if `display_name` is `None`.
    pub fn connect(display_name: Option<&str>) -> Result<Self> {
        let (conn, screen_num) = RustConnection::connect(display_name)?;
        trace!(?display_name, screen_num, "connected to X server");

        Self::new_for_connection(conn, screen_num)
    }
}

impl<C: Connection> Conn<C> {
    /// Wrap an existing connection, using the root window of the given screen.
    pub fn new_for_connection(conn: C, screen_num: usize) -> Result<Self> {
        let root = root_for_screen(&conn.setup().roots, screen_num)?;
        let atoms = Atoms::new(&conn)?;

        Ok(Self { conn, root, atoms })
    }

    /// Get a handle on the underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }
}

fn root_for_screen(roots: &[Screen], screen_num: usize) -> Result<Xid> {
    match roots.get(screen_num) {
        Some(screen) => Ok(Xid(screen.root)),
        None => Err(Error::UnknownScreen {
            screen_num,
            n_screens: roots.len(),
        }),
    }
}

/// The undecoded contents of a window property as returned by the X server.
#[derive(Debug, Clone, Copy)]
struct RawProp<'a> {
    ty: Xid,
    format: u8,
    value: &'a [u8],
}

impl RawProp<'_> {
    fn value32(&self) -> Option<Vec<u32>> {
        if self.format != 32 || self.value.len() % 4 != 0 {
            return None;
        }

        let vals = self
            .value
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Some(vals)
    }
}

/// Decode a raw property into a [Prop] based on its type and format.
///
/// STRING properties are ISO Latin-1 (ICCCM) while UTF8_STRING must be valid UTF-8.
/// ATOM, CARDINAL and WINDOW properties must be in format 32.
fn decode_prop<F>(id: Xid, name: &str, raw: RawProp<'_>, atom_name: F) -> Result<Prop>
where
    F: Fn(Xid) -> Result<String>,
{
    let ty_name = atom_name(raw.ty)?;
    let unsupported = || Error::UnsupportedPropType {
        id,
        prop: name.to_owned(),
        ty: format!("{ty_name} (format {})", raw.format),
    };

    let prop = match ty_name.parse::<Atom>().ok() {
        Some(Atom::String) => Prop::UTF8String(split_latin1(raw.value)),
        Some(Atom::UTF8String) => Prop::UTF8String(split_null_separated(raw.value)?),

        Some(kind @ (Atom::Atom | Atom::Cardinal | Atom::Window)) => {
            let vals = raw.value32().ok_or_else(unsupported)?;

            match kind {
                Atom::Atom => Prop::Atom(
                    vals.into_iter()
                        .map(|a| atom_name(Xid(a)))
                        .collect::<Result<Vec<_>>>()?,
                ),
                Atom::Cardinal => Prop::Cardinal(vals),
                _ => Prop::Window(vals.into_iter().map(Xid).collect()),
            }
        }

        _ => match raw.format {
            32 => Prop::Bytes(raw.value32().ok_or_else(unsupported)?),
            8 | 16 => Prop::Bytes(raw.value.iter().map(|&b| b as u32).collect()),
            _ => return Err(unsupported()),
        },
    };

    Ok(prop)
}

impl<C: Connection> XConn for Conn<C> {
    fn root(&self) -> Xid {
        self.root
    }

    fn flush(&self) {
        if let Err(e) = self.conn.flush() {
            error!(%e, "unable to flush the X connection");
        }
    }

    fn intern_atom(&self, atom: &str) -> Result<Xid> {
        if let Some(known) = atom.parse::<Atom>().ok().and_then(|a| self.atoms.known_atom(a)) {
            return Ok(known);
        }

        let reply = self.conn.intern_atom(false, atom.as_bytes())?.reply()?;

        Ok(Xid(reply.atom))
    }

    fn atom_name(&self, xid: Xid) -> Result<String> {
        if let Some(atom) = self.atoms.atom_name(xid) {
            return Ok(atom.as_ref().to_string());
        }

        let reply = self.conn.get_atom_name(*xid)?.reply()?;

        Ok(String::from_utf8(reply.name)?)
    }

    fn client_geometry(&self, client: Xid) -> Result<Rect> {
        let geo = self.conn.get_geometry(*client)?.reply()?;

        Ok(Rect::new(
            geo.x as i32,
            geo.y as i32,
            geo.width as u32,
            geo.height as u32,
        ))
    }

    fn root_origin(&self, client: Xid) -> Result<Point> {
        let reply = self
            .conn
            .translate_coordinates(*client, *self.root, 0, 0)?
            .reply()?;

        Ok(Point::new(reply.dst_x as i32, reply.dst_y as i32))
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        let atom = self.intern_atom(prop_name)?;
        let r = self
            .conn
            .get_property(false, *client, *atom, AtomEnum::ANY, 0, 1024)?
            .reply()?;

        if r.type_ == x11rb::NONE {
            trace!(%client, prop_name, "prop is not set");
            return Ok(None);
        }

        let raw = RawProp {
            ty: Xid(r.type_),
            format: r.format,
            value: &r.value,
        };

        decode_prop(client, prop_name, raw, |xid| self.atom_name(xid)).map(Some)
    }

    // Errors returned by the server for a synthetic event are discarded rather than
    // waited on: only failures to send the request at all are returned.
    fn send_event(&self, event: SyntheticEvent) -> Result<()> {
        let id = event.target().id;
        trace!(%id, event = event.name(), "sending synthetic event");
        self.conn
            .send_event(false, *id, EventMask::NO_EVENT, event::to_wire(&event))?
            .ignore_error();

        Ok(())
    }
}
