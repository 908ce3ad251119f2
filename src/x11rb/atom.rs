//! Caching of the atoms we know about up front
use crate::{x::Atom, Result, Xid};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use x11rb::{connection::Connection, protocol::xproto::ConnectionExt};

#[derive(Debug)]
pub(crate) struct Atoms {
    atoms: HashMap<Atom, Xid>,
}

impl Atoms {
    pub(crate) fn new(conn: &impl Connection) -> Result<Self> {
        // First send all requests...
        let atom_requests = Atom::iter()
            .map(|atom| Ok((atom, conn.intern_atom(false, atom.as_ref().as_bytes())?)))
            .collect::<Result<Vec<_>>>()?;
        // ..then get all the replies (so that we only need one instead of many round-trips to the
        // X11 server)
        let atoms = atom_requests
            .into_iter()
            .map(|(atom, cookie)| Ok((atom, Xid(cookie.reply()?.atom))))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self { atoms })
    }

    pub(crate) fn known_atom(&self, atom: Atom) -> Option<Xid> {
        self.atoms.get(&atom).copied()
    }

    pub(crate) fn atom_name(&self, id: Xid) -> Option<Atom> {
        self.atoms
            .iter()
            .find(|(_, &value)| id == value)
            .map(|(&key, _)| key)
    }
}
