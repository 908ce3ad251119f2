//! A mock implementation of XConn that is easier to implement for
//! use in tests.
//! This module and its contents are only available when testing.
use crate::{
    pure::geometry::{Point, Rect},
    x::{event::SyntheticEvent, property::Prop, XConn},
    Error, Result, Xid,
};
use std::{cell::RefCell, collections::HashMap};

/// All methods on this trait that return a Result unimplemented by
/// default unless an implementation is provided.
/// The `mock_root` method always returns id 0 and `mock_flush` by default is a no-op.
///
/// Any implementation of `MockXConn` will automatically implement `XConn` by forwarding on
/// calls to `$method` to `mock_$method`.
#[allow(unused_variables)]
pub trait MockXConn {
    fn mock_root(&self) -> Xid {
        Xid(0)
    }

    fn mock_flush(&self) {}

    fn mock_intern_atom(&self, atom: &str) -> Result<Xid> {
        unimplemented!("mock_intern_atom")
    }

    fn mock_atom_name(&self, xid: Xid) -> Result<String> {
        unimplemented!("mock_atom_name")
    }

    fn mock_client_geometry(&self, client: Xid) -> Result<Rect> {
        unimplemented!("mock_client_geometry")
    }

    fn mock_root_origin(&self, client: Xid) -> Result<Point> {
        unimplemented!("mock_root_origin")
    }

    fn mock_get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        unimplemented!("mock_get_prop")
    }

    fn mock_send_event(&self, event: SyntheticEvent) -> Result<()> {
        unimplemented!("mock_send_event")
    }
}

impl<T> XConn for T
where
    T: MockXConn,
{
    fn root(&self) -> Xid {
        self.mock_root()
    }

    fn flush(&self) {
        self.mock_flush()
    }

    fn intern_atom(&self, atom: &str) -> Result<Xid> {
        self.mock_intern_atom(atom)
    }

    fn atom_name(&self, xid: Xid) -> Result<String> {
        self.mock_atom_name(xid)
    }

    fn client_geometry(&self, client: Xid) -> Result<Rect> {
        self.mock_client_geometry(client)
    }

    fn root_origin(&self, client: Xid) -> Result<Point> {
        self.mock_root_origin(client)
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        self.mock_get_prop(client, prop_name)
    }

    fn send_event(&self, event: SyntheticEvent) -> Result<()> {
        self.mock_send_event(event)
    }
}

/// A [MockXConn] holding a fixed set of windows and properties that records every
/// request it is sent.
#[derive(Debug, Default)]
pub struct RecordingConn {
    pub root: Xid,
    pub geometry: HashMap<Xid, Rect>,
    pub origins: HashMap<Xid, Point>,
    pub props: HashMap<(Xid, String), Prop>,
    pub failing_props: Vec<String>,
    pub fail_sends: bool,
    pub requests: RefCell<Vec<String>>,
    pub sent: RefCell<Vec<SyntheticEvent>>,
    pub flushes: RefCell<usize>,
}

impl RecordingConn {
    pub fn with_window(id: Xid, r: Rect) -> Self {
        let mut conn = Self {
            root: Xid(1),
            ..Default::default()
        };
        conn.geometry.insert(id, r);
        conn.origins.insert(id, r.origin());

        conn
    }

    pub fn set_prop(&mut self, id: Xid, name: &str, prop: Prop) {
        self.props.insert((id, name.to_owned()), prop);
    }

    pub fn sent_names(&self) -> Vec<&'static str> {
        self.sent.borrow().iter().map(|e| e.name()).collect()
    }

    fn record(&self, req: impl Into<String>) {
        self.requests.borrow_mut().push(req.into());
    }
}

impl MockXConn for RecordingConn {
    fn mock_root(&self) -> Xid {
        self.root
    }

    fn mock_flush(&self) {
        *self.flushes.borrow_mut() += 1;
    }

    fn mock_client_geometry(&self, client: Xid) -> Result<Rect> {
        self.record(format!("client_geometry {client}"));
        self.geometry
            .get(&client)
            .copied()
            .ok_or_else(|| Error::UnknownProperty(format!("geometry of {client}")))
    }

    fn mock_root_origin(&self, client: Xid) -> Result<Point> {
        self.record(format!("root_origin {client}"));
        self.origins
            .get(&client)
            .copied()
            .ok_or_else(|| Error::UnknownProperty(format!("origin of {client}")))
    }

    fn mock_get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        self.record(format!("get_prop {client} {prop_name}"));
        if self.failing_props.iter().any(|p| p == prop_name) {
            return Err(Error::UnknownProperty(prop_name.to_owned()));
        }

        Ok(self.props.get(&(client, prop_name.to_owned())).cloned())
    }

    fn mock_send_event(&self, event: SyntheticEvent) -> Result<()> {
        self.record(format!("send_event {}", event.name()));
        self.sent.borrow_mut().push(event);
        if self.fail_sends {
            return Err(Error::NoPlugWindow);
        }

        Ok(())
    }
}
