//! # xembed_tray: an adapter for legacy X11 system tray icons
//!
//! Legacy tray icons are small windows owned by another application that have been
//! embedded into a socket window owned by the shell using the [XEmbed][0] protocol. The
//! embedding itself (and deciding which icons are shown where) is handled elsewhere: this
//! crate provides the [TrayIcon] adapter that sits on top of an already embedded icon and
//! offers two things:
//!
//!   - the pid, title and WM_CLASS of the icon's application, captured once when the
//!     adapter is created so that they remain available after the icon has gone away.
//!   - [TrayIcon::click], which forwards a click (or key press) to the icon by sending it
//!     a hand built sequence of X events aimed at the centre of its window.
//!
//! All interaction with the X server goes through the [XConn][x::XConn] trait. An
//! implementation backed by [x11rb][1] is provided behind the `x11rb` feature (enabled by
//! default).
//!
//! [0]: https://specifications.freedesktop.org/xembed-spec/latest/
//! [1]: https://docs.rs/x11rb
#![warn(
    clippy::complexity,
    clippy::correctness,
    clippy::style,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rustdoc::all
)]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/sminez/penrose/develop/icon.svg",
    issue_tracker_base_url = "https://github.com/sminez/penrose/issues/"
)]

use std::ops::Deref;

pub mod click;
pub mod config;
pub mod embed;
pub mod input;
pub mod pure;
pub mod tray_icon;
pub mod x;
#[cfg(feature = "x11rb")]
pub mod x11rb;

#[doc(inline)]
pub use crate::{
    config::Config,
    embed::{EmbeddedWindow, Socket},
    input::{InputEvent, InputKind, ModMask},
    tray_icon::{PropertyValue, TrayIcon},
};

/// Error variants from the xembed_tray library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Attempted to click a tray icon using an input event that can not be forwarded.
    #[error("unable to forward a {kind:?} event as a tray icon click")]
    UnsupportedClickEvent {
        /// The kind of the rejected event
        kind: InputKind,
    },

    /// The socket holding a tray icon did not have a live plug window
    #[error("the tray icon socket has no plug window")]
    NoPlugWindow,

    /// Data returned from the X server for a property was not valid UTF-8
    #[error(transparent)]
    NonUtf8Prop(#[from] std::string::FromUtf8Error),

    /// A property name that is not readable on a [TrayIcon]
    #[error("'{0}' is not a tray icon property")]
    UnknownProperty(String),

    /// A property was returned from the X server with a type that we are unable to decode
    #[error("unsupported type for property '{prop}' on {id}: '{ty}'")]
    UnsupportedPropType {
        /// The window the property was read from
        id: Xid,
        /// The property name
        prop: String,
        /// The type name returned by the X server
        ty: String,
    },

    /// The requested screen does not exist on the X server
    #[cfg(feature = "x11rb")]
    #[error("screen {screen_num} does not exist: the X server has {n_screens} screens")]
    UnknownScreen {
        /// The screen that was requested
        screen_num: usize,
        /// The number of screens the X server has
        n_screens: usize,
    },

    /// Unable to establish a connection to the X server
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbConnect(#[from] ::x11rb::errors::ConnectError),

    /// The connection to the X server broke
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbConnection(#[from] ::x11rb::errors::ConnectionError),

    /// The X server returned an error in response to a request
    #[cfg(feature = "x11rb")]
    #[error(transparent)]
    X11rbReplyError(#[from] ::x11rb::errors::ReplyError),
}

/// A Result where the error type is an xembed_tray [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// An X11 ID for a given resource
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Xid(pub(crate) u32);

impl std::fmt::Display for Xid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Xid> for u32 {
    fn from(id: Xid) -> Self {
        id.0
    }
}
