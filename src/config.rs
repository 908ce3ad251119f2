//! User facing configuration for tray icons
use crate::x::Atom;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The user specified config options for how a [TrayIcon][crate::TrayIcon] talks to the
/// X server.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The window property holding the process id of the application owning a tray icon.
    /// It is expected to hold a single `CARDINAL` value.
    pub pid_property: String,
    /// Whether or not to flush the X connection once the events making up a click have
    /// been sent. Disable this if you are batching requests and flushing yourself.
    pub flush_after_click: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pid_property: Atom::NetWmPid.as_ref().to_string(),
            flush_after_click: true,
        }
    }
}
