//! Data types for working with X atoms
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// The X atoms used when inspecting embedded tray icons.
///
/// Atom names are shared between all X11 API libraries so this enum allows us to get a little bit
/// of type safety around their use. Implementors of [XConn][1] should accept any variant of [Atom]
/// that they are passed by client code.
///
/// [1]: crate::x::XConn
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(AsRefStr, EnumString, EnumIter, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Atom {
    /// ATOM
    #[strum(serialize = "ATOM")]
    Atom,
    /// CARDINAL
    #[strum(serialize = "CARDINAL")]
    Cardinal,
    /// STRING
    #[strum(serialize = "STRING")]
    String,
    /// UTF8_STRING
    #[strum(serialize = "UTF8_STRING")]
    UTF8String,
    /// WINDOW
    #[strum(serialize = "WINDOW")]
    Window,
    /// WM_CLASS
    #[strum(serialize = "WM_CLASS")]
    WmClass,
    /// WM_NAME
    #[strum(serialize = "WM_NAME")]
    WmName,
    /// _NET_WM_NAME
    #[strum(serialize = "_NET_WM_NAME")]
    NetWmName,
    /// _NET_WM_PID
    #[strum(serialize = "_NET_WM_PID")]
    NetWmPid,
}
