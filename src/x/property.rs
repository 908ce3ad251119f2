//! Data types for working with X window properties
use crate::Xid;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Known property types that should be returnable by XConn impls when they check
/// window properties.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Prop {
    /// One or more X Atoms
    Atom(Vec<String>),
    /// Raw bytes for when the prop type is non-standard
    Bytes(Vec<u32>),
    /// Cardinal numbers
    Cardinal(Vec<u32>),
    /// String data, decoded from either UTF8_STRING or Latin-1 STRING properties
    UTF8String(Vec<String>),
    /// One or more X window IDs
    Window(Vec<Xid>),
}

impl Prop {
    /// The value of this property if it is a single cardinal.
    ///
    /// Anything else (a different type, no values or more than one value) gives `None`.
    pub fn single_cardinal(&self) -> Option<u32> {
        match self {
            Prop::Cardinal(vals) if vals.len() == 1 => Some(vals[0]),
            _ => None,
        }
    }

    /// The first string held by this property if it is string data.
    pub fn first_str(&self) -> Option<&str> {
        match self {
            Prop::UTF8String(strs) => strs.first().map(|s| s.as_str()),
            _ => None,
        }
    }
}

fn null_separated(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    let raw = raw.strip_suffix(&[0]).unwrap_or(raw);

    // splitting an empty slice yields a single empty component
    raw.split(|&b| b == 0).take(if raw.is_empty() { 0 } else { usize::MAX })
}

/// Split the raw bytes of a UTF8_STRING property into its null separated components.
///
/// A single trailing null byte (as set by most clients) does not result in an empty
/// trailing string.
pub(crate) fn split_null_separated(raw: &[u8]) -> crate::Result<Vec<String>> {
    null_separated(raw)
        .map(|s| Ok(String::from_utf8(s.to_vec())?))
        .collect()
}

/// Split the raw bytes of an ICCCM STRING property (ISO Latin-1) into its null separated
/// components. Every byte maps directly onto the unicode code point of the same value so
/// this can not fail.
pub(crate) fn split_latin1(raw: &[u8]) -> Vec<String> {
    null_separated(raw)
        .map(|s| s.iter().map(|&b| b as char).collect())
        .collect()
}
