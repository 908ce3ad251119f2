//! Side effect free logic that does not require a connection to the X server
pub mod geometry;

#[doc(inline)]
pub use geometry::{Point, Rect};
