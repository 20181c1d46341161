//! **gridpath-core**: geometry types shared by the *gridpath* crates.
//!
//! A [`Point`] identifies one grid cell as `(column, row)`; a [`Range`] is
//! the rectangle of cells a grid covers.

pub mod geom;

pub use geom::{CARDINALS, Point, Range, RangeIter};
