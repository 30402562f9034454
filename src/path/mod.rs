//! Absolute path parsing and normalization.
//!
//! Paths are always interpreted from the tree root; the engine performs no
//! relative or CWD resolution (that responsibility, if needed, belongs to a
//! caller-side helper).

mod vpath;

pub use vpath::{PathError, VPath};
