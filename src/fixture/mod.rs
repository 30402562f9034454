//! Nested disk descriptions and the YAML fixture loader.
//!
//! A disk's initial layout is a sequence of [`Entry`] values, either built in
//! code or parsed from a YAML document in which a mapping is a directory and
//! a string scalar is a file's contents.

mod entry;
mod yaml;

pub use entry::{Entry, FixtureError, build_children};
pub use yaml::{FixtureLoadError, from_path, parse_str};
