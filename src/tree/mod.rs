//! The tree of named nodes and the operations over its structure.
//!
//! Navigation and mutation are free functions taking the tree and path
//! explicitly, so they can be exercised in isolation from the disk engine.
//! Mutation is copy-on-write: only the directory spine above a changed node
//! is rebuilt, everything off the spine is shared by reference.

mod mutate;
mod navigate;
mod node;

pub use mutate::{children_with, children_without, with_replaced_children};
pub use navigate::{resolve, resolve_dir};
pub use node::{Children, Node};
