//! An in-memory hierarchical file system with path-addressed operations.
//!
//! A [`disk::Disk`] owns a single tree of named nodes and exposes
//! create/read/remove/move/copy operations addressed by absolute paths.
//! Mutation is copy-on-write: every operation rebuilds only the directory
//! spine above the changed node and swaps the held root reference once, so a
//! failing operation never leaves a partially mutated tree behind and
//! previously returned subtrees stay valid as snapshots.
//!
//! Nothing here touches a real file system; the crate targets sandboxed
//! runtimes and test fixtures that need a disposable, deterministic disk.

pub mod disk;
pub mod error;
pub mod fixture;
pub mod path;
pub mod tree;
