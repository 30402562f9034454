//! The disk engine: the stateful owner of one tree reference and the
//! path-addressed operation set over it, plus the name-keyed registry of
//! disk instances.

mod engine;
mod options;
mod registry;

pub use engine::Disk;
pub use options::{CreateDirOptions, CreateFileOptions, RemoveOptions, TransferOptions};
pub use registry::{DiskRegistry, RegistryError};
