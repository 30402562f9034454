use snafu::Snafu;

use crate::path::PathError;

/// The failure taxonomy of the disk engine.
///
/// Every failure carries the offending path, so callers can both match on the
/// kind and surface a usable message. The engine performs no local recovery;
/// the `force`/`ignore_if_exists`/`overwrite` options are the only mechanism
/// that turns a would-be failure into a no-op success.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FsError {
    #[snafu(display("Invalid path '{}'", path))]
    InvalidPath { path: String, source: PathError },
    #[snafu(display("Path '{}' does not exist", path))]
    PathNotFound { path: String },
    #[snafu(display("'{}' is not a directory", path))]
    NotADirectory { path: String },
    #[snafu(display("'{}' is not a file", path))]
    NotAFile { path: String },
    #[snafu(display("'{}' already exists", path))]
    AlreadyExists { path: String },
    #[snafu(display("Cannot move or copy '{}' into itself or its own subtree ('{}')", src, dest))]
    SelfMove { src: String, dest: String },
}
