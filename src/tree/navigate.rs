use std::rc::Rc;

use crate::error::{FsError, NotADirectorySnafu, PathNotFoundSnafu};
use crate::path::VPath;
use crate::tree::Node;

use snafu::ensure;

/// Resolves a path to a node, or to `None` when some segment does not exist.
///
/// Absence is a valid result, distinct from a structural violation: walking
/// through a file fails with [`FsError::NotADirectory`] naming the offending
/// prefix, and so does a trailing-slash path that resolves to a file.
pub fn resolve<'a>(root: &'a Rc<Node>, path: &VPath) -> Result<Option<&'a Rc<Node>>, FsError> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        let children = match current.children() {
            Some(children) => children,
            None => {
                return NotADirectorySnafu {
                    path: path.prefix(depth).to_string(),
                }
                .fail();
            }
        };
        match children.get(segment) {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }

    ensure!(
        !path.requires_dir() || !current.is_file(),
        NotADirectorySnafu {
            path: path.to_string(),
        }
    );
    Ok(Some(current))
}

/// Resolves a path that must denote an existing directory.
pub fn resolve_dir<'a>(root: &'a Rc<Node>, path: &VPath) -> Result<&'a Rc<Node>, FsError> {
    match resolve(root, path)? {
        None => PathNotFoundSnafu {
            path: path.to_string(),
        }
        .fail(),
        Some(node) if node.is_file() => NotADirectorySnafu {
            path: path.to_string(),
        }
        .fail(),
        Some(node) => Ok(node),
    }
}
