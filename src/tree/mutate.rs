use std::rc::Rc;

use crate::error::{FsError, NotADirectorySnafu, PathNotFoundSnafu};
use crate::path::VPath;
use crate::tree::{Children, Node};

/// Produces a new tree in which the children of the directory at `dir_path`
/// have been replaced by the result of `transform`.
///
/// Only the directory spine from the root down to `dir_path` is rebuilt;
/// every subtree off the spine is shared with the input tree by reference,
/// bounding the cost to O(depth). This single substitution point implements
/// add-child, replace-child and remove-child for every mutating operation.
///
/// Fails with [`FsError::PathNotFound`] when an intermediate segment does not
/// exist and [`FsError::NotADirectory`] when one is a file; the input tree is
/// left untouched on any failure.
pub fn with_replaced_children<F>(
    root: &Rc<Node>,
    dir_path: &VPath,
    transform: F,
) -> Result<Rc<Node>, FsError>
where
    F: FnOnce(&Children) -> Result<Children, FsError>,
{
    rebuild_spine(root, dir_path, 0, transform)
}

fn rebuild_spine<F>(
    node: &Rc<Node>,
    dir_path: &VPath,
    depth: usize,
    transform: F,
) -> Result<Rc<Node>, FsError>
where
    F: FnOnce(&Children) -> Result<Children, FsError>,
{
    let children = match node.children() {
        Some(children) => children,
        None => {
            return NotADirectorySnafu {
                path: dir_path.prefix(depth).to_string(),
            }
            .fail();
        }
    };

    if depth == dir_path.segments().len() {
        return Ok(Node::dir(transform(children)?));
    }

    let segment = &dir_path.segments()[depth];
    let child = match children.get(segment) {
        Some(child) => child,
        None => {
            return PathNotFoundSnafu {
                path: dir_path.prefix(depth + 1).to_string(),
            }
            .fail();
        }
    };

    let rebuilt = rebuild_spine(child, dir_path, depth + 1, transform)?;
    Ok(Node::dir(children_with(children, segment, rebuilt)))
}

/// A copy of `children` with `node` present under `name`: an existing entry
/// keeps its position, a new one is appended at the back.
pub fn children_with(children: &Children, name: &str, node: Rc<Node>) -> Children {
    let mut next = Children::with_capacity(children.len() + 1);
    let mut replaced = false;
    for (existing_name, existing) in children {
        if existing_name == name {
            next.insert(existing_name.clone(), Rc::clone(&node));
            replaced = true;
        } else {
            next.insert(existing_name.clone(), Rc::clone(existing));
        }
    }
    if !replaced {
        next.insert(name.to_string(), node);
    }
    next
}

/// A copy of `children` without the entry named `name`.
pub fn children_without(children: &Children, name: &str) -> Children {
    let mut next = Children::with_capacity(children.len());
    for (existing_name, existing) in children {
        if existing_name != name {
            next.insert(existing_name.clone(), Rc::clone(existing));
        }
    }
    next
}
