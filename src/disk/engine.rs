use std::rc::Rc;

use snafu::ResultExt;
use tracing::debug;

use crate::disk::{CreateDirOptions, CreateFileOptions, RemoveOptions, TransferOptions};
use crate::error::{
    AlreadyExistsSnafu, FsError, InvalidPathSnafu, NotADirectorySnafu, NotAFileSnafu,
    PathNotFoundSnafu, SelfMoveSnafu,
};
use crate::fixture::{self, Entry, FixtureError};
use crate::path::{PathError, VPath};
use crate::tree::{self, Children, Node};

/// The owner of one in-memory tree and the operation set over it.
///
/// Every mutating operation computes the next tree through the copy-on-write
/// mutator and replaces the held root reference with a single assignment, so
/// a failing operation leaves the tree exactly as it was and no caller can
/// ever observe a partially mutated state. Returned listings, contents and
/// [`snapshot`](Disk::snapshot) results are snapshots, not live views.
#[derive(Debug, Clone)]
pub struct Disk {
    root: Rc<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Dir,
}

impl Disk {
    /// A disk holding only an empty root directory.
    pub fn empty() -> Self {
        Self {
            root: Node::empty_dir(),
        }
    }

    /// Builds a disk from a nested description of its initial layout.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self, FixtureError> {
        Ok(Self {
            root: Node::dir(fixture::build_children(entries)?),
        })
    }

    /// The current tree snapshot, for inspection and testing.
    ///
    /// The returned subtree never changes; later operations on the disk build
    /// fresh trees instead of mutating shared nodes.
    pub fn snapshot(&self) -> Rc<Node> {
        Rc::clone(&self.root)
    }

    /// Creates (or, with `overwrite`, replaces) a file under an existing
    /// parent directory.
    pub fn create_file(
        &mut self,
        path: &str,
        contents: impl Into<String>,
        options: CreateFileOptions,
    ) -> Result<(), FsError> {
        let target = parse_file_path(path)?;
        let (parent, leaf) = split_target(&target)?;

        let parent_node = match tree::resolve(&self.root, &parent)? {
            Some(node) => node,
            None => {
                return PathNotFoundSnafu {
                    path: parent.to_string(),
                }
                .fail();
            }
        };
        let siblings = match parent_node.children() {
            Some(children) => children,
            None => {
                return NotADirectorySnafu {
                    path: parent.to_string(),
                }
                .fail();
            }
        };
        match siblings.get(&leaf) {
            // an existing directory is never replaced by a file
            Some(existing) if existing.is_directory() => {
                return AlreadyExistsSnafu {
                    path: target.to_string(),
                }
                .fail();
            }
            Some(_) if !options.overwrite => {
                return AlreadyExistsSnafu {
                    path: target.to_string(),
                }
                .fail();
            }
            _ => {}
        }

        let next = tree::with_replaced_children(&self.root, &parent, |children| {
            Ok(tree::children_with(children, &leaf, Node::file(contents)))
        })?;
        self.root = next;
        debug!("Created file '{}'", target);
        Ok(())
    }

    /// Creates a directory, with `parents` creating missing ancestors as
    /// empty directories along the way.
    pub fn create_dir(&mut self, path: &str, options: CreateDirOptions) -> Result<(), FsError> {
        let target = parse_any(path)?;

        match tree::resolve(&self.root, &target.unmarked())? {
            Some(node) if node.is_directory() => {
                if options.ignore_if_exists {
                    return Ok(());
                }
                return AlreadyExistsSnafu {
                    path: target.to_string(),
                }
                .fail();
            }
            // a file at the target conflicts regardless of `ignore_if_exists`
            Some(_) => {
                return AlreadyExistsSnafu {
                    path: target.to_string(),
                }
                .fail();
            }
            None => {}
        }

        let next = if options.parents {
            // The shallowest missing prefix anchors a single insertion of the
            // whole missing chain, keeping the operation a one-swap mutation.
            let segments = target.segments();
            let mut first_missing = segments.len();
            for depth in 1..segments.len() {
                if tree::resolve(&self.root, &target.prefix(depth))?.is_none() {
                    first_missing = depth;
                    break;
                }
            }

            let mut subtree = Node::empty_dir();
            for name in segments[first_missing..].iter().rev() {
                let mut children = Children::new();
                children.insert(name.clone(), subtree);
                subtree = Node::dir(children);
            }
            let insert_name = segments[first_missing - 1].clone();
            let anchor = target.prefix(first_missing - 1);

            tree::with_replaced_children(&self.root, &anchor, |children| {
                Ok(tree::children_with(children, &insert_name, subtree))
            })?
        } else {
            let (parent, leaf) = split_target(&target)?;
            match tree::resolve(&self.root, &parent)? {
                None => {
                    return PathNotFoundSnafu {
                        path: parent.to_string(),
                    }
                    .fail();
                }
                Some(node) if node.is_file() => {
                    return NotADirectorySnafu {
                        path: parent.to_string(),
                    }
                    .fail();
                }
                Some(_) => {}
            }
            tree::with_replaced_children(&self.root, &parent, |children| {
                Ok(tree::children_with(children, &leaf, Node::empty_dir()))
            })?
        };
        self.root = next;
        debug!("Created directory '{}'", target);
        Ok(())
    }

    /// Returns the contents of the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<String, FsError> {
        let target = parse_file_path(path)?;
        match tree::resolve(&self.root, &target)? {
            None => PathNotFoundSnafu {
                path: target.to_string(),
            }
            .fail(),
            Some(node) => match node.contents() {
                Some(contents) => Ok(contents.to_string()),
                None => NotAFileSnafu {
                    path: target.to_string(),
                }
                .fail(),
            },
        }
    }

    /// Lists the absolute paths of the directory's immediate children, in
    /// insertion order.
    pub fn read_dir(&self, path: &str) -> Result<Vec<String>, FsError> {
        let target = parse_any(path)?;
        let dir = tree::resolve_dir(&self.root, &target)?;
        let children = match dir.children() {
            Some(children) => children,
            None => {
                return NotADirectorySnafu {
                    path: target.to_string(),
                }
                .fail();
            }
        };
        Ok(children
            .keys()
            .map(|name| target.join(name).to_string())
            .collect())
    }

    /// Lists the absolute paths of every descendant, pre-order: each
    /// directory appears immediately before its own children.
    pub fn read_dir_recursive(&self, path: &str) -> Result<Vec<String>, FsError> {
        let target = parse_any(path)?;
        let dir = tree::resolve_dir(&self.root, &target)?;
        let mut paths = Vec::new();
        collect_descendants(dir, &target, &mut paths);
        Ok(paths)
    }

    /// Detaches the file at `path`; with `force`, absence is a no-op.
    pub fn remove_file(&mut self, path: &str, options: RemoveOptions) -> Result<(), FsError> {
        self.detach(path, options, Some(Kind::File))
    }

    /// Detaches the directory at `path`, including its whole subtree.
    pub fn remove_dir(&mut self, path: &str, options: RemoveOptions) -> Result<(), FsError> {
        self.detach(path, options, Some(Kind::Dir))
    }

    /// Detaches the node at `path`, whatever its kind.
    pub fn remove(&mut self, path: &str, options: RemoveOptions) -> Result<(), FsError> {
        self.detach(path, options, None)
    }

    /// Relocates the file at `src` to `dest`.
    pub fn move_file(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
    ) -> Result<(), FsError> {
        self.transfer(src, dest, options, false, Some(Kind::File))
    }

    /// Relocates the directory at `src` (with its subtree) to `dest`.
    pub fn move_dir(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
    ) -> Result<(), FsError> {
        self.transfer(src, dest, options, false, Some(Kind::Dir))
    }

    /// Relocates the node at `src` to `dest`, whatever its kind.
    ///
    /// When `dest` resolves to an existing directory the source is inserted
    /// as a new child keeping its own leaf name; when `dest` does not exist
    /// the source is inserted under `dest`'s leaf name at `dest`'s parent.
    pub fn move_entry(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
    ) -> Result<(), FsError> {
        self.transfer(src, dest, options, false, None)
    }

    /// Duplicates the file at `src` to `dest`; the source is untouched.
    pub fn copy_file(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
    ) -> Result<(), FsError> {
        self.transfer(src, dest, options, true, Some(Kind::File))
    }

    /// Duplicates the directory at `src` to `dest`; the source is untouched.
    ///
    /// The duplicate shares the source's subtree structurally; copy-on-write
    /// mutation keeps the two independent from then on.
    pub fn copy_dir(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
    ) -> Result<(), FsError> {
        self.transfer(src, dest, options, true, Some(Kind::Dir))
    }

    fn detach(
        &mut self,
        path: &str,
        options: RemoveOptions,
        expected: Option<Kind>,
    ) -> Result<(), FsError> {
        let target = match expected {
            Some(Kind::File) => parse_file_path(path)?,
            _ => parse_any(path)?,
        };
        let (parent, leaf) = split_target(&target)?;

        match tree::resolve(&self.root, &target)? {
            Some(node) => check_kind(node, expected, &target)?,
            None => {
                if options.force {
                    debug!("Remove of absent '{}' ignored (force)", target);
                    return Ok(());
                }
                return PathNotFoundSnafu {
                    path: target.to_string(),
                }
                .fail();
            }
        }

        let next = tree::with_replaced_children(&self.root, &parent, |children| {
            Ok(tree::children_without(children, &leaf))
        })?;
        self.root = next;
        debug!("Removed '{}'", target);
        Ok(())
    }

    fn transfer(
        &mut self,
        src: &str,
        dest: &str,
        options: TransferOptions,
        keep_source: bool,
        expected: Option<Kind>,
    ) -> Result<(), FsError> {
        let src_path = parse_any(src)?;
        let dest_path = parse_any(dest)?;
        let (src_parent, src_leaf) = split_target(&src_path)?;

        let node = match tree::resolve(&self.root, &src_path)? {
            Some(node) => {
                check_kind(node, expected, &src_path)?;
                Rc::clone(node)
            }
            None => {
                return PathNotFoundSnafu {
                    path: src_path.to_string(),
                }
                .fail();
            }
        };

        if src_path.same_target(&dest_path) || src_path.is_ancestor_of(&dest_path) {
            return SelfMoveSnafu {
                src: src_path.to_string(),
                dest: dest_path.to_string(),
            }
            .fail();
        }

        let (dest_parent, dest_leaf) = match tree::resolve(&self.root, &dest_path)? {
            Some(existing) => match existing.children() {
                // an existing directory receives the source as a new child
                // named after the source's own leaf name
                Some(children) => {
                    let effective = dest_path.join(&src_leaf);
                    if effective.same_target(&src_path) {
                        return SelfMoveSnafu {
                            src: src_path.to_string(),
                            dest: effective.to_string(),
                        }
                        .fail();
                    }
                    match children.get(&src_leaf) {
                        // a same-named directory child is never replaced
                        Some(child) if child.is_directory() => {
                            return AlreadyExistsSnafu {
                                path: effective.to_string(),
                            }
                            .fail();
                        }
                        Some(_) if !options.overwrite => {
                            return AlreadyExistsSnafu {
                                path: effective.to_string(),
                            }
                            .fail();
                        }
                        _ => {}
                    }
                    (dest_path.unmarked(), src_leaf.clone())
                }
                None => {
                    if !options.overwrite {
                        return AlreadyExistsSnafu {
                            path: dest_path.to_string(),
                        }
                        .fail();
                    }
                    let (parent, leaf) = split_target(&dest_path)?;
                    (parent, leaf)
                }
            },
            None => {
                let (parent, leaf) = split_target(&dest_path)?;
                match tree::resolve(&self.root, &parent)? {
                    None => {
                        return PathNotFoundSnafu {
                            path: parent.to_string(),
                        }
                        .fail();
                    }
                    Some(parent_node) if parent_node.is_file() => {
                        return NotADirectorySnafu {
                            path: parent.to_string(),
                        }
                        .fail();
                    }
                    Some(_) => {}
                }
                (parent, leaf)
            }
        };

        let mut next = tree::with_replaced_children(&self.root, &dest_parent, |children| {
            Ok(tree::children_with(children, &dest_leaf, Rc::clone(&node)))
        })?;
        if !keep_source {
            next = tree::with_replaced_children(&next, &src_parent, |children| {
                Ok(tree::children_without(children, &src_leaf))
            })?;
        }
        self.root = next;
        debug!(
            "{} '{}' to '{}'",
            if keep_source { "Copied" } else { "Moved" },
            src_path,
            dest_parent.join(&dest_leaf)
        );
        Ok(())
    }
}

fn parse_any(path: &str) -> Result<VPath, FsError> {
    VPath::parse(path).context(InvalidPathSnafu {
        path: path.to_string(),
    })
}

// File-oriented operations reject the trailing-slash directory marker.
fn parse_file_path(path: &str) -> Result<VPath, FsError> {
    let parsed = parse_any(path)?;
    if parsed.requires_dir() {
        return Err(FsError::InvalidPath {
            path: path.to_string(),
            source: PathError::DirMarker {
                path: path.to_string(),
            },
        });
    }
    Ok(parsed)
}

fn split_target(path: &VPath) -> Result<(VPath, String), FsError> {
    let parent = path.parent().context(InvalidPathSnafu {
        path: path.to_string(),
    })?;
    let leaf = path
        .leaf()
        .context(InvalidPathSnafu {
            path: path.to_string(),
        })?
        .to_string();
    Ok((parent, leaf))
}

fn check_kind(node: &Node, expected: Option<Kind>, path: &VPath) -> Result<(), FsError> {
    match expected {
        Some(Kind::File) if !node.is_file() => NotAFileSnafu {
            path: path.to_string(),
        }
        .fail(),
        Some(Kind::Dir) if !node.is_directory() => NotADirectorySnafu {
            path: path.to_string(),
        }
        .fail(),
        _ => Ok(()),
    }
}

fn collect_descendants(node: &Node, path: &VPath, out: &mut Vec<String>) {
    if let Some(children) = node.children() {
        for (name, child) in children {
            let child_path = path.join(name);
            out.push(child_path.to_string());
            collect_descendants(child, &child_path, out);
        }
    }
}
