use snafu::Snafu;

use crate::tree::{Children, Node};

/// One entry of a nested disk description: a named file with string contents
/// or a named directory of further entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File { name: String, contents: String },
    Dir { name: String, entries: Vec<Entry> },
}

impl Entry {
    pub fn file(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Entry::File {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn dir(name: impl Into<String>, entries: impl IntoIterator<Item = Entry>) -> Self {
        Entry::Dir {
            name: name.into(),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Dir { name, .. } => name,
        }
    }
}

/// Builds an ordered children map from a description, validating the node
/// name invariants along the way.
pub fn build_children(entries: impl IntoIterator<Item = Entry>) -> Result<Children, FixtureError> {
    let mut children = Children::new();
    for entry in entries {
        let name = entry.name().to_string();
        if name.is_empty() || name.contains('/') || name == "." || name == ".." {
            return InvalidNameSnafu { name }.fail();
        }
        if children.contains_key(&name) {
            return DuplicateNameSnafu { name }.fail();
        }
        let node = match entry {
            Entry::File { contents, .. } => Node::file(contents),
            Entry::Dir { entries, .. } => Node::dir(build_children(entries)?),
        };
        children.insert(name, node);
    }
    Ok(children)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FixtureError {
    #[snafu(display("'{}' is not a valid node name", name))]
    InvalidName { name: String },
    #[snafu(display("The name '{}' appears twice in one directory", name))]
    DuplicateName { name: String },
}
