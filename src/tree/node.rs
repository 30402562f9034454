use std::rc::Rc;

use derive_more::IsVariant;
use hashlink::LinkedHashMap;

/// Ordered children of a directory, keyed by name.
///
/// The map key is the child's only name, which makes sibling-name uniqueness
/// structural, and `LinkedHashMap` preserves insertion order, which is
/// observable through listing order.
pub type Children = LinkedHashMap<String, Rc<Node>>;

/// A file or directory entry in the tree.
///
/// Nodes are never mutated after construction; every tree change builds new
/// nodes for the affected spine and shares the rest via `Rc`. That makes any
/// `Rc<Node>` handed out earlier a stable snapshot.
#[derive(Debug, Clone, IsVariant)]
pub enum Node {
    File { contents: String },
    Directory { children: Children },
}

impl Node {
    pub fn file(contents: impl Into<String>) -> Rc<Node> {
        Rc::new(Node::File {
            contents: contents.into(),
        })
    }

    pub fn dir(children: Children) -> Rc<Node> {
        Rc::new(Node::Directory { children })
    }

    pub fn empty_dir() -> Rc<Node> {
        Self::dir(Children::new())
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::Directory { children } => Some(children),
            Node::File { .. } => None,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        match self {
            Node::File { contents } => Some(contents),
            Node::Directory { .. } => None,
        }
    }
}

// Structural equality, sensitive to child order.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::File { contents: a }, Node::File { contents: b }) => a == b,
            (Node::Directory { children: a }, Node::Directory { children: b }) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((a_name, a_node), (b_name, b_node))| {
                            a_name == b_name && a_node == b_node
                        })
            }
            _ => false,
        }
    }
}

impl Eq for Node {}
