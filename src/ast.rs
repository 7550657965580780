//! Syntax tree for the declaration subset.
//!
//! All nodes live in a single [`Arena`] scoped to one compilation and are
//! addressed through [`NodeId`] handles. Parent links are kept in a side
//! table for diagnostic context only; they never own anything.

/// Handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The four fundamental type keywords plus the two opaque ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fundamental {
    Any,
    Boolean,
    Number,
    String,
    Unknown,
    Never,
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub optional: bool,
    pub ty: NodeId,
}

/// One `name` or `name = value` entry of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<String>,
}

/// Whether a literal type was written as a string or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Str,
    Num,
}

/// A syntax tree node. Structural types have no identity beyond their shape;
/// names in type position stay unresolved until emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File {
        strict: bool,
        children: Vec<NodeId>,
    },
    Import {
        module_name: String,
    },
    Namespace {
        name: String,
        is_export: bool,
        children: Vec<NodeId>,
    },
    Interface {
        name: String,
        is_export: bool,
        /// Single `extends` base, by name; resolved through the symbol table.
        base: Option<String>,
        /// The braced body; the grammar always requires one. A fully
        /// mapped-type body is a `Mapped` node instead of an `Object`.
        body: NodeId,
    },
    Object {
        members: Vec<Member>,
    },
    Array {
        elem: NodeId,
    },
    Tuple {
        elements: Vec<NodeId>,
    },
    Union {
        types: Vec<NodeId>,
    },
    Intersection {
        types: Vec<NodeId>,
    },
    Literal {
        value: String,
        kind: LiteralKind,
    },
    FundamentalRef(Fundamental),
    /// A name plus type arguments; also covers plain name references
    /// (empty argument list).
    GenericRef {
        name: String,
        args: Vec<NodeId>,
    },
    TypeAlias {
        name: String,
        is_export: bool,
        target: NodeId,
    },
    Enumeration {
        name: String,
        is_export: bool,
        members: Vec<EnumMember>,
    },
    /// Opaque marker for a mapped type; only its presence matters.
    Mapped,
    /// Opaque marker for a conditional type; only the condition is kept.
    Conditional {
        condition: NodeId,
    },
}

/// Owns every node of one compilation. Dropped as a unit when the
/// compilation ends.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.parents.push(None);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.parents[child.index()] = Some(parent);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A parsed compilation: the arena plus the handle of its `File` node.
#[derive(Debug)]
pub struct ParsedFile {
    pub arena: Arena,
    pub root: NodeId,
}

impl ParsedFile {
    /// Top-level declarations in source order.
    pub fn children(&self) -> &[NodeId] {
        match self.arena.get(self.root) {
            Node::File { children, .. } => children,
            _ => &[],
        }
    }

    pub fn strict(&self) -> bool {
        matches!(self.arena.get(self.root), Node::File { strict: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_handles_are_stable() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::FundamentalRef(Fundamental::String));
        let b = arena.alloc(Node::Array { elem: a });
        arena.set_parent(a, b);

        assert_eq!(arena.get(a), &Node::FundamentalRef(Fundamental::String));
        assert!(matches!(arena.get(b), Node::Array { elem } if *elem == a));
        assert_eq!(arena.parent(a), Some(b));
        assert_eq!(arena.parent(b), None);
        assert_eq!(arena.len(), 2);
    }
}
