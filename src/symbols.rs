//! Flat symbol table over a file's top-level named declarations.

use indexmap::IndexMap;

use crate::ast::{Node, NodeId, ParsedFile};

/// Maps top-level declaration names to their nodes, in declaration order.
/// A later declaration with the same name replaces the earlier one, so
/// references always see the last definition.
///
/// Namespace members are deliberately not registered; names inside a
/// namespace are not referencable from type expressions.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: IndexMap<String, NodeId>,
}

impl SymbolTable {
    /// Walk the file's top-level declarations and index every named one.
    pub fn build(file: &ParsedFile) -> Self {
        let mut entries = IndexMap::new();
        for &child in file.children() {
            match file.arena.get(child) {
                Node::Interface { name, .. }
                | Node::TypeAlias { name, .. }
                | Node::Enumeration { name, .. } => {
                    entries.insert(name.clone(), child);
                }
                _ => {}
            }
        }
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_indexes_named_declarations() {
        let file = parse(
            "interface A { x: number; }\n\
             type B = string;\n\
             enum C { One }\n\
             import { D } from 'dep';",
        )
        .unwrap();
        let table = SymbolTable::build(&file);

        assert_eq!(table.len(), 3);
        assert!(table.lookup("A").is_some());
        assert!(table.lookup("B").is_some());
        assert!(table.lookup("C").is_some());
        assert!(table.lookup("D").is_none());
    }

    #[test]
    fn test_later_declaration_shadows_earlier() {
        let file = parse("type T = string;\ntype T = number;").unwrap();
        let table = SymbolTable::build(&file);

        assert_eq!(table.len(), 1);
        let id = table.lookup("T").unwrap();
        assert_eq!(id, file.children()[1]);
    }

    #[test]
    fn test_namespace_members_not_registered() {
        let file = parse("export namespace NS { export type Inner = string; }").unwrap();
        let table = SymbolTable::build(&file);
        assert!(table.lookup("Inner").is_none());
        assert!(table.lookup("NS").is_none());
    }
}
