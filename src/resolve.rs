//! Name resolution helpers used at emission time.
//!
//! Two questions get answered here: "what named members does this type
//! flatten to" and "what set of literal values does this type denote".
//! Both walk through aliases and references via the symbol table and carry
//! a depth counter so reference cycles degrade instead of looping.

use std::collections::HashSet;

use crate::ast::{Arena, Member, Node, NodeId};
use crate::symbols::SymbolTable;

/// Hard bound on reference-chasing depth. Exceeding it makes the resolution
/// fail, which callers treat the same as an unresolvable type.
pub const MAX_RESOLVE_DEPTH: usize = 64;

/// Read-only view over one compilation's arena and symbol table.
pub struct Resolver<'a> {
    pub arena: &'a Arena,
    pub symbols: &'a SymbolTable,
}

impl<'a> Resolver<'a> {
    pub fn new(arena: &'a Arena, symbols: &'a SymbolTable) -> Self {
        Self { arena, symbols }
    }

    /// Flatten a type into its named members: interfaces contribute their
    /// base's members (recursively) then their own, aliases and references
    /// are chased, intersections concatenate. Returns `None` when any part
    /// is not a record-like type or a name fails to resolve.
    pub fn collect_members(&self, id: NodeId) -> Option<Vec<Member>> {
        let mut members = Vec::new();
        self.collect_members_into(id, &mut members, 0)?;
        Some(members)
    }

    fn collect_members_into(
        &self,
        id: NodeId,
        members: &mut Vec<Member>,
        depth: usize,
    ) -> Option<()> {
        if depth > MAX_RESOLVE_DEPTH {
            return None;
        }
        match self.arena.get(id) {
            Node::GenericRef { name, .. } => {
                let target = self.symbols.lookup(name)?;
                self.collect_members_into(target, members, depth + 1)
            }
            Node::Interface { base, body, .. } => {
                if let Some(base_name) = base {
                    let base_id = self.symbols.lookup(base_name)?;
                    self.collect_members_into(base_id, members, depth + 1)?;
                }
                if let Node::Object { members: own } = self.arena.get(*body) {
                    members.extend(own.iter().cloned());
                }
                Some(())
            }
            Node::TypeAlias { target, .. } => {
                self.collect_members_into(*target, members, depth + 1)
            }
            Node::Object { members: own } => {
                members.extend(own.iter().cloned());
                Some(())
            }
            Node::Intersection { types } => {
                for &ty in types {
                    self.collect_members_into(ty, members, depth + 1)?;
                }
                Some(())
            }
            _ => None,
        }
    }

    /// Evaluate a type to the set of literal values it denotes, or `None`
    /// when it contains anything that is not a literal construct. Handles
    /// single literals, unions of literal sets, the case-transforming
    /// operators, `Exclude`/`Extract` set algebra, alias chasing, and
    /// declared enumerations (value, falling back to the member name).
    pub fn literal_set(&self, id: NodeId) -> Option<Vec<String>> {
        let mut values = Vec::new();
        self.literal_set_into(id, &mut values, 0)?;
        Some(values)
    }

    fn literal_set_into(
        &self,
        id: NodeId,
        values: &mut Vec<String>,
        depth: usize,
    ) -> Option<()> {
        if depth > MAX_RESOLVE_DEPTH {
            return None;
        }
        match self.arena.get(id) {
            Node::Literal { value, .. } => {
                values.push(value.clone());
                Some(())
            }
            Node::Union { types } => {
                for &ty in types {
                    self.literal_set_into(ty, values, depth + 1)?;
                }
                Some(())
            }
            Node::GenericRef { name, args } => match name.as_str() {
                "Capitalize" | "Uncapitalize" | "Uppercase" | "Lowercase" => {
                    let arg = *args.first()?;
                    let mut base = Vec::new();
                    self.literal_set_into(arg, &mut base, depth + 1)?;
                    for v in base {
                        // Empty strings stay out of the transformed set.
                        if v.is_empty() {
                            continue;
                        }
                        values.push(apply_case(name, v));
                    }
                    Some(())
                }
                "Exclude" | "Extract" => {
                    if args.len() < 2 {
                        return None;
                    }
                    let mut base = Vec::new();
                    let mut filter = Vec::new();
                    self.literal_set_into(args[0], &mut base, depth + 1)?;
                    self.literal_set_into(args[1], &mut filter, depth + 1)?;
                    let filter: HashSet<&str> = filter.iter().map(String::as_str).collect();
                    for v in base {
                        let present = filter.contains(v.as_str());
                        if present == (name == "Extract") {
                            values.push(v);
                        }
                    }
                    Some(())
                }
                _ => {
                    let target = self.symbols.lookup(name)?;
                    match self.arena.get(target) {
                        Node::TypeAlias { target, .. } => {
                            self.literal_set_into(*target, values, depth + 1)
                        }
                        Node::Enumeration { members, .. } => {
                            for m in members {
                                let value = m.value.clone().unwrap_or_else(|| m.name.clone());
                                values.push(value);
                            }
                            Some(())
                        }
                        _ => None,
                    }
                }
            },
            _ => None,
        }
    }
}

fn apply_case(op: &str, mut v: String) -> String {
    match op {
        "Capitalize" | "Uncapitalize" => {
            let first = v.remove(0);
            let first = if op == "Capitalize" {
                first.to_ascii_uppercase()
            } else {
                first.to_ascii_lowercase()
            };
            let mut out = String::with_capacity(v.len() + 1);
            out.push(first);
            out.push_str(&v);
            out
        }
        "Uppercase" => v.to_ascii_uppercase(),
        "Lowercase" => v.to_ascii_lowercase(),
        _ => v,
    }
}
