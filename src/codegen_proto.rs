//! proto3 schema backend.
//!
//! Interfaces and record-like aliases become `message` blocks with
//! sequentially numbered fields; literal-set aliases and declared
//! enumerations become `enum` blocks; namespaces nest as wrapper messages.
//! Types with no proto mapping degrade to `google.protobuf.Any`, and
//! declarations that resolve to nothing are skipped.

use crate::ast::{Fundamental, Member, Node, NodeId, ParsedFile};
use crate::codegen_cpp::make_identifier;
use crate::config::Config;
use crate::format::Emission;
use crate::resolve::Resolver;
use crate::symbols::SymbolTable;

const ANY_TYPE: &str = "google.protobuf.Any";
const ANY_IMPORT: &str = "google/protobuf/any.proto";

/// Emit the whole file as a proto3 schema body plus its import set.
pub fn generate(file: &ParsedFile, symbols: &SymbolTable, _config: &Config) -> Emission {
    let mut generator = ProtoGenerator {
        resolver: Resolver::new(&file.arena, symbols),
        emission: Emission::new(),
    };
    for &child in file.children() {
        generator.emit_decl(child, 0);
    }
    generator.emission
}

struct ProtoGenerator<'a> {
    resolver: Resolver<'a>,
    emission: Emission,
}

fn enum_member_name(value: &str) -> String {
    make_identifier(value).to_ascii_uppercase()
}

impl ProtoGenerator<'_> {
    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.emission.body.push_str("    ");
        }
        self.emission.body.push_str(text);
        self.emission.body.push('\n');
    }

    fn emit_decl(&mut self, id: NodeId, indent: usize) {
        match self.resolver.arena.get(id).clone() {
            Node::Namespace { name, children, .. } => {
                self.line(indent, &format!("message {} {{", name));
                for child in children {
                    self.emit_decl(child, indent + 1);
                }
                self.line(indent, "}");
                if indent == 0 {
                    self.emission.body.push('\n');
                }
            }
            Node::Interface { name, .. } => {
                if let Some(members) = self.resolver.collect_members(id) {
                    self.emit_message(&name, &members, indent);
                }
            }
            Node::TypeAlias { name, target, .. } => {
                if let Some(values) = self.resolver.literal_set(target) {
                    self.emit_enum_block(&name, &values, indent);
                } else if let Some(members) = self.resolver.collect_members(target) {
                    self.emit_message(&name, &members, indent);
                }
                // Aliases that resolve to neither are skipped.
            }
            Node::Enumeration { name, members, .. } => {
                let values: Vec<String> = members.iter().map(|m| m.name.clone()).collect();
                self.emit_enum_block(&name, &values, indent);
            }
            _ => {}
        }
    }

    fn emit_message(&mut self, name: &str, members: &[Member], indent: usize) {
        self.line(indent, &format!("message {} {{", name));
        for (number, member) in members.iter().enumerate() {
            let field = self.field_type(member);
            self.line(
                indent + 1,
                &format!("{} {} = {};", field, member.name, number + 1),
            );
        }
        self.line(indent, "}");
        if indent == 0 {
            self.emission.body.push('\n');
        }
    }

    fn emit_enum_block(&mut self, name: &str, values: &[String], indent: usize) {
        self.line(indent, &format!("enum {} {{", name));
        for (number, value) in values.iter().enumerate() {
            self.line(
                indent + 1,
                &format!("{} = {};", enum_member_name(value), number),
            );
        }
        self.line(indent, "}");
        if indent == 0 {
            self.emission.body.push('\n');
        }
    }

    /// Render one field's label and type. `repeated` subsumes `optional`;
    /// everything unexpressible falls back to `google.protobuf.Any`.
    fn field_type(&mut self, member: &Member) -> String {
        let repeated_elem = match self.resolver.arena.get(member.ty) {
            Node::Array { elem } => Some(*elem),
            Node::GenericRef { name, args }
                if (name == "Array" || name == "ReadonlyArray") && !args.is_empty() =>
            {
                Some(args[0])
            }
            _ => None,
        };

        if let Some(elem) = repeated_elem {
            let scalar = self.scalar_type(elem);
            format!("repeated {}", scalar)
        } else {
            let scalar = self.scalar_type(member.ty);
            if member.optional {
                format!("optional {}", scalar)
            } else {
                scalar
            }
        }
    }

    fn scalar_type(&mut self, id: NodeId) -> String {
        match self.resolver.arena.get(id) {
            Node::FundamentalRef(Fundamental::String) => "string".to_string(),
            Node::FundamentalRef(Fundamental::Number) => "double".to_string(),
            Node::FundamentalRef(Fundamental::Boolean) => "bool".to_string(),
            Node::GenericRef { name, args } if name == "Record" => {
                let key = match args.first() {
                    Some(&k) => self.scalar_type(k),
                    None => "string".to_string(),
                };
                let value = match args.get(1) {
                    Some(&v) => self.scalar_type(v),
                    None => self.any_type(),
                };
                format!("map<{}, {}>", key, value)
            }
            Node::GenericRef { name, args }
                if args.is_empty() && self.resolver.symbols.lookup(name).is_some() =>
            {
                name.clone()
            }
            _ => self.any_type(),
        }
    }

    fn any_type(&mut self) -> String {
        self.emission.add_dep(ANY_IMPORT);
        ANY_TYPE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn gen(src: &str) -> Emission {
        let file = parse(src).unwrap();
        let symbols = SymbolTable::build(&file);
        generate(&file, &symbols, &Config::default())
    }

    #[test]
    fn test_interface_message_fields_numbered() {
        let out = gen("interface Point { x: number; y: number; label?: string; }");
        assert_eq!(
            out.body,
            "message Point {\n    double x = 1;\n    double y = 2;\n    optional string label = 3;\n}\n\n"
        );
        assert!(out.deps.is_empty());
    }

    #[test]
    fn test_base_members_flattened_into_message() {
        let out = gen("interface A { a: number; }\ninterface B extends A { b: string; }");
        assert!(out.body.contains("message B {\n    double a = 1;\n    string b = 2;\n}"));
    }

    #[test]
    fn test_arrays_are_repeated() {
        let out = gen("interface I { xs: number[]; ys: Array<string>; }");
        assert!(out.body.contains("repeated double xs = 1;"));
        assert!(out.body.contains("repeated string ys = 2;"));
    }

    #[test]
    fn test_literal_alias_and_enum_become_enums() {
        let out = gen("type Color = 'red' | 'light green';\nenum Status { Ok, Bad }");
        assert!(out.body.contains("enum Color {\n    RED = 0;\n    LIGHT_GREEN = 1;\n}"));
        assert!(out.body.contains("enum Status {\n    OK = 0;\n    BAD = 1;\n}"));
    }

    #[test]
    fn test_unmappable_member_degrades_to_any() {
        let out = gen("interface I { v: string | number; }");
        assert!(out.body.contains("google.protobuf.Any v = 1;"));
        assert!(out.deps.contains("google/protobuf/any.proto"));
    }

    #[test]
    fn test_record_becomes_map() {
        let out = gen("interface I { counts: Record<string, number>; }");
        assert!(out.body.contains("map<string, double> counts = 1;"));
    }

    #[test]
    fn test_named_reference_kept() {
        let out = gen("interface A { x: number; }\ninterface B { a: A; }");
        assert!(out.body.contains("A a = 1;"));
    }

    #[test]
    fn test_namespace_nests_messages() {
        let out = gen("export namespace NS { export interface A { x: number; } }");
        assert_eq!(
            out.body,
            "message NS {\n    message A {\n        double x = 1;\n    }\n}\n\n"
        );
    }

    #[test]
    fn test_unresolvable_declarations_skipped() {
        let out = gen("type N = string[];\ninterface B extends Missing { x: number; }");
        assert_eq!(out.body, "");
    }

    #[test]
    fn test_intersection_alias_message() {
        let out = gen("interface A { a: number; }\ntype C = A & { b: string };");
        assert!(out.body.contains("message C {\n    double a = 1;\n    string b = 2;\n}"));
    }
}
