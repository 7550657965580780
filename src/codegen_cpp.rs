//! C++ header backend.
//!
//! Declarations become `struct`s, `enum class`es, and `using` aliases;
//! type expressions map onto the standard library (`std::vector`,
//! `std::variant`, `std::tuple`, `std::map`, `std::optional`, `std::any`).
//! Types with no faithful mapping degrade to a tagged `std::any /* ... */`
//! placeholder; record members and aliases whose type degraded that way are
//! omitted rather than emitted wrong.

use crate::ast::{Fundamental, LiteralKind, Member, Node, NodeId, ParsedFile};
use crate::config::{Config, EnumMode};
use crate::format::Emission;
use crate::resolve::Resolver;
use crate::symbols::SymbolTable;

/// Emit the whole file as a C++ header body plus its include set.
pub fn generate(file: &ParsedFile, symbols: &SymbolTable, config: &Config) -> Emission {
    let mut generator = CppGenerator::new(Resolver::new(&file.arena, symbols), config);
    for &child in file.children() {
        generator.emit_decl(child);
    }
    generator.emission
}

struct CppGenerator<'a> {
    resolver: Resolver<'a>,
    config: &'a Config,
    emission: Emission,
}

/// The member-drop rule: a type that rendered to an opaque placeholder has
/// no C++ representation, except for the `unknown`/`never` spellings which
/// are deliberate `std::any` mappings.
fn is_opaque_placeholder(text: &str) -> bool {
    text.contains("std::any /*")
        && text != "std::any /* unknown */"
        && text != "std::any /* never */"
}

/// Turn an arbitrary literal value into a valid identifier.
pub(crate) fn make_identifier(value: &str) -> String {
    if value.is_empty() {
        return "_".to_string();
    }
    let mut out: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

impl<'a> CppGenerator<'a> {
    fn new(resolver: Resolver<'a>, config: &'a Config) -> Self {
        Self {
            resolver,
            config,
            emission: Emission::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.emission.body.push_str(text);
    }

    /// Render a type expression in isolation, so a degraded rendering can be
    /// discarded without leaving partial text or includes behind.
    fn type_text(&self, id: NodeId) -> Emission {
        let mut sub = CppGenerator::new(
            Resolver::new(self.resolver.arena, self.resolver.symbols),
            self.config,
        );
        sub.emit_type(id);
        sub.emission
    }

    /// Write the mapping for `name`, honoring a `[datatype.<name>]` override.
    fn check_config(&mut self, name: &str, fallback: &str, fallback_header: &str) {
        if let Some(dt) = self.config.datatypes.get(name) {
            let out = dt.out.clone();
            let header = dt.header.clone();
            self.push(&out);
            self.emission.add_dep(&header);
        } else {
            self.push(fallback);
            self.emission.add_dep(fallback_header);
        }
    }

    fn emit_decl(&mut self, id: NodeId) {
        match self.resolver.arena.get(id).clone() {
            Node::Namespace { name, children, .. } => {
                self.push(&format!("namespace {} {{\n", name));
                for child in children {
                    self.emit_decl(child);
                }
                self.push(&format!("}} // namespace {}\n\n", name));
            }
            Node::Import { module_name } => {
                self.emission
                    .add_dep(&format!("#include \"{}.h\"", module_name));
            }
            Node::Interface {
                name, base, body, ..
            } => self.emit_interface(&name, base.as_deref(), body),
            Node::TypeAlias { name, target, .. } => self.emit_type_alias(&name, target),
            Node::Enumeration { name, members, .. } => {
                self.push(&format!("enum class {} {{\n", name));
                for member in &members {
                    self.push(&format!("    {},\n", make_identifier(&member.name)));
                }
                self.push("};\n\n");

                if self.config.enum_mode == EnumMode::WithArray {
                    self.push(&format!("constexpr const char* {}Strings[] = {{\n", name));
                    for member in &members {
                        let display = member.value.as_deref().unwrap_or(&member.name);
                        self.push(&format!("    \"{}\",\n", display));
                    }
                    self.push("};\n\n");
                }
            }
            _ => {}
        }
    }

    fn emit_interface(&mut self, name: &str, base: Option<&str>, body: NodeId) {
        self.push(&format!("struct {}", name));
        if let Some(base) = base {
            self.push(" : public ");
            self.check_config(base, base, "");
        }
        self.push("\n");

        let members = match self.resolver.arena.get(body) {
            Node::Object { members } => members.clone(),
            // A fully mapped-type body has no representable members.
            _ => Vec::new(),
        };
        self.emit_record(&members, false, false);
        self.push(";\n\n");
    }

    /// Emit `{ ... }` for a flat member list, applying the drop rule to each
    /// member and merging includes only for members that survive.
    fn emit_record(&mut self, members: &[Member], force_optional: bool, const_members: bool) {
        self.push("{\n");
        for member in members {
            let rendered = self.type_text(member.ty);
            if is_opaque_placeholder(&rendered.body) {
                continue;
            }

            self.push("    ");
            if const_members {
                self.push("const ");
            }
            if member.optional || force_optional {
                self.emission.add_dep("#include <optional>");
                self.push(&format!("std::optional<{}>", rendered.body));
            } else {
                self.push(&rendered.body);
            }
            for dep in &rendered.deps {
                self.emission.add_dep(dep);
            }
            self.push(&format!(" {};\n", member.name));
        }
        self.push("}");
    }

    fn emit_type_alias(&mut self, name: &str, target: NodeId) {
        // Intersections flatten into a struct when every operand is
        // record-like; otherwise the alias is omitted entirely.
        if let Node::Intersection { .. } = self.resolver.arena.get(target) {
            if let Some(members) = self.resolver.collect_members(target) {
                self.push(&format!("struct {}\n", name));
                self.emit_record(&members, false, false);
                self.push(";\n\n");
            }
            return;
        }

        // Utility operators over a collectable record produce a transformed
        // struct. When the operand does not collect, fall through so the
        // reference degrades like any other unresolved utility use.
        if let Node::GenericRef {
            name: ref_name,
            args,
        } = self.resolver.arena.get(target).clone()
        {
            if matches!(
                ref_name.as_str(),
                "Partial" | "Readonly" | "Omit" | "Pick" | "NonNullable"
            ) {
                if let Some(arg) = args.first() {
                    if let Some(members) = self.resolver.collect_members(*arg) {
                        let keys: Vec<String> = args
                            .get(1)
                            .and_then(|&k| self.resolver.literal_set(k))
                            .unwrap_or_default();
                        let selected: Vec<Member> = members
                            .into_iter()
                            .filter(|m| match ref_name.as_str() {
                                "Omit" => !keys.contains(&m.name),
                                "Pick" => keys.contains(&m.name),
                                _ => true,
                            })
                            .collect();

                        self.push(&format!("struct {}\n", name));
                        self.emit_record(
                            &selected,
                            ref_name == "Partial",
                            ref_name == "Readonly",
                        );
                        self.push(";\n\n");
                        return;
                    }
                }
            }
        }

        // A literal set becomes an enum class, optionally with a companion
        // display-string table.
        if let Some(values) = self.resolver.literal_set(target) {
            self.push(&format!("enum class {} {{\n", name));
            for value in &values {
                self.push(&format!("    {},\n", make_identifier(value)));
            }
            self.push("};\n\n");

            if self.config.enum_mode == EnumMode::WithArray {
                self.push(&format!("constexpr const char* {}Strings[] = {{\n", name));
                for value in &values {
                    self.push(&format!("    \"{}\",\n", value));
                }
                self.push("};\n\n");
            }
            return;
        }

        if let Node::Object { members } = self.resolver.arena.get(target) {
            let members = members.clone();
            self.push(&format!("struct {}\n", name));
            self.emit_record(&members, false, false);
            self.push(";\n\n");
            return;
        }

        // Anything else becomes a `using` alias, unless the target degraded
        // to a placeholder, in which case the alias is omitted.
        let rendered = self.type_text(target);
        if is_opaque_placeholder(&rendered.body) {
            return;
        }
        for dep in &rendered.deps {
            self.emission.add_dep(dep);
        }
        self.push(&format!("using {} = {};\n\n", name, rendered.body));
    }

    fn emit_type(&mut self, id: NodeId) {
        match self.resolver.arena.get(id).clone() {
            Node::FundamentalRef(kind) => match kind {
                Fundamental::Any => self.check_config("any", "std::any", "#include <any>"),
                Fundamental::Boolean => self.check_config("boolean", "bool", ""),
                Fundamental::Number => self.check_config("number", "double", ""),
                Fundamental::String => {
                    self.check_config("string", "std::string", "#include <string>")
                }
                Fundamental::Unknown => {
                    self.check_config("unknown", "std::any /* unknown */", "#include <any>")
                }
                Fundamental::Never => {
                    self.check_config("never", "std::any /* never */", "#include <any>")
                }
            },
            Node::GenericRef { name, args } => self.emit_generic_ref(&name, &args),
            Node::Array { elem } => {
                self.emission.add_dep("#include <vector>");
                self.push("std::vector<");
                self.emit_type(elem);
                self.push(">");
            }
            Node::Union { types } => {
                self.emission.add_dep("#include <variant>");
                self.push("std::variant<");
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.emit_type(*ty);
                }
                self.push(">");
            }
            Node::Intersection { .. } => {
                // Only named intersections flatten; inline ones degrade.
                self.emission.add_dep("#include <any>");
                self.push("std::any /* inline intersection */");
            }
            Node::Tuple { elements } => {
                self.emission.add_dep("#include <tuple>");
                self.push("std::tuple<");
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.emit_type(*elem);
                }
                self.push(">");
            }
            Node::Literal { value, kind } => {
                match kind {
                    LiteralKind::Str => {
                        self.check_config("string", "std::string", "#include <string>")
                    }
                    LiteralKind::Num => self.check_config("number", "double", ""),
                }
                self.push(&format!(" /* {} */", value));
            }
            Node::Object { .. } => {
                self.emission.add_dep("#include <map>");
                self.emission.add_dep("#include <string>");
                self.emission.add_dep("#include <any>");
                self.push("std::map<std::string, std::any> /* object */");
            }
            Node::Mapped => {
                self.emission.add_dep("#include <any>");
                self.push("std::any /* mapped */");
            }
            Node::Conditional { .. } => {
                self.emission.add_dep("#include <any>");
                self.push("std::any /* conditional */");
            }
            _ => {
                self.emission.add_dep("#include <any>");
                self.push("std::any /* unmapped type */");
            }
        }
    }

    fn emit_generic_ref(&mut self, name: &str, args: &[NodeId]) {
        match name {
            "undefined" => {
                self.emission.add_dep("#include <variant>");
                self.push("std::monostate");
            }
            "Array" | "ReadonlyArray" => {
                self.emission.add_dep("#include <vector>");
                self.push("std::vector<");
                match args.first() {
                    Some(&elem) => self.emit_type(elem),
                    None => self.push("std::any"),
                }
                self.push(">");
            }
            "Record" => {
                self.emission.add_dep("#include <map>");
                self.push("std::map<");
                match args.first() {
                    Some(&key) => self.emit_type(key),
                    None => self.push("std::string"),
                }
                self.push(", ");
                match args.get(1) {
                    Some(&value) => self.emit_type(value),
                    None => self.push("std::any"),
                }
                self.push(">");
            }
            "NonNullable" => match args.first() {
                Some(&inner) => self.emit_type(inner),
                None => {
                    self.emission.add_dep("#include <any>");
                    self.push("std::any /* NonNullable */");
                }
            },
            "Partial" | "Readonly" | "Omit" | "Pick" | "Capitalize" | "Uncapitalize"
            | "Uppercase" | "Lowercase" | "Exclude" | "Extract" => {
                // Utility uses outside alias position have no mapping.
                self.emission.add_dep("#include <any>");
                self.push(&format!("std::any /* {} */", name));
            }
            _ => {
                self.check_config(name, name, "");
                if !args.is_empty() {
                    self.push("<");
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.push(", ");
                        }
                        self.emit_type(*arg);
                    }
                    self.push(">");
                }
            }
        }
    }
}
