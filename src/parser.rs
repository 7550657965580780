//! Recursive-descent parser for the declaration subset.
//!
//! Single-token lookahead, no backtracking, no error recovery: the first
//! malformed token aborts the whole parse. Enclosing constructs append
//! "while processing ..." notes to the diagnostic as it propagates.

use std::fmt;

use crate::ast::{
    Arena, EnumMember, Fundamental, LiteralKind, Member, Node, NodeId, ParsedFile,
};
use crate::lexer::{LexError, Lexer, Token, TokenKind};

/// A fatal parse (or lexical) error with accumulated context notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub notes: Vec<String>,
}

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            notes: Vec::new(),
        }
    }

    fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.to_string())
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse one source text into an arena-backed syntax tree.
pub fn parse(src: &str) -> ParseResult<ParsedFile> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        arena: Arena::new(),
    };
    parser.parse_file()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    arena: Arena,
}

impl Parser {
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message)
    }

    fn expect_ident(&mut self, what: &str) -> ParseResult<String> {
        match self.peek() {
            TokenKind::Ident(_) => Ok(self.advance().text),
            _ => Err(self.error(format!(
                "unexpected token '{}' {}; expected an identifier",
                self.current().text,
                what
            ))),
        }
    }

    /// Member names also admit the keywords that double as identifiers in
    /// member position.
    fn is_member_name(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Ident(_)
                | TokenKind::Module
                | TokenKind::Type
                | TokenKind::Keyof
                | TokenKind::In
                | TokenKind::Unknown
                | TokenKind::Never
        )
    }

    fn parse_file(mut self) -> ParseResult<ParsedFile> {
        let mut strict = false;
        let mut children = Vec::new();
        let mut first_token = true;

        while !self.check(&TokenKind::Eof) {
            match self.peek() {
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Str(_) => {
                    let pragma = self.advance().text;
                    if pragma != "use strict" {
                        return Err(
                            self.error(format!("string '{}' unexpected at file scope", pragma))
                        );
                    }
                    if !self.matches(&TokenKind::Semicolon) {
                        return Err(self.error("missing ';' after 'use strict'"));
                    }
                    if !first_token {
                        return Err(self.error("'use strict' must be the first statement"));
                    }
                    strict = true;
                }
                TokenKind::Export => children.push(self.parse_export()?),
                TokenKind::Type => children.push(self.parse_type_alias(false)?),
                TokenKind::Import => children.push(self.parse_import()?),
                TokenKind::Interface => children.push(self.parse_interface(false)?),
                TokenKind::Enum => children.push(self.parse_enum(false)?),
                _ => {
                    return Err(self.error(format!(
                        "token '{}' unexpected at file scope",
                        self.current().text
                    )))
                }
            }
            first_token = false;
        }

        let root = self.arena.alloc(Node::File {
            strict,
            children: children.clone(),
        });
        for child in children {
            self.arena.set_parent(child, root);
        }
        Ok(ParsedFile {
            arena: self.arena,
            root,
        })
    }

    fn parse_export(&mut self) -> ParseResult<NodeId> {
        self.advance(); // `export`
        match self.peek() {
            TokenKind::Module => self.parse_namespace(true),
            TokenKind::Interface => self.parse_interface(true),
            TokenKind::Type => self.parse_type_alias(true),
            TokenKind::Enum => self.parse_enum(true),
            _ => Err(self.error(format!(
                "unexpected token '{}' while parsing export",
                self.current().text
            ))),
        }
    }

    fn parse_namespace(&mut self, is_export: bool) -> ParseResult<NodeId> {
        self.advance(); // `module` / `namespace`
        let name = self.expect_ident("for name of namespace")?;

        if !self.matches(&TokenKind::LBrace) {
            return Err(self.error(format!(
                "unexpected token '{}' after declaration of namespace '{}'; expected '{{'",
                self.current().text,
                name
            )));
        }

        let mut children = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            match self.peek() {
                TokenKind::Export => {
                    let child = self
                        .parse_export()
                        .map_err(|e| e.note(format!("while processing namespace '{}'", name)))?;
                    children.push(child);
                }
                _ => {
                    return Err(self.error(format!(
                        "unexpected token '{}' while parsing namespace '{}' body",
                        self.current().text,
                        name
                    )))
                }
            }
        }
        self.advance(); // `}`

        let id = self.arena.alloc(Node::Namespace {
            name,
            is_export,
            children: children.clone(),
        });
        for child in children {
            self.arena.set_parent(child, id);
        }
        Ok(id)
    }

    fn parse_interface(&mut self, is_export: bool) -> ParseResult<NodeId> {
        self.advance(); // `interface`
        let name = self.expect_ident("for name of interface")?;

        let base = if self.matches(&TokenKind::Extends) {
            Some(
                self.expect_ident(&format!(
                    "while parsing 'extends' type for interface '{}'",
                    name
                ))?,
            )
        } else {
            None
        };

        if !self.check(&TokenKind::LBrace) {
            return Err(self.error(format!(
                "unexpected token '{}' after declaration of interface '{}'; expected '{{'",
                self.current().text,
                name
            )));
        }

        let body = self
            .parse_object()
            .map_err(|e| e.note(format!("while processing interface '{}'", name)))?;

        let id = self.arena.alloc(Node::Interface {
            name,
            is_export,
            base,
            body,
        });
        self.arena.set_parent(body, id);
        Ok(id)
    }

    /// Parse an object type body. Index-signature and mapped-type members are
    /// consumed but never stored; an object consisting solely of mapped-style
    /// members collapses to an opaque `Mapped` marker.
    fn parse_object(&mut self) -> ParseResult<NodeId> {
        self.advance(); // `{`

        let mut members: Vec<Member> = Vec::new();
        let mut saw_mapped = false;

        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::LBracket) {
                saw_mapped |= self.parse_bracketed_member()?;
            } else if self.is_member_name() {
                members.push(self.parse_named_member()?);
            } else {
                return Err(self.error(format!(
                    "unexpected token '{}' while parsing object body",
                    self.current().text
                )));
            }
        }
        self.advance(); // `}`

        let id = if members.is_empty() && saw_mapped {
            self.arena.alloc(Node::Mapped)
        } else {
            let id = self.arena.alloc(Node::Object {
                members: members.clone(),
            });
            for member in &members {
                self.arena.set_parent(member.ty, id);
            }
            id
        };
        Ok(id)
    }

    fn parse_named_member(&mut self) -> ParseResult<Member> {
        let name = self.advance().text;
        let optional = self.matches(&TokenKind::Question);

        if !self.matches(&TokenKind::Colon) {
            return Err(self.error(format!(
                "unexpected token '{}' while parsing object member '{}'; expected ':'",
                self.current().text,
                name
            )));
        }

        let ty = self
            .parse_type_reference()
            .map_err(|e| e.note(format!("while processing object member '{}'", name)))?;

        if self.check(&TokenKind::Semicolon) || self.check(&TokenKind::Comma) {
            self.advance();
        } else if !self.check(&TokenKind::RBrace) {
            return Err(self.error(format!(
                "unexpected token '{}' while parsing object member '{}'; expected ';', ',', or '}}'",
                self.current().text,
                name
            )));
        }

        Ok(Member { name, optional, ty })
    }

    /// Consume an index-signature (`[k: T]: V`) or mapped-type
    /// (`[K in C]?: V`) member. Returns true for the mapped form. Key and
    /// value types are parsed to keep token consumption correct, then
    /// discarded.
    fn parse_bracketed_member(&mut self) -> ParseResult<bool> {
        self.advance(); // `[`

        let key_name = match self.peek() {
            TokenKind::Ident(_) => self.advance().text,
            _ => String::new(),
        };

        let mapped = if self.matches(&TokenKind::In) {
            self.parse_single_type()?;
            // `keyof T` scans as a bare `keyof` reference followed by its
            // operand; consume the leftover operand token.
            if matches!(self.peek(), TokenKind::Ident(_) | TokenKind::Type) {
                self.advance();
            }
            true
        } else {
            if self.matches(&TokenKind::Colon) {
                self.parse_single_type()?;
            }
            false
        };

        self.matches(&TokenKind::RBracket);
        self.matches(&TokenKind::Question);

        if !self.matches(&TokenKind::Colon) {
            return Err(self.error(format!(
                "unexpected token '{}' while parsing object member '{}'; expected ':'",
                self.current().text,
                key_name
            )));
        }

        self.parse_type_reference()
            .map_err(|e| e.note(format!("while processing object member '{}'", key_name)))?;

        if self.check(&TokenKind::Semicolon) || self.check(&TokenKind::Comma) {
            self.advance();
        }
        Ok(mapped)
    }

    fn parse_type_alias(&mut self, is_export: bool) -> ParseResult<NodeId> {
        self.advance(); // `type`
        let name = self.expect_ident("for name of type alias")?;

        // Generic parameter lists are recognized and discarded.
        if self.check(&TokenKind::LAngle) {
            while !self.check(&TokenKind::RAngle) && !self.check(&TokenKind::Eof) {
                self.advance();
            }
            self.matches(&TokenKind::RAngle);
        }

        if !self.matches(&TokenKind::Eq) {
            return Err(self.error(format!(
                "unexpected token '{}' after declaration of type alias '{}'; expected '='",
                self.current().text,
                name
            )));
        }

        let target = self
            .parse_type_reference()
            .map_err(|e| e.note(format!("while processing type alias '{}'", name)))?;

        if !self.matches(&TokenKind::Semicolon) {
            return Err(self.error(format!(
                "unexpected token '{}' after type alias '{}'; expected ';'",
                self.current().text,
                name
            )));
        }

        let id = self.arena.alloc(Node::TypeAlias {
            name,
            is_export,
            target,
        });
        self.arena.set_parent(target, id);
        Ok(id)
    }

    fn parse_import(&mut self) -> ParseResult<NodeId> {
        self.advance(); // `import`

        // Skip the import clause; only the module name matters.
        while !self.check(&TokenKind::From)
            && !self.check(&TokenKind::Str(String::new()))
            && !self.check(&TokenKind::Eof)
        {
            if self.matches(&TokenKind::LBrace) {
                while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
                    self.advance();
                }
                self.matches(&TokenKind::RBrace);
            } else {
                self.advance();
            }
        }
        self.matches(&TokenKind::From);

        let module_name = match self.peek() {
            TokenKind::Str(_) => self.advance().text,
            _ => {
                return Err(self.error(format!(
                    "unexpected token '{}' while parsing import; expected a string",
                    self.current().text
                )))
            }
        };
        self.matches(&TokenKind::Semicolon);

        Ok(self.arena.alloc(Node::Import { module_name }))
    }

    fn parse_enum(&mut self, is_export: bool) -> ParseResult<NodeId> {
        self.advance(); // `enum`
        let name = self.expect_ident("for name of enum")?;

        if !self.matches(&TokenKind::LBrace) {
            return Err(self.error(format!(
                "unexpected token '{}' after declaration of enum '{}'; expected '{{'",
                self.current().text,
                name
            )));
        }

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.matches(&TokenKind::Comma) {
                continue;
            }
            match self.peek() {
                TokenKind::Ident(_) => {
                    let member_name = self.advance().text;
                    let value = if self.matches(&TokenKind::Eq) {
                        match self.peek() {
                            TokenKind::Str(_) | TokenKind::Number(_) => Some(self.advance().text),
                            _ => {
                                return Err(self.error(format!(
                                    "unexpected token '{}' for value of enum member '{}'",
                                    self.current().text,
                                    member_name
                                )))
                            }
                        }
                    } else {
                        None
                    };
                    members.push(EnumMember {
                        name: member_name,
                        value,
                    });
                }
                _ => {
                    return Err(self.error(format!(
                        "unexpected token '{}' while parsing enum '{}' body",
                        self.current().text,
                        name
                    )))
                }
            }
        }
        self.advance(); // `}`

        Ok(self.arena.alloc(Node::Enumeration {
            name,
            is_export,
            members,
        }))
    }

    /// `TypeExpr := Term (('|' Term)* | ('&' Term)*)`. A single syntactic
    /// level is either all-union or all-intersection; parenthesize to mix.
    fn parse_type_reference(&mut self) -> ParseResult<NodeId> {
        let first = self.parse_single_type()?;

        if self.check(&TokenKind::Pipe) {
            let mut types = vec![first];
            while self.matches(&TokenKind::Pipe) {
                types.push(self.parse_single_type()?);
            }
            let id = self.arena.alloc(Node::Union {
                types: types.clone(),
            });
            for ty in types {
                self.arena.set_parent(ty, id);
            }
            Ok(id)
        } else if self.check(&TokenKind::Amp) {
            let mut types = vec![first];
            while self.matches(&TokenKind::Amp) {
                types.push(self.parse_single_type()?);
            }
            let id = self.arena.alloc(Node::Intersection {
                types: types.clone(),
            });
            for ty in types {
                self.arena.set_parent(ty, id);
            }
            Ok(id)
        } else {
            Ok(first)
        }
    }

    fn parse_single_type(&mut self) -> ParseResult<NodeId> {
        let mut result = match self.peek().clone() {
            TokenKind::String_ => self.fundamental(Fundamental::String),
            TokenKind::Boolean => self.fundamental(Fundamental::Boolean),
            TokenKind::Number_ => self.fundamental(Fundamental::Number),
            TokenKind::Any => self.fundamental(Fundamental::Any),
            TokenKind::Unknown => self.fundamental(Fundamental::Unknown),
            TokenKind::Never => self.fundamental(Fundamental::Never),
            TokenKind::Str(value) => {
                self.advance();
                self.arena.alloc(Node::Literal {
                    value,
                    kind: LiteralKind::Str,
                })
            }
            TokenKind::Number(value) => {
                self.advance();
                self.arena.alloc(Node::Literal {
                    value,
                    kind: LiteralKind::Num,
                })
            }
            TokenKind::LBrace => self.parse_object()?,
            TokenKind::LBracket => self.parse_tuple()?,
            TokenKind::Ident(_) | TokenKind::Keyof => {
                let name = self.advance().text;
                let mut args = Vec::new();
                if self.matches(&TokenKind::LAngle) {
                    while !self.check(&TokenKind::RAngle) && !self.check(&TokenKind::Eof) {
                        args.push(self.parse_type_reference()?);
                        if !self.matches(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.matches(&TokenKind::RAngle);
                }
                let id = self.arena.alloc(Node::GenericRef {
                    name,
                    args: args.clone(),
                });
                for arg in args {
                    self.arena.set_parent(arg, id);
                }
                id
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type_reference()?;
                self.matches(&TokenKind::RParen);
                inner
            }
            _ => {
                return Err(self.error(format!(
                    "unexpected token '{}' while parsing type",
                    self.current().text
                )))
            }
        };

        // `[]` suffixes nest into arrays; `[K]` index access is consumed and
        // leaves the base type unchanged.
        while self.check(&TokenKind::LBracket) {
            self.advance();
            if self.check(&TokenKind::RBracket) {
                self.advance();
                let arr = self.arena.alloc(Node::Array { elem: result });
                self.arena.set_parent(result, arr);
                result = arr;
            } else {
                while !self.check(&TokenKind::RBracket) && !self.check(&TokenKind::Eof) {
                    self.advance();
                }
                self.matches(&TokenKind::RBracket);
            }
        }

        // Conditional tail: only the condition survives, as an opaque marker.
        if self.check(&TokenKind::Extends) {
            self.advance();
            while !self.check(&TokenKind::Question) && !self.check(&TokenKind::Eof) {
                self.advance();
            }
            self.matches(&TokenKind::Question);
            while !self.check(&TokenKind::Colon) && !self.check(&TokenKind::Eof) {
                self.advance();
            }
            self.matches(&TokenKind::Colon);
            self.parse_single_type()?;
            let cond = self.arena.alloc(Node::Conditional { condition: result });
            self.arena.set_parent(result, cond);
            result = cond;
        }

        Ok(result)
    }

    fn fundamental(&mut self, kind: Fundamental) -> NodeId {
        self.advance();
        self.arena.alloc(Node::FundamentalRef(kind))
    }

    fn parse_tuple(&mut self) -> ParseResult<NodeId> {
        self.advance(); // `[`

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) && !self.check(&TokenKind::Eof) {
            // Rest markers are discarded.
            if self.check(&TokenKind::Dot) {
                self.advance();
                self.matches(&TokenKind::Dot);
                self.matches(&TokenKind::Dot);
            }

            // Tuple labels (`name: T`, `name?: T`) are discarded.
            if matches!(self.peek(), TokenKind::Ident(_))
                && (matches!(self.peek_nth(1), TokenKind::Colon)
                    || (matches!(self.peek_nth(1), TokenKind::Question)
                        && matches!(self.peek_nth(2), TokenKind::Colon)))
            {
                self.advance();
                self.matches(&TokenKind::Question);
                self.advance(); // `:`
            }

            elements.push(self.parse_type_reference()?);

            if !self.matches(&TokenKind::Comma) {
                break;
            }
        }

        if !self.matches(&TokenKind::RBracket) {
            return Err(self.error(format!(
                "unexpected token '{}' while parsing tuple type; expected ']'",
                self.current().text
            )));
        }

        let id = self.arena.alloc(Node::Tuple {
            elements: elements.clone(),
        });
        for elem in elements {
            self.arena.set_parent(elem, id);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_child(file: &ParsedFile) -> &Node {
        file.arena.get(file.children()[0])
    }

    #[test]
    fn test_parse_interface_with_base() {
        let file = parse("interface B extends A { y: number; }").unwrap();
        match first_child(&file) {
            Node::Interface {
                name, base, body, ..
            } => {
                assert_eq!(name, "B");
                assert_eq!(base.as_deref(), Some("A"));
                match file.arena.get(*body) {
                    Node::Object { members } => {
                        assert_eq!(members.len(), 1);
                        assert_eq!(members[0].name, "y");
                        assert!(!members[0].optional);
                    }
                    other => panic!("expected object body, got {:?}", other),
                }
            }
            other => panic!("expected interface, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_optional_member() {
        let file = parse("interface I { a?: string; b: number }").unwrap();
        if let Node::Interface { body, .. } = first_child(&file) {
            if let Node::Object { members } = file.arena.get(*body) {
                assert!(members[0].optional);
                assert!(!members[1].optional);
                return;
            }
        }
        panic!("expected interface with object body");
    }

    #[test]
    fn test_parse_union_alias() {
        let file = parse("type Color = 'red' | 'green' | 'blue';").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            if let Node::Union { types } = file.arena.get(*target) {
                assert_eq!(types.len(), 3);
                assert!(matches!(
                    file.arena.get(types[0]),
                    Node::Literal { value, .. } if value == "red"
                ));
                return;
            }
        }
        panic!("expected union alias");
    }

    #[test]
    fn test_mixed_union_intersection_rejected() {
        // One syntactic level is all-union or all-intersection.
        let err = parse("type T = A | B & C;").unwrap_err();
        assert!(err.message.contains("'&'"), "got: {}", err.message);
    }

    #[test]
    fn test_parenthesized_mixing() {
        let file = parse("type T = A | (B & C);").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            if let Node::Union { types } = file.arena.get(*target) {
                assert!(matches!(file.arena.get(types[1]), Node::Intersection { .. }));
                return;
            }
        }
        panic!("expected union of name and intersection");
    }

    #[test]
    fn test_array_suffixes_nest() {
        let file = parse("type M = number[][];").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            if let Node::Array { elem } = file.arena.get(*target) {
                assert!(matches!(file.arena.get(*elem), Node::Array { .. }));
                return;
            }
        }
        panic!("expected nested array");
    }

    #[test]
    fn test_tuple_labels_and_rest_discarded() {
        let file = parse("type P = [name: string, age: number, ...rest: number[]];").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            if let Node::Tuple { elements } = file.arena.get(*target) {
                assert_eq!(elements.len(), 3);
                assert!(matches!(
                    file.arena.get(elements[0]),
                    Node::FundamentalRef(Fundamental::String)
                ));
                assert!(matches!(file.arena.get(elements[2]), Node::Array { .. }));
                return;
            }
        }
        panic!("expected tuple with 3 elements");
    }

    #[test]
    fn test_generic_params_on_alias_discarded() {
        let file = parse("type Box<T> = Container<T>;").unwrap();
        if let Node::TypeAlias { name, target, .. } = first_child(&file) {
            assert_eq!(name, "Box");
            assert!(matches!(
                file.arena.get(*target),
                Node::GenericRef { name, args } if name == "Container" && args.len() == 1
            ));
            return;
        }
        panic!("expected type alias");
    }

    #[test]
    fn test_index_signature_member_discarded() {
        let file = parse("interface I { [key: string]: number; real: boolean; }").unwrap();
        if let Node::Interface { body, .. } = first_child(&file) {
            if let Node::Object { members } = file.arena.get(*body) {
                assert_eq!(members.len(), 1);
                assert_eq!(members[0].name, "real");
                return;
            }
        }
        panic!("expected interface");
    }

    #[test]
    fn test_mapped_object_collapses_to_marker() {
        let file = parse("type F = { [K in keyof Flags]?: boolean };").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            assert!(matches!(file.arena.get(*target), Node::Mapped));
            return;
        }
        panic!("expected mapped marker alias");
    }

    #[test]
    fn test_conditional_keeps_condition_only() {
        let file = parse("type C = T extends string ? A : B;").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            if let Node::Conditional { condition } = file.arena.get(*target) {
                assert!(matches!(
                    file.arena.get(*condition),
                    Node::GenericRef { name, .. } if name == "T"
                ));
                return;
            }
        }
        panic!("expected conditional marker");
    }

    #[test]
    fn test_namespace_requires_exports() {
        let file = parse("export namespace NS { export interface A { x: number; } }").unwrap();
        if let Node::Namespace { name, children, .. } = first_child(&file) {
            assert_eq!(name, "NS");
            assert_eq!(children.len(), 1);
            return;
        }
        panic!("expected namespace");
    }

    #[test]
    fn test_namespace_rejects_bare_decl() {
        let err = parse("namespace NS { interface A { x: number; } }").unwrap_err();
        assert!(err.message.contains("namespace 'NS' body"), "got: {}", err.message);
    }

    #[test]
    fn test_import_records_module() {
        let file = parse("import { A, B } from 'common';").unwrap();
        assert!(matches!(
            first_child(&file),
            Node::Import { module_name } if module_name == "common"
        ));
    }

    #[test]
    fn test_enum_values() {
        let file = parse("enum E { A, B = '2nd', C = 3 }").unwrap();
        if let Node::Enumeration { members, .. } = first_child(&file) {
            assert_eq!(members.len(), 3);
            assert_eq!(members[0].value, None);
            assert_eq!(members[1].value.as_deref(), Some("2nd"));
            assert_eq!(members[2].value.as_deref(), Some("3"));
            return;
        }
        panic!("expected enum");
    }

    #[test]
    fn test_use_strict_pragma() {
        let file = parse("'use strict';\ninterface A {}").unwrap();
        assert!(file.strict());
    }

    #[test]
    fn test_use_strict_must_be_first() {
        let err = parse("interface A {}\n'use strict';").unwrap_err();
        assert!(err.message.contains("first statement"));
    }

    #[test]
    fn test_error_carries_context_note() {
        let err = parse("interface Broken { x: ; }").unwrap_err();
        assert!(err.message.contains("';'"), "got: {}", err.message);
        assert!(err
            .notes
            .iter()
            .any(|n| n.contains("interface 'Broken'")));
        assert!(err
            .notes
            .iter()
            .any(|n| n.contains("object member 'x'")));
    }

    #[test]
    fn test_empty_interface_body() {
        let file = parse("interface Empty {}").unwrap();
        if let Node::Interface { body, .. } = first_child(&file) {
            if let Node::Object { members } = file.arena.get(*body) {
                assert!(members.is_empty());
                return;
            }
        }
        panic!("expected empty interface");
    }

    #[test]
    fn test_keyword_member_names() {
        let file = parse("interface I { type: string; module: number; }").unwrap();
        if let Node::Interface { body, .. } = first_child(&file) {
            if let Node::Object { members } = file.arena.get(*body) {
                assert_eq!(members[0].name, "type");
                assert_eq!(members[1].name, "module");
                return;
            }
        }
        panic!("expected interface");
    }

    #[test]
    fn test_index_access_suffix_leaves_base() {
        let file = parse("type V = Config['x'];").unwrap();
        if let Node::TypeAlias { target, .. } = first_child(&file) {
            assert!(matches!(
                file.arena.get(*target),
                Node::GenericRef { name, .. } if name == "Config"
            ));
            return;
        }
        panic!("expected alias");
    }
}
