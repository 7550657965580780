//! Translate a subset of TypeScript type declarations (`.d.ts`) into C++
//! headers or proto3 schemas.
//!
//! The pipeline is a straight line: [`lexer`] scans the source, [`parser`]
//! builds an arena-backed tree ([`ast`]), [`symbols`] indexes the top-level
//! names, and a backend ([`codegen_cpp`] or [`codegen_proto`]) walks the
//! tree with [`resolve`] answering member-collection and literal-set
//! questions. [`format`] assembles the final text.
//!
//! Lexical and syntactic errors are fatal; semantic gaps (unresolvable
//! names, untranslatable types) degrade to placeholders or omissions so the
//! remaining declarations still come out.

pub mod ast;
pub mod codegen_cpp;
pub mod codegen_proto;
pub mod config;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod resolve;
pub mod symbols;

pub use ast::{Arena, Node, NodeId, ParsedFile};
pub use config::{Config, ConfigError, EnumMode, OutputFormat};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::{parse, ParseError};
pub use resolve::{Resolver, MAX_RESOLVE_DEPTH};
pub use symbols::SymbolTable;

/// Run the whole pipeline over one source text and return the rendered
/// output for the configured format. `source_name` labels the C++ output
/// banner (a path, or `stdin`).
pub fn translate(src: &str, source_name: &str, config: &Config) -> Result<String, ParseError> {
    let file = parser::parse(src)?;
    let symbols = SymbolTable::build(&file);

    Ok(match config.format {
        OutputFormat::Cpp => {
            let emission = codegen_cpp::generate(&file, &symbols, config);
            format!(
                "/* Generated C++ Header from {} */\n{}",
                source_name,
                format::render_cpp(&emission)
            )
        }
        OutputFormat::Proto => {
            let emission = codegen_proto::generate(&file, &symbols, config);
            format::render_proto(&emission)
        }
    })
}
