//! Lexer for the TypeScript type-declaration subset.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Identifiers and literals
    Ident(String),
    Str(String),
    Number(String),

    // Keywords
    Export,
    Module,
    Interface,
    Extends,
    Type,
    Keyof,
    In,
    Unknown,
    Never,
    Import,
    From,
    Enum,

    // Primitive type keywords
    Any,
    Boolean,
    String_,
    Number_,

    // Punctuation
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Colon,     // :
    Question,  // ?
    Pipe,      // |
    Eq,        // =
    LAngle,    // <
    RAngle,    // >
    Amp,       // &
    Comma,     // ,
    Dot,       // .

    Eof,
}

/// A token with its kind and the literal text it was scanned from.
///
/// For string tokens the text is the unquoted contents; diagnostics use it to
/// name the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A fatal lexical error. There is no recovery; the whole run aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("end of file encountered while parsing string")]
    UnterminatedString,
    #[error("end of file reached while parsing comment")]
    UnterminatedComment,
    #[error("unexpected character '{0}' after '/'")]
    BadCommentStart(char),
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

/// Scanner over a source string. Whitespace and comments are stripped; each
/// step yields one classified token.
pub struct Lexer<'src> {
    chars: Peekable<Chars<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            chars: src.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(LexError::UnterminatedComment),
            }
        }
    }

    /// Read a string literal body. Contents are copied verbatim, with no
    /// escape interpretation; the declarations we process use strings almost
    /// exclusively as identifiers.
    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let mut s = String::new();
        loop {
            match self.advance() {
                Some(ch) if ch == quote => return Ok(s),
                Some(ch) => s.push(ch),
                None => return Err(LexError::UnterminatedString),
            }
        }
    }

    fn read_number(&mut self, first: char) -> String {
        let mut s = String::new();
        s.push(first);
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            s.push(ch);
            self.advance();
        }
        s
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut s = String::new();
        s.push(first);
        while let Some(ch) = self.peek() {
            if !is_ident_continue(ch) {
                break;
            }
            s.push(ch);
            self.advance();
        }
        s
    }

    fn keyword_or_ident(s: String) -> Token {
        let kind = match s.as_str() {
            "export" => TokenKind::Export,
            // `module` and `namespace` are interchangeable in this subset
            "module" | "namespace" => TokenKind::Module,
            "interface" => TokenKind::Interface,
            "extends" => TokenKind::Extends,
            "type" => TokenKind::Type,
            "keyof" => TokenKind::Keyof,
            "in" => TokenKind::In,
            "unknown" => TokenKind::Unknown,
            "never" => TokenKind::Never,
            "import" => TokenKind::Import,
            "from" => TokenKind::From,
            "enum" => TokenKind::Enum,
            "any" => TokenKind::Any,
            "boolean" => TokenKind::Boolean,
            "string" => TokenKind::String_,
            "number" => TokenKind::Number_,
            _ => return Token::new(TokenKind::Ident(s.clone()), s),
        };
        Token::new(kind, s)
    }

    /// Scan the next token, or fail on a lexical malformation.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.skip_whitespace();

            let ch = match self.advance() {
                Some(c) => c,
                None => return Ok(Token::new(TokenKind::Eof, "")),
            };

            let simple = |kind: TokenKind| Ok(Token::new(kind, ch.to_string()));
            return match ch {
                '{' => simple(TokenKind::LBrace),
                '}' => simple(TokenKind::RBrace),
                '[' => simple(TokenKind::LBracket),
                ']' => simple(TokenKind::RBracket),
                '(' => simple(TokenKind::LParen),
                ')' => simple(TokenKind::RParen),
                ';' => simple(TokenKind::Semicolon),
                ':' => simple(TokenKind::Colon),
                '?' => simple(TokenKind::Question),
                '|' => simple(TokenKind::Pipe),
                '=' => simple(TokenKind::Eq),
                '<' => simple(TokenKind::LAngle),
                '>' => simple(TokenKind::RAngle),
                '&' => simple(TokenKind::Amp),
                ',' => simple(TokenKind::Comma),
                '.' => simple(TokenKind::Dot),
                '/' => match self.peek() {
                    Some('/') => {
                        self.advance();
                        self.skip_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.advance();
                        self.skip_block_comment()?;
                        continue;
                    }
                    other => Err(LexError::BadCommentStart(other.unwrap_or('\0'))),
                },
                '\'' | '"' | '`' => {
                    let s = self.read_string(ch)?;
                    Ok(Token::new(TokenKind::Str(s.clone()), s))
                }
                c if c.is_ascii_digit() => {
                    let n = self.read_number(c);
                    Ok(Token::new(TokenKind::Number(n.clone()), n))
                }
                c if is_ident_start(c) => Ok(Self::keyword_or_ident(self.read_ident(c))),
                c => Err(LexError::InvalidCharacter(c)),
            };
        }
    }

    /// Collect all tokens, ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_tokens() {
        let src = "export interface Foo extends Bar { x: string; }";
        let tokens = Lexer::new(src).tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Export);
        assert_eq!(tokens[1].kind, TokenKind::Interface);
        assert_eq!(tokens[2].kind, TokenKind::Ident("Foo".to_string()));
        assert_eq!(tokens[3].kind, TokenKind::Extends);
        assert_eq!(tokens[4].kind, TokenKind::Ident("Bar".to_string()));
        assert_eq!(tokens[5].kind, TokenKind::LBrace);
        assert_eq!(tokens[6].kind, TokenKind::Ident("x".to_string()));
        assert_eq!(tokens[7].kind, TokenKind::Colon);
        assert_eq!(tokens[8].kind, TokenKind::String_);
    }

    #[test]
    fn test_namespace_is_module() {
        let tokens = Lexer::new("namespace A {} module B {}").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Module);
        assert_eq!(tokens[3].kind, TokenKind::RBrace);
        assert_eq!(tokens[4].kind, TokenKind::Module);
    }

    #[test]
    fn test_string_literals_no_escapes() {
        let tokens = Lexer::new(r#""a\nb" 'c' `d`"#).tokenize().unwrap();
        // Backslash sequences are kept verbatim.
        assert_eq!(tokens[0].kind, TokenKind::Str("a\\nb".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Str("c".to_string()));
        assert_eq!(tokens[2].kind, TokenKind::Str("d".to_string()));
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let err = Lexer::new("type X = 'oops").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString);
    }

    #[test]
    fn test_unterminated_block_comment_is_fatal() {
        let err = Lexer::new("/* no end").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment);
    }

    #[test]
    fn test_comments_are_stripped() {
        let src = "// line\ntype /* block */ X = number;";
        let tokens = Lexer::new(src).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Type);
        assert_eq!(tokens[1].kind, TokenKind::Ident("X".to_string()));
    }

    #[test]
    fn test_number_is_digit_run() {
        let tokens = Lexer::new("12 34").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number("12".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Number("34".to_string()));
    }

    #[test]
    fn test_ident_and_number_at_end_of_input() {
        let tokens = Lexer::new("tail9").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident("tail9".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Eof);

        let tokens = Lexer::new("42").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number("42".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_invalid_character() {
        let err = Lexer::new("type X = #;").tokenize().unwrap_err();
        assert_eq!(err, LexError::InvalidCharacter('#'));
    }

    #[test]
    fn test_qualified_name_dots() {
        let tokens = Lexer::new("ns.Inner").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident("ns".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::Ident("Inner".to_string()));
    }
}
