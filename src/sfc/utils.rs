//! Common utilities for tree-sitter parsing of script content

use super::position::{LineIndex, Location, Position};
use crate::syntax::{ParseError, ParseResult};
use tree_sitter::{Language, Node, Parser};

/// Grammar used for every script block
///
/// TypeScript is a superset of the plain dialect, so type annotations never fail a parse.
#[must_use]
pub fn script_language() -> Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

/// Create a parser for script content
///
/// # Errors
///
/// Returns error if the grammar cannot be loaded (ABI mismatch)
pub fn script_parser() -> ParseResult<Parser> {
    let mut parser = Parser::new();

    parser
        .set_language(&script_language())
        .map_err(|e| ParseError::Language(format!("Failed to set TypeScript language: {e}")))?;

    Ok(parser)
}

/// Text access on tree-sitter nodes
pub trait NodeTextExt {
    fn text<'a>(&self, content: &'a str) -> &'a str;

    fn text_or_default(&self, content: &str) -> String {
        self.text(content).to_string()
    }
}

impl NodeTextExt for Node<'_> {
    fn text<'a>(&self, content: &'a str) -> &'a str {
        self.utf8_text(content.as_bytes()).unwrap_or_default()
    }
}

/// Strip the surrounding quotes of a string literal
#[must_use]
pub fn unquote(literal: &str) -> &str {
    let bytes = literal.as_bytes();

    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) | (Some(b'`'), Some(b'`'))
            if literal.len() >= 2 =>
        {
            &literal[1..literal.len() - 1]
        }
        _ => literal,
    }
}

/// Maps node byte ranges inside block content to whole-document locations
#[derive(Debug)]
pub struct NodeLocator<'a> {
    index: LineIndex<'a>,
    origin: Position,
}

impl<'a> NodeLocator<'a> {
    /// `origin` is the document position at which `content` begins
    #[must_use]
    pub fn new(content: &'a str, origin: Position) -> Self {
        Self {
            index: LineIndex::new(content),
            origin,
        }
    }

    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.index.position(offset).relative_to(self.origin)
    }

    #[must_use]
    pub fn location(&self, node: Node) -> Location {
        Location {
            start: self.position(node.start_byte()),
            end: self.position(node.end_byte()),
        }
    }
}
