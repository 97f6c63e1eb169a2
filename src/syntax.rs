//! Core types shared by the parser, the edit synthesizer and the LSP shell.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A component that can be registered in a document
///
/// Supplied by the client (the server never scans the file system for components).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// PascalCase identifier used as the tag name and the import binding
    pub name: String,
    /// Module path, e.g. `@/components/HelloWorld.vue`
    pub source: String,
}

impl ComponentDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Module path with the leading `@/` alias removed
    #[must_use]
    pub fn bare_source(&self) -> &str {
        self.source.strip_prefix("@/").unwrap_or(&self.source)
    }
}

/// Line/column anchor of an insertion (zero-based, UTF-16 columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EditPosition {
    pub line: usize,
    pub column: usize,
}

/// A single text insertion
///
/// A batch of these must be applied by the editor in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOperation {
    pub position: EditPosition,
    pub inserted_text: String,
}

impl EditOperation {
    #[must_use]
    pub fn insert(line: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            position: EditPosition { line, column },
            inserted_text: text.into(),
        }
    }
}

/// Parse error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Script content is not syntactically valid; position is in document coordinates
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    /// Query compilation failed
    #[error("Query error: {0}")]
    Query(String),
    /// Grammar could not be loaded into the parser
    #[error("Language error: {0}")]
    Language(String),
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
