//! Detection of compiler macros already called in a script setup block

use super::utils::{script_language, script_parser, NodeTextExt};
use crate::syntax::{ParseError, ParseResult};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

const DEFINE_MACROS_QUERY: &str = include_str!("queries/define_macros.scm");

/// Which `define*` macros a block already calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefineMacros {
    pub props: bool,
    pub emits: bool,
    pub slots: bool,
}

impl DefineMacros {
    /// Whether the macro behind a snippet label (`props`, `emits`, `slots`) is present
    #[must_use]
    pub fn has(&self, label: &str) -> bool {
        match label {
            "props" => self.props,
            "emits" => self.emits,
            "slots" => self.slots,
            _ => false,
        }
    }
}

/// Find `defineProps`, `defineEmits` and `defineSlots` calls in script content
///
/// Works on partially invalid content: tree-sitter recovers and the query still matches the
/// well-formed calls.
///
/// # Errors
///
/// Returns error if the grammar cannot be loaded or the query fails to compile
pub fn find_define_macros(content: &str) -> ParseResult<DefineMacros> {
    let mut parser = script_parser()?;

    let Some(tree) = parser.parse(content, None) else {
        return Ok(DefineMacros::default());
    };

    let query = Query::new(&script_language(), DEFINE_MACROS_QUERY)
        .map_err(|e| ParseError::Query(format!("Failed to create macro query: {e}")))?;

    let Some(name_index) = query.capture_index_for_name("macro_name") else {
        return Err(ParseError::Query(
            "macro query has no @macro_name capture".to_string(),
        ));
    };

    let mut found = DefineMacros::default();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), content.as_bytes());

    while let Some(m) = matches.next() {
        for name_cap in m.captures.iter().filter(|c| c.index == name_index) {
            match name_cap.node.text(content) {
                "defineProps" => found.props = true,
                "defineEmits" => found.emits = true,
                "defineSlots" => found.slots = true,
                _ => {}
            }
        }
    }

    Ok(found)
}
