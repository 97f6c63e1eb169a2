//! Single File Component (SFC) parsing
//!
//! Splits a document into its script, script setup, template and style blocks with exact
//! locations, and analyses script blocks into top-level statements.

pub mod macros;
pub mod position;
pub mod scanner;
pub mod statements;
pub mod utils;

#[cfg(test)]
mod tests;

pub use position::{LineIndex, Location, Position};
pub use statements::{Statement, StatementKind};

use crate::syntax::ParseResult;
use scanner::{parse_attributes, Attribute, Element};

/// Parsed document structure; every field is optional and an empty document is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sfc {
    pub script: Option<ScriptBlock>,
    pub script_setup: Option<ScriptBlock>,
    pub template: Option<Block>,
    pub styles: Vec<StyleBlock>,
}

/// Fields common to every block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Text between the opening and closing tags
    pub content: String,
    /// Span of the whole element, tags included
    pub loc: Location,
    /// Span of `content`
    pub content_loc: Location,
    pub attrs: Vec<Attribute>,
    pub lang: Option<String>,
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub block: Block,
    pub setup: bool,
    /// Top-level statements, or why they could not be determined
    pub ast: ParseResult<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    pub block: Block,
    pub scoped: bool,
    pub module: bool,
}

impl Block {
    fn from_element(element: &Element, text: &str, index: &LineIndex) -> Self {
        let attrs = parse_attributes(element.raw_attrs);

        let value_of = |name: &str| {
            attrs
                .iter()
                .find(|a| a.name == name)
                .and_then(|a| a.value.clone())
        };

        Self {
            content: text[element.content_start..element.content_end].to_string(),
            loc: index.location(element.start, element.end),
            content_loc: index.location(element.content_start, element.content_end),
            lang: value_of("lang"),
            src: value_of("src"),
            attrs,
        }
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Content is empty or whitespace only
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    #[must_use]
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

impl ScriptBlock {
    /// Statements, or nothing when the content failed to parse
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        self.ast.as_deref().unwrap_or_default()
    }

    pub fn imports(&self) -> impl Iterator<Item = &statements::ImportDeclaration> + '_ {
        self.statements().iter().filter_map(Statement::as_import)
    }

    #[must_use]
    pub fn is_typed(&self) -> bool {
        self.block.lang() == Some("ts")
    }
}

impl Sfc {
    /// All blocks in document order
    #[must_use]
    pub fn blocks(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self
            .script
            .iter()
            .chain(&self.script_setup)
            .map(|s| &s.block)
            .chain(&self.template)
            .chain(self.styles.iter().map(|s| &s.block))
            .collect();

        blocks.sort_by_key(|b| b.loc.start.offset);
        blocks
    }
}

/// Parse a document into its blocks
///
/// Never fails: malformed markup yields whatever blocks could be delimited, and script
/// parse errors are kept on the block they belong to.
#[must_use]
pub fn parse(text: &str) -> Sfc {
    let index = LineIndex::new(text);
    let mut sfc = Sfc::default();

    for element in scanner::scan(text) {
        if element.is("script") {
            // No body to edit; treat as absent so a real block gets created
            if element.self_closing {
                tracing::debug!("skipping self-closing script at offset {}", element.start);
                continue;
            }

            let block = Block::from_element(&element, text, &index);
            let setup = block.has_attr("setup");

            let slot = if setup {
                &mut sfc.script_setup
            } else {
                &mut sfc.script
            };

            if slot.is_none() {
                *slot = Some(analyze_script(block, setup));
            }
        } else if element.is("template") {
            if sfc.template.is_none() {
                sfc.template = Some(Block::from_element(&element, text, &index));
            }
        } else if element.is("style") {
            let block = Block::from_element(&element, text, &index);

            sfc.styles.push(StyleBlock {
                scoped: block.has_attr("scoped"),
                module: block.has_attr("module"),
                block,
            });
        }
    }

    sfc
}

fn analyze_script(block: Block, setup: bool) -> ScriptBlock {
    let ast = statements::parse_statements(&block.content, block.content_loc.start);

    if let Err(e) = &ast {
        tracing::debug!(setup, "script statements unavailable: {e}");
    }

    ScriptBlock { block, setup, ast }
}
