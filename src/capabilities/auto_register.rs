//! Registration of components typed into the template

use crate::context;
use crate::sfc;
use crate::syntax::ComponentDescriptor;
use regex::Regex;
use tower_lsp_server::ls_types::TextDocumentContentChangeEvent;

/// An edit reported by the client, reduced to what detection needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl TextChange {
    /// Full-document replacements carry no range and are never treated as typing
    #[must_use]
    pub fn from_event(event: &TextDocumentContentChangeEvent) -> Option<Self> {
        let range = event.range?;

        Some(Self {
            start_line: range.start.line as usize,
            end_line: range.end.line as usize,
            text: event.text.clone(),
        })
    }
}

/// First component whose name appears in text inserted inside the template
///
/// `text` is the document after the changes. Changes touching the template's tag lines or
/// lying outside the template are ignored.
#[must_use]
pub fn detect_component<'a>(
    text: &str,
    changes: &[TextChange],
    components: &'a [ComponentDescriptor],
) -> Option<&'a ComponentDescriptor> {
    if components.is_empty() {
        return None;
    }

    let template = sfc::parse(text).template?;

    // Longest first so `FooBar` is not reported as `Foo`
    let mut names: Vec<String> = components
        .iter()
        .filter(|c| !c.name.is_empty())
        .map(|c| regex::escape(&c.name))
        .collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));

    if names.is_empty() {
        return None;
    }

    let pattern = Regex::new(&format!("({})", names.join("|"))).ok()?;

    changes
        .iter()
        .filter(|change| {
            context::is_inside_template_change(change.start_line, change.end_line, &template)
        })
        .find_map(|change| {
            let found = pattern.find(&change.text)?;
            components.iter().find(|c| c.name == found.as_str())
        })
}
