//! Code action capability - element formatting quick fixes

use crate::sfc::LineIndex;
use regex::Regex;
use std::collections::HashMap;
use tower_lsp_server::ls_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, CodeActionParams, CodeActionResponse,
    Position, Range, TextEdit, WorkspaceEdit,
};

/// Elements offered the multi-line format besides components
const FORMATTABLE_ELEMENTS: &[&str] = &[
    "main",
    "section",
    "div",
    "a",
    "header",
    "footer",
    "nav",
    "ul",
    "li",
    "button",
    "form",
    "input",
    "img",
    "component",
    "RouterLink",
    "RouterView",
];

/// A replacement for the whole line the fix was requested on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFix {
    pub title: String,
    pub replacement: String,
}

/// Handle code action request (pure function)
pub fn handle_code_action(
    params: &CodeActionParams,
    text: &str,
    component_names: &[&str],
) -> Option<CodeActionResponse> {
    let index = LineIndex::new(text);
    let line_number = params.range.start.line;
    let line = index.line_text(line_number as usize)?;

    let end = Position::new(
        line_number,
        u32::try_from(line.encode_utf16().count()).unwrap_or(u32::MAX),
    );
    let range = Range::new(Position::new(line_number, 0), end);

    let actions: Vec<CodeActionOrCommand> = quick_fixes(line, component_names)
        .into_iter()
        .map(|fix| {
            let changes = HashMap::from([(
                params.text_document.uri.clone(),
                vec![TextEdit::new(range, fix.replacement)],
            )]);

            CodeActionOrCommand::CodeAction(CodeAction {
                title: fix.title,
                kind: Some(CodeActionKind::QUICKFIX),
                edit: Some(WorkspaceEdit {
                    changes: Some(changes),
                    ..Default::default()
                }),
                ..Default::default()
            })
        })
        .collect();

    (!actions.is_empty()).then_some(actions)
}

/// Formatting fixes applicable to a single line of template markup
#[must_use]
pub fn quick_fixes(line: &str, component_names: &[&str]) -> Vec<QuickFix> {
    let line = line.trim_end_matches('\r');
    let mut fixes = Vec::new();

    if let Some(replacement) = self_closing_format(line, component_names) {
        fixes.push(QuickFix {
            title: "Format as self-closing".to_string(),
            replacement,
        });
    }

    if let Some(replacement) = multi_line_format(line, component_names) {
        fixes.push(QuickFix {
            title: "Format as multi-line".to_string(),
            replacement,
        });
    }

    fixes
}

fn alternation<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// `<Name attrs></Name>` becomes `<Name attrs />`
fn self_closing_format(line: &str, component_names: &[&str]) -> Option<String> {
    let names = alternation(std::iter::once("component").chain(component_names.iter().copied()));
    let pattern = format!(r"^(\s*)<({names})((?:\s[^>]*)?)></([^>\s]+)\s*>");
    let caps = Regex::new(&pattern).ok()?.captures(line)?;

    let (indentation, name, attrs) = (&caps[1], &caps[2], &caps[3]);

    if &caps[4] != name {
        return None;
    }

    Some(format!("{indentation}<{name}{} />", attrs.trim_end()))
}

/// One attribute per line for an element written on a single line
fn multi_line_format(line: &str, component_names: &[&str]) -> Option<String> {
    let names = alternation(
        FORMATTABLE_ELEMENTS
            .iter()
            .chain(component_names.iter())
            .copied(),
    );
    let pattern = format!(
        r#"^(\s*)<({names})((?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+))?)+)\s*(/?>|>(.*?)</([^>\s]+)\s*>)?$"#
    );
    let caps = Regex::new(&pattern).ok()?.captures(line)?;

    let (indentation, name, attrs) = (&caps[1], &caps[2], &caps[3]);

    if caps.get(6).is_some_and(|closing| closing.as_str() != name) {
        return None;
    }

    let attrs = format_attributes(attrs)?;

    let format = match (caps.get(5), caps.get(4).map(|m| m.as_str())) {
        (Some(content), _) => format!("<{name}\n{attrs}\n>\n\t{}\n</{name}>", content.as_str()),
        (None, Some("/>")) => format!("<{name}\n{attrs}\n/>"),
        (None, _) => format!("<{name}\n{attrs}\n>"),
    };

    let indented: Vec<String> = format
        .split('\n')
        .map(|l| format!("{indentation}{l}"))
        .collect();

    Some(indented.join("\n"))
}

/// Normalize attributes to `\tname="value"` lines, or `\tname` for bare ones
fn format_attributes(attrs: &str) -> Option<String> {
    let attribute = Regex::new(r#"([^\s=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#).ok()?;

    let lines: Vec<String> = attribute
        .captures_iter(attrs)
        .map(|caps| {
            let name = &caps[1];
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());

            if value.is_empty() {
                format!("\t{name}")
            } else {
                format!("\t{name}=\"{value}\"")
            }
        })
        .collect();

    Some(lines.join("\n"))
}
