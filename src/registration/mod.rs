//! Component registration edits
//!
//! Given a document and a component, computes the insertions that import the component and
//! register it with the component's options. Exactly one strategy applies per document,
//! chosen by which script blocks exist and whether they are empty.

pub mod templates;

use crate::config::Settings;
use crate::sfc::statements::{Declaration, ExportDefault, ObjectLiteral, Statement};
use crate::sfc::{self, Block, LineIndex, ScriptBlock};
use crate::syntax::{ComponentDescriptor, EditOperation, ParseError, ParseResult};

/// Compute the edits registering `component` in `text`
///
/// Returns an empty list when the component is already imported and registered, so running
/// the edits and calling again yields nothing.
///
/// # Errors
///
/// Returns the script block's `ParseError` when its statements are needed but the content
/// does not parse. No partial edits are produced in that case.
pub fn register_component(
    text: &str,
    component: &ComponentDescriptor,
    settings: &Settings,
) -> ParseResult<Vec<EditOperation>> {
    let sfc = sfc::parse(text);
    let index = LineIndex::new(text);

    if let Some(setup) = &sfc.script_setup {
        if setup.block.is_empty() {
            tracing::debug!(component = %component.name, "filling empty script setup");
            return Ok(vec![fill_empty_block(
                &setup.block,
                &templates::import_statement(component),
            )]);
        }

        tracing::debug!(component = %component.name, "importing into script setup");
        return Ok(ensure_import(setup, component)?.into_iter().collect());
    }

    if let Some(script) = &sfc.script {
        if script.block.is_empty() {
            tracing::debug!(component = %component.name, "filling empty script");
            let content = templates::script_content(component, settings, script.is_typed());
            return Ok(vec![fill_empty_block(&script.block, &content)]);
        }

        tracing::debug!(component = %component.name, "registering in script");
        return register_in_script(script, component, settings, &index);
    }

    tracing::debug!(component = %component.name, "creating script block");
    Ok(vec![EditOperation::insert(
        0,
        0,
        templates::new_script_block(component, settings),
    )])
}

/// Apply insertions to `text`
///
/// Insertions at the same position end up in list order, as an editor applying them in one
/// transaction would place them.
#[must_use]
pub fn apply_edits(text: &str, edits: &[EditOperation]) -> String {
    let index = LineIndex::new(text);

    let mut anchored: Vec<(usize, usize, &str)> = edits
        .iter()
        .enumerate()
        .map(|(i, edit)| {
            let offset = index.offset(edit.position.line, edit.position.column);
            (offset, i, edit.inserted_text.as_str())
        })
        .collect();

    anchored.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    let mut result = text.to_string();
    for (offset, _, inserted) in anchored {
        result.insert_str(offset, inserted);
    }

    result
}

fn insert_at(position: sfc::Position, text: impl Into<String>) -> EditOperation {
    EditOperation::insert(position.line, position.column, text)
}

/// Put `body` between the tags of a whitespace-only block
fn fill_empty_block(block: &Block, body: &str) -> EditOperation {
    let text = if block.loc.is_single_line() {
        format!("\n{body}\n")
    } else {
        format!("{body}\n")
    };

    insert_at(block.content_loc.end, text)
}

fn statements(script: &ScriptBlock) -> ParseResult<&[Statement]> {
    script
        .ast
        .as_deref()
        .map_err(ParseError::clone)
}

/// Import `component` unless its module path already appears in the block
fn ensure_import(
    script: &ScriptBlock,
    component: &ComponentDescriptor,
) -> ParseResult<Option<EditOperation>> {
    let block = &script.block;

    if block.content.contains(component.bare_source()) {
        return Ok(None);
    }

    let statements = statements(script)?;
    let import = templates::import_statement(component);

    let last_import = statements.iter().rev().find(|s| s.as_import().is_some());

    let edit = match last_import {
        Some(last) if last.loc.end.line < block.content_loc.end.line => {
            EditOperation::insert(last.loc.end.line + 1, 0, format!("{import}\n"))
        }
        Some(last) => insert_at(last.loc.end, format!("\n{import}")),
        None if block.content_loc.is_single_line() => {
            insert_at(block.content_loc.start, format!("\n{import}\n"))
        }
        None => EditOperation::insert(block.content_loc.start.line + 1, 0, format!("{import}\n\n")),
    };

    Ok(Some(edit))
}

fn register_in_script(
    script: &ScriptBlock,
    component: &ComponentDescriptor,
    settings: &Settings,
    index: &LineIndex,
) -> ParseResult<Vec<EditOperation>> {
    let statements = statements(script)?;
    let import = ensure_import(script, component)?;

    let export = statements
        .iter()
        .find_map(|s| s.as_export_default().map(|export| (s, export)));

    let Some((statement, export)) = export else {
        tracing::debug!("no default export, appending one");

        let mut edits = Vec::new();
        edits.extend(type_helper_import(script));
        edits.extend(import);
        edits.push(insert_at(
            script.block.content_loc.end,
            format!(
                "\n{}\n",
                templates::default_export(component, settings, script.is_typed())
            ),
        ));
        return Ok(edits);
    };

    let mut edits: Vec<EditOperation> = import.into_iter().collect();
    edits.extend(register_in_export(statement, export, component, index));
    Ok(edits)
}

/// `import { defineComponent } from 'vue'` for typed blocks that lack it
fn type_helper_import(script: &ScriptBlock) -> Option<EditOperation> {
    if !script.is_typed() {
        return None;
    }

    let imported = script
        .imports()
        .any(|import| import.specifiers.iter().any(|s| s == templates::TYPE_HELPER));

    if imported {
        return None;
    }

    let content_loc = script.block.content_loc;
    let text = if content_loc.is_single_line() {
        format!("\n{}\n", templates::TYPE_HELPER_IMPORT)
    } else {
        format!("\n{}", templates::TYPE_HELPER_IMPORT)
    };

    Some(insert_at(content_loc.start, text))
}

fn register_in_export(
    statement: &Statement,
    export: &ExportDefault,
    component: &ComponentDescriptor,
    index: &LineIndex,
) -> Option<EditOperation> {
    let option = templates::components_option(component);

    let Some(options) = export.options() else {
        // `defineComponent()`: supply the whole options object
        if let Declaration::Call(call) = &export.declaration {
            if is_empty_argument_list(index.text(), call.arguments) {
                return Some(insert_at(
                    index.position(call.arguments.start.offset + 1),
                    format!("{{\n\t{option}\n}}"),
                ));
            }
        }

        tracing::debug!("default export has no options object");
        return None;
    };

    let Some(property) = options.property("components") else {
        let text = if statement.loc.is_single_line() {
            format!("\n\t{option}\n")
        } else {
            format!("\n\t{option}")
        };

        return Some(insert_at(index.position(options.loc.start.offset + 1), text));
    };

    let Some(components) = property.as_object() else {
        tracing::debug!("components option is not an object literal");
        return None;
    };

    if components.lists(&component.name) {
        return None;
    }

    Some(append_entry(components, &component.name, index))
}

fn is_empty_argument_list(text: &str, arguments: sfc::Location) -> bool {
    text.get(arguments.start.offset + 1..arguments.end.offset.saturating_sub(1))
        .is_some_and(|inner| inner.trim().is_empty())
}

/// Add `name` as the last entry of an object literal
fn append_entry(object: &ObjectLiteral, name: &str, index: &LineIndex) -> EditOperation {
    let text = index.text();
    let open = object.loc.start.offset;
    let close = object.loc.end.offset.saturating_sub(1);
    let single_line = object.loc.is_single_line();

    let Some(last) = object.properties.last() else {
        let inserted = if single_line {
            format!(" {name}, ")
        } else {
            format!("\n{}\t{name},", index.indentation(object.loc.start.line))
        };

        return insert_at(index.position(open + 1), inserted);
    };

    let after_last = last.loc.end.offset;
    let trailing_comma = text
        .get(after_last..close)
        .and_then(|between| {
            between
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .filter(|(_, c)| *c == ',')
        })
        .map(|(i, _)| after_last + i + 1);

    let indent = index.indentation(last.loc.start.line);

    let (anchor, inserted) = match (trailing_comma, single_line) {
        (Some(comma_end), true) => (comma_end, format!(" {name},")),
        (Some(comma_end), false) => (comma_end, format!("\n{indent}{name},")),
        (None, true) => (after_last, format!(", {name},")),
        (None, false) => (after_last, format!(",\n{indent}{name},")),
    };

    insert_at(index.position(anchor), inserted)
}
