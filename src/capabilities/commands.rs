//! Execute command capability - component registration

use crate::syntax::{ComponentDescriptor, EditOperation};
use serde_json::Value;
use std::collections::HashMap;
use tower_lsp_server::ls_types::{Position, Range, TextEdit, Uri, WorkspaceEdit};

/// Command registering the component passed as its only argument
pub const REGISTER_COMPONENT_COMMAND: &str = "sfcLsp.registerComponent";

/// Read the component descriptor from `workspace/executeCommand` arguments
///
/// Accepts either `{ name, source }` or `[uri, { name, source }]`.
#[must_use]
pub fn component_argument(arguments: &[Value]) -> Option<ComponentDescriptor> {
    arguments
        .iter()
        .find_map(|arg| serde_json::from_value(arg.clone()).ok())
}

/// Document URI among the command arguments, if the client sent one
#[must_use]
pub fn uri_argument(arguments: &[Value]) -> Option<Uri> {
    arguments
        .iter()
        .filter_map(Value::as_str)
        .find_map(|s| s.parse().ok())
}

/// Zero-width text edits for a batch of insertions, applied as one transaction
#[must_use]
pub fn to_workspace_edit(uri: Uri, edits: &[EditOperation]) -> WorkspaceEdit {
    let text_edits = edits
        .iter()
        .map(|edit| {
            let position = Position::new(
                u32::try_from(edit.position.line).unwrap_or(u32::MAX),
                u32::try_from(edit.position.column).unwrap_or(u32::MAX),
            );

            TextEdit::new(Range::new(position, position), edit.inserted_text.clone())
        })
        .collect();

    WorkspaceEdit {
        changes: Some(HashMap::from([(uri, text_edits)])),
        ..Default::default()
    }
}
