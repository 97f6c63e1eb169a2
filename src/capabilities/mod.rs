//! LSP Server Capabilities
//!
//! Thin adapters from LSP requests to the SFC core.

pub mod auto_register;
pub mod code_actions;
pub mod commands;
pub mod completion;

use tower_lsp_server::ls_types::{
    CodeActionProviderCapability, CompletionOptions, ExecuteCommandOptions, ServerCapabilities,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions,
};

/// Build the LSP server capabilities configuration
#[must_use]
pub fn build_server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(vec!["<".to_string()]),
            resolve_provider: Some(false),
            ..Default::default()
        }),
        code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![commands::REGISTER_COMPONENT_COMMAND.to_string()],
            ..Default::default()
        }),
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::INCREMENTAL),
                ..Default::default()
            },
        )),
        ..Default::default()
    }
}
