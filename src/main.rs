#![warn(clippy::all, clippy::pedantic)]

use sfc_lsp::capabilities::auto_register::{detect_component, TextChange};
use sfc_lsp::capabilities::{
    build_server_capabilities, code_actions, commands, completion,
};
use sfc_lsp::config::{self, ServerConfig};
use sfc_lsp::documents::DocumentStore;
use sfc_lsp::registration::register_component;
use sfc_lsp::syntax::ComponentDescriptor;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::{
    CodeActionParams, CodeActionResponse, CompletionParams, CompletionResponse,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, ExecuteCommandParams, InitializeParams, InitializeResult,
    InitializedParams, MessageType, ServerInfo, Uri,
};
use tower_lsp_server::{Client, LanguageServer, LspService, Server};

#[derive(Debug)]
struct Backend {
    client: Client,
    documents: DocumentStore,
    config: RwLock<ServerConfig>,
}

impl Backend {
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            config: RwLock::new(ServerConfig::default()),
        }
    }

    async fn reload_configuration(&self) {
        let mut config = self.config.read().await.clone();
        config::load_configuration(&self.client, &mut config).await;

        tracing::debug!(components = config.components.len(), "configuration loaded");
        *self.config.write().await = config;
    }

    /// Compute and send the edits registering `component` in a document
    async fn register(&self, uri: Uri, text: &str, component: &ComponentDescriptor) {
        let settings = self.config.read().await.sfc;

        match register_component(text, component, &settings) {
            Ok(edits) if edits.is_empty() => {
                tracing::debug!(component = %component.name, "already registered");
            }
            Ok(edits) => {
                let edit = commands::to_workspace_edit(uri, &edits);

                if let Err(e) = self.client.apply_edit(edit).await {
                    tracing::warn!("workspace/applyEdit failed: {e}");
                }
            }
            Err(e) => {
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!("Cannot register {}: {e}", component.name),
                    )
                    .await;
            }
        }
    }
}

impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.config.write().await =
            config::from_initialization_options(params.initialization_options);

        Ok(InitializeResult {
            capabilities: build_server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.reload_configuration().await;

        self.client
            .log_message(MessageType::INFO, "SFC LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_change_configuration(&self, _: DidChangeConfigurationParams) {
        self.reload_configuration().await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents
            .open(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        let Some(text) = self.documents.apply_changes(&uri, &params.content_changes) else {
            tracing::warn!("change for unopened document {}", uri.as_str());
            return;
        };

        let changes: Vec<TextChange> = params
            .content_changes
            .iter()
            .filter_map(TextChange::from_event)
            .collect();

        let components = self.config.read().await.components.clone();

        if let Some(component) = detect_component(&text, &changes, &components) {
            self.register(uri, &text, component).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;

        let Some(text) = self.documents.get(uri) else {
            return Ok(None);
        };

        let config = self.config.read().await;
        Ok(completion::handle_completion(&params, &text, &config))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let Some(text) = self.documents.get(&params.text_document.uri) else {
            return Ok(None);
        };

        let config = self.config.read().await;
        let names: Vec<&str> = config.components.iter().map(|c| c.name.as_str()).collect();

        Ok(code_actions::handle_code_action(&params, &text, &names))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != commands::REGISTER_COMPONENT_COMMAND {
            return Ok(None);
        }

        let component = commands::component_argument(&params.arguments);
        let uri = commands::uri_argument(&params.arguments);

        let (Some(component), Some(uri)) = (component, uri) else {
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!(
                        "{} expects a document URI and a {{ name, source }} component",
                        commands::REGISTER_COMPONENT_COMMAND
                    ),
                )
                .await;
            return Ok(None);
        };

        let Some(text) = self.documents.get(&uri) else {
            tracing::warn!("register requested for unopened document {}", uri.as_str());
            return Ok(None);
        };

        self.register(uri, &text, &component).await;
        Ok(None)
    }
}

#[tokio::main]
async fn main() {
    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
