//! Settings supplied by the client and how they are loaded

use crate::syntax::ComponentDescriptor;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tower_lsp_server::ls_types::{ConfigurationItem, MessageType};
use tower_lsp_server::Client;

/// Configuration section holding [`Settings`]
pub const SETTINGS_SECTION: &str = "sfcLsp.sfc";

/// Configuration section holding the component list
pub const COMPONENTS_SECTION: &str = "sfcLsp.components";

/// Which component API synthesized code targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ApiStyle {
    #[default]
    #[serde(rename = "Composition API")]
    Composition,
    #[serde(rename = "Options API")]
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPreprocessor {
    Ts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePreprocessor {
    Pug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreprocessor {
    Less,
    Postcss,
    Sass,
    Scss,
    Stylus,
}

/// Unknown preprocessor name in settings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preprocessor `{0}`")]
pub struct UnknownPreprocessor(pub String);

impl FromStr for ScriptPreprocessor {
    type Err = UnknownPreprocessor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ts" => Ok(Self::Ts),
            other => Err(UnknownPreprocessor(other.to_string())),
        }
    }
}

impl FromStr for TemplatePreprocessor {
    type Err = UnknownPreprocessor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pug" => Ok(Self::Pug),
            other => Err(UnknownPreprocessor(other.to_string())),
        }
    }
}

impl FromStr for StylePreprocessor {
    type Err = UnknownPreprocessor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "less" => Ok(Self::Less),
            "postcss" => Ok(Self::Postcss),
            "sass" => Ok(Self::Sass),
            "scss" => Ok(Self::Scss),
            "stylus" => Ok(Self::Stylus),
            other => Err(UnknownPreprocessor(other.to_string())),
        }
    }
}

impl ScriptPreprocessor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ts => "ts",
        }
    }
}

impl TemplatePreprocessor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pug => "pug",
        }
    }
}

impl StylePreprocessor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::Postcss => "postcss",
            Self::Sass => "sass",
            Self::Scss => "scss",
            Self::Stylus => "stylus",
        }
    }
}

/// Preprocessors used for newly synthesized blocks; `"none"` reads as absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preprocessors {
    #[serde(deserialize_with = "none_as_absent")]
    pub script: Option<ScriptPreprocessor>,
    #[serde(deserialize_with = "none_as_absent")]
    pub template: Option<TemplatePreprocessor>,
    #[serde(deserialize_with = "none_as_absent")]
    pub style: Option<StylePreprocessor>,
}

impl Preprocessors {
    #[must_use]
    pub fn script_lang(&self) -> Option<&'static str> {
        self.script.map(ScriptPreprocessor::as_str)
    }

    #[must_use]
    pub fn template_lang(&self) -> Option<&'static str> {
        self.template.map(TemplatePreprocessor::as_str)
    }

    #[must_use]
    pub fn style_lang(&self) -> Option<&'static str> {
        self.style.map(StylePreprocessor::as_str)
    }
}

/// Authoring preferences passed explicitly into every core call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api: ApiStyle,
    pub use_script_setup: bool,
    pub preprocessors: Preprocessors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiStyle::Composition,
            use_script_setup: true,
            preprocessors: Preprocessors::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn prefers_script_setup(&self) -> bool {
        self.api == ApiStyle::Composition && self.use_script_setup
    }
}

/// Everything the server needs from the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub sfc: Settings,
    pub components: Vec<ComponentDescriptor>,
}

fn none_as_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref() {
        None | Some("" | "none") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Read `initializationOptions`; falls back to defaults on malformed input
#[must_use]
pub fn from_initialization_options(options: Option<serde_json::Value>) -> ServerConfig {
    let Some(options) = options else {
        return ServerConfig::default();
    };

    serde_json::from_value(options).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed initialization options: {e}");
        ServerConfig::default()
    })
}

/// Load settings and components from the client's `workspace/configuration`
///
/// Sections the client does not answer keep their current value in `config`.
pub async fn load_configuration(client: &Client, config: &mut ServerConfig) {
    let items = vec![
        ConfigurationItem {
            scope_uri: None,
            section: Some(SETTINGS_SECTION.to_string()),
        },
        ConfigurationItem {
            scope_uri: None,
            section: Some(COMPONENTS_SECTION.to_string()),
        },
    ];

    let Ok(response) = client.configuration(items).await else {
        return;
    };

    let mut iter = response.into_iter();

    // Handle settings
    if let Some(value) = iter.next().filter(|v| !v.is_null()) {
        match serde_json::from_value::<Settings>(value) {
            Ok(settings) => config.sfc = settings,
            Err(e) => {
                client
                    .log_message(
                        MessageType::WARNING,
                        format!("Invalid {SETTINGS_SECTION} settings: {e}"),
                    )
                    .await;
            }
        }
    }

    // Handle components
    if let Some(value) = iter.next().filter(|v| !v.is_null()) {
        match serde_json::from_value::<Vec<ComponentDescriptor>>(value) {
            Ok(components) => {
                client
                    .log_message(
                        MessageType::INFO,
                        format!("Loaded {} components", components.len()),
                    )
                    .await;

                config.components = components;
            }
            Err(e) => {
                client
                    .log_message(
                        MessageType::WARNING,
                        format!("Invalid {COMPONENTS_SECTION} list: {e}"),
                    )
                    .await;
            }
        }
    }
}
