//! Completion capability - block, macro and component snippets

use crate::config::{ApiStyle, ServerConfig, Settings};
use crate::context::{self, Cursor};
use crate::sfc::macros::{find_define_macros, DefineMacros};
use crate::sfc::{self, ScriptBlock};
use crate::syntax::ComponentDescriptor;
use tower_lsp_server::ls_types::{
    CompletionItem, CompletionItemKind, CompletionParams, CompletionResponse, Documentation,
    InsertTextFormat, MarkupContent, MarkupKind,
};

/// Shown as the item detail
pub const SNIPPET_DETAIL: &str = "SFC LSP";

/// Elements offered as the root of a new template
const WRAPPER_ELEMENTS: &[&str] = &[
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
    "component",
    "RouterLink",
    "RouterView",
];

const DEFINE_LABELS: &[&str] = &["props", "emits", "slots"];

/// Handle completion request (pure function)
pub fn handle_completion(
    params: &CompletionParams,
    text: &str,
    config: &ServerConfig,
) -> Option<CompletionResponse> {
    let position = params.text_document_position.position;
    let cursor = Cursor::new(position.line as usize, position.character as usize);

    let items = completion_items(text, cursor, &config.sfc, &config.components);

    if items.is_empty() {
        return None;
    }

    Some(CompletionResponse::Array(items))
}

/// Snippets valid at `cursor`
///
/// Inside script setup: define macros not yet called. Inside the template: one element per
/// component. Outside every block: the blocks the document can still take. Plain scripts and
/// styles get nothing.
#[must_use]
pub fn completion_items(
    text: &str,
    cursor: Cursor,
    settings: &Settings,
    components: &[ComponentDescriptor],
) -> Vec<CompletionItem> {
    let sfc = sfc::parse(text);
    let inside = |loc: &sfc::Location| context::is_inside_block(cursor.line, loc);

    if let Some(setup) = sfc.script_setup.as_ref().filter(|s| inside(&s.block.loc)) {
        if !context::is_valid_in_script_setup(cursor, setup.statements()) {
            return Vec::new();
        }

        return define_snippets(setup);
    }

    if let Some(template) = sfc.template.as_ref().filter(|t| inside(&t.loc)) {
        if !context::is_valid_in_template(cursor, template) {
            return Vec::new();
        }

        return component_snippets(components, template.lang());
    }

    let in_script = sfc.script.as_ref().is_some_and(|s| inside(&s.block.loc));
    let in_style = sfc.styles.iter().any(|s| inside(&s.block.loc));

    if in_script || in_style {
        return Vec::new();
    }

    let mut items = Vec::new();
    let script_lang = |other: Option<&ScriptBlock>| {
        other
            .and_then(|s| s.block.lang())
            .or(settings.preprocessors.script_lang())
            .map(str::to_string)
    };

    if sfc.script.is_none() {
        let lang = script_lang(sfc.script_setup.as_ref());
        items.extend(script_snippets(settings, lang.as_deref()));
    }

    if sfc.script_setup.is_none() && settings.prefers_script_setup() {
        let lang = script_lang(sfc.script.as_ref());
        items.push(script_setup_snippet(lang.as_deref()));
    }

    if sfc.template.is_none() {
        items.extend(template_snippets(
            components,
            settings.preprocessors.template_lang(),
        ));
    }

    items.extend(style_snippets(settings.preprocessors.style_lang()));
    items
}

fn snippet(label: &str, insert_text: String, documentation: Option<String>) -> CompletionItem {
    let documentation =
        documentation.unwrap_or_else(|| format!("```vue\n{}", insert_text.replacen("$0", "|", 1)));

    CompletionItem {
        label: label.to_string(),
        kind: Some(CompletionItemKind::SNIPPET),
        detail: Some(SNIPPET_DETAIL.to_string()),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: documentation,
        })),
        insert_text: Some(insert_text),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        ..Default::default()
    }
}

fn lang_attribute(lang: Option<&str>) -> String {
    lang.map(|lang| format!(" lang=\"{lang}\"")).unwrap_or_default()
}

fn define_snippets(setup: &ScriptBlock) -> Vec<CompletionItem> {
    let typed = setup.is_typed();

    let existing = find_define_macros(&setup.block.content).unwrap_or_else(|e| {
        tracing::debug!("define macro lookup failed: {e}");
        DefineMacros::default()
    });

    DEFINE_LABELS
        .iter()
        .filter(|label| !existing.has(label))
        .filter(|label| typed || **label != "slots")
        .map(|label| {
            let mut chars = label.chars();
            let capitalized: String = chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default();
            let define = format!("define{capitalized}");

            let (insert_text, documentation) = if typed {
                (
                    format!("const {label} = {define}<$0>()"),
                    format!("```typescript\nconst {label} = {define}<|>()"),
                )
            } else {
                (
                    format!("const {label} = {define}($0)"),
                    format!("```javascript\nconst {label} = {define}(|)"),
                )
            };

            snippet(label, insert_text, Some(documentation))
        })
        .collect()
}

fn component_snippets(components: &[ComponentDescriptor], lang: Option<&str>) -> Vec<CompletionItem> {
    components
        .iter()
        .map(|component| {
            let name = &component.name;

            let (insert_text, documentation) = if lang == Some("pug") {
                (name.clone(), format!("```pug\n{name}|"))
            } else {
                (
                    format!("<{name}$0></{name}>"),
                    format!("```html\n<{name}|></{name}>"),
                )
            };

            snippet(name, insert_text, Some(documentation))
        })
        .collect()
}

fn script_snippets(settings: &Settings, lang: Option<&str>) -> Vec<CompletionItem> {
    let mut content = if lang == Some("ts") {
        "import { defineComponent } from 'vue'\n\nexport default defineComponent({\n\t$0\n})"
            .to_string()
    } else {
        "export default {\n\t$0\n}".to_string()
    };

    // A setup() option only when script setup is not the preferred style
    if settings.api == ApiStyle::Composition && !settings.use_script_setup {
        content = content.replacen("$0", "setup() {\n\t\t$0\n\t}", 1);
    }

    vec![
        snippet(
            "script",
            format!("<script{}>\n{content}\n</script>\n", lang_attribute(lang)),
            None,
        ),
        snippet(
            "script src",
            "<script src=\"$0\"></script>".to_string(),
            None,
        ),
    ]
}

fn script_setup_snippet(lang: Option<&str>) -> CompletionItem {
    snippet(
        "script setup",
        format!("<script setup{}>\n$0\n</script>\n", lang_attribute(lang)),
        None,
    )
}

fn template_snippets(components: &[ComponentDescriptor], lang: Option<&str>) -> Vec<CompletionItem> {
    let wrappers: Vec<&str> = WRAPPER_ELEMENTS
        .iter()
        .copied()
        .chain(components.iter().map(|c| c.name.as_str()))
        .collect();
    let wrappers = wrappers.join(",");

    let template = if lang == Some("pug") {
        snippet(
            "template",
            format!("<template lang=\"pug\">\n\t${{1|{wrappers}|}}$0\n</template>\n"),
            Some("```vue\n<template lang=\"pug\">\n\tmain|\n</template>\n".to_string()),
        )
    } else {
        snippet(
            "template",
            format!("<template>\n\t<${{1|{wrappers}|}}$0>\n\t\t\n\t</$1>\n</template>\n"),
            Some("```vue\n<template>\n\t<main|>\n\t\t\n\t</main>\n</template>\n".to_string()),
        )
    };

    vec![
        template,
        snippet(
            "template src",
            "<template src=\"$0\"></template>".to_string(),
            None,
        ),
    ]
}

fn style_snippets(lang: Option<&str>) -> Vec<CompletionItem> {
    let lang = lang_attribute(lang);

    ["style", "style module", "style scoped"]
        .iter()
        .map(|label| snippet(label, format!("<{label}{lang}>\n$0\n</style>\n"), None))
        .chain(std::iter::once(snippet(
            "style src",
            "<style src=\"$0\"></style>".to_string(),
            None,
        )))
        .collect()
}
