//! Text synthesized into documents

use crate::config::{ApiStyle, ScriptPreprocessor, Settings};
use crate::syntax::ComponentDescriptor;

/// Import of the typed component wrapper
pub const TYPE_HELPER_IMPORT: &str = "import { defineComponent } from 'vue'";

/// Binding introduced by [`TYPE_HELPER_IMPORT`]
pub const TYPE_HELPER: &str = "defineComponent";

const SETUP_OPTION: &str = "setup() {\n\t\t\n\t},";

#[must_use]
pub fn import_statement(component: &ComponentDescriptor) -> String {
    format!("import {} from '{}'", component.name, component.source)
}

/// `components` option registering a single component
#[must_use]
pub fn components_option(component: &ComponentDescriptor) -> String {
    format!("components: {{\n\t\t{},\n\t}},", component.name)
}

/// Default export with a `components` option, plus a `setup()` stub for the Composition API
#[must_use]
pub fn default_export(component: &ComponentDescriptor, settings: &Settings, typed: bool) -> String {
    let mut options = components_option(component);

    if settings.api == ApiStyle::Composition {
        options.push_str("\n\t");
        options.push_str(SETUP_OPTION);
    }

    if typed {
        format!("export default {TYPE_HELPER}({{\n\t{options}\n}})")
    } else {
        format!("export default {{\n\t{options}\n}}")
    }
}

/// Complete body of a plain script block
#[must_use]
pub fn script_content(component: &ComponentDescriptor, settings: &Settings, typed: bool) -> String {
    let mut content = String::new();

    if typed {
        content.push_str(TYPE_HELPER_IMPORT);
        content.push('\n');
    }

    content.push_str(&import_statement(component));
    content.push_str("\n\n");
    content.push_str(&default_export(component, settings, typed));
    content
}

fn lang_attribute(settings: &Settings) -> String {
    settings
        .preprocessors
        .script_lang()
        .map(|lang| format!(" lang=\"{lang}\""))
        .unwrap_or_default()
}

/// A new script block for a document without one, followed by a blank line
#[must_use]
pub fn new_script_block(component: &ComponentDescriptor, settings: &Settings) -> String {
    let lang = lang_attribute(settings);

    if settings.prefers_script_setup() {
        format!(
            "<script setup{lang}>\n{}\n</script>\n\n",
            import_statement(component)
        )
    } else {
        let typed = settings.preprocessors.script == Some(ScriptPreprocessor::Ts);

        format!(
            "<script{lang}>\n{}\n</script>\n\n",
            script_content(component, settings, typed)
        )
    }
}
