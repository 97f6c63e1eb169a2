//! Completion snippet and UTF-16 column tests

mod common;

use common::{component, load_fixture};
use sfc_lsp::capabilities::completion::{completion_items, SNIPPET_DETAIL};
use sfc_lsp::config::{ApiStyle, Preprocessors, Settings, TemplatePreprocessor};
use sfc_lsp::context::Cursor;
use sfc_lsp::sfc::position::utf16_to_byte_index;
use tower_lsp_server::ls_types::{CompletionItem, Documentation, InsertTextFormat};

fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

fn insert_text<'a>(items: &'a [CompletionItem], label: &str) -> &'a str {
    items
        .iter()
        .find(|item| item.label == label)
        .and_then(|item| item.insert_text.as_deref())
        .unwrap_or_else(|| panic!("no item {label}"))
}

#[test]
fn test_utf16_to_byte_index_basic() {
    let s = "a\u{0431}c";
    assert_eq!(utf16_to_byte_index(s, 0), 0); // before 'a'
    assert_eq!(utf16_to_byte_index(s, 1), 1); // before the Cyrillic letter
    assert_eq!(utf16_to_byte_index(s, 2), 3); // before 'c' (1+2 bytes)
    assert_eq!(utf16_to_byte_index(s, 3), 4); // end
}

#[test]
fn test_utf16_to_byte_index_supplemental() {
    // U+10400 is 2 UTF-16 code units and 4 UTF-8 bytes
    let s = "a\u{10400}c";
    assert_eq!(utf16_to_byte_index(s, 0), 0);
    assert_eq!(utf16_to_byte_index(s, 1), 1);
    assert_eq!(utf16_to_byte_index(s, 3), 5);
    assert_eq!(utf16_to_byte_index(s, 4), 6);
}

#[test]
fn test_utf16_to_byte_index_past_end() {
    assert_eq!(utf16_to_byte_index("test\u{4f60}\u{597d}", 6), 10);
    assert_eq!(utf16_to_byte_index("abc", 99), 3);
    assert_eq!(utf16_to_byte_index("", 1), 0);
}

#[cfg(test)]
mod block_snippet_tests {
    use super::*;

    #[test]
    fn test_empty_document_offers_every_block() {
        let items = completion_items("", Cursor::new(0, 0), &Settings::default(), &[]);

        assert_eq!(
            labels(&items),
            vec![
                "script",
                "script src",
                "script setup",
                "template",
                "template src",
                "style",
                "style module",
                "style scoped",
                "style src",
            ]
        );

        for item in &items {
            assert_eq!(item.detail.as_deref(), Some(SNIPPET_DETAIL));
            assert_eq!(item.insert_text_format, Some(InsertTextFormat::SNIPPET));
        }
    }

    #[test]
    fn test_options_api_has_no_script_setup() {
        let settings = Settings {
            api: ApiStyle::Options,
            ..Settings::default()
        };

        let items = completion_items("", Cursor::new(0, 0), &settings, &[]);

        assert!(!labels(&items).contains(&"script setup"));
        assert_eq!(insert_text(&items, "script"), "<script>\nexport default {\n\t$0\n}\n</script>\n");
    }

    #[test]
    fn test_setup_option_without_script_setup() {
        let settings = Settings {
            use_script_setup: false,
            ..Settings::default()
        };

        let items = completion_items("", Cursor::new(0, 0), &settings, &[]);

        assert_eq!(
            insert_text(&items, "script"),
            "<script>\nexport default {\n\tsetup() {\n\t\t$0\n\t}\n}\n</script>\n"
        );
    }

    #[test]
    fn test_existing_blocks_are_not_offered() {
        let text = load_fixture("vue/script_setup_ts.vue");

        // Blank line between </script> and <template>
        let items = completion_items(&text, Cursor::new(7, 0), &Settings::default(), &[]);

        assert_eq!(
            labels(&items),
            vec!["script", "script src", "style", "style module", "style scoped", "style src"]
        );
        assert!(insert_text(&items, "script").starts_with(
            "<script lang=\"ts\">\nimport { defineComponent } from 'vue'\n\nexport default defineComponent({"
        ));
    }

    #[test]
    fn test_half_typed_tag_above_existing_blocks() {
        let text = "<scr\n\n<template>\n  <div/>\n</template>\n<script setup>\nconst a = 1\n</script>\n";

        let items = completion_items(text, Cursor::new(0, 4), &Settings::default(), &[]);

        assert_eq!(
            labels(&items),
            vec!["script", "script src", "style", "style module", "style scoped", "style src"]
        );
    }

    #[test]
    fn test_template_wrapper_choices_include_components() {
        let items = completion_items(
            "",
            Cursor::new(0, 0),
            &Settings::default(),
            &[component("Foo")],
        );

        let template = insert_text(&items, "template");
        assert!(template.starts_with("<template>\n\t<${1|main,section,div,"));
        assert!(template.contains(",RouterView,Foo|}$0>"));
    }

    #[test]
    fn test_style_preview_documentation() {
        let items = completion_items("", Cursor::new(0, 0), &Settings::default(), &[]);

        let style = items.iter().find(|item| item.label == "style").unwrap();
        let Some(Documentation::MarkupContent(doc)) = &style.documentation else {
            panic!("expected markup documentation");
        };

        assert_eq!(doc.value, "```vue\n<style>\n|\n</style>\n");
    }
}

#[cfg(test)]
mod block_context_tests {
    use super::*;

    #[test]
    fn test_define_macros_skip_existing_calls() {
        let text = load_fixture("vue/script_setup_ts.vue");

        let items = completion_items(&text, Cursor::new(3, 0), &Settings::default(), &[]);

        assert_eq!(labels(&items), vec!["emits", "slots"]);
        assert_eq!(insert_text(&items, "emits"), "const emits = defineEmits<$0>()");
    }

    #[test]
    fn test_untyped_setup_has_no_slots() {
        let text = "<script setup>\n\n</script>\n";

        let items = completion_items(text, Cursor::new(1, 0), &Settings::default(), &[]);

        assert_eq!(labels(&items), vec!["props", "emits"]);
        assert_eq!(insert_text(&items, "props"), "const props = defineProps($0)");
    }

    #[test]
    fn test_nothing_inside_statement() {
        let text = load_fixture("vue/script_setup_ts.vue");

        let items = completion_items(&text, Cursor::new(4, 3), &Settings::default(), &[]);

        assert!(items.is_empty());
    }

    #[test]
    fn test_component_snippets_in_template() {
        let text = load_fixture("vue/script_setup_ts.vue");
        let components = [component("Foo"), component("Bar")];

        let items = completion_items(&text, Cursor::new(10, 0), &Settings::default(), &components);

        assert_eq!(labels(&items), vec!["Foo", "Bar"]);
        assert_eq!(insert_text(&items, "Foo"), "<Foo$0></Foo>");
    }

    #[test]
    fn test_pug_template_uses_bare_names() {
        let text = "<template lang=\"pug\">\ndiv\n  \n</template>\n";

        let items = completion_items(
            text,
            Cursor::new(2, 2),
            &Settings::default(),
            &[component("Foo")],
        );

        assert_eq!(insert_text(&items, "Foo"), "Foo");
    }

    #[test]
    fn test_pug_template_snippet() {
        let settings = Settings {
            preprocessors: Preprocessors {
                template: Some(TemplatePreprocessor::Pug),
                ..Preprocessors::default()
            },
            ..Settings::default()
        };

        let items = completion_items("", Cursor::new(0, 0), &settings, &[]);

        assert!(insert_text(&items, "template").starts_with("<template lang=\"pug\">\n\t${1|main,"));
    }

    #[test]
    fn test_nothing_in_plain_script_or_style() {
        let text = load_fixture("vue/options_api.vue");

        assert!(completion_items(&text, Cursor::new(9, 0), &Settings::default(), &[]).is_empty());
        assert!(completion_items(&text, Cursor::new(19, 2), &Settings::default(), &[]).is_empty());
    }
}
