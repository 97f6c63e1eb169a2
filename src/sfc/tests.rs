//! Tests for sfc module

use super::statements::{Declaration, PropertyValue};
use super::*;
use crate::syntax::ParseError;

#[test]
fn test_template_location() {
    let sfc = parse("<template>\n  <div/>\n</template>\n");

    let template = sfc.template.expect("template block");
    assert_eq!(template.loc.start.line, 0);
    assert_eq!(template.loc.end.line, 2);
    assert_eq!(template.loc.end.column, 11);
    assert_eq!(template.content, "\n  <div/>\n");
    assert_eq!(template.content_loc.start.column, 10);
}

#[test]
fn test_block_slices_roundtrip() {
    let text = r#"<script setup lang="ts">
import Foo from './Foo.vue'
</script>

<template>
  <Foo />
</template>

<style scoped>
.a { color: red; }
</style>
"#;

    let sfc = parse(text);
    let blocks = sfc.blocks();
    assert_eq!(blocks.len(), 3);

    for block in blocks {
        let slice = &text[block.loc.start.offset..block.loc.end.offset];
        let inner = &slice[block.content_loc.start.offset - block.loc.start.offset
            ..block.content_loc.end.offset - block.loc.start.offset];

        assert_eq!(inner, block.content);
        assert!(slice.starts_with('<'), "slice {slice:?}");
        assert!(slice.ends_with('>'), "slice {slice:?}");
    }
}

#[test]
fn test_blocks_are_disjoint_and_ordered() {
    let text = "<template><div/></template>\n<script>\nexport default {}\n</script>\n<style>\n</style>\n";

    let sfc = parse(text);
    let blocks = sfc.blocks();

    for pair in blocks.windows(2) {
        assert!(pair[0].loc.end.offset <= pair[1].loc.start.offset);
    }
}

#[test]
fn test_attributes_in_any_quoting() {
    let text = "<script setup lang='ts'>\n</script>\n<style lang=scss module>\n</style>\n<style scoped lang=\"less\">\n</style>\n";

    let sfc = parse(text);

    let setup = sfc.script_setup.expect("script setup block");
    assert!(setup.setup);
    assert!(setup.is_typed());
    assert!(sfc.script.is_none());

    assert_eq!(sfc.styles.len(), 2);
    assert_eq!(sfc.styles[0].block.lang(), Some("scss"));
    assert!(sfc.styles[0].module);
    assert!(!sfc.styles[0].scoped);
    assert_eq!(sfc.styles[1].block.lang(), Some("less"));
    assert!(sfc.styles[1].scoped);
    assert!(!sfc.styles[1].module);
}

#[test]
fn test_src_attribute() {
    let sfc = parse("<template src=\"./view.html\"></template>\n");

    let template = sfc.template.expect("template block");
    assert_eq!(template.src.as_deref(), Some("./view.html"));
    assert!(template.is_empty());
}

#[test]
fn test_script_partitioned_by_setup() {
    let text = "<script>\nexport default {}\n</script>\n<script setup>\nconst a = 1\n</script>\n<script setup>\nconst b = 2\n</script>\n";

    let sfc = parse(text);

    let script = sfc.script.expect("plain script");
    let setup = sfc.script_setup.expect("script setup");

    assert!(!script.setup);
    assert!(setup.setup);
    assert!(setup.block.content.contains("const a"));
}

#[test]
fn test_statements_use_document_coordinates() {
    let text = "<template>\n  <div/>\n</template>\n\n<script setup>\nimport Foo from './Foo.vue'\nconst a = 1\n</script>\n";

    let sfc = parse(text);
    let setup = sfc.script_setup.expect("script setup block");
    let statements = setup.statements();

    assert_eq!(statements.len(), 2);

    let import = statements[0].as_import().expect("import statement");
    assert_eq!(import.source, "./Foo.vue");
    assert_eq!(import.specifiers, vec!["Foo".to_string()]);

    assert_eq!(statements[0].loc.start.line, 5);
    assert_eq!(statements[0].loc.start.column, 0);
    assert_eq!(statements[0].loc.start.offset, text.find("import").unwrap());
    assert_eq!(statements[0].loc.end.column, 27);

    assert_eq!(statements[1].kind, StatementKind::Other);
    assert_eq!(statements[1].loc.start.line, 6);
}

#[test]
fn test_first_line_statement_shifted_by_tag_width() {
    let text = "<script setup>import A from 'a'</script>";

    let sfc = parse(text);
    let statements = sfc.script_setup.expect("script setup").ast.unwrap();

    assert_eq!(statements[0].loc.start.line, 0);
    assert_eq!(statements[0].loc.start.column, 14);
}

#[test]
fn test_bare_identifier_is_filtered() {
    let text = "<script>\nfoo;\nexport default {}\n</script>\n";

    let sfc = parse(text);
    let statements = sfc.script.expect("script block").ast.unwrap();

    assert_eq!(statements.len(), 1);
    assert!(statements[0].as_export_default().is_some());
}

#[test]
fn test_comments_are_not_statements() {
    let text = "<script>\n// leading\n/* block */\nexport default {}\n</script>\n";

    let statements = parse(text).script.expect("script block").ast.unwrap();

    assert_eq!(statements.len(), 1);
}

#[test]
fn test_import_specifiers() {
    let text = "<script>\nimport Def, { a, b as c } from 'mod'\nimport * as ns from \"ns\"\nimport 'side-effect'\n</script>\n";

    let script = parse(text).script.expect("script block");
    let imports: Vec<_> = script.imports().collect();

    assert_eq!(imports.len(), 3);
    assert_eq!(imports[0].specifiers, vec!["Def", "a", "c"]);
    assert_eq!(imports[1].source, "ns");
    assert_eq!(imports[1].specifiers, vec!["ns"]);
    assert!(imports[2].specifiers.is_empty());
}

#[test]
fn test_export_default_object_components() {
    let text = "<script>\nexport default {\n  name: 'App',\n  components: { Foo, 'Bar': Baz },\n}\n</script>\n";

    let script = parse(text).script.expect("script block");
    let export = script
        .statements()
        .iter()
        .find_map(Statement::as_export_default)
        .expect("default export");

    assert!(matches!(export.declaration, Declaration::Object(_)));

    let components = export
        .options()
        .and_then(|o| o.property("components"))
        .and_then(|p| p.as_object())
        .expect("components object");

    assert!(components.lists("Foo"));
    assert!(components.lists("Bar"));
    assert!(components.lists("Baz"));
    assert!(!components.lists("Qux"));
    assert_eq!(components.loc.start.line, 3);
}

#[test]
fn test_export_default_call() {
    let text = "<script lang=\"ts\">\nexport default defineComponent({\n  components: { Foo },\n})\n</script>\n";

    let script = parse(text).script.expect("script block");
    let export = script.statements()[0]
        .as_export_default()
        .expect("default export");

    let Declaration::Call(call) = &export.declaration else {
        panic!("expected call declaration, got {:?}", export.declaration);
    };

    assert_eq!(call.callee, "defineComponent");
    assert!(call.argument.is_some());

    let components = export.options().and_then(|o| o.property("components"));
    assert!(matches!(
        components.map(|p| &p.value),
        Some(PropertyValue::Object(_))
    ));
}

#[test]
fn test_export_default_call_without_arguments() {
    let text = "<script lang=\"ts\">\nexport default defineComponent()\n</script>\n";

    let script = parse(text).script.expect("script block");
    let export = script.statements()[0]
        .as_export_default()
        .expect("default export");

    let Declaration::Call(call) = &export.declaration else {
        panic!("expected call declaration");
    };

    assert!(call.argument.is_none());
    assert_eq!(call.arguments.start.column, 30);
    assert!(export.options().is_none());
}

#[test]
fn test_parse_error_keeps_other_blocks() {
    let text = "<template><div/></template>\n<script setup>\nconst = 1\n</script>\n<style scoped>\n.a{}\n</style>\n";

    let sfc = parse(text);

    let setup = sfc.script_setup.expect("script setup block");
    match &setup.ast {
        Err(ParseError::Syntax { line, .. }) => assert!((1..=3).contains(line)),
        other => panic!("expected syntax error, got {other:?}"),
    }
    assert!(setup.statements().is_empty());

    assert!(sfc.template.is_some());
    assert_eq!(sfc.styles.len(), 1);
    assert!(sfc.styles[0].scoped);
}

#[test]
fn test_empty_document() {
    assert_eq!(parse(""), Sfc::default());
    assert_eq!(parse("just some text\n"), Sfc::default());
}

#[test]
fn test_unclosed_block_is_omitted() {
    let sfc = parse("<template>\n<div/>\n</template>\n<script setup>\nconst a = 1\n");

    assert!(sfc.template.is_some());
    assert!(sfc.script_setup.is_none());
}

#[test]
fn test_nested_template_closes_at_matching_depth() {
    let text = "<template>\n  <template v-if=\"x\">a</template>\n</template>\n";

    let template = parse(text).template.expect("template block");

    assert_eq!(template.loc.end.line, 2);
    assert!(template.content.contains("v-if"));
}

#[test]
fn test_top_level_comment_is_skipped() {
    let text = "<!-- <script>bad</script> -->\n<script>\nexport default {}\n</script>\n";

    let script = parse(text).script.expect("script block");

    assert_eq!(script.block.content, "\nexport default {}\n");
    assert_eq!(script.block.loc.start.line, 1);
}

#[test]
fn test_half_typed_tag_keeps_following_blocks() {
    let text = "<scr\n\n<template>\n  <div/>\n</template>\n<script setup>\nconst a = 1\n</script>\n";
    let sfc = parse(text);

    let template = sfc.template.expect("template block");
    assert_eq!(template.loc.start.line, 2);

    let setup = sfc.script_setup.expect("script setup block");
    assert_eq!(setup.statements().len(), 1);
}

#[test]
fn test_self_closing_script_is_absent() {
    let sfc = parse("<script setup />\n<script src=\"./a.ts\" />\n<template>\n  <Foo />\n</template>\n");

    assert!(sfc.script_setup.is_none());
    assert!(sfc.script.is_none());
    assert!(sfc.template.is_some());
}
