//! Document store tests

use sfc_lsp::documents::{apply_change, DocumentStore};
use tower_lsp_server::ls_types::{Position, Range, TextDocumentContentChangeEvent, Uri};

fn change(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: Some(Range::new(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
        )),
        range_length: None,
        text: text.to_string(),
    }
}

#[test]
fn test_incremental_insert_and_delete() {
    let mut text = "<template>\n  <div/>\n</template>\n".to_string();

    apply_change(&mut text, &change((1, 2), (1, 2), "<Foo />\n  "));
    assert_eq!(text, "<template>\n  <Foo />\n  <div/>\n</template>\n");

    apply_change(&mut text, &change((2, 0), (3, 0), ""));
    assert_eq!(text, "<template>\n  <Foo />\n</template>\n");
}

#[test]
fn test_columns_are_utf16() {
    let mut text = "\u{1F600}ab".to_string();

    // The emoji takes two UTF-16 code units
    apply_change(&mut text, &change((0, 2), (0, 3), "X"));

    assert_eq!(text, "\u{1F600}Xb");
}

#[test]
fn test_full_replacement() {
    let mut text = "old".to_string();

    apply_change(
        &mut text,
        &TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new".to_string(),
        },
    );

    assert_eq!(text, "new");
}

#[test]
fn test_out_of_range_change_appends() {
    let mut text = "a\n".to_string();

    apply_change(&mut text, &change((5, 0), (5, 0), "b"));

    assert_eq!(text, "a\nb");
}

#[test]
fn test_store_lifecycle() {
    let store = DocumentStore::new();
    let uri: Uri = "file:///app/App.vue".parse().unwrap();

    assert!(store.apply_changes(&uri, &[change((0, 0), (0, 0), "x")]).is_none());

    store.open(uri.clone(), "<template></template>".to_string());

    let text = store
        .apply_changes(
            &uri,
            &[
                change((0, 10), (0, 10), "<A/>"),
                change((0, 14), (0, 14), "<B/>"),
            ],
        )
        .unwrap();

    assert_eq!(text, "<template><A/><B/></template>");
    assert_eq!(store.get(&uri).as_deref(), Some("<template><A/><B/></template>"));

    store.close(&uri);
    assert!(store.get(&uri).is_none());
}
