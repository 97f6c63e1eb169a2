//! Top-level markup scanner
//!
//! Produces a flat list of the document's top-level elements. Nothing below the top level is
//! interpreted: nested markup is opaque text, except that same-name tags are counted so that
//! a `<template>` containing `<template #slot>` closes at the right tag.

/// Elements whose content is raw text and ends at the first matching close tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A top-level element with its byte ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    /// Tag name as written
    pub name: &'a str,
    /// Everything between the tag name and the closing `>` (or `/>`), trimmed
    pub raw_attrs: &'a str,
    /// Offset of the opening `<`
    pub start: usize,
    /// Offset just past the opening tag's `>`
    pub content_start: usize,
    /// Offset of the closing tag's `<`
    pub content_end: usize,
    /// Offset just past the closing tag's `>`
    pub end: usize,
    /// Written as `<name ... />`; content is empty and there is no closing tag
    pub self_closing: bool,
}

impl Element<'_> {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A parsed attribute; `value` is `None` for bare attributes like `setup` or `scoped`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Opening tag parsed at some offset
struct OpenTag<'a> {
    name: &'a str,
    raw_attrs: &'a str,
    end: usize,
    self_closing: bool,
}

/// Scan the document and return its top-level elements in order
///
/// An opening tag that never terminates, or an element without its closing tag, is dropped
/// and scanning resumes right after its `<`. An unterminated comment ends the scan.
#[must_use]
pub fn scan(text: &str) -> Vec<Element<'_>> {
    let bytes = text.as_bytes();
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find('<') {
        let start = pos + rel;
        let rest = &text[start..];

        if rest.starts_with("<!--") {
            let Some(close) = rest.find("-->") else {
                break;
            };
            pos = start + close + 3;
            continue;
        }

        // Doctype, processing instructions and stray close tags
        if rest.starts_with("<!") || rest.starts_with("<?") || rest.starts_with("</") {
            let Some(close) = rest.find('>') else {
                break;
            };
            pos = start + close + 1;
            continue;
        }

        if !bytes.get(start + 1).is_some_and(u8::is_ascii_alphabetic) {
            pos = start + 1;
            continue;
        }

        let Some(open) = read_open_tag(text, start) else {
            pos = start + 1;
            continue;
        };

        if open.self_closing {
            elements.push(Element {
                name: open.name,
                raw_attrs: open.raw_attrs,
                start,
                content_start: open.end,
                content_end: open.end,
                end: open.end,
                self_closing: true,
            });
            pos = open.end;
            continue;
        }

        let close = if RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| open.name.eq_ignore_ascii_case(raw))
        {
            find_close_tag(text, open.end, open.name)
        } else {
            find_balanced_close_tag(text, open.end, open.name)
        };

        let Some((content_end, end)) = close else {
            pos = start + 1;
            continue;
        };

        elements.push(Element {
            name: open.name,
            raw_attrs: open.raw_attrs,
            start,
            content_start: open.end,
            content_end,
            end,
            self_closing: false,
        });

        pos = end;
    }

    elements
}

/// Read an opening tag starting at the `<` at `start`
fn read_open_tag(text: &str, start: usize) -> Option<OpenTag<'_>> {
    let bytes = text.as_bytes();
    let name_start = start + 1;
    let mut i = name_start;

    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }

    let name_end = i;

    if name_end == name_start {
        return None;
    }

    // Walk the attributes honoring quotes, which may contain `>`; an unquoted `<` means the
    // tag was never finished and the next one has begun
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let close = text[i + 1..].find(char::from(quote))?;
                i += close + 2;
            }
            b'>' => break,
            b'<' => return None,
            _ => i += 1,
        }
    }

    if i >= bytes.len() {
        return None;
    }

    let self_closing = i > name_end && bytes[i - 1] == b'/';
    let attrs_end = if self_closing { i - 1 } else { i };

    Some(OpenTag {
        name: &text[name_start..name_end],
        raw_attrs: text[name_end..attrs_end].trim(),
        end: i + 1,
        self_closing,
    })
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Does `text` at `at` hold `</name` followed by optional whitespace and `>`?
/// Returns the offset just past the `>`.
fn match_close_tag(text: &str, at: usize, name: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let name_start = at + 2;
    let name_end = name_start + name.len();

    if !text[at..].starts_with("</") || name_end > bytes.len() {
        return None;
    }

    if !bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes()) {
        return None;
    }

    let mut i = name_end;

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    (bytes.get(i) == Some(&b'>')).then_some(i + 1)
}

/// Does `text` at `at` open a tag named `name`?
fn is_open_tag_of(text: &str, at: usize, name: &str) -> bool {
    let bytes = text.as_bytes();
    let name_end = at + 1 + name.len();

    name_end <= bytes.len()
        && bytes[at + 1..name_end].eq_ignore_ascii_case(name.as_bytes())
        && bytes
            .get(name_end)
            .is_some_and(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
}

/// First close tag of `name` at or after `from`
fn find_close_tag(text: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut pos = from;

    while let Some(rel) = text[pos..].find("</") {
        let at = pos + rel;

        if let Some(end) = match_close_tag(text, at, name) {
            return Some((at, end));
        }

        pos = at + 2;
    }

    None
}

/// Close tag of `name` at nesting depth zero, counting same-name opens in between
fn find_balanced_close_tag(text: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut pos = from;

    while let Some(rel) = text[pos..].find('<') {
        let at = pos + rel;
        let rest = &text[at..];

        if rest.starts_with("<!--") {
            pos = at + rest.find("-->")? + 3;
            continue;
        }

        if let Some(end) = match_close_tag(text, at, name) {
            if depth == 0 {
                return Some((at, end));
            }

            depth -= 1;
            pos = end;
            continue;
        }

        if is_open_tag_of(text, at, name) {
            if let Some(open) = read_open_tag(text, at) {
                if !open.self_closing {
                    depth += 1;
                }

                pos = open.end;
                continue;
            }
        }

        pos = at + 1;
    }

    None
}

/// Parse a raw attribute string in any order and with any quoting
#[must_use]
pub fn parse_attributes(raw: &str) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    let mut rest = raw.trim_start();

    while !rest.is_empty() {
        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        let mut value = None;

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();

            match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(quote).unwrap_or(body.len());
                    value = Some(body[..close].to_string());
                    rest = body.get(close + 1..).unwrap_or_default();
                }
                _ => {
                    let len = after_eq
                        .find(char::is_whitespace)
                        .unwrap_or(after_eq.len());
                    value = Some(after_eq[..len].to_string());
                    rest = &after_eq[len..];
                }
            }
        }

        if !name.is_empty() {
            attributes.push(Attribute {
                name: name.to_string(),
                value,
            });
        }

        rest = rest.trim_start();
    }

    attributes
}
