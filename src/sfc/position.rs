//! Offset <-> line/column translation
//!
//! Offsets are UTF-8 byte offsets into the document. Columns are UTF-16 code units since the
//! last `\n`, which is what LSP clients send and expect.

/// A point in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// Re-anchor a position computed relative to `origin` into `origin`'s coordinate space
    #[must_use]
    pub fn relative_to(self, origin: Position) -> Position {
        Position {
            line: origin.line + self.line,
            column: if self.line == 0 {
                origin.column + self.column
            } else {
                self.column
            },
            offset: origin.offset + self.offset,
        }
    }
}

/// A `[start, end)` span in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    #[must_use]
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start.line && line <= self.end.line
    }
}

/// Line start table for repeated lookups over the same text
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];

        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self { text, line_starts }
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Translate a byte offset; out-of-range offsets clamp to the end of the text
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());

        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];

        Position {
            line,
            column: self.text[line_start..offset].encode_utf16().count(),
            offset,
        }
    }

    #[must_use]
    pub fn location(&self, start: usize, end: usize) -> Location {
        Location {
            start: self.position(start),
            end: self.position(end),
        }
    }

    /// Translate a line/column pair back to a byte offset
    ///
    /// Lines past the end map to the end of the text; columns past the end of a line map to
    /// the end of that line (before its `\n`).
    #[must_use]
    pub fn offset(&self, line: usize, column: usize) -> usize {
        let Some(text) = self.line_text(line) else {
            return self.text.len();
        };

        self.line_starts[line] + utf16_to_byte_index(text, column)
    }

    /// Text of a line without its trailing `\n`
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);

        Some(&self.text[start..end])
    }

    /// Leading whitespace of a line
    #[must_use]
    pub fn indentation(&self, line: usize) -> &'a str {
        let text = self.line_text(line).unwrap_or_default();
        let trimmed = text.trim_start_matches([' ', '\t']);

        &text[..text.len() - trimmed.len()]
    }
}

/// One-off translation of a byte offset
#[must_use]
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    LineIndex::new(text).position(offset)
}

/// One-off translation of a line/column pair
#[must_use]
pub fn position_to_offset(text: &str, line: usize, column: usize) -> usize {
    LineIndex::new(text).offset(line, column)
}

/// Convert a UTF-16 column within a single line to a byte index into that line
pub fn utf16_to_byte_index(line: &str, character: usize) -> usize {
    let mut char_count = 0;

    for (i, c) in line.char_indices() {
        if char_count >= character {
            return i;
        }

        // Surrogate pairs count twice; a column pointing between them lands after the char
        char_count += c.len_utf16();
    }

    line.len()
}
