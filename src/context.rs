//! Cursor context predicates gating completion and auto-registration

use crate::sfc::position::utf16_to_byte_index;
use crate::sfc::{Block, Location, Statement};

/// Editor cursor (zero-based line, UTF-16 column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Cursor line lies within the block's lines, tag lines included
#[must_use]
pub fn is_inside_block(line: usize, loc: &Location) -> bool {
    loc.contains_line(line)
}

/// Whether a new top-level statement can be started at the cursor
///
/// The first statement whose lines hold the cursor decides: past the end of a single-line
/// statement is fine, anywhere in a multi-line one is not. Blank space is always fine.
#[must_use]
pub fn is_valid_in_script_setup(cursor: Cursor, statements: &[Statement]) -> bool {
    let Some(statement) = statements
        .iter()
        .find(|s| s.loc.contains_line(cursor.line))
    else {
        return true;
    };

    statement.loc.is_single_line() && cursor.column > statement.loc.end.column
}

/// Whether the cursor sits where a new element could be written
///
/// Looks for the next angle bracket after the cursor, first on the cursor's line and then at
/// the start of the following lines. A `<` means the cursor is between elements, a `>` means
/// it is inside an opening tag. Cursors on the tag lines of the block are never valid.
#[must_use]
pub fn is_valid_in_template(cursor: Cursor, template: &Block) -> bool {
    let Some(relative) = cursor.line.checked_sub(template.loc.start.line + 1) else {
        return false;
    };

    let lines: Vec<&str> = template.content.split('\n').collect();
    let interior = lines.get(1..lines.len().saturating_sub(1)).unwrap_or_default();

    let Some(current) = interior.get(relative) else {
        return false;
    };

    if current.contains(['<', '>']) {
        let at = utf16_to_byte_index(current, cursor.column);

        for c in current[at..].chars() {
            match c {
                '<' => return true,
                '>' => return false,
                _ => {}
            }
        }

        return true;
    }

    for line in &interior[relative + 1..] {
        let trimmed = line.trim_start();

        if trimmed.starts_with('<') {
            return true;
        }

        if trimmed.starts_with('>') {
            return false;
        }
    }

    true
}

/// Edited lines lie strictly between the template's tag lines
#[must_use]
pub fn is_inside_template_change(start_line: usize, end_line: usize, template: &Block) -> bool {
    start_line > template.loc.start.line && end_line < template.loc.end.line
}
