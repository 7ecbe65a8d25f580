use crate::ast::Span;
use thiserror::Error;

/// Replacement of one byte range of the original text.
///
/// An empty replacement is a deletion; when a deletion leaves its line blank the whole
/// line, including its newline, goes with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    pub fn delete(span: Span) -> Self {
        Self {
            span,
            replacement: String::new(),
        }
    }

    pub fn is_delete(&self) -> bool {
        self.replacement.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("line {line}: edit range {start}..{end} is outside the text or splits a character")]
    OutOfBounds { line: u32, start: usize, end: usize },

    #[error("line {line}: edit overlaps another edit")]
    Overlap { line: u32 },
}

/// Apply `edits` to `text`. Offsets refer to the original text; edits may come in any order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut ranges = Vec::with_capacity(edits.len());
    for edit in edits {
        let Span { start, end, line } = edit.span;
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(EditError::OutOfBounds { line, start, end });
        }
        let (start, end) = if edit.is_delete() {
            widen_to_blank_line(text, start, end)
        } else {
            (start, end)
        };
        ranges.push((start, end, line, edit.replacement.as_str()));
    }

    ranges.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut out = text.to_string();
    let mut floor = text.len();
    for (start, end, line, replacement) in ranges {
        if end > floor {
            return Err(EditError::Overlap { line });
        }
        out.replace_range(start..end, replacement);
        floor = start;
    }
    Ok(out)
}

fn widen_to_blank_line(text: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[end..]
        .find('\n')
        .map(|i| end + i + 1)
        .unwrap_or(text.len());
    let before = &text[line_start..start];
    let after = text[end..line_end].trim_end_matches(['\n', '\r']);
    if before.trim().is_empty() && after.trim().is_empty() {
        (line_start, line_end)
    } else {
        (start, end)
    }
}
