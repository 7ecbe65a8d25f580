//! Parser for the game's brace-delimited script format.
//!
//! The format is a sequence of `key = value` entries where a value is either a scalar
//! (bare word or quoted string) or a `{ ... }` block. Blocks may also hold bare values
//! (`{ a b c }`). `#` starts a comment that runs to the end of the line.
//!
//! Every scalar and entry keeps its byte span and line so callers can rewrite single
//! tokens without reformatting the file. This crate does no IO.

#![forbid(unsafe_code)]

mod ast;
mod edit;
mod error;
mod lexer;
mod parser;

pub use ast::{Block, Document, Entry, Item, Operator, Scalar, Span, Value};
pub use edit::{EditError, TextEdit, apply_edits};
pub use error::ScriptError;

/// UTF-8 byte order mark, as the game writes it in localisation and some script files.
pub const BOM: char = '\u{feff}';

/// Split a leading byte order mark off `text`.
///
/// Spans produced by [`parse`] are relative to the returned slice.
pub fn strip_bom(text: &str) -> (&str, bool) {
    match text.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}

/// Parse a whole script file.
pub fn parse(text: &str) -> Result<Document, ScriptError> {
    let tokens = lexer::tokenize(text)?;
    parser::parse_tokens(text, &tokens)
}

/// 1-based line number of a byte offset.
pub fn line_of(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    let newlines = text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count();
    (newlines + 1) as u32
}

#[cfg(test)]
mod proptest;
