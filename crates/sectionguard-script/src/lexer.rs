use crate::ast::{Operator, Span};
use crate::error::ScriptError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    Open,
    Close,
    Op(Operator),
    Bare(String),
    Quoted(String),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

fn ends_bare(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '=' | '"' | '#' | '<' | '>')
}

pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, ScriptError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while let Some(&(_, c)) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' | '}' => {
                chars.next();
                let kind = if c == '{' {
                    TokenKind::Open
                } else {
                    TokenKind::Close
                };
                tokens.push(Token {
                    kind,
                    span: Span::new(start, start + 1, line),
                });
            }
            '=' | '<' | '>' => {
                chars.next();
                let followed_by_eq = bytes.get(start + 1) == Some(&b'=');
                let (op, len) = match (c, followed_by_eq) {
                    ('=', true) => (Operator::EqEq, 2),
                    ('=', false) => (Operator::Eq, 1),
                    ('<', true) => (Operator::Le, 2),
                    ('<', false) => (Operator::Lt, 1),
                    ('>', true) => (Operator::Ge, 2),
                    _ => (Operator::Gt, 1),
                };
                if len == 2 {
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Op(op),
                    span: Span::new(start, start + len, line),
                });
            }
            '!' | '?' if bytes.get(start + 1) == Some(&b'=') => {
                chars.next();
                chars.next();
                let op = if c == '!' {
                    Operator::NotEq
                } else {
                    Operator::QuestionEq
                };
                tokens.push(Token {
                    kind: TokenKind::Op(op),
                    span: Span::new(start, start + 2, line),
                });
            }
            '"' => {
                let start_line = line;
                chars.next();
                let mut value = String::new();
                let mut end = None;
                while let Some((i, c)) = chars.next() {
                    match c {
                        '"' => {
                            end = Some(i + 1);
                            break;
                        }
                        '\\' => {
                            if let Some(&(_, next)) = chars.peek()
                                && matches!(next, '"' | '\\')
                            {
                                value.push(next);
                                chars.next();
                            } else {
                                value.push('\\');
                            }
                        }
                        '\n' => {
                            line += 1;
                            value.push('\n');
                        }
                        other => value.push(other),
                    }
                }
                let Some(end) = end else {
                    return Err(ScriptError::UnterminatedString { line: start_line });
                };
                tokens.push(Token {
                    kind: TokenKind::Quoted(value),
                    span: Span::new(start, end, start_line),
                });
            }
            _ => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if ends_bare(c) {
                        break;
                    }
                    if matches!(c, '!' | '?') && i > start && bytes.get(i + 1) == Some(&b'=') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Bare(text[start..end].to_string()),
                    span: Span::new(start, end, line),
                });
            }
        }
    }

    Ok(tokens)
}
