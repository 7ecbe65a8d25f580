use crate::ast::{Block, Document, Entry, Item, Scalar, Span, Value};
use crate::error::ScriptError;
use crate::lexer::{Token, TokenKind};

/// Deepest block nesting accepted; real game files stay well below ten.
pub(crate) const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

pub(crate) fn parse_tokens(text: &str, tokens: &[Token]) -> Result<Document, ScriptError> {
    let mut parser = Parser { tokens, pos: 0 };
    let items = parser.items(0, None)?;
    Ok(Block {
        tag: None,
        items,
        span: Span::new(0, text.len(), 1),
    })
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Items until the matching `}` (consumed) or, at the top level, end of input.
    fn items(&mut self, depth: usize, open: Option<Span>) -> Result<Vec<Item>, ScriptError> {
        let mut items = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return match open {
                    Some(span) => Err(ScriptError::UnclosedBlock { line: span.line }),
                    None => Ok(items),
                };
            };
            match &token.kind {
                TokenKind::Close => {
                    return match open {
                        Some(_) => Ok(items),
                        None => Err(ScriptError::UnexpectedCloseBrace {
                            line: token.span.line,
                        }),
                    };
                }
                TokenKind::Open => {
                    let block = self.block(token.span, None, depth + 1)?;
                    items.push(Item::Value(Value::Block(block)));
                }
                TokenKind::Op(op) => {
                    return Err(ScriptError::UnexpectedOperator {
                        op: op.as_str().to_string(),
                        line: token.span.line,
                    });
                }
                TokenKind::Bare(_) | TokenKind::Quoted(_) => {
                    let key = scalar(token);
                    match self.peek().map(|t| &t.kind) {
                        Some(TokenKind::Op(op)) => {
                            let op = *op;
                            self.bump();
                            let value = self.value(&key, depth)?;
                            let span = key.raw.cover(value.span());
                            items.push(Item::Entry(Entry {
                                key,
                                op,
                                value,
                                span,
                            }));
                        }
                        _ => items.push(Item::Value(Value::Scalar(key))),
                    }
                }
            }
        }
    }

    fn value(&mut self, key: &Scalar, depth: usize) -> Result<Value, ScriptError> {
        let missing = || ScriptError::MissingValue {
            key: key.text.clone(),
            line: key.raw.line,
        };
        let Some(token) = self.bump() else {
            return Err(missing());
        };
        match &token.kind {
            TokenKind::Open => Ok(Value::Block(self.block(token.span, None, depth + 1)?)),
            TokenKind::Bare(tag) => {
                // `color = rgb { ... }`
                if let Some(next) = self.peek()
                    && next.kind == TokenKind::Open
                {
                    self.bump();
                    let mut block = self.block(next.span, Some(tag.clone()), depth + 1)?;
                    block.span = token.span.cover(block.span);
                    return Ok(Value::Block(block));
                }
                Ok(Value::Scalar(scalar(token)))
            }
            TokenKind::Quoted(_) => Ok(Value::Scalar(scalar(token))),
            TokenKind::Close | TokenKind::Op(_) => Err(missing()),
        }
    }

    fn block(&mut self, open: Span, tag: Option<String>, depth: usize) -> Result<Block, ScriptError> {
        if depth > MAX_DEPTH {
            return Err(ScriptError::TooDeep {
                line: open.line,
                max: MAX_DEPTH,
            });
        }
        let items = self.items(depth, Some(open))?;
        let close_end = self
            .tokens
            .get(self.pos.wrapping_sub(1))
            .map(|t| t.span.end)
            .unwrap_or(open.end);
        Ok(Block {
            tag,
            items,
            span: Span::new(open.start, close_end, open.line),
        })
    }
}

fn scalar(token: &Token) -> Scalar {
    match &token.kind {
        TokenKind::Quoted(text) => Scalar {
            text: text.clone(),
            quoted: true,
            span: Span::new(token.span.start + 1, token.span.end - 1, token.span.line),
            raw: token.span,
        },
        TokenKind::Bare(text) => Scalar {
            text: text.clone(),
            quoted: false,
            span: token.span,
            raw: token.span,
        },
        TokenKind::Open | TokenKind::Close | TokenKind::Op(_) => Scalar {
            text: String::new(),
            quoted: false,
            span: token.span,
            raw: token.span,
        },
    }
}
