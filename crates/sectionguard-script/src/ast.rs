/// Byte range into the parsed text plus the 1-based line of its start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering `self` and `other`, keeping the earlier line.
    pub fn cover(self, other: Span) -> Span {
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// `?=`, assign-if-exists.
    QuestionEq,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::EqEq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::QuestionEq => "?=",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar {
    /// Unescaped text (quotes removed).
    pub text: String,
    pub quoted: bool,
    /// Content span. For quoted strings this excludes the quotes, so replacing it keeps them.
    pub span: Span,
    /// Full token span including quotes.
    pub raw: Span,
}

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_f64(&self) -> Option<f64> {
        if self.quoted {
            return None;
        }
        self.text.parse().ok()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Block(Block),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(b) => Some(b),
            Value::Scalar(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Value::Scalar(s) => s.raw,
            Value::Block(b) => b.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: Scalar,
    pub op: Operator,
    pub value: Value,
    /// From the first byte of the key to the last byte of the value.
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Entry(Entry),
    Value(Value),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    /// Tag of a tagged block such as `rgb { 1 2 3 }`.
    pub tag: Option<String>,
    pub items: Vec<Item>,
    /// Includes the braces; for the top level, the whole text.
    pub span: Span,
}

/// The top level of a file is an unbraced block.
pub type Document = Block;

impl Block {
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.items.iter().filter_map(|item| match item {
            Item::Entry(e) => Some(e),
            Item::Value(_) => None,
        })
    }

    /// Bare values of a list-like block (`{ a "b" c }`).
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().filter_map(|item| match item {
            Item::Value(v) => Some(v),
            Item::Entry(_) => None,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|e| e.key.text == key)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries().filter(move |e| e.key.text == key)
    }

    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.get(key).and_then(|e| e.value.as_scalar())
    }

    pub fn block(&self, key: &str) -> Option<&Block> {
        self.get(key).and_then(|e| e.value.as_block())
    }
}
