use std::fmt;

use color_print::cformat;

// ----------------------------------------------------------------------------
// Value

/// Literal payload of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    Name(String),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Name(name) => write!(f, "{}", name),
            Value::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(name: &str) -> Self {
        Value::Name(name.to_string())
    }
}

// ----------------------------------------------------------------------------
// Token

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Label,
}

/// Immutable lexical unit produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: Value,
    line: usize,
}

impl Token {
    pub fn new(value: impl Into<Value>, line: usize) -> Self {
        Token {
            kind: TokenKind::Plain,
            value: value.into(),
            line,
        }
    }

    /// A token naming a jump/reference target.
    pub fn label(value: impl Into<Value>, line: usize) -> Self {
        Token {
            kind: TokenKind::Label,
            value: value.into(),
            line,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_label(&self) -> bool {
        self.kind == TokenKind::Label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn cformat(&self) -> String {
        match (self.kind, &self.value) {
            (TokenKind::Label, v) => cformat!("<g>{}</>", v),
            (_, Value::Number(n)) => cformat!("<y>{}</>", n),
            (_, Value::Text(t)) => cformat!("<c>{:?}</>", t),
            (_, Value::Name(n)) => cformat!("<b>{}</>", n),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
