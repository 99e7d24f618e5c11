use crate::ident::ObjectIdentifier;
use std::fmt::Display;

/// Wraps `s` in double quotes, doubling any embedded `"`.
pub fn double_quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Wraps `s` in single quotes, doubling any embedded `'`.
pub fn single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// `(a, b, c)`; elements keep their input order.
pub fn parenthesized<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let inner: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    format!("({})", inner.join(", "))
}

/// Accumulates space separated SQL tokens.
#[derive(Debug, Default)]
pub struct SqlWriter {
    parts: Vec<String>,
}

impl SqlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&mut self, kw: &str) -> &mut Self {
        self.parts.push(kw.to_string());
        self
    }

    pub fn keyword_if(&mut self, cond: bool, kw: &str) -> &mut Self {
        if cond {
            self.keyword(kw);
        }
        self
    }

    pub fn ident(&mut self, id: &impl ObjectIdentifier) -> &mut Self {
        self.parts.push(id.fully_qualified_name());
        self
    }

    /// `NAME = value`
    pub fn param(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.parts.push(format!("{name} = {value}"));
        self
    }

    /// Pushes an already rendered fragment.
    pub fn raw(&mut self, fragment: String) -> &mut Self {
        self.parts.push(fragment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn finish(self) -> String {
        self.parts.join(" ")
    }
}
