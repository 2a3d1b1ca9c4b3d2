//! [`Template`] is a prompt string with named placeholders, instantiated
//! once per request.
//!
//! A placeholder is written `{name}`. Literal braces are escaped as `{{` and
//! `}}`. Names are trimmed of surrounding whitespace, so `{ name }` and
//! `{name}` are the same placeholder.

use std::collections::HashMap;

/// Result type for templates. See also [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// [`Template`] error type, for both parsing and rendering.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A `{` was never closed.
    #[error("unclosed placeholder starting at byte {at}")]
    Unclosed {
        /// Byte offset of the opening `{` in the template source.
        at: usize,
    },
    /// A placeholder has no name, as in `{}` or `{ }`.
    #[error("empty placeholder at byte {at}")]
    EmptyName {
        /// Byte offset of the opening `{` in the template source.
        at: usize,
    },
    /// A `}` appeared outside any placeholder. Write `}}` for a literal.
    #[error("unmatched `}}` at byte {at}")]
    UnmatchedClose {
        /// Byte offset of the `}` in the template source.
        at: usize,
    },
    /// [`Template::render`] was not given a value for a placeholder.
    #[error("missing value for placeholder `{name}`")]
    MissingValue {
        /// Name of the placeholder with no value.
        name: String,
    },
}

/// A parsed segment of the template. Escapes are resolved at parse time, so
/// literals are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// An immutable prompt template with named `{placeholder}`s.
///
/// Parsing happens once in [`Template::new`]; [`Template::render`] only
/// substitutes. Rendering fails if the supplied mapping lacks a key for any
/// placeholder. Extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    variables: Vec<String>,
}

impl Template {
    /// Parse a template.
    pub fn new<S>(source: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let source = source.into();
        let (segments, variables) = parse(&source)?;

        Ok(Self {
            source,
            segments,
            variables,
        })
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of first appearance, deduplicated.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// Substitute every placeholder from `values` and return the rendered
    /// string. Fails with [`Error::MissingValue`] if a placeholder has no
    /// matching key.
    pub fn render<K, V, I>(&self, values: I) -> Result<String>
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values: HashMap<String, V> =
            values.into_iter().map(|(k, v)| (k.into(), v)).collect();

        let mut rendered = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder(name) => match values.get(name) {
                    Some(value) => rendered.push_str(value.as_ref()),
                    None => {
                        return Err(Error::MissingValue { name: name.clone() })
                    }
                },
            }
        }

        Ok(rendered)
    }
}

impl std::fmt::Display for Template {
    /// Write the original template text.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

fn parse(source: &str) -> Result<(Vec<Segment>, Vec<String>)> {
    let mut segments = Vec::new();
    let mut variables: Vec<String> = Vec::new();
    let mut literal = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    let _ = chars.next();
                    literal.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;

                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        // A nested `{` means the placeholder was never
                        // closed.
                        '{' => return Err(Error::Unclosed { at }),
                        _ => name.push(c),
                    }
                }

                if !closed {
                    return Err(Error::Unclosed { at });
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::EmptyName { at });
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(
                        &mut literal,
                    )));
                }
                if !variables.iter().any(|v| v == name) {
                    variables.push(name.to_string());
                }
                segments.push(Segment::Placeholder(name.to_string()));
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    let _ = chars.next();
                    literal.push('}');
                    continue;
                }

                return Err(Error::UnmatchedClose { at });
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok((segments, variables))
}
