use indexmap::IndexSet;
use std::fmt;

/// One source line, tagged with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

impl Line {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Line {
            index,
            text: text.into(),
        }
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Line {
            index: self.index,
            text: text.into(),
        }
    }
}

/// A normalized line carrying its depth marker.
///
/// `depth` is the number of leading whitespace characters the line had when it
/// was encoded. Only `depth == 0` (a top-level statement) carries meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedLine {
    pub index: usize,
    pub depth: usize,
    pub text: String,
}

impl MarkedLine {
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}

impl fmt::Display for MarkedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.depth, self.text)
    }
}

pub const BUILTIN_TYPES: &[&str] = &["int", "double", "float", "bool", "string", "void", "const"];

/// Recognized type keywords. Immutable once built.
#[derive(Debug, Clone)]
pub struct TypeTable {
    names: IndexSet<String>,
}

impl TypeTable {
    pub(crate) fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeTable {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Regex alternation of every type name, longest first.
    pub fn alternation(&self) -> String {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        TypeTable::from_names(BUILTIN_TYPES.iter().copied())
    }
}

/// Target function names parsed from the descriptor line.
///
/// An empty `names` list means no target was found; extraction then returns
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature {
    pub names: Vec<String>,
    pub preserve_pointer_syntax: bool,
}

impl FunctionSignature {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Byte offsets of a balanced delimiter pair; `close` points at the closing
/// delimiter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterSpan {
    pub open: usize,
    pub close: usize,
}

impl DelimiterSpan {
    /// Byte range of the text between the delimiters.
    pub fn inner(&self) -> std::ops::Range<usize> {
        self.open + 1..self.close
    }
}
