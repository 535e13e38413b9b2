use serde_json::Value;
use std::fmt;

/// One declared processing step: the operation to call and its fixed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorEntry {
    pub operation: String,
    pub arguments: Vec<Value>,
}

impl ProcessorEntry {
    pub fn new(operation: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            operation: operation.into(),
            arguments,
        }
    }
}

impl fmt::Display for ProcessorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// The two shapes a declaration can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Bare operation name, called with no arguments.
    Named(String),
    /// Operation name to argument list pairs, kept in encounter order.
    Mapping(Vec<(String, Vec<Value>)>),
}

impl Declaration {
    pub fn named(operation: impl Into<String>) -> Self {
        Declaration::Named(operation.into())
    }

    pub fn with_args(operation: impl Into<String>, arguments: Vec<Value>) -> Self {
        Declaration::Mapping(vec![(operation.into(), arguments)])
    }
}

impl From<&str> for Declaration {
    fn from(operation: &str) -> Self {
        Declaration::named(operation)
    }
}

impl From<String> for Declaration {
    fn from(operation: String) -> Self {
        Declaration::Named(operation)
    }
}

/// Ordered, append-only list of processing steps for one uploader type.
///
/// An uploader type builds its registry once, usually inside a `LazyLock`
/// static, and only hands out shared references afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorRegistry {
    entries: Vec<ProcessorEntry>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every declaration, left to right. Names are not checked here;
    /// unknown operations and bad arity only surface at dispatch.
    pub fn declare<I, D>(&mut self, declarations: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration>,
    {
        for declaration in declarations {
            match declaration.into() {
                Declaration::Named(operation) => {
                    self.entries.push(ProcessorEntry::new(operation, Vec::new()));
                }
                Declaration::Mapping(pairs) => {
                    for (operation, arguments) in pairs {
                        self.entries.push(ProcessorEntry::new(operation, arguments));
                    }
                }
            }
        }
        self
    }

    pub fn list(&self) -> &[ProcessorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProcessorRegistry {
    type Item = &'a ProcessorEntry;
    type IntoIter = std::slice::Iter<'a, ProcessorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
