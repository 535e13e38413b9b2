use crate::error::DispatchError;
use crate::pipeline::ProcessorRegistry;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// An uploader type with a processing pipeline attached.
///
/// Implementors keep both the registry and the operation table in statics so
/// that every instance of the type shares them:
///
/// ```
/// use std::sync::LazyLock;
/// use uploadpipe::{process, Arity, DispatchError, OperationTable, ProcessorRegistry, Uploader};
///
/// struct Avatar { width: u64 }
///
/// static PROCESSORS: LazyLock<ProcessorRegistry> = LazyLock::new(|| {
///     let mut registry = ProcessorRegistry::new();
///     process!(registry; scale => [64]);
///     registry
/// });
///
/// static OPERATIONS: LazyLock<OperationTable<Avatar>> = LazyLock::new(|| {
///     OperationTable::<Avatar>::new().with("scale", Arity::exact(1), |avatar, args| {
///         avatar.width = args.u64(0)?;
///         Ok(())
///     })
/// });
///
/// impl Uploader for Avatar {
///     type Error = DispatchError;
///     fn processors() -> &'static ProcessorRegistry { &PROCESSORS }
///     fn operations() -> &'static OperationTable<Self> { &OPERATIONS }
/// }
///
/// let mut avatar = Avatar { width: 512 };
/// avatar.process().unwrap();
/// assert_eq!(avatar.width, 64);
/// ```
pub trait Uploader: Sized + 'static {
    /// Error returned by operations; dispatch failures convert into it.
    type Error: From<DispatchError>;

    fn processors() -> &'static ProcessorRegistry;

    fn operations() -> &'static OperationTable<Self>;

    /// Run every declared processor against this instance, in order.
    fn process(&mut self) -> Result<(), Self::Error> {
        crate::pipeline::run(self)
    }
}

/// Accepted argument count for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, given: usize) -> bool {
        given >= self.min && self.max.map_or(true, |max| given <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Positional arguments handed to an operation.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    operation: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(operation: &'a str, values: &'a [Value]) -> Self {
        Self { operation, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn value(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    pub fn str(&self, index: usize) -> Result<&'a str, DispatchError> {
        self.typed(index, "a string", Value::as_str)
    }

    pub fn u64(&self, index: usize) -> Result<u64, DispatchError> {
        self.typed(index, "a non-negative integer", Value::as_u64)
    }

    pub fn i64(&self, index: usize) -> Result<i64, DispatchError> {
        self.typed(index, "an integer", Value::as_i64)
    }

    pub fn f64(&self, index: usize) -> Result<f64, DispatchError> {
        self.typed(index, "a number", Value::as_f64)
    }

    pub fn bool(&self, index: usize) -> Result<bool, DispatchError> {
        self.typed(index, "a boolean", Value::as_bool)
    }

    fn typed<T>(
        &self,
        index: usize,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, DispatchError> {
        self.values
            .get(index)
            .and_then(convert)
            .ok_or_else(|| DispatchError::ArgumentType {
                operation: self.operation.to_string(),
                index,
                expected,
            })
    }
}

pub type OperationFn<U> = fn(&mut U, &Args<'_>) -> Result<(), <U as Uploader>::Error>;

pub struct Operation<U: Uploader> {
    pub arity: Arity,
    pub function: OperationFn<U>,
}

/// Name to operation lookup built by an uploader type.
pub struct OperationTable<U: Uploader> {
    operations: HashMap<String, Operation<U>>,
}

impl<U: Uploader> OperationTable<U> {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register `function` under `name`. A later registration replaces an earlier one.
    pub fn with(mut self, name: impl Into<String>, arity: Arity, function: OperationFn<U>) -> Self {
        self.operations
            .insert(name.into(), Operation { arity, function });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Operation<U>> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve `name` and check the argument count without calling anything.
    pub fn resolve(&self, name: &str, given: usize) -> Result<&Operation<U>, DispatchError> {
        let op = self
            .operations
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation {
                operation: name.to_string(),
            })?;
        if !op.arity.accepts(given) {
            return Err(DispatchError::Arity {
                operation: name.to_string(),
                given,
                expected: op.arity.to_string(),
            });
        }
        Ok(op)
    }

    /// Call `name` on `uploader` with `arguments` spread positionally.
    pub fn invoke(&self, uploader: &mut U, name: &str, arguments: &[Value]) -> Result<(), U::Error> {
        let op = self.resolve(name, arguments.len())?;
        (op.function)(uploader, &Args::new(name, arguments))
    }
}

impl<U: Uploader> Default for OperationTable<U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::LazyLock;

    #[derive(Default)]
    struct Counter {
        total: i64,
    }

    static EMPTY: LazyLock<ProcessorRegistry> = LazyLock::new(ProcessorRegistry::new);

    static TABLE: LazyLock<OperationTable<Counter>> = LazyLock::new(|| {
        OperationTable::<Counter>::new()
            .with("add", Arity::exact(1), |c, args| {
                c.total += args.i64(0)?;
                Ok(())
            })
            .with("sum", Arity::at_least(0), |c, args| {
                for i in 0..args.len() {
                    c.total += args.i64(i)?;
                }
                Ok(())
            })
    });

    impl Uploader for Counter {
        type Error = DispatchError;

        fn processors() -> &'static ProcessorRegistry {
            &EMPTY
        }

        fn operations() -> &'static OperationTable<Self> {
            &TABLE
        }
    }

    #[test]
    fn arity_bounds() {
        assert!(Arity::exact(2).accepts(2));
        assert!(!Arity::exact(2).accepts(1));
        assert!(Arity::range(0, 1).accepts(0));
        assert!(!Arity::range(0, 1).accepts(2));
        assert!(Arity::at_least(1).accepts(10));
        assert_eq!(Arity::exact(2).to_string(), "2");
        assert_eq!(Arity::range(0, 1).to_string(), "0..1");
        assert_eq!(Arity::at_least(1).to_string(), "1+");
    }

    #[test]
    fn invoke_spreads_arguments() {
        let mut c = Counter::default();
        TABLE.invoke(&mut c, "sum", &[json!(1), json!(2), json!(3)]).unwrap();
        assert_eq!(c.total, 6);
    }

    #[test]
    fn unknown_operation() {
        let mut c = Counter::default();
        let err = TABLE.invoke(&mut c, "missing", &[]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownOperation {
                operation: "missing".to_string()
            }
        );
    }

    #[test]
    fn arity_mismatch_does_not_call() {
        let mut c = Counter::default();
        let err = TABLE.invoke(&mut c, "add", &[json!(1), json!(2)]).unwrap_err();
        assert!(matches!(err, DispatchError::Arity { given: 2, .. }));
        assert_eq!(c.total, 0);
    }

    #[test]
    fn argument_type_mismatch() {
        let mut c = Counter::default();
        let err = TABLE.invoke(&mut c, "add", &[json!("one")]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ArgumentType {
                operation: "add".to_string(),
                index: 0,
                expected: "an integer",
            }
        );
    }

    #[test]
    fn typed_accessors_read_matching_values() {
        let values = [json!(2.5), json!(true), json!({ "w": 10 })];
        let args = Args::new("resize", &values);
        assert_eq!(args.f64(0).unwrap(), 2.5);
        assert!(args.bool(1).unwrap());
        assert_eq!(args.value(2), Some(&json!({ "w": 10 })));
        assert_eq!(args.value(3), None);
    }

    #[test]
    fn typed_accessors_report_mismatches() {
        let values = [json!("wide"), json!(1)];
        let args = Args::new("resize", &values);
        assert_eq!(
            args.f64(0).unwrap_err(),
            DispatchError::ArgumentType {
                operation: "resize".to_string(),
                index: 0,
                expected: "a number",
            }
        );
        assert_eq!(
            args.bool(1).unwrap_err(),
            DispatchError::ArgumentType {
                operation: "resize".to_string(),
                index: 1,
                expected: "a boolean",
            }
        );
        assert!(matches!(
            args.str(5),
            Err(DispatchError::ArgumentType { index: 5, .. })
        ));
    }

    #[test]
    fn names_are_sorted() {
        assert_eq!(TABLE.names(), vec!["add", "sum"]);
        assert!(TABLE.contains("add"));
        assert!(!TABLE.contains("sub"));
    }

    #[test]
    fn process_on_empty_registry_is_a_no_op() {
        let mut c = Counter { total: 7 };
        c.process().unwrap();
        assert_eq!(c.total, 7);
    }
}
