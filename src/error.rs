use thiserror::Error;

/// Failures the dispatcher itself detects while resolving a step.
///
/// Errors raised by an operation body are not wrapped in this type; they
/// reach the caller as the uploader's own error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown operation `{operation}`")]
    UnknownOperation { operation: String },

    #[error("wrong number of arguments for `{operation}` (given {given}, expected {expected})")]
    Arity {
        operation: String,
        given: usize,
        expected: String,
    },

    #[error("argument {index} of `{operation}` must be {expected}")]
    ArgumentType {
        operation: String,
        index: usize,
        expected: &'static str,
    },
}
