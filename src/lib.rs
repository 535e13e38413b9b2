//! Declarative processing pipelines for uploaded files.
//!
//! An uploader type declares an ordered list of processors once; every
//! instance then runs that list, in order, with [`Uploader::process`].

mod macros;

pub mod error;
pub mod pipeline;
pub mod text;
pub mod uploader;
pub mod util;

pub use error::DispatchError;
pub use pipeline::{Declaration, ProcessorEntry, ProcessorRegistry};
pub use serde_json::Value;
pub use uploader::{Args, Arity, Operation, OperationFn, OperationTable, Uploader};

#[doc(hidden)]
pub use macros::__operation_name;
#[doc(hidden)]
pub use serde_json as __serde_json;
