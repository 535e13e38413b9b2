//! Plain-text uploader used by the command line tool.
//!
//! Its operation table is what pipeline files are checked and run against.

use crate::error::DispatchError;
use crate::pipeline::ProcessorRegistry;
use crate::uploader::{Arity, OperationTable, Uploader};
use crate::util::{sanitize_filename, timestamp, DEFAULT_TIMESTAMP_FORMAT};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq)]
pub struct TextUploader {
    pub filename: String,
    pub content: String,
}

impl TextUploader {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

static PROCESSORS: LazyLock<ProcessorRegistry> = LazyLock::new(|| {
    let mut registry = ProcessorRegistry::new();
    crate::process!(registry; sanitize_name, strip);
    registry
});

static OPERATIONS: LazyLock<OperationTable<TextUploader>> = LazyLock::new(|| {
    OperationTable::<TextUploader>::new()
        .with("strip", Arity::exact(0), |u, _| {
            u.content = u.content.trim().to_string();
            Ok(())
        })
        .with("upcase", Arity::exact(0), |u, _| {
            u.content = u.content.to_uppercase();
            Ok(())
        })
        .with("downcase", Arity::exact(0), |u, _| {
            u.content = u.content.to_lowercase();
            Ok(())
        })
        .with("truncate", Arity::exact(1), |u, args| {
            let limit = usize::try_from(args.u64(0)?).unwrap_or(usize::MAX);
            let cut = u.content.char_indices().nth(limit).map(|(idx, _)| idx);
            if let Some(idx) = cut {
                u.content.truncate(idx);
            }
            Ok(())
        })
        .with("append", Arity::exact(1), |u, args| {
            u.content.push_str(args.str(0)?);
            Ok(())
        })
        .with("prepend", Arity::exact(1), |u, args| {
            u.content.insert_str(0, args.str(0)?);
            Ok(())
        })
        .with("replace", Arity::exact(2), |u, args| {
            let from = args.str(0)?;
            if from.is_empty() {
                return Err(DispatchError::ArgumentType {
                    operation: "replace".to_string(),
                    index: 0,
                    expected: "a non-empty string",
                });
            }
            u.content = u.content.replace(from, args.str(1)?);
            Ok(())
        })
        .with("sanitize_name", Arity::exact(0), |u, _| {
            u.filename = sanitize_filename(&u.filename);
            Ok(())
        })
        .with("stamp", Arity::range(0, 1), |u, args| {
            let format = if args.is_empty() {
                DEFAULT_TIMESTAMP_FORMAT
            } else {
                args.str(0)?
            };
            let stamp = timestamp(format).map_err(|_| DispatchError::ArgumentType {
                operation: "stamp".to_string(),
                index: 0,
                expected: "a valid strftime format",
            })?;
            u.content = format!("{}\n{}", stamp, u.content);
            Ok(())
        })
});

impl Uploader for TextUploader {
    type Error = DispatchError;

    fn processors() -> &'static ProcessorRegistry {
        &PROCESSORS
    }

    fn operations() -> &'static OperationTable<Self> {
        &OPERATIONS
    }
}
