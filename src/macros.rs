/// Declare processing steps on a [`ProcessorRegistry`](crate::ProcessorRegistry).
///
/// Accepts bare operation names, `name => [args...]`, and braced mappings
/// holding several pairs. Items are appended left to right. Raw identifiers
/// declare the plain name (`r#type` declares `type`).
///
/// Each argument is a Rust expression converted with `serde_json::json!`, so
/// the JSON keywords `null` and object literals `{ .. }` are not accepted
/// here; pass `serde_json::Value::Null` or a prebuilt `json!` value instead.
///
/// ```
/// use uploadpipe::{process, ProcessorRegistry};
///
/// let mut registry = ProcessorRegistry::new();
/// process!(registry; sepiatone, vignette);
/// process!(registry; scale => [200, 200], { crop => ["center"], quality => [85] });
/// assert_eq!(registry.len(), 5);
/// ```
#[macro_export]
macro_rules! process {
    ($registry:expr; $($rest:tt)*) => {{
        #[allow(unused_mut)]
        let mut declarations: ::std::vec::Vec<$crate::Declaration> = ::std::vec::Vec::new();
        $crate::__process_declarations!(declarations; $($rest)*);
        $registry.declare(declarations)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __process_declarations {
    ($d:ident;) => {};
    ($d:ident; { $($op:ident => [$($arg:expr),* $(,)?]),+ $(,)? } $(, $($rest:tt)*)?) => {
        $d.push($crate::Declaration::Mapping(::std::vec![
            $((
                ::std::string::String::from($crate::__operation_name(stringify!($op))),
                ::std::vec![$($crate::__serde_json::json!($arg)),*],
            )),+
        ]));
        $crate::__process_declarations!($d; $($($rest)*)?);
    };
    ($d:ident; $op:ident => [$($arg:expr),* $(,)?] $(, $($rest:tt)*)?) => {
        $d.push($crate::Declaration::with_args(
            $crate::__operation_name(stringify!($op)),
            ::std::vec![$($crate::__serde_json::json!($arg)),*],
        ));
        $crate::__process_declarations!($d; $($($rest)*)?);
    };
    ($d:ident; $op:ident $(, $($rest:tt)*)?) => {
        $d.push($crate::Declaration::named($crate::__operation_name(stringify!($op))));
        $crate::__process_declarations!($d; $($($rest)*)?);
    };
}

#[doc(hidden)]
pub fn __operation_name(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
