pub mod executor;
pub mod parser;
pub mod registry;

pub use executor::{run, run_with};
pub use parser::{load_pipeline, parse_pipeline, validate_registry, PipelineFile};
pub use registry::{Declaration, ProcessorEntry, ProcessorRegistry};
