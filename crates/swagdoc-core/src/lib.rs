pub mod config;
pub mod encode;
pub mod error;
pub mod info;
pub mod media;
pub mod model;
pub mod pipeline;
pub mod resource;
pub mod scan;
pub mod transform;

pub use encode::OutputFormat;
pub use error::{GenerateError, SourceError};
pub use pipeline::{GenerateOptions, build_spec, generate};
pub use resource::{EntryFile, EntryParser, Import, ResourceWalker, WalkOutput};
