//! Rust source frontend for swagdoc.
//!
//! The entry file contributes its `//!` and `///` blocks (global `@APIVersion`,
//! `@Title`, ... annotations) and its `mod` declarations. Every declared
//! module is walked recursively: functions and methods documented with
//! `@Router` become operations, named-field structs and unit enums become
//! definitions.

pub mod definition;
pub mod docs;
pub mod frontend;
pub mod operation;
pub mod resolve;
pub mod types;

pub use frontend::RustSourceFrontend;
