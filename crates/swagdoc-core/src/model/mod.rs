pub mod operation;
pub mod response;
pub mod schema;
pub mod spec;

pub use operation::{HttpMethod, Operation, Parameter, PathItem};
pub use response::Response;
pub use schema::{Propertie, Schema};
pub use spec::{Contact, Info, License, Swagger, Tag};

/// Prefix of every reference into the `definitions` map.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

/// Build a `#/definitions/<name>` reference.
pub fn definition_ref(name: &str) -> String {
    format!("{DEFINITIONS_REF_PREFIX}{name}")
}
