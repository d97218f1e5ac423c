//! Mapping of type names, from Rust sources and from annotation text, to
//! Swagger `type`/`format` pairs.

use swagdoc_core::model::{Propertie, Schema};

/// Type names with a direct Swagger representation, as `(name, type, format)`.
const PRIMITIVES: &[(&str, &str, &str)] = &[
    // Annotation spellings
    ("string", "string", ""),
    ("integer", "integer", "int32"),
    ("int", "integer", "int32"),
    ("int32", "integer", "int32"),
    ("int64", "integer", "int64"),
    ("long", "integer", "int64"),
    ("number", "number", "float"),
    ("float", "number", "float"),
    ("double", "number", "double"),
    ("boolean", "boolean", ""),
    ("file", "file", ""),
    ("object", "object", ""),
    ("date", "string", "date"),
    ("date-time", "string", "date-time"),
    // Rust spellings
    ("String", "string", ""),
    ("str", "string", ""),
    ("char", "string", ""),
    ("bool", "boolean", ""),
    ("i8", "integer", "int32"),
    ("i16", "integer", "int32"),
    ("i32", "integer", "int32"),
    ("u8", "integer", "int32"),
    ("u16", "integer", "int32"),
    ("u32", "integer", "int32"),
    ("i64", "integer", "int64"),
    ("u64", "integer", "int64"),
    ("i128", "integer", "int64"),
    ("u128", "integer", "int64"),
    ("isize", "integer", "int64"),
    ("usize", "integer", "int64"),
    ("f32", "number", "float"),
    ("f64", "number", "double"),
    ("DateTime", "string", "date-time"),
    ("NaiveDateTime", "string", "date-time"),
    ("OffsetDateTime", "string", "date-time"),
    ("SystemTime", "string", "date-time"),
    ("NaiveDate", "string", "date"),
    ("Uuid", "string", "uuid"),
    ("Value", "object", ""),
];

/// Look up a primitive by name.
pub fn primitive(name: &str) -> Option<(&'static str, &'static str)> {
    PRIMITIVES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, t, f)| (*t, *f))
}

/// The last segment of a module-qualified type name (`models::User` -> `User`).
pub fn short_name(name: &str) -> &str {
    name.rsplit([':', '.']).next().unwrap_or(name)
}

/// A reference to a named definition. Model references carry the model name
/// as their title.
pub fn model(name: &str) -> Propertie {
    Propertie {
        title: name.to_string(),
        ..Propertie::reference(name)
    }
}

/// A type written in annotation text: `string`, `[]int64`, `models::User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(&'static str, &'static str),
    Model(String),
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn parse(token: &str) -> Self {
        if let Some(inner) = token.strip_prefix("[]") {
            return Self::Array(Box::new(Self::parse(inner)));
        }
        match primitive(token) {
            Some((t, f)) => Self::Primitive(t, f),
            None => Self::Model(short_name(token).to_string()),
        }
    }

    pub fn to_propertie(&self) -> Propertie {
        match self {
            Self::Primitive(t, f) => Propertie::primitive(t, f),
            Self::Model(name) => model(name),
            Self::Array(inner) => Propertie::array_of(inner.to_propertie()),
        }
    }

    pub fn to_schema(&self) -> Schema {
        schema_from(self.to_propertie())
    }
}

/// Lift a property into a top-level schema.
pub fn schema_from(prop: Propertie) -> Schema {
    Schema {
        ref_path: prop.ref_path,
        title: prop.title,
        format: prop.format,
        description: prop.description,
        schema_type: prop.schema_type,
        items: prop.items,
        properties: prop.properties,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_annotation_types() {
        assert_eq!(TypeExpr::parse("int64"), TypeExpr::Primitive("integer", "int64"));
        assert_eq!(
            TypeExpr::parse("models::User"),
            TypeExpr::Model("User".to_string())
        );
        assert_eq!(
            TypeExpr::parse("[]string"),
            TypeExpr::Array(Box::new(TypeExpr::Primitive("string", "")))
        );
    }

    #[test]
    fn array_of_models_keeps_item_title() {
        let schema = TypeExpr::parse("[]Order").to_schema();
        assert_eq!(schema.schema_type, "array");
        let items = schema.items.unwrap();
        assert_eq!(items.title, "Order");
        assert_eq!(items.ref_path, "#/definitions/Order");
        assert_eq!(items.schema_type, "object");
    }

    #[test]
    fn short_names() {
        assert_eq!(short_name("crate::models::User"), "User");
        assert_eq!(short_name("dto.User"), "User");
        assert_eq!(short_name("User"), "User");
    }
}
