//! Definitions built from `struct` and unit-only `enum` declarations.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
};
use indexmap::IndexMap;
use log::debug;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Fields, GenericArgument, Generics, ItemEnum, ItemStruct, LitStr, PathArguments,
    Token, Type, TypePath,
};

use swagdoc_core::model::{Propertie, Schema};

use crate::docs::prose;
use crate::types::{model, primitive};

/// The subset of `#[serde(...)]` that changes the serialized shape.
#[derive(Debug, Default, PartialEq, Eq)]
struct SerdeAttrs {
    rename: Option<String>,
    rename_all: Option<String>,
    skip: bool,
    flatten: bool,
    default: bool,
}

fn serde_attrs(attrs: &[Attribute]) -> SerdeAttrs {
    let mut out = SerdeAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = serialize_name(&meta)? {
                    out.rename = Some(name);
                }
            } else if meta.path.is_ident("rename_all") {
                if let Some(rule) = serialize_name(&meta)? {
                    out.rename_all = Some(rule);
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                out.skip = true;
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
            } else if meta.path.is_ident("default") {
                out.default = true;
                skip_value(&meta)?;
            } else {
                skip_value(&meta)?;
            }
            Ok(())
        });
        if let Err(err) = result {
            debug!("ignoring unparseable serde attribute: {err}");
        }
    }
    out
}

/// Value of `key = "x"` or the `serialize` half of `key(serialize = "x", ...)`.
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }
    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            let lit: LitStr = inner.value()?.parse()?;
            name = Some(lit.value());
        } else {
            skip_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(name)
}

fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Apply a serde `rename_all` rule. Unknown rules leave the name unchanged.
fn apply_rename_all(rule: &str, name: &str) -> String {
    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "camelCase" => name.to_lower_camel_case(),
        "PascalCase" => name.to_pascal_case(),
        "snake_case" => name.to_snake_case(),
        "SCREAMING_SNAKE_CASE" => name.to_shouty_snake_case(),
        "kebab-case" => name.to_kebab_case(),
        "SCREAMING-KEBAB-CASE" => name.to_shouty_kebab_case(),
        _ => name.to_string(),
    }
}

fn serialized_name(raw: &str, attrs: &SerdeAttrs, rule: Option<&str>) -> String {
    match (&attrs.rename, rule) {
        (Some(rename), _) => rename.clone(),
        (None, Some(rule)) => apply_rename_all(rule, raw),
        (None, None) => raw.to_string(),
    }
}

/// Maps Rust field types to properties, treating the item's own type
/// parameters as opaque objects.
struct TypeMapper {
    type_params: Vec<String>,
}

impl TypeMapper {
    fn new(generics: &Generics) -> Self {
        Self {
            type_params: generics
                .type_params()
                .map(|p| p.ident.to_string())
                .collect(),
        }
    }

    /// The property for `ty`, and whether the field may be absent.
    fn map(&self, ty: &Type) -> (Propertie, bool) {
        match ty {
            Type::Reference(r) => self.map(&r.elem),
            Type::Paren(p) => self.map(&p.elem),
            Type::Group(g) => self.map(&g.elem),
            Type::Slice(s) => (Propertie::array_of(self.map(&s.elem).0), false),
            Type::Array(a) => (Propertie::array_of(self.map(&a.elem).0), false),
            Type::Path(p) => self.map_path(p),
            _ => (Propertie::primitive("object", ""), false),
        }
    }

    fn map_path(&self, path: &TypePath) -> (Propertie, bool) {
        let Some(last) = path.path.segments.last() else {
            return (Propertie::primitive("object", ""), false);
        };
        let name = last.ident.to_string();
        let args: Vec<&Type> = match &last.arguments {
            PathArguments::AngleBracketed(args) => args
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(t) => Some(t),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let inner = |i: usize| {
            args.get(i)
                .map(|t| self.map(t).0)
                .unwrap_or_else(|| Propertie::primitive("object", ""))
        };

        let prop = match name.as_str() {
            "Option" => return (inner(0), true),
            "Box" | "Rc" | "Arc" | "Cow" => return self.map_first(&args),
            "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "IndexSet" => {
                Propertie::array_of(inner(0))
            }
            "HashMap" | "BTreeMap" | "IndexMap" => Propertie {
                additional_properties: Some(Box::new(inner(1))),
                ..Propertie::primitive("object", "")
            },
            _ if self.type_params.contains(&name) => Propertie::primitive("object", ""),
            _ => match primitive(&name) {
                Some((t, f)) => Propertie::primitive(t, f),
                None => model(&name),
            },
        };
        (prop, false)
    }

    fn map_first(&self, args: &[&Type]) -> (Propertie, bool) {
        match args.first() {
            Some(t) => self.map(t),
            None => (Propertie::primitive("object", ""), false),
        }
    }
}

/// Build the definition for a struct with named fields.
pub fn struct_definition(item: &ItemStruct) -> Option<(String, Schema)> {
    let name = item.ident.unraw().to_string();
    let Fields::Named(fields) = &item.fields else {
        debug!("{name}: not a named-field struct, skipping");
        return None;
    };

    let container = serde_attrs(&item.attrs);
    let mapper = TypeMapper::new(&item.generics);
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = serde_attrs(&field.attrs);
        if attrs.skip {
            continue;
        }
        if attrs.flatten {
            debug!("{name}.{ident}: flattened fields are not documented, skipping");
            continue;
        }
        let key = serialized_name(
            &ident.unraw().to_string(),
            &attrs,
            container.rename_all.as_deref(),
        );
        let (mut prop, optional) = mapper.map(&field.ty);
        prop.description = prose(&field.attrs);
        if !optional && !attrs.default && !container.default {
            required.push(key.clone());
        }
        properties.insert(key, prop);
    }

    Some((
        name.clone(),
        Schema {
            title: name,
            description: prose(&item.attrs),
            schema_type: "object".to_string(),
            required,
            properties,
            ..Default::default()
        },
    ))
}

/// Build a string definition for an enum whose variants are all unit variants.
pub fn enum_definition(item: &ItemEnum) -> Option<(String, Schema)> {
    let name = item.ident.unraw().to_string();
    if item
        .variants
        .iter()
        .any(|v| !matches!(v.fields, Fields::Unit))
    {
        debug!("{name}: enum has data variants, skipping");
        return None;
    }

    let container = serde_attrs(&item.attrs);
    let enum_values = item
        .variants
        .iter()
        .filter_map(|variant| {
            let attrs = serde_attrs(&variant.attrs);
            (!attrs.skip).then(|| {
                serialized_name(
                    &variant.ident.unraw().to_string(),
                    &attrs,
                    container.rename_all.as_deref(),
                )
            })
        })
        .collect();

    Some((
        name.clone(),
        Schema {
            title: name,
            description: prose(&item.attrs),
            schema_type: "string".to_string(),
            enum_values,
            ..Default::default()
        },
    ))
}
