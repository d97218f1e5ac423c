//! Per-handler annotations: `@Router`, `@Param`, `@Success`, and friends.

use log::{debug, warn};
use syn::Attribute;

use swagdoc_core::info::append_description;
use swagdoc_core::media::{content_types_by_doc, split_list};
use swagdoc_core::model::{HttpMethod, Operation, Parameter, Response, Schema};
use swagdoc_core::scan::{is_flag, match_line};

use crate::docs::doc_block;
use crate::types::{TypeExpr, primitive, schema_from, short_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationTag {
    Summary,
    Description,
    Tags,
    Id,
    Accept,
    Produce,
    Param,
    Success,
    Failure,
    Router,
}

const OPERATION_TAGS: &[(&str, OperationTag)] = &[
    ("@Summary", OperationTag::Summary),
    ("@Title", OperationTag::Summary),
    ("@Description", OperationTag::Description),
    ("@Tags", OperationTag::Tags),
    ("@ID", OperationTag::Id),
    ("@Accept", OperationTag::Accept),
    ("@Produce", OperationTag::Produce),
    ("@Param", OperationTag::Param),
    ("@Success", OperationTag::Success),
    ("@Failure", OperationTag::Failure),
    ("@Router", OperationTag::Router),
];

const DEPRECATED: &str = "@Deprecated";

const PARAM_LOCATIONS: &[&str] = &["query", "path", "header", "body", "formData"];

/// An operation together with the route it is mounted on.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOperation {
    pub path: String,
    pub method: HttpMethod,
    pub operation: Operation,
}

/// Build an operation from a handler's doc comments. Returns `None` when the
/// docs carry no valid `@Router` line.
pub fn parse_operation(fn_name: &str, attrs: &[Attribute]) -> Option<RouteOperation> {
    let block = doc_block(attrs)?;
    let mut operation = Operation {
        operation_id: fn_name.to_string(),
        ..Default::default()
    };
    let mut route = None;

    for line in block.lines() {
        if is_flag(line, DEPRECATED) {
            operation.deprecated = true;
            continue;
        }
        let Some((tag, value)) = match_line(line, OPERATION_TAGS) else {
            continue;
        };
        match tag {
            OperationTag::Summary => operation.summary = value.to_string(),
            OperationTag::Description => append_description(&mut operation.description, value),
            OperationTag::Tags => {
                operation.tags = split_list(value).map(str::to_string).collect();
            }
            OperationTag::Id => operation.operation_id = value.to_string(),
            OperationTag::Accept => operation.consumes = content_types_by_doc(value),
            OperationTag::Produce => operation.produces = content_types_by_doc(value),
            OperationTag::Param => match parse_param(value) {
                Some(param) => operation.parameters.push(param),
                None => warn!("{fn_name}: skipping malformed @Param {value:?}"),
            },
            OperationTag::Success | OperationTag::Failure => match parse_response(value) {
                Some((code, response)) => {
                    operation.responses.insert(code, response);
                }
                None => warn!("{fn_name}: skipping malformed response {value:?}"),
            },
            OperationTag::Router => match parse_router(value) {
                Some(r) => route = Some(r),
                None => warn!("{fn_name}: skipping malformed @Router {value:?}"),
            },
        }
    }

    let Some((path, method)) = route else {
        debug!("{fn_name}: no @Router, not an operation");
        return None;
    };
    Some(RouteOperation {
        path,
        method,
        operation,
    })
}

/// `/users/{id} [get]`
fn parse_router(value: &str) -> Option<(String, HttpMethod)> {
    let mut parts = value.split_whitespace();
    let path = parts.next()?;
    let method = parts
        .next()?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()?;
    if !path.starts_with('/') {
        return None;
    }
    Some((path.to_string(), method))
}

/// A whitespace-separated word, or a `"quoted phrase"` with quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    quoted: bool,
}

fn tokenize(value: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        tokens.push(Token {
            text: current,
            quoted,
        });
    }
    tokens
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `name in type required "description"`
fn parse_param(value: &str) -> Option<Parameter> {
    let tokens = tokenize(value);
    let [name, location, type_token, rest @ ..] = tokens.as_slice() else {
        return None;
    };
    let (name, location) = (name.text.as_str(), location.text.as_str());
    if !PARAM_LOCATIONS.contains(&location) {
        return None;
    }
    let (required, description) = match rest {
        [] => (false, String::new()),
        [flag, desc @ ..] => (flag.text == "true", join(desc)),
    };

    let mut param = Parameter {
        name: name.to_string(),
        location: location.to_string(),
        description,
        required: required || location == "path",
        ..Default::default()
    };

    let type_expr = TypeExpr::parse(&type_token.text);
    if location == "body" {
        param.schema = Some(type_expr.to_schema());
        return Some(param);
    }
    match type_expr {
        TypeExpr::Primitive(t, f) => {
            param.param_type = t.to_string();
            param.format = f.to_string();
        }
        TypeExpr::Array(inner) => {
            param.param_type = "array".to_string();
            param.items = Some(inner.to_propertie());
        }
        TypeExpr::Model(_) => param.param_type = "object".to_string(),
    }
    Some(param)
}

/// `code [{kind} [Type]] ["description"]`
fn parse_response(value: &str) -> Option<(String, Response)> {
    let tokens = tokenize(value);
    let (code, rest) = tokens.split_first()?;
    let code = code.text.as_str();
    if code != "default" && !(code.len() == 3 && code.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let (schema, rest) = match rest.split_first() {
        Some((kind, tail))
            if !kind.quoted && kind.text.starts_with('{') && kind.text.ends_with('}') =>
        {
            let kind = &kind.text[1..kind.text.len() - 1];
            let (type_name, tail) = match tail.split_first() {
                Some((name, t)) if !name.quoted => (Some(name.text.as_str()), t),
                _ => (None, tail),
            };
            (Some(response_schema(kind, type_name)), tail)
        }
        _ => (None, rest),
    };

    Some((
        code.to_string(),
        Response {
            description: join(rest),
            schema,
        },
    ))
}

fn response_schema(kind: &str, type_name: Option<&str>) -> Schema {
    match (kind, type_name) {
        ("array", Some(name)) => TypeExpr::Array(Box::new(TypeExpr::parse(name))).to_schema(),
        ("array", None) => Schema {
            schema_type: "array".to_string(),
            ..Default::default()
        },
        ("object", Some(name)) => TypeExpr::parse(name).to_schema(),
        ("object", None) => Schema {
            schema_type: "object".to_string(),
            ..Default::default()
        },
        (kind, _) => match primitive(kind) {
            Some((t, f)) => schema_from(swagdoc_core::model::Propertie::primitive(t, f)),
            None => TypeExpr::Model(short_name(kind).to_string()).to_schema(),
        },
    }
}
