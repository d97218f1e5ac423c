use indexmap::IndexMap;
use log::debug;

use crate::model::{Propertie, Schema, Swagger, definition_ref};

/// Substring of a GET 200 response description that marks a paginated list.
pub const PAGINATION_MARKER: &str = "pagination";

/// Name prefix of synthesized wrapper definitions.
pub const WRAPPER_PREFIX: &str = "pagination_";

/// Externally defined pagination metadata schema the wrapper points at.
pub const PAGINATION_METADATA_REF: &str = "#/definitions/HTTPPagination";

/// Rewrite paginated list responses into `{ pagination, list }` wrappers.
///
/// Pass one finds every GET operation whose `200` response is an array schema
/// described with the word `pagination`, and turns that schema into an object
/// titled `pagination_<Item>`. Its `$ref` keeps pointing at the item type.
/// Pass two adds one `pagination_<Item>` definition per distinct item type,
/// skipping names already defined, so running this twice changes nothing.
pub fn normalize_pagination(spec: &mut Swagger) {
    let wrappers = rewrite_paginated_responses(spec);
    synthesize_wrappers(&mut spec.definitions, &wrappers);
}

fn rewrite_paginated_responses(spec: &mut Swagger) -> Vec<String> {
    let mut wrappers = Vec::new();

    for (route, item) in &mut spec.paths {
        let Some(response) = item
            .get
            .as_mut()
            .and_then(|op| op.responses.get_mut("200"))
        else {
            continue;
        };
        if !response.description.contains(PAGINATION_MARKER) {
            continue;
        }
        let Some(schema) = response.schema.as_mut() else {
            continue;
        };
        if schema.schema_type != "array" {
            continue;
        }

        let item_type = schema
            .items
            .as_ref()
            .map(|items| items.title.clone())
            .unwrap_or_default();
        let wrapper = format!("{WRAPPER_PREFIX}{item_type}");
        debug!("GET {route}: paginated list of {item_type:?} -> {wrapper}");

        schema.title = wrapper.clone();
        schema.ref_path = definition_ref(&item_type);
        schema.schema_type = "object".to_string();
        wrappers.push(wrapper);
    }

    wrappers
}

fn synthesize_wrappers(definitions: &mut IndexMap<String, Schema>, wrappers: &[String]) {
    for wrapper in wrappers {
        if definitions.contains_key(wrapper) {
            continue;
        }
        let item_type = wrapper.replacen(WRAPPER_PREFIX, "", 1);
        definitions.insert(wrapper.clone(), wrapper_definition(wrapper, &item_type));
    }
}

fn wrapper_definition(wrapper: &str, item_type: &str) -> Schema {
    let mut properties = IndexMap::new();
    properties.insert(
        "pagination".to_string(),
        Propertie {
            ref_path: PAGINATION_METADATA_REF.to_string(),
            schema_type: "object".to_string(),
            ..Default::default()
        },
    );
    properties.insert(
        "list".to_string(),
        Propertie::array_of(Propertie::reference(item_type)),
    );

    Schema {
        title: wrapper.to_string(),
        schema_type: "object".to_string(),
        properties,
        ..Default::default()
    }
}
