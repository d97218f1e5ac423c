/// Short media tokens accepted in `@Consumes`/`@Produces` style annotations.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("xml", "text/xml"),
    ("plain", "text/plain"),
    ("html", "text/html"),
    ("mpfd", "multipart/form-data"),
    ("x-www-form-urlencoded", "application/x-www-form-urlencoded"),
    ("json-api", "application/vnd.api+json"),
    ("json-stream", "application/x-json-stream"),
    ("octet-stream", "application/octet-stream"),
    ("png", "image/png"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
];

/// Map a short token like `json` to its full content type. Unknown tokens
/// are returned unchanged.
pub fn content_type(token: &str) -> &str {
    CONTENT_TYPES
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, full)| *full)
        .unwrap_or(token)
}

/// Split a comma-separated list of short tokens into full content types.
pub fn content_types_by_doc(value: &str) -> Vec<String> {
    split_list(value)
        .map(|token| content_type(token).to_string())
        .collect()
}

/// Split on `,`, trimming items and dropping empty ones.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
