use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// A response definition.
///
/// The description doubles as a free-text signal channel: the pagination
/// transform looks for the word `pagination` in it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}
