//! The venue search response as returned by the API.
//!
//! Only the venue id is needed to check in. Everything else is kept as loosely
//! typed data: a field of an unexpected type decodes to its default instead of
//! discarding the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A decoded venue search response.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct VenueSearch {
    /// Response metadata.
    #[serde(deserialize_with = "lenient")]
    pub meta: Meta,
    /// Notifications attached to the response, untouched.
    pub notifications: Value,
    /// The search result itself.
    pub response: SearchResponse,
}

impl VenueSearch {
    /// Decode a response body.
    ///
    /// Malformed bodies decode into the empty default, which has no venues.
    /// So does a venue without a string id.
    pub fn decode(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The venues in the order returned by the API.
    pub fn venues(&self) -> &[Venue] {
        &self.response.venues
    }
}

/// Metadata of a response.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    /// Status code as reported in the body.
    #[serde(deserialize_with = "lenient")]
    pub code: u16,
    /// Identifier of the request, for support.
    #[serde(deserialize_with = "lenient")]
    pub request_id: String,
}

/// The `response` object of a search.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Venues in the order returned.
    pub venues: Vec<Venue>,
    /// Everything else, such as `confident` and `geocode`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A place returned by the search endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Venue {
    /// Stable identifier used to check in.
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    /// Secondary attributes such as `location`, `categories` and `stats`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Decode a field, falling back to its default if it has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
