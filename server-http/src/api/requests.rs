use serde::Deserialize;

/// Query parameters for `GET /api/cache`.
///
/// `key` stays optional at the wire level so that a missing parameter flows
/// into the service's validation (and its 400 mapping) instead of being
/// rejected by the extractor with a less useful message.
#[derive(Debug, Deserialize)]
pub struct GetCacheParams {
    #[serde(default)]
    pub key: Option<String>,
}

/// Body for `POST /api/cache`. All fields default so that absent ones reach
/// the service as empty strings and are rejected in contract order, key
/// before value.
#[derive(Debug, Deserialize)]
pub struct SetCacheBody {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub ttl: Option<String>,
}
