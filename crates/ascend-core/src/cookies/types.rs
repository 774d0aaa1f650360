use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cookie as produced and consumed by the browsing context
///
/// Attributes without a dedicated field are kept in `extra` so a record read
/// from disk is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub size: i64,
    #[serde(rename = "httpOnly", default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub session: bool,
    #[serde(rename = "sameSite", skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn session_expiry() -> f64 {
    -1.0
}

impl CookieRecord {
    /// Create a session cookie for the given domain with path `/`
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let value = value.into();
        let size = (name.len() + value.len()) as i64;

        Self {
            name,
            value,
            domain: domain.into(),
            path: "/".to_string(),
            expires: session_expiry(),
            size,
            http_only: false,
            secure: false,
            session: true,
            same_site: None,
            extra: Map::new(),
        }
    }
}
