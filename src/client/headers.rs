use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::client::session::SessionStore;

/// Headers for an outgoing API call.
///
/// Always carries `Content-Type: application/json`. When the session holds a
/// token, `Authorization: Bearer <token>` is added as well. The session is
/// read on every call, so a token set or cleared a moment ago is reflected
/// in the very next request.
pub fn build_headers(session: &SessionStore) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let token = session.get_token();
    if !token.is_empty() {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                tracing::debug!(
                    "Using authentication token: {}...",
                    token.chars().take(10).collect::<String>()
                );
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => {
                tracing::error!("Stored token cannot be sent as a header: {}", e);
            }
        }
    }

    headers
}

/// Header pairs as plain strings, in a stable order.
pub fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    pairs.sort();
    pairs
}
