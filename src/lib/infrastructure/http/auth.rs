//! Pre-shared API key check

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use constant_time_eq::constant_time_eq;
use tracing::debug;

use crate::infrastructure::http::{errors::ApiError, state::AppConfig};

/// Checks the presented API key against the configured secret.
///
/// The key may arrive as a query parameter, a header or a cookie, tried in
/// that order under the configured name; the first candidate that matches
/// the secret wins. Comparison is constant-time. No match anywhere is a
/// forbidden outcome.
pub fn authenticate(
    config: &AppConfig,
    query: &HashMap<String, String>,
    headers: &HeaderMap,
) -> Result<(), ApiError> {
    let name = config.api_key_name.as_str();

    let candidates = [
        from_query(name, query),
        from_header(name, headers),
        from_cookie(name, headers),
    ];

    for candidate in candidates.into_iter().flatten() {
        if constant_time_eq(candidate.as_bytes(), config.api_key.as_bytes()) {
            return Ok(());
        }
    }

    debug!("credential validation failed");

    Err(ApiError::new_403("Could not validate credentials"))
}

fn from_query(name: &str, query: &HashMap<String, String>) -> Option<String> {
    query.get(name).cloned()
}

fn from_header(name: &str, headers: &HeaderMap) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn from_cookie(name: &str, headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value_trimmed().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

    use crate::infrastructure::http::state::{
        tests::{test_config, TEST_API_KEY, TEST_API_KEY_NAME},
        Environment,
    };

    use super::*;

    fn query_with(key: Option<&str>) -> HashMap<String, String> {
        key.map(|value| {
            [(TEST_API_KEY_NAME.to_string(), value.to_string())]
                .into_iter()
                .collect()
        })
        .unwrap_or_default()
    }

    #[test]
    fn test_key_accepted_via_query_parameter() {
        let config = test_config(Environment::Production);

        let outcome = authenticate(&config, &query_with(Some(TEST_API_KEY)), &HeaderMap::new());

        assert!(outcome.is_ok());
    }

    #[test]
    fn test_key_accepted_via_header() {
        let config = test_config(Environment::Production);

        let mut headers = HeaderMap::new();
        headers.insert(TEST_API_KEY_NAME, HeaderValue::from_static(TEST_API_KEY));

        assert!(authenticate(&config, &HashMap::new(), &headers).is_ok());
    }

    #[test]
    fn test_key_accepted_via_cookie() {
        let config = test_config(Environment::Production);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {TEST_API_KEY_NAME}={TEST_API_KEY}"))
                .unwrap(),
        );

        assert!(authenticate(&config, &HashMap::new(), &headers).is_ok());
    }

    #[test]
    fn test_quoted_cookie_value_is_accepted() {
        let config = test_config(Environment::Production);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{TEST_API_KEY_NAME}=\"{TEST_API_KEY}\""))
                .unwrap(),
        );

        assert!(authenticate(&config, &HashMap::new(), &headers).is_ok());
    }

    #[test]
    fn test_wrong_query_key_falls_through_to_header() {
        let config = test_config(Environment::Production);

        let mut headers = HeaderMap::new();
        headers.insert(TEST_API_KEY_NAME, HeaderValue::from_static(TEST_API_KEY));

        let outcome = authenticate(&config, &query_with(Some("wrong")), &headers);

        assert!(outcome.is_ok());
    }

    #[test]
    fn test_no_key_anywhere_is_forbidden() {
        let config = test_config(Environment::Production);

        let error = authenticate(&config, &HashMap::new(), &HeaderMap::new()).unwrap_err();

        assert_eq!(error.status, StatusCode::FORBIDDEN);
        assert_eq!(error.message, "Could not validate credentials");
    }

    #[test]
    fn test_wrong_key_everywhere_is_forbidden() {
        let config = test_config(Environment::Production);

        let mut headers = HeaderMap::new();
        headers.insert(TEST_API_KEY_NAME, HeaderValue::from_static("wrong"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{TEST_API_KEY_NAME}=wrong")).unwrap(),
        );

        let outcome = authenticate(&config, &query_with(Some("wrong")), &headers);

        assert_eq!(outcome.unwrap_err().status, StatusCode::FORBIDDEN);
    }
}
