//! Bearer-Token Identities
//!
//! Demo-grade authentication: bearer tokens resolve to caller identities
//! through a table loaded from `AUTH_TOKENS` (comma-separated
//! `token=user_id` pairs). A real deployment puts an identity provider
//! behind this seam; the checkout endpoint only cares that a caller
//! identity exists.

use std::collections::HashMap;

use axum::http::{HeaderMap, header};

pub struct TokenTable {
    tokens: HashMap<String, String>,
}

impl TokenTable {
    /// Load the table from `AUTH_TOKENS`.
    pub fn from_env() -> Self {
        let raw = std::env::var("AUTH_TOKENS").unwrap_or_default();
        let table = Self::parse(&raw);
        if table.tokens.is_empty() {
            tracing::warn!("no auth tokens configured - checkout callers cannot authenticate");
        }
        table
    }

    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .filter_map(|pair| {
                let (token, user_id) = pair.split_once('=')?;
                let (token, user_id) = (token.trim(), user_id.trim());
                if token.is_empty() || user_id.is_empty() {
                    return None;
                }
                Some((token.to_string(), user_id.to_string()))
            })
            .collect();

        Self { tokens }
    }

    /// Resolve the caller identity from an `Authorization: Bearer` header.
    pub fn identify(&self, headers: &HeaderMap) -> Option<&str> {
        let bearer = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;

        self.tokens.get(bearer).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_bearer(token: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_parse_pairs() {
        let table = TokenTable::parse("tok-a=u1, tok-b=u2,,broken");
        assert_eq!(table.identify(&headers_with_bearer("tok-a")), Some("u1"));
        assert_eq!(table.identify(&headers_with_bearer("tok-b")), Some("u2"));
        assert_eq!(table.identify(&headers_with_bearer("broken")), None);
    }

    #[test]
    fn test_missing_or_unknown_bearer() {
        let table = TokenTable::parse("tok-a=u1");
        assert_eq!(table.identify(&HeaderMap::new()), None);
        assert_eq!(table.identify(&headers_with_bearer("tok-x")), None);
    }
}
