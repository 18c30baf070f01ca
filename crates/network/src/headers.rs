// crates/network/src/headers.rs
//! Validated request headers

use crate::error::{NetworkError, NetworkResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

/// Request headers over a [`HeaderMap`]
///
/// Names compare case-insensitively and an insert replaces every earlier
/// value for the name. Names and values are checked on insert, so a
/// malformed header never reaches a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HeaderMap);

impl Headers {
    pub fn new() -> Self {
        Self(HeaderMap::new())
    }

    /// `Accept` and `Content-Type` set to `application/json`
    pub fn json_defaults() -> Self {
        let mut map = HeaderMap::with_capacity(2);
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self(map)
    }

    /// Builds headers from name/value pairs, later pairs winning
    pub fn try_from_pairs<I, K, V>(pairs: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name.as_ref(), value.as_ref())?;
        }
        Ok(headers)
    }

    /// Builder-style [`Headers::insert`]
    pub fn with(mut self, name: &str, value: &str) -> NetworkResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Sets a header, replacing any existing value for the same name
    pub fn insert(&mut self, name: &str, value: &str) -> NetworkResult<()> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|source| NetworkError::InvalidHeaderName {
                name: name.to_string(),
                source,
            })?;
        let value = HeaderValue::from_str(value).map_err(|source| {
            NetworkError::InvalidHeaderValue {
                name: name.to_string(),
                source,
            }
        })?;

        self.0.insert(header, value);
        Ok(())
    }

    /// Value of `name`, if present and printable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Layers `other` on top of `self`; `other` wins on collisions
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &HeaderMap {
        &self.0
    }
}

impl From<Headers> for HeaderMap {
    fn from(headers: Headers) -> Self {
        headers.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let headers = Headers::json_defaults();
        assert_eq!(headers.get("accept"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut headers = Headers::json_defaults();
        headers.insert("content-type", "text/plain").unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_merge_layers() {
        let mut headers = Headers::json_defaults();
        let resource =
            Headers::try_from_pairs([("X-Api-Key", "abc"), ("Accept", "text/csv")]).unwrap();

        headers.merge(&resource);

        assert_eq!(headers.get("Accept"), Some("text/csv"));
        assert_eq!(headers.get("x-api-key"), Some("abc"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_later_pair_wins() {
        let headers = Headers::try_from_pairs([("Cookie", "a=1"), ("cookie", "b=2")]).unwrap();
        assert_eq!(headers.get("COOKIE"), Some("b=2"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_rejects_line_break_in_value() {
        let mut headers = Headers::new();
        let err = headers.insert("Cookie", "sid=1\r\nX-Injected: 1").unwrap_err();

        assert!(matches!(err, NetworkError::InvalidHeaderValue { ref name, .. } if name == "Cookie"));
        assert!(!headers.contains("x-injected"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_rejects_bad_name() {
        let err = Headers::new().with("Bad Header", "1").unwrap_err();
        assert!(matches!(err, NetworkError::InvalidHeaderName { .. }));
        assert!(Headers::try_from_pairs([("", "x")]).is_err());
    }
}
