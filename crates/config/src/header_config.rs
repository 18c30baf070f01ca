//! Default request headers
//!
//! The lowest layer in request header merging. Resource and per-call headers
//! replace entries from here by case-insensitive name.

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default header configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeaderConfig {
    /// `Accept` header value
    pub accept: String,

    /// `Content-Type` header value
    pub content_type: String,

    /// Additional headers sent with every request
    pub extra: BTreeMap<String, String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            accept: "application/json".to_string(),
            content_type: "application/json".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl HeaderConfig {
    /// Header name/value pairs in send order: Accept, Content-Type, then extras
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.extra.len() + 2);
        pairs.push(("Accept".to_string(), self.accept.clone()));
        pairs.push(("Content-Type".to_string(), self.content_type.clone()));
        pairs.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

impl ConfigSection for HeaderConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.accept, "headers.accept"),
            Validator::header_value(&self.accept, "headers.accept"),
            Validator::not_empty(&self.content_type, "headers.content_type"),
            Validator::header_value(&self.content_type, "headers.content_type"),
        ];

        for (name, value) in &self.extra {
            let field = format!("headers.extra.{}", name);
            results.push(Validator::header_name(name, &field));
            results.push(Validator::header_value(value, &field));
        }

        Validator::collect_errors(results)
    }

    /// Scalar values are replaced; extra headers are unioned with `other` winning
    fn merge(&mut self, other: Self) {
        self.accept = other.accept;
        self.content_type = other.content_type;
        self.extra.extend(other.extra);
    }

    fn section_name(&self) -> &'static str {
        "headers"
    }
}
