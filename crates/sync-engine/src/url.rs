// crates/sync-engine/src/url.rs
//! URL templates: `http://host/users/:id` and `http://host/users/:id?`

use crate::error::{SyncError, SyncResult};
use crate::key::param_string;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::{Map, Value};

/// Characters escaped in a path segment, `/` and `%` included
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Expands `:name` and `:name?` segments from params
///
/// Values are percent-encoded so each fills exactly one path segment. A
/// missing required param is an error. A missing optional param is dropped
/// together with the `/` before it. A `:` not followed by a letter or `_`
/// (ports, `://`) is left alone.
pub fn expand_url(template: &str, params: &Map<String, Value>) -> SyncResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let name_len = param_name_len(after);
        if name_len == 0 {
            out.push(':');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        let optional = after[name_len..].starts_with('?');
        rest = &after[name_len + usize::from(optional)..];

        match params.get(name).and_then(param_string) {
            Some(value) => out.extend(utf8_percent_encode(&value, PATH_SEGMENT)),
            None if optional => {
                if out.ends_with('/') {
                    out.pop();
                }
            }
            None => return Err(SyncError::MissingParam(name.to_string())),
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn param_name_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
