// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `${name}` placeholder substitution.
//!
//! Substitution is a single literal pass over the text: each `${key}` is
//! replaced with the textual form of the key's value, substituted text is never
//! re-scanned, and placeholders without a matching key are left as-is. Every
//! value in the namespace must be non-null, whether or not its placeholder
//! appears in the text.
//!
//! When several keys match at the same position (a key may itself contain
//! `${` or `}`), the longest key wins and equal lengths fall back to
//! lexicographic order, so the result never depends on map iteration.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::PlugkitError;
use crate::namespace::value_to_text;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Build the placeholder token for a key.
pub fn placeholder(key: &str) -> String {
    format!("{OPEN}{key}{CLOSE}")
}

/// Substitute every `${key}` in `text` with values from `namespace`.
///
/// Fails with [`PlugkitError::NullValue`] if any value in the namespace is
/// null; in that case no substitution is performed.
pub fn interpolate(text: &str, namespace: &BTreeMap<String, Value>) -> Result<String, PlugkitError> {
    let mut replacements = Vec::with_capacity(namespace.len());
    for (key, value) in namespace {
        let Some(rendered) = value_to_text(value) else {
            return Err(PlugkitError::NullValue { key: key.clone() });
        };
        replacements.push((key.as_str(), rendered));
    }

    // BTreeMap order already breaks ties lexicographically; the sort is stable.
    replacements.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    tracing::trace!(keys = replacements.len(), len = text.len(), "interpolating text");

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match replacements
            .iter()
            .find(|(key, _)| is_placeholder_for(candidate, key))
        {
            Some((key, rendered)) => {
                out.push_str(rendered);
                rest = &candidate[OPEN.len() + key.len() + CLOSE.len_utf8()..];
            }
            None => {
                out.push_str(OPEN);
                rest = &candidate[OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Whether `candidate` (which starts with `${`) begins with the placeholder for `key`.
fn is_placeholder_for(candidate: &str, key: &str) -> bool {
    candidate[OPEN.len()..]
        .strip_prefix(key)
        .is_some_and(|tail| tail.starts_with(CLOSE))
}

/// Distinct placeholder names in `text`, in order of first occurrence.
///
/// An opening `${` with no closing brace is not a placeholder.
pub fn placeholders(text: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            break;
        };
        let name = &after[..end];
        if !found.contains(&name) {
            found.push(name);
        }
        rest = &after[end + 1..];
    }
    found
}

/// Placeholders in `text` that have no key in `namespace`.
pub fn unresolved_placeholders(text: &str, namespace: &BTreeMap<String, Value>) -> Vec<String> {
    placeholders(text)
        .into_iter()
        .filter(|name| !namespace.contains_key(*name))
        .map(str::to_string)
        .collect()
}
