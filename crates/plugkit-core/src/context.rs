// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution context surface and the interpolating mock implementation.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::PlugkitError;
use crate::interpolate;
use crate::namespace::{Namespace, value_to_text};

/// The process-context surface a plugin task reads and writes variables through.
pub trait Context: Send + Sync {
    /// Returns the value of a variable, if set.
    fn get_variable(&self, name: &str) -> Option<Value>;

    /// Sets or replaces a variable.
    fn set_variable(&self, name: &str, value: Value);

    /// Removes a variable.
    fn remove_variable(&self, name: &str);

    /// Names of all variables currently set.
    fn variable_names(&self) -> Vec<String>;

    /// A copy of every variable.
    fn to_map(&self) -> BTreeMap<String, Value>;

    /// Resolves `${name}` placeholders in the textual form of `value`.
    fn interpolate(&self, value: &Value) -> Result<String, PlugkitError>;
}

/// A mock context whose `interpolate` substitutes `${name}` placeholders from
/// its own variables.
///
/// The context keeps the caller's [`Namespace`] handle rather than a copy, so
/// variables added to that namespace later are visible to interpolation.
#[derive(Clone, Debug)]
pub struct InterpolatingMockContext {
    namespace: Namespace,
}

impl InterpolatingMockContext {
    pub fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// The namespace backing this context.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Resolves placeholders in a plain string.
    pub fn interpolate_str(&self, text: &str) -> Result<String, PlugkitError> {
        self.namespace
            .with_map(|map| interpolate::interpolate(text, map))
    }

    /// Returns a variable only if it holds a string.
    pub fn var_as_string(&self, name: &str) -> Option<String> {
        match self.namespace.get(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a variable only if it holds an object.
    pub fn var_as_map(&self, name: &str) -> Option<Map<String, Value>> {
        match self.namespace.get(name)? {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }
}

impl Context for InterpolatingMockContext {
    fn get_variable(&self, name: &str) -> Option<Value> {
        self.namespace.get(name)
    }

    fn set_variable(&self, name: &str, value: Value) {
        self.namespace.insert(name, value);
    }

    fn remove_variable(&self, name: &str) {
        self.namespace.remove(name);
    }

    fn variable_names(&self) -> Vec<String> {
        self.namespace.keys()
    }

    fn to_map(&self) -> BTreeMap<String, Value> {
        self.namespace.snapshot()
    }

    fn interpolate(&self, value: &Value) -> Result<String, PlugkitError> {
        let text = value_to_text(value).ok_or(PlugkitError::NullInput)?;
        self.interpolate_str(&text)
    }
}

impl From<Namespace> for InterpolatingMockContext {
    fn from(namespace: Namespace) -> Self {
        Self::new(namespace)
    }
}

impl fmt::Display for InterpolatingMockContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.namespace, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(entries: &[(&str, Value)]) -> InterpolatingMockContext {
        InterpolatingMockContext::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn validate_mock_context_interpolation() {
        let ctx = context(&[("name", json!("Concord"))]);
        let result = ctx.interpolate(&json!("My name is ${name}.")).unwrap();
        assert_eq!(result, "My name is Concord.");
    }

    #[test]
    fn null_input_fails_before_touching_namespace() {
        // The namespace itself is invalid; the null input must be reported first.
        let ctx = context(&[("k", Value::Null)]);
        let err = ctx.interpolate(&Value::Null).unwrap_err();
        assert!(matches!(err, PlugkitError::NullInput));
    }

    #[test]
    fn null_namespace_value_aborts_call() {
        let ctx = context(&[("k", Value::Null)]);
        let err = ctx.interpolate(&json!("anything")).unwrap_err();
        assert_eq!(err.null_key(), Some("k"));
    }

    #[test]
    fn later_namespace_mutations_are_visible() {
        let ns = Namespace::new();
        let ctx = InterpolatingMockContext::new(ns.clone());
        assert_eq!(ctx.interpolate_str("${late}").unwrap(), "${late}");

        ns.insert("late", "arrived");
        assert_eq!(ctx.interpolate_str("${late}").unwrap(), "arrived");
        assert!(ctx.namespace().ptr_eq(&ns));
    }

    #[test]
    fn non_string_input_uses_textual_form() {
        let ctx = context(&[("n", json!(3))]);
        assert_eq!(ctx.interpolate(&json!(12)).unwrap(), "12");
        assert_eq!(ctx.interpolate(&json!(["${n}"])).unwrap(), r#"["3"]"#);
    }

    #[test]
    fn context_trait_round_trip() {
        let ctx = context(&[]);
        ctx.set_variable("a", json!("1"));
        ctx.set_variable("b", json!({"x": "y"}));
        assert_eq!(ctx.variable_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ctx.var_as_string("a").as_deref(), Some("1"));
        assert_eq!(ctx.var_as_string("b"), None);
        assert_eq!(ctx.var_as_map("b").and_then(|m| m.get("x").cloned()), Some(json!("y")));

        ctx.remove_variable("a");
        assert_eq!(ctx.get_variable("a"), None);
        assert_eq!(ctx.to_map().len(), 1);
    }

    #[test]
    fn display_delegates_to_namespace() {
        let ctx = context(&[("name", json!("Concord"))]);
        assert_eq!(ctx.to_string(), "{name=Concord}");
    }
}
