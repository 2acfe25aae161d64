// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared variable namespace backing a mock context.
//!
//! A [`Namespace`] is a handle: cloning it shares the same underlying map, so a
//! context built from a namespace observes every later mutation made through
//! any other handle.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

/// Render a value the way it appears when substituted into a template.
///
/// Strings are emitted raw, scalars as their literal, arrays and objects as
/// compact JSON. `Null` has no textual form and yields `None`.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// A shared, mutable mapping from variable name to value.
#[derive(Clone, Default)]
pub struct Namespace {
    inner: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing map.
    pub fn from_map(map: BTreeMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    // The map only holds plain data, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a variable, returning the previous value.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write().insert(name.into(), value.into())
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    /// Remove a variable, returning its value if it was present.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.write().remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Variable names in key order.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert every entry of `entries`, overriding existing names.
    pub fn extend<I, K>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut map = self.write();
        for (k, v) in entries {
            map.insert(k.into(), v);
        }
    }

    /// A point-in-time copy of the whole namespace.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.read().clone()
    }

    /// Run `f` against the live map without cloning it.
    pub fn with_map<R>(&self, f: impl FnOnce(&BTreeMap<String, Value>) -> R) -> R {
        f(&self.read())
    }

    /// Returns true when both handles share the same storage.
    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<BTreeMap<String, Value>> for Namespace {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl From<Map<String, Value>> for Namespace {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.read();
        write!(f, "{{")?;
        for (i, (k, v)) in map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let text = value_to_text(v).unwrap_or_else(|| "null".to_string());
            write!(f, "{k}={text}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.read().iter()).finish()
    }
}
