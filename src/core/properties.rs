//! Event properties and repository-scoped context
//!
//! This module provides:
//! - `Properties`: Per-event key-value properties
//! - `ContextProperties`: Shared properties captured into every event
//! - `ContextGuard`: RAII guard for scoped context properties

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Value type for event properties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

impl PropertyValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            PropertyValue::String(s) => serde_json::Value::String(s.clone()),
            PropertyValue::Int(i) => serde_json::Value::Number((*i).into()),
            PropertyValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropertyValue::Bool(b) => serde_json::Value::Bool(*b),
            PropertyValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Int(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// Key-value properties attached to a single event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    fields: HashMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a property (builder form)
    pub fn with_property<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a property (mutable form)
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.fields.get(key)
    }

    /// Get all properties
    pub fn fields(&self) -> &HashMap<String, PropertyValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Format properties as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// Repository-scoped properties captured into every event
///
/// `ContextProperties` stores shared properties that a hierarchy merges into
/// each event it accepts. This is useful for common properties like service
/// name, version, or environment.
///
/// Thread-safe: can be shared freely across threads.
///
/// # Example
///
/// ```
/// use hierarchical_logger_system::core::ContextProperties;
///
/// let ctx = ContextProperties::new();
/// ctx.set("service", "api-gateway");
/// ctx.set("version", "1.2.3");
///
/// let fields = ctx.get_all();
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ContextProperties {
    fields: Arc<RwLock<HashMap<String, PropertyValue>>>,
}

impl ContextProperties {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            fields: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set a property, overwriting any existing value for the key.
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.fields.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.fields.write().remove(key);
    }

    pub fn clear(&self) {
        self.fields.write().clear();
    }

    /// Get a clone of all properties
    pub fn get_all(&self) -> HashMap<String, PropertyValue> {
        self.fields.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.read().len()
    }

    /// Merge context properties into an event's property set
    ///
    /// Per-event properties take priority over context properties.
    pub fn merge_into(&self, properties: &mut Properties) {
        let fields = self.fields.read();
        for (key, value) in fields.iter() {
            if !properties.fields.contains_key(key) {
                properties.fields.insert(key.clone(), value.clone());
            }
        }
    }

    /// Set a property and get a guard that removes it when dropped
    pub fn set_scoped<K, V>(&self, key: K, value: V) -> ContextGuard
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let key = key.into();
        self.fields.write().insert(key.clone(), value.into());
        ContextGuard::new(Arc::clone(&self.fields), key)
    }
}

impl Default for ContextProperties {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for scoped context properties
///
/// When dropped, removes the property from the context it was set on.
///
/// # Example
///
/// ```
/// use hierarchical_logger_system::core::ContextProperties;
///
/// let ctx = ContextProperties::new();
/// {
///     let _guard = ctx.set_scoped("request_id", "abc-123");
///     assert_eq!(ctx.len(), 1);
/// }
/// // request_id removed here
/// assert!(ctx.is_empty());
/// ```
pub struct ContextGuard {
    context: Arc<RwLock<HashMap<String, PropertyValue>>>,
    key: String,
}

impl ContextGuard {
    pub(crate) fn new(context: Arc<RwLock<HashMap<String, PropertyValue>>>, key: String) -> Self {
        Self { context, key }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.context.write().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_creation() {
        let props = Properties::new();
        assert!(props.is_empty());
    }

    #[test]
    fn test_properties_with_values() {
        let props = Properties::new()
            .with_property("user_id", 123)
            .with_property("username", "john_doe")
            .with_property("active", true);

        assert_eq!(props.len(), 3);
        assert!(!props.is_empty());
    }

    #[test]
    fn test_properties_format() {
        let props = Properties::new()
            .with_property("key1", "value1")
            .with_property("key2", 42);

        let formatted = props.format_fields();
        assert!(formatted.contains("key1=value1"));
        assert!(formatted.contains("key2=42"));
    }

    #[test]
    fn test_context_basic() {
        let ctx = ContextProperties::new();
        ctx.set("service", "api-gateway");
        ctx.set("version", "1.2.3");

        assert_eq!(ctx.get_all().len(), 2);
    }

    #[test]
    fn test_context_remove() {
        let ctx = ContextProperties::new();
        ctx.set("key1", "value1");
        ctx.set("key2", "value2");

        ctx.remove("key1");
        assert_eq!(ctx.len(), 1);
        assert!(!ctx.get_all().contains_key("key1"));
    }

    #[test]
    fn test_context_clear() {
        let ctx = ContextProperties::new();
        ctx.set("key1", "value1");
        ctx.set("key2", "value2");

        ctx.clear();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_context_merge_into() {
        let ctx = ContextProperties::new();
        ctx.set("service", "api");
        ctx.set("version", "1.0");

        let mut props = Properties::new().with_property("user_id", 123);
        ctx.merge_into(&mut props);

        assert_eq!(props.len(), 3);
        assert!(props.fields().contains_key("service"));
        assert!(props.fields().contains_key("version"));
        assert!(props.fields().contains_key("user_id"));
    }

    #[test]
    fn test_context_merge_priority() {
        let ctx = ContextProperties::new();
        ctx.set("key", "context_value");

        let mut props = Properties::new().with_property("key", "event_value");
        ctx.merge_into(&mut props);

        match props.get("key") {
            Some(PropertyValue::String(s)) => assert_eq!(s, "event_value"),
            _ => panic!("Expected string value"),
        }
    }

    #[test]
    fn test_scoped_guard_removes_on_drop() {
        let ctx = ContextProperties::new();
        {
            let _guard = ctx.set_scoped("request_id", "abc-123");
            assert_eq!(ctx.len(), 1);
        }
        assert!(ctx.is_empty());
    }
}
