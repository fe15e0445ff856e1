//! Host value model.
//!
//! The shapes a scripting host hands across the binding boundary. Functions
//! are shared closures so callbacks can be stored in namespaces and invoked
//! after the synchronous transform finishes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;

/// A callable host value.
pub type HostFunction = Arc<dyn Fn(&[HostValue]) -> HostValue + Send + Sync>;

/// Property bag of a host object.
pub type HostObject = BTreeMap<String, HostValue>;

#[derive(Clone, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(OffsetDateTime),
    Object(HostObject),
    Function(HostFunction),
}

/// Kind tag of a [`HostValue`], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Date,
    Object,
    Function,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Undefined => "Undefined",
            ValueKind::Null => "Null",
            ValueKind::Boolean => "Boolean",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::Date => "Date",
            ValueKind::Object => "Object",
            ValueKind::Function => "Function",
        }
    }
}

impl HostValue {
    /// Wrap a closure as a host function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[HostValue]) -> HostValue + Send + Sync + 'static,
    {
        HostValue::Function(Arc::new(f))
    }

    /// Build an object from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, HostValue)>,
    {
        HostValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            HostValue::Undefined => ValueKind::Undefined,
            HostValue::Null => ValueKind::Null,
            HostValue::Bool(_) => ValueKind::Boolean,
            HostValue::Number(_) => ValueKind::Number,
            HostValue::String(_) => ValueKind::String,
            HostValue::Date(_) => ValueKind::Date,
            HostValue::Object(_) => ValueKind::Object,
            HostValue::Function(_) => ValueKind::Function,
        }
    }

    /// `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, HostValue::Null | HostValue::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Property lookup; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Call a function value. Non-functions yield `None`.
    pub fn invoke(&self, args: &[HostValue]) -> Option<HostValue> {
        match self {
            HostValue::Function(f) => Some(f(args)),
            _ => None,
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => f.write_str("Undefined"),
            HostValue::Null => f.write_str("Null"),
            HostValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            HostValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            HostValue::String(s) => f.debug_tuple("String").field(s).finish(),
            HostValue::Date(d) => f.debug_tuple("Date").field(d).finish(),
            HostValue::Object(o) => f.debug_tuple("Object").field(o).finish(),
            HostValue::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Functions compare by identity.
impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Undefined, HostValue::Undefined) => true,
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Number(a), HostValue::Number(b)) => a == b,
            (HostValue::String(a), HostValue::String(b)) => a == b,
            (HostValue::Date(a), HostValue::Date(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => a == b,
            (HostValue::Function(a), HostValue::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<OffsetDateTime> for HostValue {
    fn from(d: OffsetDateTime) -> Self {
        HostValue::Date(d)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(HostValue::Null, Into::into)
    }
}

/// JSON bridges carry no functions or dates; arrays become index-keyed objects.
impl From<serde_json::Value> for HostValue {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value;

        match json {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(b),
            Value::Number(n) => HostValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => HostValue::String(s),
            Value::Array(items) => HostValue::Object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), HostValue::from(v)))
                    .collect(),
            ),
            Value::Object(map) => HostValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, HostValue::from(v)))
                    .collect(),
            ),
        }
    }
}
