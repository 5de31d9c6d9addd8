use std::{collections::BTreeMap, collections::HashMap, fmt};

use zbus::zvariant::{OwnedValue, Value};

/// A single metadata value as reported by a player
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Text, also used for object paths
    Text(String),

    /// 32-bit integer (and the narrower integer types)
    Int(i32),

    /// 64-bit integer, e.g. `mpris:length` in microseconds
    Long(i64),

    /// Floating point value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// Array value, e.g. `xesam:artist`
    List(Vec<MetadataValue>),

    /// A value type that has no sensible text form
    Unsupported,
}

impl MetadataValue {
    /// Integer interpretation of the value, `0` when there is none
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Text(text) => text.trim().parse().unwrap_or(0),
            Self::Int(value) => i64::from(*value),
            Self::Long(value) => *value,
            Self::Float(value) => *value as i64,
            Self::Bool(value) => i64::from(*value),
            Self::List(_) | Self::Unsupported => 0,
        }
    }

    fn from_value(value: &Value<'_>) -> Self {
        match value {
            Value::Str(text) => Self::Text(text.to_string()),
            Value::ObjectPath(path) => Self::Text(path.to_string()),
            Value::Bool(flag) => Self::Bool(*flag),
            Value::U8(n) => Self::Int(i32::from(*n)),
            Value::I16(n) => Self::Int(i32::from(*n)),
            Value::U16(n) => Self::Int(i32::from(*n)),
            Value::I32(n) => Self::Int(*n),
            Value::U32(n) => Self::Long(i64::from(*n)),
            Value::I64(n) => Self::Long(*n),
            Value::U64(n) => Self::Long(i64::try_from(*n).unwrap_or(i64::MAX)),
            Value::F64(n) => Self::Float(*n),
            Value::Array(array) => Self::List(array.iter().map(Self::from_value).collect()),
            Value::Value(inner) => Self::from_value(inner),
            _ => Self::Unsupported,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Unsupported => Ok(()),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

/// Track metadata keyed by the player's own key names
///
/// Replaced wholesale on every track change; keys are kept sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    values: BTreeMap<String, MetadataValue>,
}

impl TrackMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.values.get(key)
    }

    /// Set a value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Key names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Expose every namespaced key (`xesam:title`) under its bare name (`title`) too
    ///
    /// Placeholders cannot contain `:`, so this is what makes MPRIS2 metadata usable in
    /// templates. Bare names already present are left alone.
    pub fn with_short_keys(mut self) -> Self {
        let aliases: Vec<(String, MetadataValue)> = self
            .values
            .iter()
            .filter_map(|(key, value)| {
                let (_, short) = key.split_once(':')?;
                if short.is_empty() || self.values.contains_key(short) {
                    return None;
                }
                Some((short.to_string(), value.clone()))
            })
            .collect();

        for (key, value) in aliases {
            self.values.entry(key).or_insert(value);
        }
        self
    }
}

impl From<&HashMap<String, OwnedValue>> for TrackMetadata {
    fn from(metadata: &HashMap<String, OwnedValue>) -> Self {
        Self {
            values: metadata
                .iter()
                .map(|(key, value)| (key.clone(), MetadataValue::from_value(value)))
                .collect(),
        }
    }
}

impl<'a> From<&HashMap<&'a str, Value<'a>>> for TrackMetadata {
    fn from(metadata: &HashMap<&'a str, Value<'a>>) -> Self {
        Self {
            values: metadata
                .iter()
                .map(|(key, value)| (key.to_string(), MetadataValue::from_value(value)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for TrackMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Decode a nested `Metadata` property value (an `a{sv}` dictionary)
pub(crate) fn metadata_from_value(value: &Value<'_>) -> Option<TrackMetadata> {
    let value = match value {
        Value::Value(inner) => inner.as_ref(),
        other => other,
    };
    let Value::Dict(dict) = value else {
        return None;
    };

    let mut metadata = TrackMetadata::new();
    for (key, entry) in dict.iter() {
        let key = match key {
            Value::Str(key) => key.to_string(),
            _ => continue,
        };
        metadata
            .values
            .insert(key, MetadataValue::from_value(entry));
    }
    Some(metadata)
}
