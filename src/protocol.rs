use crate::error::TransportCause;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Role qualifier sent with every settings request
pub const ROLE_VALUE: &str = "value";

/// Wire type tag of a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I32,
    Bool,
    String,
    PhysicalSource,
    SpeakerStatus,
}

impl ValueType {
    /// Tag used both as the `type` value and as the payload key
    pub fn tag(self) -> &'static str {
        match self {
            ValueType::I32 => "i32_",
            ValueType::Bool => "bool_",
            ValueType::String => "string_",
            ValueType::PhysicalSource => "kefPhysicalSource",
            ValueType::SpeakerStatus => "kefSpeakerStatus",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ValueType {
    type Err = TransportCause;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "i32_" => Ok(ValueType::I32),
            "bool_" => Ok(ValueType::Bool),
            "string_" => Ok(ValueType::String),
            "kefPhysicalSource" => Ok(ValueType::PhysicalSource),
            "kefSpeakerStatus" => Ok(ValueType::SpeakerStatus),
            other => Err(TransportCause::UnknownValueType(other.to_string())),
        }
    }
}

/// A single decoded setting value
///
/// Serializes to the speaker's envelope form, e.g.
/// `{"type":"i32_","i32_":35}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    I32(i32),
    Bool(bool),
    String(String),
    PhysicalSource(String),
    SpeakerStatus(String),
}

impl SettingValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            SettingValue::I32(_) => ValueType::I32,
            SettingValue::Bool(_) => ValueType::Bool,
            SettingValue::String(_) => ValueType::String,
            SettingValue::PhysicalSource(_) => ValueType::PhysicalSource,
            SettingValue::SpeakerStatus(_) => ValueType::SpeakerStatus,
        }
    }

    /// Encode as the JSON envelope carried in the `value` query parameter
    pub fn to_envelope(&self) -> Result<String, TransportCause> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the first element of a `getData` response
    ///
    /// Returns `Ok(None)` when the element has no value for `expected`.
    pub fn decode(expected: ValueType, element: &Map<String, Value>) -> Result<Option<Self>, TransportCause> {
        if let Some(tag) = element.get("type").and_then(Value::as_str) {
            let found: ValueType = tag.parse()?;
            if found != expected {
                return Err(TransportCause::UnexpectedValueType {
                    expected: expected.tag(),
                    found: tag.to_string(),
                });
            }
        }

        let raw = match element.get(expected.tag()) {
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };

        let value = match expected {
            ValueType::I32 => {
                let n = raw
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| malformed(expected, raw))?;
                SettingValue::I32(n)
            }
            ValueType::Bool => SettingValue::Bool(raw.as_bool().ok_or_else(|| malformed(expected, raw))?),
            ValueType::String => SettingValue::String(as_string(expected, raw)?),
            ValueType::PhysicalSource => SettingValue::PhysicalSource(as_string(expected, raw)?),
            ValueType::SpeakerStatus => SettingValue::SpeakerStatus(as_string(expected, raw)?),
        };

        Ok(Some(value))
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            SettingValue::I32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload of the string-like variants
    pub fn into_string(self) -> Option<String> {
        match self {
            SettingValue::String(s) | SettingValue::PhysicalSource(s) | SettingValue::SpeakerStatus(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tag = self.value_type().tag();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", tag)?;
        match self {
            SettingValue::I32(n) => map.serialize_entry(tag, n)?,
            SettingValue::Bool(b) => map.serialize_entry(tag, b)?,
            SettingValue::String(s) | SettingValue::PhysicalSource(s) | SettingValue::SpeakerStatus(s) => {
                map.serialize_entry(tag, s)?
            }
        }
        map.end()
    }
}

fn as_string(expected: ValueType, raw: &Value) -> Result<String, TransportCause> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed(expected, raw))
}

fn malformed(expected: ValueType, raw: &Value) -> TransportCause {
    TransportCause::MalformedValue(format!("`{}` holds {}", expected, raw))
}
