use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a twin in `namespace:name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThingId {
    namespace: String,
    name: String,
}

impl ThingId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty() || name.is_empty() || namespace.contains(':') {
            return Err(DomainError::InvalidThingId(format!("{namespace}:{name}")));
        }
        Ok(Self { namespace, name })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for ThingId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((namespace, name)) = raw.split_once(':') else {
            return Err(DomainError::InvalidThingId(raw.to_string()));
        };
        Self::new(namespace, name)
    }
}

impl TryFrom<String> for ThingId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThingId> for String {
    fn from(value: ThingId) -> Self {
        value.to_string()
    }
}

/// Slash separated pointer into a JSON document, always stored with a leading `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPointer(String);

impl JsonPointer {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim().trim_start_matches('/');
        if trimmed.is_empty() || trimmed.split('/').any(str::is_empty) {
            return Err(DomainError::InvalidPointer(raw.to_string()));
        }
        Ok(Self(format!("/{trimmed}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split('/')
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for JsonPointer {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<JsonPointer> for String {
    fn from(value: JsonPointer) -> Self {
        value.0
    }
}

fn default_response_required() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveHeaders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default = "default_response_required")]
    pub response_required: bool,
}

impl LiveHeaders {
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Self::default()
        }
    }
}

impl Default for LiveHeaders {
    fn default() -> Self {
        Self {
            correlation_id: None,
            channel: None,
            response_required: default_response_required(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_thing_id() {
        let thing_id: ThingId = "org.example:sensor-1".parse().expect("thing id");
        assert_eq!(thing_id.namespace(), "org.example");
        assert_eq!(thing_id.name(), "sensor-1");
        assert_eq!(thing_id.to_string(), "org.example:sensor-1");
    }

    #[test]
    fn rejects_thing_id_without_namespace() {
        assert!("sensor-1".parse::<ThingId>().is_err());
        assert!(":sensor-1".parse::<ThingId>().is_err());
        assert!("org.example:".parse::<ThingId>().is_err());
    }

    #[test]
    fn thing_id_round_trips_through_json_string() {
        let thing_id = ThingId::new("org.example", "lamp").expect("thing id");
        let raw = serde_json::to_string(&thing_id).expect("serialize");
        assert_eq!(raw, "\"org.example:lamp\"");
        assert!(serde_json::from_str::<ThingId>("\"lamp\"").is_err());
    }

    #[test]
    fn normalizes_pointer_with_leading_slash() {
        let pointer = JsonPointer::new("location/latitude").expect("pointer");
        assert_eq!(pointer.as_str(), "/location/latitude");
        assert_eq!(
            pointer.segments().collect::<Vec<_>>(),
            vec!["location", "latitude"]
        );
    }

    #[test]
    fn rejects_empty_pointer_segments() {
        assert!(JsonPointer::new("").is_err());
        assert!(JsonPointer::new("/").is_err());
        assert!(JsonPointer::new("/a//b").is_err());
    }

    #[test]
    fn headers_require_response_unless_told_otherwise() {
        let headers: LiveHeaders = serde_json::from_str("{}").expect("headers");
        assert!(headers.response_required);
        assert_eq!(headers, LiveHeaders::default());
    }
}
