use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serialized as the stable wire code returned by [`ErrorCode::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "things:thing.notfound")]
    ThingNotAccessible,
    #[serde(rename = "things:thing.notmodifiable")]
    ThingNotModifiable,
    #[serde(rename = "things:thing.notdeletable")]
    ThingNotDeletable,
    #[serde(rename = "things:attribute.notfound")]
    AttributeNotAccessible,
    #[serde(rename = "things:attribute.notmodifiable")]
    AttributeNotModifiable,
    #[serde(rename = "things:attribute.notdeletable")]
    AttributeNotDeletable,
}

impl ErrorCode {
    pub fn status(self) -> u16 {
        match self {
            Self::ThingNotAccessible | Self::AttributeNotAccessible => 404,
            Self::ThingNotModifiable
            | Self::ThingNotDeletable
            | Self::AttributeNotModifiable
            | Self::AttributeNotDeletable => 403,
        }
    }

    pub const ALL: [ErrorCode; 6] = [
        Self::ThingNotAccessible,
        Self::ThingNotModifiable,
        Self::ThingNotDeletable,
        Self::AttributeNotAccessible,
        Self::AttributeNotModifiable,
        Self::AttributeNotDeletable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThingNotAccessible => "things:thing.notfound",
            Self::ThingNotModifiable => "things:thing.notmodifiable",
            Self::ThingNotDeletable => "things:thing.notdeletable",
            Self::AttributeNotAccessible => "things:attribute.notfound",
            Self::AttributeNotModifiable => "things:attribute.notmodifiable",
            Self::AttributeNotDeletable => "things:attribute.notdeletable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid thing id '{0}': expected 'namespace:name'")]
    InvalidThingId(String),
    #[error("invalid JSON pointer '{0}'")]
    InvalidPointer(String),
}
