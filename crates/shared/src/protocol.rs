use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{JsonPointer, LiveHeaders, ThingId},
    error::ApiError,
};

const ROOT_PATH: &str = "/";

fn attribute_path(pointer: &JsonPointer) -> String {
    format!("/attributes{pointer}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyThing {
    pub thing_id: ThingId,
    pub thing: Value,
    #[serde(default)]
    pub headers: LiveHeaders,
}

impl ModifyThing {
    pub const TYPE: &'static str = "things.commands:modifyThing";

    pub fn resource_path(&self) -> String {
        ROOT_PATH.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteThing {
    pub thing_id: ThingId,
    #[serde(default)]
    pub headers: LiveHeaders,
}

impl DeleteThing {
    pub const TYPE: &'static str = "things.commands:deleteThing";

    pub fn resource_path(&self) -> String {
        ROOT_PATH.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyAttribute {
    pub thing_id: ThingId,
    pub pointer: JsonPointer,
    pub value: Value,
    #[serde(default)]
    pub headers: LiveHeaders,
}

impl ModifyAttribute {
    pub const TYPE: &'static str = "things.commands:modifyAttribute";

    pub fn resource_path(&self) -> String {
        attribute_path(&self.pointer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAttribute {
    pub thing_id: ThingId,
    pub pointer: JsonPointer,
    #[serde(default)]
    pub headers: LiveHeaders,
}

impl DeleteAttribute {
    pub const TYPE: &'static str = "things.commands:deleteAttribute";

    pub fn resource_path(&self) -> String {
        attribute_path(&self.pointer)
    }
}

/// A command received over the live channel, awaiting an answer from this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LiveCommand {
    ModifyThing(ModifyThing),
    DeleteThing(DeleteThing),
    ModifyAttribute(ModifyAttribute),
    DeleteAttribute(DeleteAttribute),
}

impl LiveCommand {
    pub fn command_type(&self) -> &'static str {
        match self {
            Self::ModifyThing(_) => ModifyThing::TYPE,
            Self::DeleteThing(_) => DeleteThing::TYPE,
            Self::ModifyAttribute(_) => ModifyAttribute::TYPE,
            Self::DeleteAttribute(_) => DeleteAttribute::TYPE,
        }
    }

    pub fn thing_id(&self) -> &ThingId {
        match self {
            Self::ModifyThing(command) => &command.thing_id,
            Self::DeleteThing(command) => &command.thing_id,
            Self::ModifyAttribute(command) => &command.thing_id,
            Self::DeleteAttribute(command) => &command.thing_id,
        }
    }

    pub fn headers(&self) -> &LiveHeaders {
        match self {
            Self::ModifyThing(command) => &command.headers,
            Self::DeleteThing(command) => &command.headers,
            Self::ModifyAttribute(command) => &command.headers,
            Self::DeleteAttribute(command) => &command.headers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResponseOutcome {
    Created { value: Value },
    Modified,
    Deleted,
    Failed { error: ApiError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response_type: String,
    pub thing_id: ThingId,
    pub path: String,
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
    pub headers: LiveHeaders,
}

impl CommandResponse {
    pub fn status(&self) -> u16 {
        match &self.outcome {
            ResponseOutcome::Created { .. } => 201,
            ResponseOutcome::Modified | ResponseOutcome::Deleted => 204,
            ResponseOutcome::Failed { error } => error.status(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ResponseOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub thing_id: ThingId,
    pub path: String,
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub headers: LiveHeaders,
}
