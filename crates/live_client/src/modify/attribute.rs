use serde_json::Value;
use shared::{
    domain::{JsonPointer, ThingId},
    error::ErrorCode,
    protocol::{
        CommandResponse, DeleteAttribute, Event, EventAction, LiveCommand, ModifyAttribute,
        ResponseOutcome,
    },
};

use super::AnswerContext;
use crate::{builder::LiveCommandAnswering, config::AnswerSettings};

const MODIFY_ATTRIBUTE_RESPONSE: &str = "things.responses:modifyAttribute";
const DELETE_ATTRIBUTE_RESPONSE: &str = "things.responses:deleteAttribute";

fn not_accessible_message(pointer: &JsonPointer, thing_id: &ThingId) -> String {
    format!(
        "The attribute with key '{pointer}' on the Thing with ID '{thing_id}' could not be found or the requester had insufficient permissions to access it."
    )
}

#[derive(Debug, Clone)]
pub struct ModifyAttributeResponseFactory {
    context: AnswerContext,
    pointer: JsonPointer,
    value: Value,
}

impl ModifyAttributeResponseFactory {
    pub fn created(&self) -> CommandResponse {
        self.context.response(
            MODIFY_ATTRIBUTE_RESPONSE,
            ResponseOutcome::Created {
                value: self.value.clone(),
            },
        )
    }

    pub fn modified(&self) -> CommandResponse {
        self.context
            .response(MODIFY_ATTRIBUTE_RESPONSE, ResponseOutcome::Modified)
    }

    pub fn attribute_not_accessible_error(&self) -> CommandResponse {
        self.context.error_response(
            MODIFY_ATTRIBUTE_RESPONSE,
            ErrorCode::AttributeNotAccessible,
            not_accessible_message(&self.pointer, &self.context.thing_id),
        )
    }

    pub fn attribute_not_modifiable_error(&self) -> CommandResponse {
        self.context.error_response(
            MODIFY_ATTRIBUTE_RESPONSE,
            ErrorCode::AttributeNotModifiable,
            format!(
                "The attribute with key '{}' on the Thing with ID '{}' could not be modified as the requester had insufficient permissions to modify it.",
                self.pointer, self.context.thing_id
            ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ModifyAttributeEventFactory {
    context: AnswerContext,
    value: Value,
}

impl ModifyAttributeEventFactory {
    pub fn created(&self) -> Event {
        self.context.event(
            "things.events:attributeCreated",
            EventAction::Created,
            Some(self.value.clone()),
        )
    }

    pub fn modified(&self) -> Event {
        self.context.event(
            "things.events:attributeModified",
            EventAction::Modified,
            Some(self.value.clone()),
        )
    }
}

impl LiveCommandAnswering for ModifyAttribute {
    type ResponseFactory = ModifyAttributeResponseFactory;
    type EventFactory = ModifyAttributeEventFactory;

    const COMMAND_TYPE: &'static str = ModifyAttribute::TYPE;

    fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    fn from_live_command(command: LiveCommand) -> Result<Self, LiveCommand> {
        match command {
            LiveCommand::ModifyAttribute(command) => Ok(command),
            other => Err(other),
        }
    }

    fn produce_response(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::ResponseFactory) -> Option<CommandResponse>,
    ) -> Option<CommandResponse> {
        transform(&ModifyAttributeResponseFactory {
            context: AnswerContext::new(
                &self.thing_id,
                self.resource_path(),
                &self.headers,
                settings,
            ),
            pointer: self.pointer.clone(),
            value: self.value.clone(),
        })
    }

    fn produce_event(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::EventFactory) -> Option<Event>,
    ) -> Option<Event> {
        transform(&ModifyAttributeEventFactory {
            context: AnswerContext::new(
                &self.thing_id,
                self.resource_path(),
                &self.headers,
                settings,
            ),
            value: self.value.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAttributeResponseFactory {
    context: AnswerContext,
    pointer: JsonPointer,
}

impl DeleteAttributeResponseFactory {
    pub fn deleted(&self) -> CommandResponse {
        self.context
            .response(DELETE_ATTRIBUTE_RESPONSE, ResponseOutcome::Deleted)
    }

    pub fn attribute_not_accessible_error(&self) -> CommandResponse {
        self.context.error_response(
            DELETE_ATTRIBUTE_RESPONSE,
            ErrorCode::AttributeNotAccessible,
            not_accessible_message(&self.pointer, &self.context.thing_id),
        )
    }

    pub fn attribute_not_deletable_error(&self) -> CommandResponse {
        self.context.error_response(
            DELETE_ATTRIBUTE_RESPONSE,
            ErrorCode::AttributeNotDeletable,
            format!(
                "The attribute with key '{}' on the Thing with ID '{}' could not be deleted as the requester had insufficient permissions to delete it.",
                self.pointer, self.context.thing_id
            ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAttributeEventFactory {
    context: AnswerContext,
}

impl DeleteAttributeEventFactory {
    pub fn deleted(&self) -> Event {
        self.context
            .event("things.events:attributeDeleted", EventAction::Deleted, None)
    }
}

impl LiveCommandAnswering for DeleteAttribute {
    type ResponseFactory = DeleteAttributeResponseFactory;
    type EventFactory = DeleteAttributeEventFactory;

    const COMMAND_TYPE: &'static str = DeleteAttribute::TYPE;

    fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    fn from_live_command(command: LiveCommand) -> Result<Self, LiveCommand> {
        match command {
            LiveCommand::DeleteAttribute(command) => Ok(command),
            other => Err(other),
        }
    }

    fn produce_response(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::ResponseFactory) -> Option<CommandResponse>,
    ) -> Option<CommandResponse> {
        transform(&DeleteAttributeResponseFactory {
            context: AnswerContext::new(
                &self.thing_id,
                self.resource_path(),
                &self.headers,
                settings,
            ),
            pointer: self.pointer.clone(),
        })
    }

    fn produce_event(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::EventFactory) -> Option<Event>,
    ) -> Option<Event> {
        transform(&DeleteAttributeEventFactory {
            context: AnswerContext::new(
                &self.thing_id,
                self.resource_path(),
                &self.headers,
                settings,
            ),
        })
    }
}
