use serde_json::Value;
use shared::{
    domain::ThingId,
    error::ErrorCode,
    protocol::{
        CommandResponse, DeleteThing, Event, EventAction, LiveCommand, ModifyThing,
        ResponseOutcome,
    },
};

use super::AnswerContext;
use crate::{builder::LiveCommandAnswering, config::AnswerSettings};

const MODIFY_THING_RESPONSE: &str = "things.responses:modifyThing";
const DELETE_THING_RESPONSE: &str = "things.responses:deleteThing";

fn not_accessible_message(thing_id: &ThingId) -> String {
    format!(
        "The Thing with ID '{thing_id}' could not be found or requester had insufficient permissions to access it."
    )
}

#[derive(Debug, Clone)]
pub struct ModifyThingResponseFactory {
    context: AnswerContext,
    thing: Value,
}

impl ModifyThingResponseFactory {
    /// The thing did not exist before; the response echoes the stored thing.
    pub fn created(&self) -> CommandResponse {
        self.context.response(
            MODIFY_THING_RESPONSE,
            ResponseOutcome::Created {
                value: self.thing.clone(),
            },
        )
    }

    pub fn modified(&self) -> CommandResponse {
        self.context
            .response(MODIFY_THING_RESPONSE, ResponseOutcome::Modified)
    }

    pub fn thing_not_accessible_error(&self) -> CommandResponse {
        self.context.error_response(
            MODIFY_THING_RESPONSE,
            ErrorCode::ThingNotAccessible,
            not_accessible_message(&self.context.thing_id),
        )
    }

    pub fn thing_not_modifiable_error(&self) -> CommandResponse {
        self.context.error_response(
            MODIFY_THING_RESPONSE,
            ErrorCode::ThingNotModifiable,
            format!(
                "The Thing with ID '{}' could not be modified as the requester had insufficient permissions to modify it.",
                self.context.thing_id
            ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ModifyThingEventFactory {
    context: AnswerContext,
    thing: Value,
}

impl ModifyThingEventFactory {
    pub fn created(&self) -> Event {
        self.context.event(
            "things.events:thingCreated",
            EventAction::Created,
            Some(self.thing.clone()),
        )
    }

    pub fn modified(&self) -> Event {
        self.context.event(
            "things.events:thingModified",
            EventAction::Modified,
            Some(self.thing.clone()),
        )
    }
}

fn modify_context(command: &ModifyThing, settings: &AnswerSettings) -> AnswerContext {
    AnswerContext::new(
        &command.thing_id,
        command.resource_path(),
        &command.headers,
        settings,
    )
}

fn delete_context(command: &DeleteThing, settings: &AnswerSettings) -> AnswerContext {
    AnswerContext::new(
        &command.thing_id,
        command.resource_path(),
        &command.headers,
        settings,
    )
}

impl LiveCommandAnswering for ModifyThing {
    type ResponseFactory = ModifyThingResponseFactory;
    type EventFactory = ModifyThingEventFactory;

    const COMMAND_TYPE: &'static str = ModifyThing::TYPE;

    fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    fn from_live_command(command: LiveCommand) -> Result<Self, LiveCommand> {
        match command {
            LiveCommand::ModifyThing(command) => Ok(command),
            other => Err(other),
        }
    }

    fn produce_response(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::ResponseFactory) -> Option<CommandResponse>,
    ) -> Option<CommandResponse> {
        transform(&ModifyThingResponseFactory {
            context: modify_context(self, settings),
            thing: self.thing.clone(),
        })
    }

    fn produce_event(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::EventFactory) -> Option<Event>,
    ) -> Option<Event> {
        transform(&ModifyThingEventFactory {
            context: modify_context(self, settings),
            thing: self.thing.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteThingResponseFactory {
    context: AnswerContext,
}

impl DeleteThingResponseFactory {
    pub fn deleted(&self) -> CommandResponse {
        self.context
            .response(DELETE_THING_RESPONSE, ResponseOutcome::Deleted)
    }

    pub fn thing_not_accessible_error(&self) -> CommandResponse {
        self.context.error_response(
            DELETE_THING_RESPONSE,
            ErrorCode::ThingNotAccessible,
            not_accessible_message(&self.context.thing_id),
        )
    }

    pub fn thing_not_deletable_error(&self) -> CommandResponse {
        self.context.error_response(
            DELETE_THING_RESPONSE,
            ErrorCode::ThingNotDeletable,
            format!(
                "The Thing with ID '{}' could not be deleted as the requester had insufficient permissions to delete it.",
                self.context.thing_id
            ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DeleteThingEventFactory {
    context: AnswerContext,
}

impl DeleteThingEventFactory {
    pub fn deleted(&self) -> Event {
        self.context
            .event("things.events:thingDeleted", EventAction::Deleted, None)
    }
}

impl LiveCommandAnswering for DeleteThing {
    type ResponseFactory = DeleteThingResponseFactory;
    type EventFactory = DeleteThingEventFactory;

    const COMMAND_TYPE: &'static str = DeleteThing::TYPE;

    fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    fn from_live_command(command: LiveCommand) -> Result<Self, LiveCommand> {
        match command {
            LiveCommand::DeleteThing(command) => Ok(command),
            other => Err(other),
        }
    }

    fn produce_response(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::ResponseFactory) -> Option<CommandResponse>,
    ) -> Option<CommandResponse> {
        transform(&DeleteThingResponseFactory {
            context: delete_context(self, settings),
        })
    }

    fn produce_event(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::EventFactory) -> Option<Event>,
    ) -> Option<Event> {
        transform(&DeleteThingEventFactory {
            context: delete_context(self, settings),
        })
    }
}
