//! Answer hooks and factories for the modify live commands.

use chrono::Utc;
use serde_json::Value;
use shared::{
    domain::{LiveHeaders, ThingId},
    error::{ApiError, ErrorCode},
    protocol::{CommandResponse, Event, EventAction, ResponseOutcome},
};

use crate::config::AnswerSettings;

mod attribute;
mod thing;

pub use attribute::{
    DeleteAttributeEventFactory, DeleteAttributeResponseFactory, ModifyAttributeEventFactory,
    ModifyAttributeResponseFactory,
};
pub use thing::{
    DeleteThingEventFactory, DeleteThingResponseFactory, ModifyThingEventFactory,
    ModifyThingResponseFactory,
};

/// What every factory stamps onto the responses and events it creates.
#[derive(Debug, Clone)]
struct AnswerContext {
    thing_id: ThingId,
    path: String,
    headers: LiveHeaders,
    timestamp_events: bool,
}

impl AnswerContext {
    fn new(
        thing_id: &ThingId,
        path: String,
        command_headers: &LiveHeaders,
        settings: &AnswerSettings,
    ) -> Self {
        Self {
            thing_id: thing_id.clone(),
            path,
            headers: LiveHeaders {
                correlation_id: command_headers.correlation_id.clone(),
                channel: Some(settings.channel.clone()),
                response_required: false,
            },
            timestamp_events: settings.timestamp_events,
        }
    }

    fn response(&self, response_type: &str, outcome: ResponseOutcome) -> CommandResponse {
        CommandResponse {
            response_type: response_type.to_string(),
            thing_id: self.thing_id.clone(),
            path: self.path.clone(),
            outcome,
            headers: self.headers.clone(),
        }
    }

    fn error_response(
        &self,
        response_type: &str,
        code: ErrorCode,
        message: String,
    ) -> CommandResponse {
        self.response(
            response_type,
            ResponseOutcome::Failed {
                error: ApiError::new(code, message),
            },
        )
    }

    fn event(&self, event_type: &str, action: EventAction, value: Option<Value>) -> Event {
        Event {
            event_type: event_type.to_string(),
            thing_id: self.thing_id.clone(),
            path: self.path.clone(),
            action,
            value,
            timestamp: self.timestamp_events.then(Utc::now),
            headers: self.headers.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/modify_tests.rs"]
mod tests;
