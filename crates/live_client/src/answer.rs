use serde::{Deserialize, Serialize};
use shared::protocol::{CommandResponse, Event};

/// The combined result of handling one live command: an optional response for the
/// sender and an optional event announcing the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveCommandAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<CommandResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event: Option<Event>,
}

impl LiveCommandAnswer {
    pub fn new(response: Option<CommandResponse>, event: Option<Event>) -> Self {
        Self { response, event }
    }

    pub fn response(&self) -> Option<&CommandResponse> {
        self.response.as_ref()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    pub fn has_event(&self) -> bool {
        self.event.is_some()
    }

    pub fn into_parts(self) -> (Option<CommandResponse>, Option<Event>) {
        (self.response, self.event)
    }
}
