//! Staged construction of [`LiveCommandAnswer`]s.
//!
//! [`AnswerBuilder`] stores the command plus one response transform and one event
//! transform. Transforms receive a factory bound to the command and decide what, if
//! anything, to produce. The factories themselves come from the command kind's
//! [`LiveCommandAnswering`] implementation.
//!
//! Two shapes share the same state. The builder exposes every setter and can be
//! reconfigured freely (last write wins per slot). [`ResponseStep`], [`EventStep`]
//! and [`BuildStep`] wrap it and only expose the next legal call, so
//! `command.answer().with_response(..).without_event().build()` is the only order
//! the compiler accepts.

use std::fmt;

use shared::{
    domain::ThingId,
    protocol::{CommandResponse, Event, LiveCommand},
};
use tracing::{debug, trace};

use crate::{answer::LiveCommandAnswer, config::AnswerSettings, error::LiveError};

pub type ResponseTransform<R> = Box<dyn Fn(&R) -> Option<CommandResponse>>;
pub type EventTransform<E> = Box<dyn Fn(&E) -> Option<Event>>;

/// Hooks a command kind supplies so that it can be answered.
pub trait LiveCommandAnswering: Sized {
    /// Capability handed to response transforms.
    type ResponseFactory: 'static;
    /// Capability handed to event transforms.
    type EventFactory: 'static;

    const COMMAND_TYPE: &'static str;

    fn thing_id(&self) -> &ThingId;

    /// Extracts this kind from a wire command, handing the command back on mismatch.
    fn from_live_command(command: LiveCommand) -> Result<Self, LiveCommand>;

    fn produce_response(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::ResponseFactory) -> Option<CommandResponse>,
    ) -> Option<CommandResponse>;

    fn produce_event(
        &self,
        settings: &AnswerSettings,
        transform: &dyn Fn(&Self::EventFactory) -> Option<Event>,
    ) -> Option<Event>;

    fn answer(self) -> ResponseStep<Self> {
        AnswerBuilder::new(self).steps()
    }
}

fn produce_none<F, T>(_: &F) -> Option<T> {
    None
}

/// Single-owner builder. Not `Send`: transforms are stored without thread bounds.
///
/// `build` may be called any number of times; every call runs both hooks again with
/// whatever transforms are stored at that moment.
pub struct AnswerBuilder<C: LiveCommandAnswering> {
    command: C,
    settings: AnswerSettings,
    response_transform: ResponseTransform<C::ResponseFactory>,
    event_transform: EventTransform<C::EventFactory>,
}

impl<C: LiveCommandAnswering> AnswerBuilder<C> {
    pub fn new(command: C) -> Self {
        Self {
            command,
            settings: AnswerSettings::default(),
            response_transform: Box::new(produce_none::<C::ResponseFactory, CommandResponse>),
            event_transform: Box::new(produce_none::<C::EventFactory, Event>),
        }
    }

    pub fn try_new(command: Option<C>) -> Result<Self, LiveError> {
        command
            .map(Self::new)
            .ok_or_else(|| LiveError::invalid_argument("command", "a live command is required"))
    }

    pub fn from_live_command(command: LiveCommand) -> Result<Self, LiveError> {
        C::from_live_command(command).map(Self::new).map_err(|other| {
            LiveError::invalid_argument(
                "command",
                format!(
                    "expected {} but received {}",
                    C::COMMAND_TYPE,
                    other.command_type()
                ),
            )
        })
    }

    pub fn with_settings(mut self, settings: AnswerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn command(&self) -> &C {
        &self.command
    }

    pub fn settings(&self) -> &AnswerSettings {
        &self.settings
    }

    pub fn with_response<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(&C::ResponseFactory) -> Option<CommandResponse> + 'static,
    {
        trace!(command_type = C::COMMAND_TYPE, "response transform configured");
        self.response_transform = Box::new(transform);
        self
    }

    pub fn without_response(&mut self) -> &mut Self {
        trace!(command_type = C::COMMAND_TYPE, "response disabled");
        self.response_transform = Box::new(produce_none::<C::ResponseFactory, CommandResponse>);
        self
    }

    pub fn with_event<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(&C::EventFactory) -> Option<Event> + 'static,
    {
        trace!(command_type = C::COMMAND_TYPE, "event transform configured");
        self.event_transform = Box::new(transform);
        self
    }

    pub fn without_event(&mut self) -> &mut Self {
        trace!(command_type = C::COMMAND_TYPE, "event disabled");
        self.event_transform = Box::new(produce_none::<C::EventFactory, Event>);
        self
    }

    pub fn build(&self) -> LiveCommandAnswer {
        let response = self
            .command
            .produce_response(&self.settings, &*self.response_transform);
        let event = self
            .command
            .produce_event(&self.settings, &*self.event_transform);

        debug!(
            command_type = C::COMMAND_TYPE,
            thing_id = %self.command.thing_id(),
            has_response = response.is_some(),
            has_event = event.is_some(),
            "built live command answer"
        );

        LiveCommandAnswer::new(response, event)
    }

    pub fn steps(self) -> ResponseStep<C> {
        ResponseStep(self)
    }
}

impl<C> fmt::Debug for AnswerBuilder<C>
where
    C: LiveCommandAnswering + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerBuilder")
            .field("command", &self.command)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ResponseStep<C: LiveCommandAnswering>(AnswerBuilder<C>);

impl<C: LiveCommandAnswering> ResponseStep<C> {
    pub fn with_settings(self, settings: AnswerSettings) -> Self {
        Self(self.0.with_settings(settings))
    }

    pub fn with_response<F>(mut self, transform: F) -> EventStep<C>
    where
        F: Fn(&C::ResponseFactory) -> Option<CommandResponse> + 'static,
    {
        self.0.with_response(transform);
        EventStep(self.0)
    }

    pub fn without_response(mut self) -> EventStep<C> {
        self.0.without_response();
        EventStep(self.0)
    }
}

#[derive(Debug)]
pub struct EventStep<C: LiveCommandAnswering>(AnswerBuilder<C>);

impl<C: LiveCommandAnswering> EventStep<C> {
    pub fn with_event<F>(mut self, transform: F) -> BuildStep<C>
    where
        F: Fn(&C::EventFactory) -> Option<Event> + 'static,
    {
        self.0.with_event(transform);
        BuildStep(self.0)
    }

    pub fn without_event(mut self) -> BuildStep<C> {
        self.0.without_event();
        BuildStep(self.0)
    }
}

#[derive(Debug)]
pub struct BuildStep<C: LiveCommandAnswering>(AnswerBuilder<C>);

impl<C: LiveCommandAnswering> BuildStep<C> {
    pub fn build(&self) -> LiveCommandAnswer {
        self.0.build()
    }

    pub fn into_builder(self) -> AnswerBuilder<C> {
        self.0
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
