//! Client side answers to live commands.
//!
//! A live command is a twin command routed to the device itself. The device replies
//! with a [`LiveCommandAnswer`]: an optional response for the sender and an optional
//! event for subscribers. Answers are assembled with [`AnswerBuilder`], either freely
//! or through the staged `answer()` chain on any [`LiveCommandAnswering`] command.

pub mod answer;
pub mod builder;
pub mod config;
pub mod error;
pub mod modify;

pub use answer::LiveCommandAnswer;
pub use builder::{AnswerBuilder, BuildStep, EventStep, LiveCommandAnswering, ResponseStep};
pub use config::{load_settings, AnswerSettings};
pub use error::LiveError;
