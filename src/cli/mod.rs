//! CLI module - console prompts and the session state machine

mod controller;
mod prompt;

pub use controller::{Selection, Session, SessionSettings, State};
pub use prompt::Prompter;
