//! Turn control: the collaborator that owns and drives the scheduler.
mod commands;
mod controller;

pub use commands::{TurnCommand, TurnCommands};
pub use controller::{ActionExecutor, TurnController};
