//! Battle runtime that drives the turn-order scheduler.
//!
//! Modules:
//! - [`turn`]: turn controller owning the scheduler and the run order
//! - [`oracle`]: roster backing live speed and priority reads
//! - [`scenario`]: RON encounter setup
//! - [`config`]: runtime configuration
//! - [`error`]: runtime error type
pub mod config;
pub mod error;
pub mod oracle;
pub mod scenario;
pub mod turn;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use oracle::{Combatant, Roster};
pub use scenario::{CombatantSpec, QueuedSpec, Scenario};
pub use turn::{ActionExecutor, TurnCommand, TurnCommands, TurnController};
