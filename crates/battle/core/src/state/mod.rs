//! Identity types shared by actions, queues and the actor capability.
//!
//! The scheduler never owns actor state: it stores identities and asks the
//! [`crate::env::ActorOracle`] for live values when it needs to compare.
mod common;

pub use common::{ActorId, MoveId};
