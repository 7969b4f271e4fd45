//! Capabilities the scheduler reads from the surrounding engine.
//!
//! [`ActorOracle`] reports live combatant values; [`TieBreaker`] is the
//! battle's seeded stream used when those values are equal.
mod actors;
mod rng;

pub use actors::ActorOracle;
pub use rng::{PcgRng, RngOracle, TieBreaker, compute_seed};
