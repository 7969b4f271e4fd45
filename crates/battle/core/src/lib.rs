//! Deterministic turn-order scheduling for turn-based battles.
//!
//! `battle-core` decides which queued actor action runs next during a turn.
//! Actions are pushed speculatively, before speed or priority are final, and
//! every pop re-evaluates the ordering from live actor state obtained through
//! [`env::ActorOracle`]. All scheduling flows through [`schedule::Scheduler`],
//! which is owned by the turn controller rather than reached globally.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod schedule;
pub mod state;

pub use action::{
    Action, ActionKind, ActorPhase, ActorPhaseKind, EntryEffect, HasActor, Message, MoveAction,
    MovePayload, MoveRef, MoveUseMode, PhaseDetail, Scheduling, TargetError, Targets,
    TimingOverride,
};
pub use config::BattleConfig;
pub use env::{ActorOracle, PcgRng, RngOracle, TieBreaker, compute_seed};
pub use error::{BattleError, ErrorSeverity};
pub use schedule::{
    ActorSpeedQueue, Enqueue, MoveQueue, OrderingQueue, PopContext, Scheduler, SpeedOrder,
};
pub use state::{ActorId, MoveId};
