//! Unified error types surfaced by the battle runtime.
//!
//! Scheduling itself never fails; these errors cover loading configuration
//! and scenarios, and failures reported by the action executor while a turn
//! is being driven.
use battle_core::{ActorId, BattleError, ErrorSeverity, TargetError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("scenario references unknown combatant {actor}")]
    UnknownCombatant { actor: ActorId },

    #[error("action of {actor} failed: {reason}")]
    Execute { actor: ActorId, reason: String },

    #[error("turn {turn} exceeded {limit} actions")]
    TurnOverflow { turn: u32, limit: usize },
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidConfig(_) | Self::UnknownCombatant { .. } => ErrorSeverity::Validation,
            Self::Target(err) => err.severity(),
            Self::Execute { .. } => ErrorSeverity::Internal,
            Self::TurnOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            Self::Target(err) => err.error_code(),
            Self::UnknownCombatant { .. } => "RUNTIME_UNKNOWN_COMBATANT",
            Self::Execute { .. } => "RUNTIME_EXECUTE",
            Self::TurnOverflow { .. } => "RUNTIME_TURN_OVERFLOW",
        }
    }
}
