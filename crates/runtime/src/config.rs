//! Runtime configuration, loadable from RON.

use std::path::Path;

use battle_core::BattleConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Upper bound on actions released in one turn; guards against effects
    /// that keep re-queuing each other.
    pub max_actions_per_turn: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_ACTIONS_PER_TURN: usize = 256;

    /// Load config from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to read config file: {}", e))
        })?;

        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        let config: RuntimeConfig = ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to parse config RON: {}", e))
        })?;

        if config.max_actions_per_turn == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_actions_per_turn must be positive".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            max_actions_per_turn: Self::DEFAULT_MAX_ACTIONS_PER_TURN,
        }
    }
}

#[cfg(test)]
mod tests {
    use battle_core::SpeedOrder;

    use super::*;

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config = RuntimeConfig::from_ron("(battle: (seed: 9))").unwrap();

        assert_eq!(config.battle.seed, 9);
        assert_eq!(config.battle.speed_order, SpeedOrder::Descending);
        assert_eq!(
            config.max_actions_per_turn,
            RuntimeConfig::DEFAULT_MAX_ACTIONS_PER_TURN
        );
    }

    #[test]
    fn rejects_zero_action_limit() {
        let err = RuntimeConfig::from_ron("(max_actions_per_turn: 0)").unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    }
}
