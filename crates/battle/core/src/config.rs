use crate::schedule::SpeedOrder;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Reproducible battle seed. Every tie-break draw is derived from it.
    pub seed: u64,

    /// Speed ordering in effect when the battle starts.
    pub speed_order: SpeedOrder,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Field slots in a double battle (two per side).
    pub const MAX_FIELD_SLOTS: usize = 4;
    /// A move can target at most every other field slot.
    pub const MAX_TARGETS: usize = Self::MAX_FIELD_SLOTS - 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_0f_ba771e;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            speed_order: SpeedOrder::Descending,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
