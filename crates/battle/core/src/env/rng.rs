//! Seeded randomness for tie-breaks.
//!
//! Equal-speed ties are broken with draws from a stream derived from the
//! battle seed, never from wall-clock entropy, so replaying a battle with the
//! same seed and the same pushes reproduces the same turn order.

/// Deterministic random number source.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, bound)`. A zero bound yields zero.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn advance(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn permute(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::permute(Self::advance(seed))
    }
}

/// Derive the seed for one draw.
///
/// * `battle_seed` - seed fixed when the battle starts
/// * `draw` - position in the current turn's stream
/// * `turn` - turn number the stream belongs to
/// * `context` - separates independent streams sharing a battle seed
pub fn compute_seed(battle_seed: u64, draw: u64, turn: u32, context: u32) -> u64 {
    let mut hash = battle_seed;

    hash ^= draw.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(turn).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// The battle's shared tie-break stream.
///
/// Every tie consumes exactly one draw, whichever queue it happens in, so the
/// number of ties elsewhere never shifts the sequence of a given draw index.
#[derive(Clone, Debug)]
pub struct TieBreaker<R: RngOracle = PcgRng> {
    rng: R,
    seed: u64,
    turn: u32,
    draws: u64,
}

impl TieBreaker<PcgRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(PcgRng, seed)
    }
}

impl<R: RngOracle> TieBreaker<R> {
    /// Stream context reserved for scheduling tie-breaks.
    const CONTEXT: u32 = 0x7135;

    pub fn with_rng(rng: R, seed: u64) -> Self {
        Self {
            rng,
            seed,
            turn: 0,
            draws: 0,
        }
    }

    /// Restart the stream for `turn`.
    pub fn begin_turn(&mut self, turn: u32) {
        self.turn = turn;
        self.draws = 0;
    }

    /// Draw a uniform index in `[0, bound)`, consuming one unit of the stream.
    pub fn draw_below(&mut self, bound: u32) -> u32 {
        let seed = compute_seed(self.seed, self.draws, self.turn, Self::CONTEXT);
        self.draws += 1;
        self.rng.below(seed, bound)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Draws consumed since the turn began.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
