use crate::common::types::TxContext;
use crate::errors::{DaoletteError, DaoletteResult};
use crate::games::tables::{DRAW_MODULUS, WHEEL_ORDER, WHEEL_SLOTS};
use crate::games::types::Draw;
use sha3::{Digest, Sha3_256};
use tracing::debug;

/// Derives the winning slot from transaction context
///
/// The draw is `sha3_256(hex(tx_hash) || block_timestamp || seed)` read as a
/// big-endian integer modulo 100000. The block timestamp is the only input
/// the bettor cannot choose before the transaction is included, so this is a
/// heuristic unpredictability source and not a randomness beacon.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeEngine;

impl OutcomeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Draw the winning outcome for a round
    ///
    /// Programmatic callers are refused: a contract could inspect the pending
    /// block before deciding whether to complete its own call.
    pub fn draw(&self, tx: &TxContext, seed: &str) -> DaoletteResult<Draw> {
        if tx.sender.is_contract() {
            return Err(DaoletteError::CallerNotEligible(tx.sender));
        }

        let draw = Self::compute(tx, seed);
        debug!(
            "Result of the spin was {} (slot {}, number {})",
            draw.spin(),
            draw.index,
            draw.outcome
        );
        Ok(draw)
    }

    /// Pure draw function; same inputs always give the same draw
    pub fn compute(tx: &TxContext, seed: &str) -> Draw {
        let message = Self::seed_message(tx, seed);
        let residue = Self::residue(&Sha3_256::digest(message.as_bytes()));
        let index = Self::wheel_index(residue);

        Draw {
            residue,
            index,
            outcome: WHEEL_ORDER[index],
        }
    }

    /// Recompute a published draw from its inputs
    pub fn verify(tx: &TxContext, seed: &str, draw: &Draw) -> bool {
        Self::compute(tx, seed) == *draw
    }

    pub fn seed_message(tx: &TxContext, seed: &str) -> String {
        format!("{}{}{}", tx.hash_hex(), tx.block_timestamp, seed)
    }

    /// Big-endian digest value modulo [`DRAW_MODULUS`]
    pub fn residue(digest: &[u8]) -> u32 {
        let modulus = u64::from(DRAW_MODULUS);
        let value = digest
            .iter()
            .fold(0u64, |acc, byte| (acc * 256 + u64::from(*byte)) % modulus);
        value as u32
    }

    /// `floor(residue / 100000 * 21)` in integer arithmetic
    pub fn wheel_index(residue: u32) -> usize {
        (u64::from(residue % DRAW_MODULUS) * WHEEL_SLOTS as u64 / u64::from(DRAW_MODULUS)) as usize
    }
}
