//! Fixed lookup tables of the wheel
//!
//! These are audited constants, not tunables. The ratio table in particular
//! is a hand-set schedule and must stay value-for-value identical.

use crate::games::types::Outcome;

/// Number of slots on the wheel, house slot included
pub const WHEEL_SLOTS: usize = 21;

/// Highest playable number
pub const MAX_OUTCOME: u8 = 20;

/// Widest bet accepted
pub const MAX_BREADTH: usize = 20;

/// Slot order on the wheel; a draw index maps to the outcome at that position
pub const WHEEL_ORDER: [Outcome; WHEEL_SLOTS] = [
    Outcome(2),
    Outcome(20),
    Outcome(3),
    Outcome(17),
    Outcome(6),
    Outcome(16),
    Outcome(7),
    Outcome(13),
    Outcome(10),
    Outcome(12),
    Outcome(11),
    Outcome(9),
    Outcome(14),
    Outcome(8),
    Outcome(15),
    Outcome(5),
    Outcome(18),
    Outcome(4),
    Outcome(19),
    Outcome(1),
    Outcome(0),
];

pub const RED: [u8; 10] = [1, 4, 5, 8, 9, 12, 13, 16, 17, 20];
pub const BLACK: [u8; 10] = [2, 3, 6, 7, 10, 11, 14, 15, 18, 19];
pub const ODD: [u8; 10] = [1, 3, 5, 7, 9, 11, 13, 15, 17, 19];
pub const EVEN: [u8; 10] = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20];

/// Divisors applied to treasury capital to obtain the stake ceiling.
///
/// Index 0 covers color and parity bets, index `n` a numbers bet of breadth `n`.
pub const BET_LIMIT_RATIOS: [u128; MAX_BREADTH + 1] = [
    147, 2675, 4315, 2725, 1930, 1454, 1136, 908, 738, 606, 500, 413, 341, 280, 227, 182, 142,
    107, 76, 48, 23,
];

/// Minimum stake: 0.1 of the native coin (18 decimals)
pub const BET_MIN: u128 = 100_000_000_000_000_000;

pub const COLOR_MULTIPLIER: u128 = 2;
pub const PARITY_MULTIPLIER: u128 = 2;
pub const SINGLE_NUMBER_MULTIPLIER: u128 = 20;

/// Per-number factor for numbers bets, as thousandths (20.685 x 1000, truncated)
pub const NUMBER_FACTOR_MILLIS: u128 = 20_685;

/// Fixed-point scale applied to [`NUMBER_FACTOR_MILLIS`]
pub const NUMBER_FACTOR_SCALE: u128 = 1_000;

/// Draw residues are taken modulo this value
pub const DRAW_MODULUS: u32 = 100_000;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_wheel_order_is_a_permutation() {
        let values: BTreeSet<u8> = WHEEL_ORDER.iter().map(|o| o.value()).collect();
        assert_eq!(values.len(), WHEEL_SLOTS);
        assert_eq!(values.iter().copied().collect::<Vec<_>>(), (0..=20).collect::<Vec<_>>());
        assert_eq!(WHEEL_ORDER[WHEEL_SLOTS - 1], Outcome::HOUSE);
    }

    #[test]
    fn test_groups_partition_playable_numbers() {
        let red: BTreeSet<u8> = RED.into_iter().collect();
        let black: BTreeSet<u8> = BLACK.into_iter().collect();
        assert!(red.is_disjoint(&black));
        assert_eq!(red.union(&black).count(), 20);

        let odd: BTreeSet<u8> = ODD.into_iter().collect();
        let even: BTreeSet<u8> = EVEN.into_iter().collect();
        assert!(odd.is_disjoint(&even));
        assert_eq!(odd.union(&even).count(), 20);
        assert!(odd.iter().all(|n| n % 2 == 1));
    }

    #[test]
    fn test_ratio_schedule_values() {
        assert_eq!(BET_LIMIT_RATIOS.len(), 21);
        assert_eq!(BET_LIMIT_RATIOS[0], 147);
        assert_eq!(BET_LIMIT_RATIOS[1], 2675);
        assert_eq!(BET_LIMIT_RATIOS[2], 4315);
        assert_eq!(BET_LIMIT_RATIOS[20], 23);
        assert_eq!(BET_LIMIT_RATIOS.iter().sum::<u128>(), 18_973);
    }
}
