//! Exposure limiter
//!
//! Stake bounds scale with the treasury's declared capital and the breadth
//! class of the bet, so a single winning bet can only claim a bounded slice
//! of the pool. The capital is queried on every call.

use crate::common::traits::Treasury;
use crate::errors::{DaoletteError, DaoletteResult, MalformedBetError};
use crate::games::tables::{BET_LIMIT_RATIOS, BET_MIN, MAX_BREADTH};
use crate::games::types::{Bet, BetCategory, BetSlip, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Admissible stake range for one bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeBounds {
    pub min: u128,
    pub max: u128,
}

impl StakeBounds {
    pub fn contains(&self, stake: u128) -> bool {
        stake >= self.min && stake <= self.max
    }

    pub fn check(&self, stake: u128) -> DaoletteResult<()> {
        if self.contains(stake) {
            Ok(())
        } else {
            Err(DaoletteError::StakeOutOfRange {
                stake,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Check count and range of the submitted entries and build the outcome set
pub fn validate_selection(slip: &BetSlip) -> Result<BTreeSet<Outcome>, MalformedBetError> {
    let breadth = slip.breadth();
    if breadth == 0 {
        return Err(MalformedBetError::NoOutcomes);
    }
    if breadth > MAX_BREADTH {
        return Err(MalformedBetError::TooManyOutcomes(breadth));
    }

    slip.tokens.iter().map(|token| parse_outcome(token)).collect()
}

/// Only canonical decimal spellings of 1..=20 are accepted ("07" and "+7" are not)
fn parse_outcome(token: &str) -> Result<Outcome, MalformedBetError> {
    token
        .parse::<u8>()
        .ok()
        .filter(|n| n.to_string() == token)
        .and_then(Outcome::playable)
        .ok_or_else(|| MalformedBetError::InvalidOutcome(token.to_string()))
}

/// Row of the ratio table that limits a bet
pub fn limit_index(category: BetCategory, breadth: usize) -> usize {
    if category.is_group_bet() {
        0
    } else {
        breadth
    }
}

/// Stake ceiling for a limiting index: `capital / ratio`, floored
pub fn ceiling_for(capital: u128, index: usize) -> Result<u128, MalformedBetError> {
    BET_LIMIT_RATIOS
        .get(index)
        .map(|ratio| capital / ratio)
        .ok_or(MalformedBetError::BreadthOutOfRange(index))
}

pub fn stake_bounds(capital: u128, category: BetCategory, breadth: usize) -> DaoletteResult<StakeBounds> {
    let max = ceiling_for(capital, limit_index(category, breadth))?;
    Ok(StakeBounds { min: BET_MIN, max })
}

/// Validate a classified bet and its stake against the live treasury capital
pub fn validate<T: Treasury + ?Sized>(treasury: &T, slip: &BetSlip, stake: u128) -> DaoletteResult<Bet> {
    let selected = validate_selection(slip)?;

    let capital = treasury.get_minimum_capital()?;
    let bounds = stake_bounds(capital, slip.category, selected.len())?;
    bounds.check(stake).map_err(|e| {
        debug!("Betting amount {} out of range ({} -> {})", stake, bounds.min, bounds.max);
        e
    })?;

    Ok(Bet {
        category: slip.category,
        selected,
        stake,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::classifier::{classify_color, classify_numbers};
    use crate::treasury::InMemoryTreasury;

    const CAPITAL: u128 = 1_000_000_000_000_000_000_000;

    fn treasury() -> InMemoryTreasury {
        InMemoryTreasury::with_label("limits", CAPITAL, CAPITAL)
    }

    #[test]
    fn test_selection_errors() {
        assert_eq!(
            validate_selection(&classify_numbers("")),
            Err(MalformedBetError::NoOutcomes)
        );

        let too_many: Vec<String> = (1..=21).map(|n| n.to_string()).collect();
        assert_eq!(
            validate_selection(&classify_numbers(&too_many.join(","))),
            Err(MalformedBetError::TooManyOutcomes(21))
        );

        for list in ["8,", "1,,2", ",5", "3, ,4"] {
            assert_eq!(
                validate_selection(&classify_numbers(list)),
                Err(MalformedBetError::InvalidOutcome(String::new())),
                "list {list:?}"
            );
        }

        for bad in ["0", "21", "07", "+7", "x", "-1"] {
            assert_eq!(
                validate_selection(&classify_numbers(&format!("1,{}", bad))),
                Err(MalformedBetError::InvalidOutcome(bad.to_string())),
                "token {bad}"
            );
        }
    }

    #[test]
    fn test_all_twenty_is_a_valid_selection() {
        let all: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
        let selected = validate_selection(&classify_numbers(&all.join(","))).unwrap();
        assert_eq!(selected.len(), 20);
    }

    #[test]
    fn test_group_bets_use_row_zero() {
        assert_eq!(limit_index(BetCategory::Color, 10), 0);
        assert_eq!(limit_index(BetCategory::Parity, 10), 0);
        assert_eq!(limit_index(BetCategory::Numbers, 4), 4);
        assert_eq!(limit_index(BetCategory::SingleNumber, 1), 1);
    }

    #[test]
    fn test_ceiling_is_floor_division() {
        assert_eq!(ceiling_for(CAPITAL, 0).unwrap(), 6_802_721_088_435_374_149);
        assert_eq!(ceiling_for(CAPITAL, 1).unwrap(), 373_831_775_700_934_579);
        assert_eq!(ceiling_for(CAPITAL, 20).unwrap(), 43_478_260_869_565_217_391);
        assert_eq!(ceiling_for(CAPITAL, 21), Err(MalformedBetError::BreadthOutOfRange(21)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let treasury = treasury();
        let slip = classify_numbers("3,4,5,6");
        let max = CAPITAL / BET_LIMIT_RATIOS[4];

        assert!(validate(&treasury, &slip, BET_MIN).is_ok());
        assert!(validate(&treasury, &slip, max).is_ok());

        match validate(&treasury, &slip, BET_MIN - 1) {
            Err(DaoletteError::StakeOutOfRange { min, max: upper, .. }) => {
                assert_eq!(min, BET_MIN);
                assert_eq!(upper, max);
            }
            other => panic!("expected stake error, got {:?}", other),
        }
        assert!(matches!(
            validate(&treasury, &slip, max + 1),
            Err(DaoletteError::StakeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_color_bet_limited_by_group_row() {
        let treasury = treasury();
        let bet = validate(&treasury, &classify_color(true), CAPITAL / 147).unwrap();
        assert_eq!(bet.category, BetCategory::Color);
        assert_eq!(bet.breadth(), 10);
    }

    #[test]
    fn test_ceiling_tracks_live_capital() {
        let mut treasury = treasury();
        let slip = classify_numbers("9");
        let stake = CAPITAL / 2675;
        assert!(validate(&treasury, &slip, stake).is_ok());

        treasury.set_minimum_capital(CAPITAL / 2);
        assert!(validate(&treasury, &slip, stake).is_err());
    }
}
