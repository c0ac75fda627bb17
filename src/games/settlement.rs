//! Settlement resolver
//!
//! Payout math, the pre-draw solvency check and win/loss resolution. All
//! money math is integer: the 20.685 per-number factor is carried as
//! thousandths and every product is overflow-checked.

use crate::common::traits::Treasury;
use crate::common::types::Address;
use crate::errors::{DaoletteError, DaoletteResult};
use crate::games::tables::{
    COLOR_MULTIPLIER, NUMBER_FACTOR_MILLIS, NUMBER_FACTOR_SCALE, PARITY_MULTIPLIER,
    SINGLE_NUMBER_MULTIPLIER,
};
use crate::games::types::{Bet, BetCategory, Draw, GameOutcome};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Payout owed if the bet wins
///
/// Numbers bets: `floor(20685 * stake / (1000 * breadth))`.
/// Color and parity pay 2x, a single number 20x.
pub fn gross_payout(category: BetCategory, stake: u128, breadth: usize) -> DaoletteResult<u128> {
    match category {
        BetCategory::Numbers => {
            let breadth = breadth.max(1) as u128;
            let numerator = NUMBER_FACTOR_MILLIS
                .checked_mul(stake)
                .ok_or(DaoletteError::ArithmeticOverflow("numbers payout"))?;
            Ok(numerator / (NUMBER_FACTOR_SCALE * breadth))
        }
        BetCategory::Color => multiply(stake, COLOR_MULTIPLIER),
        BetCategory::Parity => multiply(stake, PARITY_MULTIPLIER),
        BetCategory::SingleNumber => multiply(stake, SINGLE_NUMBER_MULTIPLIER),
    }
}

fn multiply(stake: u128, multiplier: u128) -> DaoletteResult<u128> {
    stake
        .checked_mul(multiplier)
        .ok_or(DaoletteError::ArithmeticOverflow("payout"))
}

/// Refuse a bet whose worst case the treasury could not honor
pub fn ensure_solvent<T: Treasury + ?Sized>(
    treasury: &T,
    treasury_address: &Address,
    payout: u128,
) -> DaoletteResult<()> {
    let balance = treasury.balance_of(treasury_address)?;
    if balance < payout {
        debug!("Not enough in treasury to make the play ({} < {})", balance, payout);
        return Err(DaoletteError::TreasuryInsufficientFunds { balance, payout });
    }
    Ok(())
}

/// Win iff the drawn outcome is covered; the final payout is 0 on a loss
pub fn resolve(bet: &Bet, gross_payout: u128, draw: &Draw) -> (GameOutcome, u128) {
    if bet.covers(draw.outcome) {
        (GameOutcome::Win, gross_payout)
    } else {
        (GameOutcome::Loss, 0)
    }
}

/// Transfer winnings; losses leave the stake in the treasury
pub fn pay_out<T: Treasury + ?Sized>(
    treasury: &mut T,
    bettor: &Address,
    outcome: GameOutcome,
    payout: u128,
) -> DaoletteResult<()> {
    match outcome {
        GameOutcome::Win => {
            debug!("Won {}", payout);
            treasury.pay_winner(bettor, payout)?;
        }
        GameOutcome::Loss => debug!("Player lost. Stake retained in treasury."),
    }
    Ok(())
}

/// Published multiplier table, e.g. `{"bet_on_color":2,...,"number_factor":20.685}`
///
/// The decimal factor is for display only and never feeds payout math.
pub fn multiplier_table() -> String {
    let mut table = Map::new();
    table.insert(BetCategory::Color.wire_name().into(), json!(COLOR_MULTIPLIER as u64));
    table.insert(BetCategory::Parity.wire_name().into(), json!(PARITY_MULTIPLIER as u64));
    table.insert(
        BetCategory::SingleNumber.wire_name().into(),
        json!(SINGLE_NUMBER_MULTIPLIER as u64),
    );
    table.insert(
        "number_factor".into(),
        json!(NUMBER_FACTOR_MILLIS as f64 / NUMBER_FACTOR_SCALE as f64),
    );
    Value::Object(table).to_string()
}
