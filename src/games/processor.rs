use crate::common::traits::{EventSink, Treasury};
use crate::common::types::TxContext;
use crate::errors::{DaoletteError, DaoletteResult};
use crate::games::classifier::{classify_color, classify_numbers, classify_parity};
use crate::games::limits;
use crate::games::outcome_engine::OutcomeEngine;
use crate::games::settlement;
use crate::games::state::GameState;
use crate::games::types::{BetEvent, BetSlip, RoundReceipt};
use tracing::debug;

/// Everything one settlement call may read or touch
pub struct RoundContext<'a, T: Treasury + ?Sized> {
    pub tx: &'a TxContext,
    pub state: &'a GameState,
    pub treasury: &'a mut T,
    pub events: &'a mut dyn EventSink,
}

/// Settles single-round bets against the treasury
///
/// Order per bet: classify, forward stake, validate bounds, check solvency,
/// draw, resolve and pay. Nothing after the stake transfer is undone here;
/// callers must run each round inside an all-or-nothing scope (see
/// [`crate::runtime::Runtime`]).
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    outcome_engine: OutcomeEngine,
    preflight_validation: bool,
}

impl SettlementEngine {
    pub fn new(preflight_validation: bool) -> Self {
        Self {
            outcome_engine: OutcomeEngine::new(),
            preflight_validation,
        }
    }

    /// Bet on a comma-separated list of numbers
    pub fn bet_on_numbers<T: Treasury + ?Sized>(
        &self,
        round: RoundContext<'_, T>,
        numbers: &str,
        seed: &str,
    ) -> DaoletteResult<RoundReceipt> {
        self.settle(round, classify_numbers(numbers), seed)
    }

    /// Bet on red (`true`) or black (`false`)
    pub fn bet_on_color<T: Treasury + ?Sized>(
        &self,
        round: RoundContext<'_, T>,
        is_red: bool,
        seed: &str,
    ) -> DaoletteResult<RoundReceipt> {
        self.settle(round, classify_color(is_red), seed)
    }

    /// Bet on odd (`true`) or even (`false`)
    pub fn bet_on_parity<T: Treasury + ?Sized>(
        &self,
        round: RoundContext<'_, T>,
        is_odd: bool,
        seed: &str,
    ) -> DaoletteResult<RoundReceipt> {
        self.settle(round, classify_parity(is_odd), seed)
    }

    /// Stake ceiling for a bet on `breadth` numbers (0 for color/parity)
    pub fn get_bet_limit<T: Treasury + ?Sized>(
        &self,
        state: &GameState,
        treasury: &T,
        breadth: usize,
    ) -> DaoletteResult<u128> {
        state.require_treasury()?;
        let capital = treasury.get_minimum_capital()?;
        Ok(limits::ceiling_for(capital, breadth)?)
    }

    pub fn get_multipliers(&self) -> String {
        settlement::multiplier_table()
    }

    fn settle<T: Treasury + ?Sized>(
        &self,
        round: RoundContext<'_, T>,
        slip: BetSlip,
        seed: &str,
    ) -> DaoletteResult<RoundReceipt> {
        let RoundContext {
            tx,
            state,
            treasury,
            events,
        } = round;

        if !state.is_game_active() {
            debug!("Game not active yet.");
            return Err(DaoletteError::GameInactive);
        }
        let treasury_address = state.require_treasury()?;

        events.emit(BetEvent::BetSource {
            from: tx.origin,
            timestamp: tx.tx_timestamp,
        });

        if self.preflight_validation {
            limits::validate_selection(&slip)?;
        }

        let stake = tx.value;
        debug!("Betting {} on {} ({})", stake, slip.numbers, slip.category);
        events.emit(BetEvent::BetPlaced {
            amount: stake,
            numbers: slip.numbers.clone(),
        });
        treasury.receive_wager(stake)?;

        let bet = limits::validate(&*treasury, &slip, stake)?;
        let gross_payout = settlement::gross_payout(bet.category, stake, bet.breadth())?;
        settlement::ensure_solvent(&*treasury, &treasury_address, gross_payout)?;

        let draw = self.outcome_engine.draw(tx, seed)?;
        let (outcome, payout) = settlement::resolve(&bet, gross_payout, &draw);
        debug!("winningNumber was {}.", draw.outcome);

        events.emit(BetEvent::BetResult {
            spin: draw.spin(),
            winning_number: draw.outcome,
            payout,
        });
        settlement::pay_out(treasury, &tx.origin, outcome, payout)?;

        Ok(RoundReceipt {
            tx_hash: tx.hash_hex(),
            bettor: tx.origin,
            bet,
            gross_payout,
            draw,
            outcome,
            payout,
        })
    }
}
