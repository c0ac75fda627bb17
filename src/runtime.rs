//! All-or-nothing call execution
//!
//! Every call runs against a staged copy of the game state and a fresh event
//! buffer, and against the live treasury behind a checkpoint. On success the
//! staged state and events are committed; on any error they are dropped and
//! the treasury is rolled back, so a rejected bet leaves no stake in the
//! treasury and no record in the event log.

use crate::common::traits::{Checkpoint, Treasury};
use crate::common::types::{Address, TxContext};
use crate::errors::DaoletteResult;
use crate::games::processor::{RoundContext, SettlementEngine};
use crate::games::state::GameState;
use crate::games::types::{BetEvent, RoundReceipt};
use tracing::{debug, warn};

pub struct Runtime<T: Treasury + Checkpoint> {
    state: GameState,
    treasury: T,
    events: Vec<BetEvent>,
    engine: SettlementEngine,
}

impl<T: Treasury + Checkpoint> Runtime<T> {
    pub fn new(state: GameState, treasury: T, engine: SettlementEngine) -> Self {
        Self {
            state,
            treasury,
            events: Vec::new(),
            engine,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn treasury(&self) -> &T {
        &self.treasury
    }

    /// Direct treasury access for funding outside of any call
    pub fn treasury_mut(&mut self) -> &mut T {
        &mut self.treasury
    }

    /// Committed records, oldest first
    pub fn events(&self) -> &[BetEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BetEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn bet_on_numbers(&mut self, tx: &TxContext, numbers: &str, seed: &str) -> DaoletteResult<RoundReceipt> {
        self.atomically("bet_on_numbers", |engine, state, treasury, events| {
            engine.bet_on_numbers(
                RoundContext {
                    tx,
                    state: &*state,
                    treasury,
                    events,
                },
                numbers,
                seed,
            )
        })
    }

    pub fn bet_on_color(&mut self, tx: &TxContext, is_red: bool, seed: &str) -> DaoletteResult<RoundReceipt> {
        self.atomically("bet_on_color", |engine, state, treasury, events| {
            engine.bet_on_color(
                RoundContext {
                    tx,
                    state: &*state,
                    treasury,
                    events,
                },
                is_red,
                seed,
            )
        })
    }

    pub fn bet_on_parity(&mut self, tx: &TxContext, is_odd: bool, seed: &str) -> DaoletteResult<RoundReceipt> {
        self.atomically("bet_on_even_odd", |engine, state, treasury, events| {
            engine.bet_on_parity(
                RoundContext {
                    tx,
                    state: &*state,
                    treasury,
                    events,
                },
                is_odd,
                seed,
            )
        })
    }

    pub fn get_bet_limit(&self, breadth: usize) -> DaoletteResult<u128> {
        self.engine.get_bet_limit(&self.state, &self.treasury, breadth)
    }

    pub fn get_multipliers(&self) -> String {
        self.engine.get_multipliers()
    }

    pub fn set_treasury(&mut self, caller: &Address, treasury: Address) -> DaoletteResult<()> {
        self.atomically("set_treasury", |_, state, _, _| state.set_treasury(caller, treasury))
    }

    pub fn game_on(&mut self, caller: &Address) -> DaoletteResult<()> {
        self.atomically("game_on", |_, state, _, _| state.game_on(caller))
    }

    pub fn game_off(&mut self, caller: &Address) -> DaoletteResult<()> {
        self.atomically("game_off", |_, state, _, _| state.game_off(caller))
    }

    fn atomically<R, F>(&mut self, call: &'static str, f: F) -> DaoletteResult<R>
    where
        F: FnOnce(&SettlementEngine, &mut GameState, &mut T, &mut Vec<BetEvent>) -> DaoletteResult<R>,
    {
        let mut state = self.state.clone();
        let checkpoint = self.treasury.checkpoint();
        let mut events = Vec::new();

        match f(&self.engine, &mut state, &mut self.treasury, &mut events) {
            Ok(result) => {
                debug!("{} committed with {} event(s)", call, events.len());
                self.state = state;
                self.events.append(&mut events);
                Ok(result)
            }
            Err(e) => {
                self.treasury.rollback(checkpoint);
                warn!("{} reverted: {}", call, e);
                Err(e)
            }
        }
    }
}
