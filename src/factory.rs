//! Runtime construction from configuration
//!
//! Centralizes the startup sequence shared by the CLI, the simulator and the
//! integration tests.

use crate::common::traits::{Checkpoint, Treasury};
use crate::config::{DaoletteConfig, GameConfig};
use crate::errors::DaoletteResult;
use crate::games::processor::SettlementEngine;
use crate::games::state::GameState;
use crate::runtime::Runtime;
use crate::treasury::InMemoryTreasury;
use tracing::info;

pub struct RuntimeFactory;

impl RuntimeFactory {
    /// Runtime over the in-process treasury described by `config`
    pub fn from_config(config: &DaoletteConfig) -> DaoletteResult<Runtime<InMemoryTreasury>> {
        config.validate()?;

        let treasury = InMemoryTreasury::new(
            config.treasury.address,
            config.treasury.minimum_capital,
            config.treasury.initial_balance,
        );
        info!(
            "Treasury {} seeded (capital {}, balance {})",
            treasury.address(),
            treasury.minimum_capital(),
            treasury.balance()
        );

        Self::with_treasury(&config.game, treasury)
    }

    /// Runtime over any treasury implementation; runs the startup admin calls as the owner
    pub fn with_treasury<T: Treasury + Checkpoint>(game: &GameConfig, treasury: T) -> DaoletteResult<Runtime<T>> {
        let mut runtime = Runtime::new(
            GameState::new(game.owner),
            treasury,
            SettlementEngine::new(game.preflight_validation),
        );

        if let Some(address) = game.treasury {
            runtime.set_treasury(&game.owner, address)?;
        }
        if game.start_active {
            runtime.game_on(&game.owner)?;
        }

        info!(
            "Daolette ready (owner {}, active {}, preflight {})",
            game.owner,
            runtime.state().is_game_active(),
            game.preflight_validation
        );
        Ok(runtime)
    }
}
