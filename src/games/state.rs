//! Administrative game state: owner, treasury reference and the game-on flag

use crate::common::types::Address;
use crate::errors::{ConfigurationError, DaoletteResult};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    owner: Address,
    treasury: Option<Address>,
    game_on: bool,
}

impl GameState {
    /// Fresh installation: no treasury, game off
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            treasury: None,
            game_on: false,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn treasury(&self) -> Option<Address> {
        self.treasury
    }

    pub fn is_game_active(&self) -> bool {
        self.game_on
    }

    /// Treasury address, or a configuration error when unset
    pub fn require_treasury(&self) -> Result<Address, ConfigurationError> {
        self.treasury.ok_or(ConfigurationError::MissingTreasury)
    }

    pub fn set_treasury(&mut self, caller: &Address, treasury: Address) -> DaoletteResult<()> {
        self.require_owner(caller, "set_treasury")?;
        info!("Treasury set to {}", treasury);
        self.treasury = Some(treasury);
        Ok(())
    }

    /// Turn the game on; the treasury must be set first
    pub fn game_on(&mut self, caller: &Address) -> DaoletteResult<()> {
        self.require_owner(caller, "game_on")?;
        self.require_treasury()?;
        if !self.game_on {
            info!("Game switched on");
            self.game_on = true;
        }
        Ok(())
    }

    pub fn game_off(&mut self, caller: &Address) -> DaoletteResult<()> {
        self.require_owner(caller, "game_off")?;
        if self.game_on {
            info!("Game switched off");
            self.game_on = false;
        }
        Ok(())
    }

    fn require_owner(&self, caller: &Address, operation: &'static str) -> Result<(), ConfigurationError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(ConfigurationError::Unauthorized {
                caller: *caller,
                operation,
            })
        }
    }
}
