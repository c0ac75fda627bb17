//! In-process treasury
//!
//! Stand-in for the pooled bankroll used by tests, the runtime and the CLI.
//! A production deployment replaces it with an adapter over the real
//! treasury's remote calls; the engine only sees the [`Treasury`] trait.

use crate::common::traits::{Checkpoint, Treasury};
use crate::common::types::{amount, AccountKind, Address};
use crate::errors::TreasuryError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A payout made to a winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub recipient: Address,
    #[serde(with = "amount")]
    pub amount: u128,
}

/// Scalar balances and ledger length at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasuryCheckpoint {
    balance: u128,
    total_wagered: u128,
    total_paid: u128,
    payouts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryTreasury {
    address: Address,
    #[serde(with = "amount")]
    minimum_capital: u128,
    #[serde(with = "amount")]
    balance: u128,
    #[serde(with = "amount")]
    total_wagered: u128,
    #[serde(with = "amount")]
    total_paid: u128,
    payouts: Vec<PayoutRecord>,
}

impl InMemoryTreasury {
    pub fn new(address: Address, minimum_capital: u128, balance: u128) -> Self {
        Self {
            address,
            minimum_capital,
            balance,
            total_wagered: 0,
            total_paid: 0,
            payouts: Vec::new(),
        }
    }

    /// Treasury at a contract address derived from `label`
    pub fn with_label(label: &str, minimum_capital: u128, balance: u128) -> Self {
        Self::new(Address::derive(AccountKind::Contract, label), minimum_capital, balance)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }

    pub fn minimum_capital(&self) -> u128 {
        self.minimum_capital
    }

    pub fn set_minimum_capital(&mut self, minimum_capital: u128) {
        self.minimum_capital = minimum_capital;
    }

    /// Add bankroll outside of any bet
    pub fn deposit(&mut self, amount: u128) -> Result<(), TreasuryError> {
        self.balance = self.balance.checked_add(amount).ok_or(TreasuryError::BalanceOverflow)?;
        Ok(())
    }

    pub fn total_wagered(&self) -> u128 {
        self.total_wagered
    }

    pub fn total_paid(&self) -> u128 {
        self.total_paid
    }

    pub fn payouts(&self) -> &[PayoutRecord] {
        &self.payouts
    }
}

impl Treasury for InMemoryTreasury {
    fn get_minimum_capital(&self) -> Result<u128, TreasuryError> {
        Ok(self.minimum_capital)
    }

    fn receive_wager(&mut self, amount: u128) -> Result<(), TreasuryError> {
        self.balance = self.balance.checked_add(amount).ok_or(TreasuryError::BalanceOverflow)?;
        self.total_wagered = self
            .total_wagered
            .checked_add(amount)
            .ok_or(TreasuryError::BalanceOverflow)?;
        debug!("Treasury received wager of {}", amount);
        Ok(())
    }

    fn pay_winner(&mut self, recipient: &Address, amount: u128) -> Result<(), TreasuryError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TreasuryError::PayoutExceedsBalance {
                requested: amount,
                available: self.balance,
            })?;
        self.total_paid = self.total_paid.saturating_add(amount);
        self.payouts.push(PayoutRecord {
            recipient: *recipient,
            amount,
        });
        debug!("Treasury paid {} to {}", amount, recipient);
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> Result<u128, TreasuryError> {
        if *account == self.address {
            Ok(self.balance)
        } else {
            Err(TreasuryError::UnknownAccount(*account))
        }
    }
}

impl Checkpoint for InMemoryTreasury {
    type Snapshot = TreasuryCheckpoint;

    fn checkpoint(&self) -> TreasuryCheckpoint {
        TreasuryCheckpoint {
            balance: self.balance,
            total_wagered: self.total_wagered,
            total_paid: self.total_paid,
            payouts: self.payouts.len(),
        }
    }

    fn rollback(&mut self, snapshot: TreasuryCheckpoint) {
        self.balance = snapshot.balance;
        self.total_wagered = snapshot.total_wagered;
        self.total_paid = snapshot.total_paid;
        self.payouts.truncate(snapshot.payouts);
    }
}
