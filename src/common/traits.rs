//! Collaborator interfaces consumed by the settlement engine
//!
//! The engine only ever talks to the treasury and the event log through these
//! traits, so tests can swap in stubs and production can plug in a remote-call
//! adapter.

use crate::common::types::Address;
use crate::errors::TreasuryError;
use crate::games::types::BetEvent;

/// Pooled bankroll that funds payouts and receives stakes
///
/// Queries must be answered from live state on every call; implementations
/// must not cache capital or balance across calls.
pub trait Treasury {
    /// Risk budget used to derive stake ceilings
    fn get_minimum_capital(&self) -> Result<u128, TreasuryError>;

    /// Accept a stake transferred in with the call
    fn receive_wager(&mut self, amount: u128) -> Result<(), TreasuryError>;

    /// Transfer winnings out to the bettor
    fn pay_winner(&mut self, recipient: &Address, amount: u128) -> Result<(), TreasuryError>;

    /// Current balance held by `account`
    fn balance_of(&self, account: &Address) -> Result<u128, TreasuryError>;
}

/// Cheap save point for a collaborator touched by a call
///
/// The runtime takes a checkpoint before each call and rolls back to it when
/// the call fails. Taking one must not copy history.
pub trait Checkpoint {
    type Snapshot;

    fn checkpoint(&self) -> Self::Snapshot;

    fn rollback(&mut self, snapshot: Self::Snapshot);
}

/// Destination for the observable records of a round
pub trait EventSink {
    fn emit(&mut self, event: BetEvent);
}

impl EventSink for Vec<BetEvent> {
    fn emit(&mut self, event: BetEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_preserves_order() {
        let from = Address::derive(crate::common::types::AccountKind::EndUser, "p");
        let mut sink: Vec<BetEvent> = Vec::new();
        sink.emit(BetEvent::BetSource { from, timestamp: 1 });
        sink.emit(BetEvent::BetPlaced {
            amount: 2,
            numbers: "1".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], BetEvent::BetSource { .. }));
        assert!(matches!(sink[1], BetEvent::BetPlaced { .. }));
    }
}
