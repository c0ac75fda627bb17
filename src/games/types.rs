use crate::common::types::{amount, Address};
use crate::games::tables::{BLACK, EVEN, MAX_OUTCOME, ODD, RED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One slot of the wheel: 0 is the house slot, 1..=20 are playable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(pub(crate) u8);

impl Outcome {
    pub const HOUSE: Outcome = Outcome(0);

    /// Playable outcome, or `None` outside 1..=20
    pub fn playable(value: u8) -> Option<Self> {
        (1..=MAX_OUTCOME).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_house(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed ten-number groups of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeGroup {
    Red,
    Black,
    Odd,
    Even,
}

impl OutcomeGroup {
    pub const ALL: [OutcomeGroup; 4] = [
        OutcomeGroup::Red,
        OutcomeGroup::Black,
        OutcomeGroup::Odd,
        OutcomeGroup::Even,
    ];

    pub fn numbers(self) -> &'static [u8; 10] {
        match self {
            OutcomeGroup::Red => &RED,
            OutcomeGroup::Black => &BLACK,
            OutcomeGroup::Odd => &ODD,
            OutcomeGroup::Even => &EVEN,
        }
    }

    /// Canonical comma-separated rendering, e.g. `1,4,5,...`
    pub fn as_list(self) -> String {
        join_numbers(self.numbers().iter())
    }

    /// Category a bet on exactly this group belongs to
    pub fn category(self) -> BetCategory {
        match self {
            OutcomeGroup::Red | OutcomeGroup::Black => BetCategory::Color,
            OutcomeGroup::Odd | OutcomeGroup::Even => BetCategory::Parity,
        }
    }
}

impl fmt::Display for OutcomeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeGroup::Red => write!(f, "red"),
            OutcomeGroup::Black => write!(f, "black"),
            OutcomeGroup::Odd => write!(f, "odd"),
            OutcomeGroup::Even => write!(f, "even"),
        }
    }
}

/// Bet category; determines the multiplier and the limiting index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetCategory {
    Numbers,
    Color,
    Parity,
    SingleNumber,
}

impl BetCategory {
    /// Name used in the published multiplier table
    pub fn wire_name(self) -> &'static str {
        match self {
            BetCategory::Numbers => "bet_on_numbers",
            BetCategory::Color => "bet_on_color",
            BetCategory::Parity => "bet_on_even_odd",
            BetCategory::SingleNumber => "bet_on_number",
        }
    }

    /// Color and parity bets are limited as one class regardless of width
    pub fn is_group_bet(self) -> bool {
        matches!(self, BetCategory::Color | BetCategory::Parity)
    }
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A classified but not yet validated bet
///
/// `tokens` are the distinct trimmed entries of the submitted list; they are
/// only checked against the playable range by the exposure limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetSlip {
    pub category: BetCategory,
    /// Outcome list as submitted (or the canonical group list)
    pub numbers: String,
    pub tokens: BTreeSet<String>,
}

impl BetSlip {
    /// Count of distinct submitted entries
    pub fn breadth(&self) -> usize {
        self.tokens.len()
    }
}

/// A validated bet with a canonical outcome set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub category: BetCategory,
    pub selected: BTreeSet<Outcome>,
    #[serde(with = "amount")]
    pub stake: u128,
}

impl Bet {
    pub fn breadth(&self) -> usize {
        self.selected.len()
    }

    pub fn covers(&self, outcome: Outcome) -> bool {
        self.selected.contains(&outcome)
    }
}

/// Result of one draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    /// Digest residue in `0..100000`; the spin value is `residue / 100000`
    pub residue: u32,
    /// Position on the wheel in `0..21`
    pub index: usize,
    pub outcome: Outcome,
}

impl Draw {
    /// Spin value in its shortest decimal form, e.g. `0.95238` or `0.5`
    ///
    /// Values below `0.0001` switch to exponent notation (`5e-05`), the way a
    /// float prints.
    pub fn spin(&self) -> String {
        match self.residue {
            0 => "0.0".to_string(),
            r if r < 10 => format!("{}e-05", r),
            r => {
                let digits = format!("{:05}", r);
                format!("0.{}", digits.trim_end_matches('0'))
            }
        }
    }
}

/// Round outcome for the bettor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

/// Observable records emitted by a settled round, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BetEvent {
    BetSource {
        from: Address,
        timestamp: u64,
    },
    BetPlaced {
        #[serde(with = "amount")]
        amount: u128,
        numbers: String,
    },
    BetResult {
        spin: String,
        winning_number: Outcome,
        #[serde(with = "amount")]
        payout: u128,
    },
}

/// Summary of a settled round returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReceipt {
    pub tx_hash: String,
    pub bettor: Address,
    pub bet: Bet,
    /// Payout promised on a win, checked against the treasury before the draw
    #[serde(with = "amount")]
    pub gross_payout: u128,
    pub draw: Draw,
    pub outcome: GameOutcome,
    /// Amount actually transferred to the bettor (0 on a loss)
    #[serde(with = "amount")]
    pub payout: u128,
}

pub(crate) fn join_numbers<'a>(numbers: impl Iterator<Item = &'a u8>) -> String {
    numbers.map(|n| n.to_string()).collect::<Vec<_>>().join(",")
}
