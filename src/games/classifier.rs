//! Bet classification
//!
//! Maps a submitted outcome list (or one of the dedicated color/parity
//! choices) to a [`BetSlip`]. Nothing here rejects input: range and count
//! checks belong to the exposure limiter.

use crate::games::types::{BetCategory, BetSlip, OutcomeGroup};
use std::collections::BTreeSet;

/// Classify a comma-separated outcome list from the generic entry point
pub fn classify_numbers(numbers: &str) -> BetSlip {
    let tokens = tokenize(numbers);

    let category = OutcomeGroup::ALL
        .into_iter()
        .find(|group| tokens == group_tokens(*group))
        .map(OutcomeGroup::category)
        .unwrap_or(BetCategory::Numbers);

    finalize(category, numbers.to_string(), tokens)
}

/// Dedicated color entry point: `true` selects red, `false` black
pub fn classify_color(is_red: bool) -> BetSlip {
    let group = if is_red { OutcomeGroup::Red } else { OutcomeGroup::Black };
    classify_group(group)
}

/// Dedicated parity entry point: `true` selects odd, `false` even
pub fn classify_parity(is_odd: bool) -> BetSlip {
    let group = if is_odd { OutcomeGroup::Odd } else { OutcomeGroup::Even };
    classify_group(group)
}

fn classify_group(group: OutcomeGroup) -> BetSlip {
    finalize(group.category(), group.as_list(), group_tokens(group))
}

/// A one-element selection always settles as a single-number bet
fn finalize(category: BetCategory, numbers: String, tokens: BTreeSet<String>) -> BetSlip {
    let category = if tokens.len() == 1 {
        BetCategory::SingleNumber
    } else {
        category
    };

    BetSlip {
        category,
        numbers,
        tokens,
    }
}

/// Distinct trimmed entries of a comma-separated list
///
/// Empty entries (`"8,"`, `"1,,2"`) are kept so the limiter rejects them; only
/// a blank list yields no entries at all.
fn tokenize(numbers: &str) -> BTreeSet<String> {
    if numbers.trim().is_empty() {
        return BTreeSet::new();
    }

    numbers.split(',').map(|token| token.trim().to_string()).collect()
}

fn group_tokens(group: OutcomeGroup) -> BTreeSet<String> {
    group.numbers().iter().map(|n| n.to_string()).collect()
}
