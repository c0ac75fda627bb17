//! Random-round simulator
//!
//! Plays batches of rounds with random transaction hashes, bet shapes and
//! stakes against a runtime and aggregates the results for statistical
//! checks of the payout tables.

use crate::common::traits::{Checkpoint, Treasury};
use crate::common::types::{amount, AccountKind, Address, TxContext};
use crate::errors::DaoletteResult;
use crate::games::tables::{BET_MIN, MAX_OUTCOME};
use crate::games::types::{GameOutcome, RoundReceipt};
use crate::runtime::Runtime;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Bet shape a simulated round picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetShape {
    Numbers,
    Color,
    Parity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rounds: usize,
    /// Restrict rounds to these shapes; all shapes when empty
    pub shapes: Vec<BetShape>,
    /// Fixed stake; a random admissible stake per round when `None`
    pub stake: Option<u128>,
    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub start_timestamp: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 1_000,
            shapes: Vec::new(),
            stake: None,
            seed: None,
            start_timestamp: 1_600_000_000_000_000,
        }
    }
}

/// Per-category results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub games_played: usize,
    pub wins: usize,
    #[serde(with = "amount")]
    pub total_bet: u128,
    #[serde(with = "amount")]
    pub total_payout: u128,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub rounds: usize,
    pub games_played: usize,
    /// Rounds the engine refused; they moved no funds
    pub rejected: usize,
    pub wins: usize,
    pub house_slot_hits: usize,
    pub win_rate: f64,
    #[serde(with = "amount")]
    pub total_wagered: u128,
    #[serde(with = "amount")]
    pub total_paid: u128,
    /// `(wagered - paid) / wagered`
    pub house_edge: f64,
    pub categories: BTreeMap<String, CategoryStats>,
}

impl SimulationReport {
    fn new(rounds: usize) -> Self {
        Self {
            rounds,
            games_played: 0,
            rejected: 0,
            wins: 0,
            house_slot_hits: 0,
            win_rate: 0.0,
            total_wagered: 0,
            total_paid: 0,
            house_edge: 0.0,
            categories: BTreeMap::new(),
        }
    }

    fn record(&mut self, receipt: &RoundReceipt) {
        self.games_played += 1;
        self.total_wagered = self.total_wagered.saturating_add(receipt.bet.stake);
        self.total_paid = self.total_paid.saturating_add(receipt.payout);
        if receipt.draw.outcome.is_house() {
            self.house_slot_hits += 1;
        }

        let stats = self
            .categories
            .entry(receipt.bet.category.wire_name().to_string())
            .or_default();
        stats.games_played += 1;
        stats.total_bet = stats.total_bet.saturating_add(receipt.bet.stake);
        stats.total_payout = stats.total_payout.saturating_add(receipt.payout);

        if receipt.outcome == GameOutcome::Win {
            self.wins += 1;
            stats.wins += 1;
        }
    }

    fn finish(mut self) -> Self {
        if self.games_played > 0 {
            self.win_rate = self.wins as f64 / self.games_played as f64;
        }
        if self.total_wagered > 0 {
            let retained = self.total_wagered as f64 - self.total_paid as f64;
            self.house_edge = retained / self.total_wagered as f64;
        }
        self
    }
}

pub struct Simulator {
    rng: StdRng,
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, config }
    }

    /// Play the configured number of rounds against `runtime`
    pub fn run<T: Treasury + Checkpoint>(&mut self, runtime: &mut Runtime<T>) -> DaoletteResult<SimulationReport> {
        let mut report = SimulationReport::new(self.config.rounds);

        for round in 0..self.config.rounds {
            let shape = self.pick_shape();
            let (limit_index, numbers) = match shape {
                BetShape::Numbers => {
                    let numbers = self.pick_numbers();
                    (numbers.len(), numbers)
                }
                BetShape::Color | BetShape::Parity => (0, Vec::new()),
            };

            let ceiling = runtime.get_bet_limit(limit_index)?;
            let stake = match self.config.stake {
                Some(stake) => stake,
                None if ceiling >= BET_MIN => self.rng.gen_range(BET_MIN..=ceiling),
                None => BET_MIN,
            };

            let tx = TxContext::direct(
                self.rng.gen(),
                self.config.start_timestamp + round as u64,
                Address::derive(AccountKind::EndUser, &format!("sim-player-{}", round % 16)),
                stake,
            );
            let seed = format!("{:x}", self.rng.gen::<u32>());

            let result = match shape {
                BetShape::Numbers => {
                    let list = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",");
                    runtime.bet_on_numbers(&tx, &list, &seed)
                }
                BetShape::Color => runtime.bet_on_color(&tx, self.rng.gen(), &seed),
                BetShape::Parity => runtime.bet_on_parity(&tx, self.rng.gen(), &seed),
            };

            match result {
                Ok(receipt) => report.record(&receipt),
                Err(e) => {
                    debug!("Simulated round {} rejected: {}", round, e);
                    report.rejected += 1;
                }
            }
        }

        let report = report.finish();
        info!(
            "Simulation complete: {} played, {} rejected, win rate {:.4}, house edge {:.4}",
            report.games_played, report.rejected, report.win_rate, report.house_edge
        );
        Ok(report)
    }

    fn pick_shape(&mut self) -> BetShape {
        const ALL: [BetShape; 3] = [BetShape::Numbers, BetShape::Color, BetShape::Parity];
        let shapes: &[BetShape] = if self.config.shapes.is_empty() {
            &ALL
        } else {
            &self.config.shapes
        };
        shapes[self.rng.gen_range(0..shapes.len())]
    }

    /// 1 to 20 distinct playable numbers, ascending
    fn pick_numbers(&mut self) -> Vec<u8> {
        let max = usize::from(MAX_OUTCOME);
        let breadth = self.rng.gen_range(1..=max);
        let mut numbers: Vec<u8> = sample(&mut self.rng, max, breadth)
            .into_iter()
            .map(|i| i as u8 + 1)
            .collect();
        numbers.sort_unstable();
        numbers
    }
}
