//! Bet classification, exposure limits, the outcome draw and settlement

pub mod classifier;
pub mod limits;
pub mod outcome_engine;
pub mod processor;
pub mod settlement;
pub mod state;
pub mod tables;
pub mod types;

pub use outcome_engine::OutcomeEngine;
pub use processor::{RoundContext, SettlementEngine};
pub use state::GameState;
pub use types::*;
