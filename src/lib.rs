//! Daolette - single-round wagering settlement engine
//!
//! Bets on a 21-slot wheel (20 playable numbers plus a house slot) are
//! classified, bounded against a pooled treasury's capital, drawn from
//! transaction context and settled in one all-or-nothing call.
//!
//! The pieces, bottom up:
//! - [`games::classifier`] turns a submitted bet into a category
//! - [`games::limits`] derives stake bounds from live treasury capital
//! - [`games::outcome_engine`] draws the winning slot
//! - [`games::settlement`] computes payouts and pays winners
//! - [`runtime::Runtime`] applies each call atomically

pub mod common;
pub mod config;
pub mod errors;
pub mod factory;
pub mod games;
pub mod runtime;
pub mod simulator;
pub mod treasury;

pub use common::traits::{Checkpoint, EventSink, Treasury};
pub use common::types::{AccountKind, Address, TxContext};
pub use config::DaoletteConfig;
pub use errors::{DaoletteError, DaoletteResult};
pub use factory::RuntimeFactory;
pub use games::{BetEvent, GameOutcome, RoundReceipt, SettlementEngine};
pub use runtime::Runtime;
pub use treasury::InMemoryTreasury;
