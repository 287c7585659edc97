//! Core match types: players, phases, actions, state, views, RNG and
//! configuration.
//!
//! Everything here is plain data plus small accessors. The rules that move
//! a match forward live in `crate::rules`.

pub mod action;
pub mod config;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;
pub mod view;

pub use action::{ActionRecord, ActionResponse, PlayerAction};
pub use config::{AttemptScope, EliminationPolicy, MatchConfig};
pub use phase::{Event, Phase};
pub use player::{Hand, Player, PlayerId};
pub use rng::GameRng;
pub use state::{Claim, DiceOutcome, EndReason, LastClaim, MatchResult, MatchState, RevealState};
pub use view::{PlayerSummary, PlayerView};
