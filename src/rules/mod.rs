//! Liar's Bar rules.
//!
//! - `turn`: rotation and the bounded scan for a player able to act
//! - `claim`: play validation and enumeration of legal plays
//! - `dice`: the escalating-risk roll
//! - `win`: elimination counting and the forced-challenge case
//! - `engine`: the `RulesEngine` trait and `MatchEngine`, which sequence the
//!   above into the match state machine

pub mod claim;
pub mod dice;
pub mod engine;
pub mod turn;
pub mod win;

pub use claim::{distinct_plays, validate_play};
pub use dice::DiceRule;
pub use engine::{ChallengeOutcome, MatchEngine, PlayOutcome, RulesEngine};
pub use turn::{next_active, settle_turn, ScanOutcome, TurnPurpose};
pub use win::{check_win_condition, WinVerdict};
