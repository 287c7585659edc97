//! # liars-bar
//!
//! Authoritative rules engine for a Liar's Bar style bluffing card game.
//!
//! Each round every player is dealt five cards and a target face is drawn.
//! Players take turns committing cards face down while claiming they all
//! match the target; Jokers are wild. The next player may call LIAR! or
//! believe the claim. The loser of a challenge rolls a dice whose odds of
//! elimination climb with every roll.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: the engine does no I/O. Every operation takes
//!    `&mut MatchState`, validates, and either rejects with a
//!    `RuleViolation` (state untouched) or applies the change and runs win
//!    detection before returning.
//!
//! 2. **Explicit state machine**: `Phase` and `Event` declare which actions
//!    may fire when; every operation is gated through `Phase::transition`.
//!
//! 3. **Reproducible**: all randomness comes from a seeded per-match
//!    `GameRng`.
//!
//! ## Modules
//!
//! - `core`: players, phases, actions, match state, views, RNG, config
//! - `cards`: card faces, the deck template and dealing
//! - `rules`: turn scanning, claim validation, dice, win detection and the
//!   `MatchEngine`
//! - `lobby`: lobby lifecycle and the `MatchRepository`
//! - `error`: rule, config and lobby errors
//!
//! ## Example
//!
//! ```
//! use liars_bar::{GameRng, MatchEngine, PlayerId, RulesEngine};
//!
//! let engine = MatchEngine::default();
//! let roster = vec![
//!     (PlayerId::new("a"), "Ann".to_string()),
//!     (PlayerId::new("b"), "Ben".to_string()),
//! ];
//! let mut state = engine.create_match("ABCD", roster, GameRng::new(7));
//!
//! let current = state.current_turn.clone().unwrap();
//! let action = engine.legal_actions(&state, &current).remove(0);
//! assert!(engine.dispatch(&mut state, &current, &action).success);
//! ```

pub mod cards;
pub mod core;
pub mod error;
pub mod lobby;
pub mod rules;

pub use crate::cards::{Card, DeckTemplate};
pub use crate::core::{
    ActionRecord, ActionResponse, AttemptScope, Claim, EliminationPolicy, EndReason, Event,
    GameRng, MatchConfig, MatchResult, MatchState, Phase, Player, PlayerAction, PlayerId,
    PlayerView, RevealState,
};
pub use crate::error::{ConfigError, LobbyError, RuleViolation};
pub use crate::lobby::{DisconnectReport, MatchRepository};
pub use crate::rules::{MatchEngine, RulesEngine, WinVerdict};
