//! Per-recipient views of a match.
//!
//! A view carries everything a client may see: the recipient's own hand in
//! full, every other hand as an empty placeholder plus its size, and the
//! shared public fields verbatim. The real cards under the pile and behind
//! the pending claim are never included.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::player::PlayerId;
use super::state::{Claim, MatchResult, MatchState, RevealState};
use crate::cards::Card;

/// What one player may know about another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    /// Full hand for the recipient, empty for everyone else.
    pub hand: Vec<Card>,
    pub hand_size: usize,
    pub alive: bool,
    pub dice_attempts: u8,
    pub dice_risk: u8,
}

/// Filtered match state for one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub lobby_code: String,
    pub target: Card,
    pub players: Vec<PlayerSummary>,
    pub turn_order: Vec<PlayerId>,
    pub current_turn: Option<PlayerId>,
    pub pile: Vector<Claim>,
    /// Public part of the pending claim.
    pub last_claim: Option<Claim>,
    pub reveal: RevealState,
    pub phase: Phase,
    pub log: Vector<String>,
    pub round: u32,
    pub result: Option<MatchResult>,
}

impl PlayerView {
    /// The recipient's own summary.
    #[must_use]
    pub fn me(&self) -> Option<&PlayerSummary> {
        self.players.iter().find(|p| p.id == self.viewer)
    }

    /// Encode for the wire.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a view produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl MatchState {
    /// Build the view `viewer` is allowed to see.
    #[must_use]
    pub fn view_for(&self, viewer: &PlayerId) -> PlayerView {
        let players = self
            .players
            .iter()
            .map(|p| PlayerSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                hand: if &p.id == viewer {
                    p.hand.to_vec()
                } else {
                    Vec::new()
                },
                hand_size: p.hand.len(),
                alive: p.alive,
                dice_attempts: p.dice_attempts,
                dice_risk: p.dice_risk,
            })
            .collect();

        PlayerView {
            viewer: viewer.clone(),
            lobby_code: self.lobby_code.clone(),
            target: self.target,
            players,
            turn_order: self.turn_order.clone(),
            current_turn: self.current_turn.clone(),
            pile: self.pile.clone(),
            last_claim: self.last_claim.as_ref().map(|c| c.claim.clone()),
            reveal: self.reveal.clone(),
            phase: self.phase,
            log: self.log.clone(),
            round: self.round,
            result: self.result.clone(),
        }
    }
}
