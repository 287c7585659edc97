//! Player actions and their records.
//!
//! A `PlayerAction` is one inbound player decision. Each maps to exactly one
//! state machine `Event`. Accepted actions are appended to the match history
//! as `ActionRecord`s; every call yields an `ActionResponse` for the
//! transport.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::phase::Event;
use super::player::PlayerId;
use crate::cards::Card;

/// One player decision.
///
/// ```
/// use liars_bar::cards::Card;
/// use liars_bar::core::{Event, PlayerAction};
///
/// let play = PlayerAction::play(&[Card::King, Card::Joker]);
/// assert_eq!(play.event(), Event::Play);
/// assert_eq!(PlayerAction::Challenge.event(), Event::Challenge);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Commit cards face down, claiming they all match the target.
    Play { cards: SmallVec<[Card; 5]> },
    /// Call LIAR! on the last claim.
    Challenge,
    /// Accept the last claim without looking.
    Believe,
    /// Roll the dice after losing a challenge.
    RollDice,
}

impl PlayerAction {
    /// A play of the given cards.
    #[must_use]
    pub fn play(cards: &[Card]) -> Self {
        PlayerAction::Play {
            cards: SmallVec::from_slice(cards),
        }
    }

    /// State machine event this action fires.
    #[must_use]
    pub fn event(&self) -> Event {
        match self {
            PlayerAction::Play { .. } => Event::Play,
            PlayerAction::Challenge => Event::Challenge,
            PlayerAction::Believe => Event::Believe,
            PlayerAction::RollDice => Event::RollDice,
        }
    }

    /// Message reported to the player when the action is accepted.
    #[must_use]
    pub fn success_message(&self) -> &'static str {
        match self {
            PlayerAction::Play { .. } => "Play accepted.",
            PlayerAction::Challenge => "LIAR! call resolved.",
            PlayerAction::Believe => "Claim believed.",
            PlayerAction::RollDice => "Dice rolled.",
        }
    }
}

/// An accepted action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: PlayerAction,

    /// Round number when the action was taken.
    pub round: u32,

    /// Sequence number within the match.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: PlayerAction, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}

/// Outcome of one inbound call: a success flag plus a human readable reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    /// Accepted.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Rejected for `reason`.
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleViolation;

    #[test]
    fn test_play_constructor() {
        let action = PlayerAction::play(&[Card::Jack, Card::Jack]);
        match action {
            PlayerAction::Play { cards } => assert_eq!(cards.as_slice(), &[Card::Jack, Card::Jack]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_events() {
        assert_eq!(PlayerAction::Believe.event(), Event::Believe);
        assert_eq!(PlayerAction::RollDice.event(), Event::RollDice);
    }

    #[test]
    fn test_record() {
        let record = ActionRecord::new(PlayerId::new("a"), PlayerAction::Challenge, 2, 7);
        assert_eq!(record.player, PlayerId::new("a"));
        assert_eq!(record.round, 2);
        assert_eq!(record.sequence, 7);
    }

    #[test]
    fn test_response() {
        let ok = ActionResponse::ok(PlayerAction::RollDice.success_message());
        assert!(ok.success);
        assert_eq!(ok.message, "Dice rolled.");

        let rejected = ActionResponse::rejected(RuleViolation::NotYourTurn);
        assert!(!rejected.success);
        assert_eq!(rejected.message, "Not your turn.");
    }

    #[test]
    fn test_action_serde() {
        let action = PlayerAction::play(&[Card::Joker]);
        let json = serde_json::to_string(&action).unwrap();
        let back: PlayerAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
