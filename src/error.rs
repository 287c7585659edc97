//! Error types.
//!
//! Rule violations are expected, recoverable outcomes of player input and
//! are surfaced to the caller as values; their `Display` text is the reason
//! shown to the player.

use thiserror::Error;

use crate::cards::Card;
use crate::core::{Event, Phase, PlayerId};

/// A player action rejected by the rules. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Not your turn.")]
    NotYourTurn,

    #[error("Cannot {event} while the match is {actual}.")]
    WrongPhase { event: Event, actual: Phase },

    #[error("Player is not active.")]
    NotAlive,

    #[error("Player {0} is not in this match.")]
    UnknownPlayer(PlayerId),

    #[error("The card '{0}' is not in your hand.")]
    CardNotInHand(Card),

    #[error("You must play between 1 and {max} cards, not {count}.")]
    CountOutOfRange { count: usize, max: usize },

    #[error("You cannot call yourself a liar.")]
    SelfChallenge,

    #[error("You cannot believe your own claim.")]
    SelfBelieve,

    #[error("There is no claim to respond to.")]
    NoClaimPending,
}

/// Invalid `MatchConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    EmptyHand,

    #[error("max claim {max_claim} must be between 1 and the hand size {hand_size}")]
    ClaimLimit { max_claim: usize, hand_size: usize },

    #[error("deck template has no cards")]
    EmptyDeck,

    #[error("dice needs at least 2 faces, got {0}")]
    DiceFaces(u8),

    #[error("invalid player limits: min {min}, max {max}")]
    PlayerLimits { min: usize, max: usize },

    #[error("lobby codes need at least one character")]
    LobbyCodeLength,

    #[error("scan factor must be at least 1")]
    ScanFactor,
}

/// Lobby lifecycle failures raised by the match repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("A name is required.")]
    EmptyName,

    #[error("Set your name first.")]
    NoName,

    #[error("Lobby {0} does not exist.")]
    LobbyNotFound(String),

    #[error("You are already in this lobby.")]
    AlreadyJoined,

    #[error("You are already in lobby {0}.")]
    InOtherLobby(String),

    #[error("Lobby is full.")]
    LobbyFull,

    #[error("The match in this lobby has already started.")]
    AlreadyStarted,

    #[error("Only the lobby host can start the match.")]
    NotHost,

    #[error("At least {0} players are needed to start.")]
    NotEnoughPlayers(usize),

    #[error("The match in this lobby has not started yet.")]
    NotStarted,

    #[error(transparent)]
    Rule(#[from] RuleViolation),
}

/// Result type for engine operations.
pub type RuleResult<T> = Result<T, RuleViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(RuleViolation::NotYourTurn.to_string(), "Not your turn.");
        assert_eq!(
            RuleViolation::CardNotInHand(Card::Queen).to_string(),
            "The card 'Queen' is not in your hand."
        );
        assert_eq!(
            RuleViolation::CountOutOfRange { count: 6, max: 5 }.to_string(),
            "You must play between 1 and 5 cards, not 6."
        );
        assert_eq!(
            RuleViolation::WrongPhase {
                event: Event::Play,
                actual: Phase::ResolvingDiceRoll
            }
            .to_string(),
            "Cannot play cards while the match is resolving a dice roll."
        );
    }

    #[test]
    fn test_lobby_error_wraps_rule() {
        let err: LobbyError = RuleViolation::SelfChallenge.into();
        assert_eq!(err.to_string(), "You cannot call yourself a liar.");
        assert_eq!(err, LobbyError::Rule(RuleViolation::SelfChallenge));
    }
}
