//! Match configuration.
//!
//! `MatchConfig::default()` is the standard game: 5 card hands, claims of
//! 1-5 cards, the 6/6/6/2 deck block, a six-sided dice and 2-4 players.
//! Tables can be tuned with the `with_*` builder methods; the result is
//! checked by `validate` before an engine accepts it.

use serde::{Deserialize, Serialize};

use crate::cards::DeckTemplate;
use crate::error::ConfigError;

/// Whether elimination lasts past the round it happened in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationPolicy {
    /// Everyone is revived at each round start; the match only ends when a
    /// roll leaves a single survivor within a round.
    #[default]
    RoundScoped,
    /// Eliminated players sit out the rest of the match.
    MatchScoped,
}

/// How long a player's dice risk keeps climbing.
///
/// Risk is the number of throws survived since the player was last
/// eliminated. It is separate from the per-round throw counter, which
/// always resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptScope {
    /// Risk resets for everyone at each round start.
    Round,
    /// Risk carries across rounds until the player is eliminated.
    #[default]
    Match,
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Cards dealt to each player per round.
    pub hand_size: usize,

    /// Most cards a single play may commit.
    pub max_claim: usize,

    /// Ratio template the deck is built from.
    pub deck: DeckTemplate,

    /// Faces on the dice. Attempt `n` loses with probability `1/(faces+1-n)`.
    pub dice_faces: u8,

    /// Players needed to start a match.
    pub min_players: usize,

    /// Lobby capacity.
    pub max_players: usize,

    /// Length of generated lobby codes.
    pub lobby_code_len: usize,

    /// Responder scans give up after `scan_factor * player count` steps.
    pub scan_factor: usize,

    /// Elimination persistence.
    pub elimination: EliminationPolicy,

    /// Dice attempt persistence.
    pub attempts: AttemptScope,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            max_claim: 5,
            deck: DeckTemplate::classic(),
            dice_faces: 6,
            min_players: 2,
            max_players: 4,
            lobby_code_len: 4,
            scan_factor: 2,
            elimination: EliminationPolicy::RoundScoped,
            attempts: AttemptScope::Match,
        }
    }
}

impl MatchConfig {
    /// Standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the largest allowed claim.
    #[must_use]
    pub fn with_max_claim(mut self, max_claim: usize) -> Self {
        self.max_claim = max_claim;
        self
    }

    /// Set the deck template.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckTemplate) -> Self {
        self.deck = deck;
        self
    }

    /// Set the number of dice faces.
    #[must_use]
    pub fn with_dice_faces(mut self, faces: u8) -> Self {
        self.dice_faces = faces;
        self
    }

    /// Set the lobby size limits.
    #[must_use]
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the elimination policy.
    #[must_use]
    pub fn with_elimination(mut self, policy: EliminationPolicy) -> Self {
        self.elimination = policy;
        self
    }

    /// Set the dice attempt scope.
    #[must_use]
    pub fn with_attempts(mut self, scope: AttemptScope) -> Self {
        self.attempts = scope;
        self
    }

    /// Upper bound on responder scan steps for `player_count` players.
    #[must_use]
    pub fn scan_limit(&self, player_count: usize) -> usize {
        self.scan_factor * player_count
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.max_claim == 0 || self.max_claim > self.hand_size {
            return Err(ConfigError::ClaimLimit {
                max_claim: self.max_claim,
                hand_size: self.hand_size,
            });
        }
        if self.deck.block_size() == 0 {
            return Err(ConfigError::EmptyDeck);
        }
        if self.dice_faces < 2 {
            return Err(ConfigError::DiceFaces(self.dice_faces));
        }
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(ConfigError::PlayerLimits {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.lobby_code_len == 0 {
            return Err(ConfigError::LobbyCodeLength);
        }
        if self.scan_factor == 0 {
            return Err(ConfigError::ScanFactor);
        }
        Ok(())
    }
}
