//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Players are identified by their connection/session identifier, which is
//! stable for the lifetime of the connection. The engine treats it as an
//! opaque string.
//!
//! ## Player
//!
//! One record per participant: display name, private hand, liveness and
//! the dice attempts of the current elimination episode.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// Session identifier of a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    ///
    /// ```
    /// use liars_bar::core::PlayerId;
    ///
    /// let id = PlayerId::new("sid-42");
    /// assert_eq!(id.as_str(), "sid-42");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A hand of cards. Hands never exceed the deal size, so they stay inline.
pub type Hand = SmallVec<[Card; 5]>;

/// A participant in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Session identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Private hand, sorted after each deal.
    pub hand: Hand,

    /// `false` once eliminated by a lost dice roll.
    pub alive: bool,

    /// Dice throws taken this round.
    pub dice_attempts: u8,

    /// Throws survived since the last elimination. The next throw is
    /// attempt `dice_risk + 1`.
    pub dice_risk: u8,
}

impl Player {
    /// Create a live player with an empty hand.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Hand::new(),
            alive: true,
            dice_attempts: 0,
            dice_risk: 0,
        }
    }

    /// Does the player hold any cards?
    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Alive and holding cards, i.e. able to play or respond.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.alive && self.has_cards()
    }

    /// Number of cards in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }
}
