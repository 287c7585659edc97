//! Card values.
//!
//! The game uses three base faces plus a wild Joker. A claim is always
//! about the round's target face; Jokers count as a match for any target.

use serde::{Deserialize, Serialize};

/// A single card value.
///
/// The derived ordering is the display order used when sorting hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    King,
    Queen,
    Jack,
    /// Wild card, matches any target.
    Joker,
}

impl Card {
    /// Faces that can be chosen as a round target.
    pub const BASE: [Card; 3] = [Card::King, Card::Queen, Card::Jack];

    /// Every card value, in display order.
    pub const ALL: [Card; 4] = [Card::King, Card::Queen, Card::Jack, Card::Joker];

    /// Is this the wild card?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Card::Joker)
    }

    /// Does this card back up a claim about `target`?
    ///
    /// ```
    /// use liars_bar::cards::Card;
    ///
    /// assert!(Card::Queen.matches(Card::Queen));
    /// assert!(Card::Joker.matches(Card::Queen));
    /// assert!(!Card::King.matches(Card::Queen));
    /// ```
    #[must_use]
    pub fn matches(self, target: Card) -> bool {
        self == target || self.is_wild()
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Card::King => "King",
            Card::Queen => "Queen",
            Card::Jack => "Jack",
            Card::Joker => "Joker",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Count the cards in `cards` that back up a claim about `target`.
#[must_use]
pub fn count_matching(cards: &[Card], target: Card) -> usize {
    cards.iter().filter(|card| card.matches(target)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_excludes_joker() {
        assert!(!Card::BASE.contains(&Card::Joker));
        assert!(Card::BASE.iter().all(|c| !c.is_wild()));
    }

    #[test]
    fn test_matches() {
        for target in Card::BASE {
            assert!(target.matches(target));
            assert!(Card::Joker.matches(target));
            for other in Card::BASE.iter().filter(|&&c| c != target) {
                assert!(!other.matches(target));
            }
        }
    }

    #[test]
    fn test_count_matching() {
        let cards = [Card::King, Card::Joker, Card::Queen, Card::King];
        assert_eq!(count_matching(&cards, Card::King), 3);
        assert_eq!(count_matching(&cards, Card::Queen), 2);
        assert_eq!(count_matching(&cards, Card::Jack), 1);
        assert_eq!(count_matching(&[], Card::Jack), 0);
    }

    #[test]
    fn test_sort_order() {
        let mut hand = vec![Card::Joker, Card::Jack, Card::King, Card::Queen];
        hand.sort();
        assert_eq!(hand, Card::ALL.to_vec());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Card::Queen), "Queen");
        assert_eq!(Card::Joker.to_string(), "Joker");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Card::Jack).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Card::Jack);
    }
}
