//! Deck construction and dealing.
//!
//! A deck is built from whole copies ("blocks") of a ratio template, as many
//! as needed to give every player a full hand, then shuffled. Hands are dealt
//! off the top and sorted for stable display.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use crate::core::player::{Hand, Player};
use crate::core::rng::GameRng;

/// Card ratio template: how many of each card one block contains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTemplate {
    entries: SmallVec<[(Card, usize); 4]>,
}

impl Default for DeckTemplate {
    fn default() -> Self {
        Self::classic()
    }
}

impl DeckTemplate {
    /// Six of each base face and two Jokers: a 20 card block.
    #[must_use]
    pub fn classic() -> Self {
        Self::new([
            (Card::King, 6),
            (Card::Queen, 6),
            (Card::Jack, 6),
            (Card::Joker, 2),
        ])
    }

    /// Build a template from `(card, count)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (Card, usize)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The `(card, count)` pairs of one block.
    #[must_use]
    pub fn entries(&self) -> &[(Card, usize)] {
        &self.entries
    }

    /// Number of cards in one block.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Copies of `card` in one block.
    #[must_use]
    pub fn count_of(&self, card: Card) -> usize {
        self.entries
            .iter()
            .filter(|(c, _)| *c == card)
            .map(|(_, count)| count)
            .sum()
    }

    /// Minimum whole blocks supplying `cards_needed` cards.
    ///
    /// Always at least one block so every card value is present, and zero
    /// only for an empty template.
    ///
    /// ```
    /// use liars_bar::cards::DeckTemplate;
    ///
    /// let template = DeckTemplate::classic();
    /// assert_eq!(template.blocks_needed(10), 1);
    /// assert_eq!(template.blocks_needed(20), 1);
    /// assert_eq!(template.blocks_needed(25), 2);
    /// ```
    #[must_use]
    pub fn blocks_needed(&self, cards_needed: usize) -> usize {
        let block = self.block_size();
        if block == 0 {
            return 0;
        }
        cards_needed.div_ceil(block).max(1)
    }

    /// Unshuffled cards of `blocks` copies of the template.
    #[must_use]
    pub fn build(&self, blocks: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.block_size() * blocks);
        for &(card, count) in &self.entries {
            cards.extend(std::iter::repeat(card).take(count * blocks));
        }
        cards
    }
}

/// A shuffled draw pile. The top of the deck is the end of the vec.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    blocks: usize,
}

impl Deck {
    /// Shuffle `blocks` copies of the template.
    pub fn shuffled(template: &DeckTemplate, blocks: usize, rng: &mut GameRng) -> Self {
        let mut cards = template.build(blocks);
        rng.shuffle(&mut cards);
        Self { cards, blocks }
    }

    /// Deck sized for `player_count` hands of `hand_size`. Empty for no players.
    pub fn for_table(
        template: &DeckTemplate,
        player_count: usize,
        hand_size: usize,
        rng: &mut GameRng,
    ) -> Self {
        if player_count == 0 {
            return Self {
                cards: Vec::new(),
                blocks: 0,
            };
        }
        let blocks = template.blocks_needed(player_count * hand_size);
        Self::shuffled(template, blocks, rng)
    }

    /// Cards left in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck exhausted?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Template blocks the deck was built from.
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw up to `hand_size` cards off the top, sorted.
    ///
    /// The hand is short if the deck runs out.
    pub fn draw_hand(&mut self, hand_size: usize) -> Hand {
        let take = hand_size.min(self.cards.len());
        let split = self.cards.len() - take;
        let mut hand: Hand = self.cards.drain(split..).collect();
        hand.sort_unstable();
        hand
    }
}

/// Summary of one deal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DealReport {
    /// Template blocks in the deck.
    pub blocks: usize,
    /// Cards in the shuffled deck before dealing.
    pub deck_size: usize,
    /// Cards handed out.
    pub dealt: usize,
    /// Cards that should have been dealt but the deck was empty.
    pub shortfall: usize,
}

/// Replace every given player's hand with a fresh one.
///
/// A shortfall is reported and traced, never a panic: with a correctly
/// sized deck it cannot happen.
pub fn deal_hands<'a, I>(
    players: I,
    template: &DeckTemplate,
    hand_size: usize,
    rng: &mut GameRng,
) -> DealReport
where
    I: IntoIterator<Item = &'a mut Player>,
{
    let mut players: Vec<&mut Player> = players.into_iter().collect();
    let mut deck = Deck::for_table(template, players.len(), hand_size, rng);
    let mut report = DealReport {
        blocks: deck.blocks(),
        deck_size: deck.len(),
        ..DealReport::default()
    };

    for player in players.iter_mut() {
        player.hand = deck.draw_hand(hand_size);
        report.dealt += player.hand.len();
        let missing = hand_size - player.hand.len();
        if missing > 0 {
            tracing::warn!(
                player = %player.id,
                missing,
                "deck ran out while dealing"
            );
            report.shortfall += missing;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;

    fn table(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(format!("p{i}")), format!("Player {i}")))
            .collect()
    }

    #[test]
    fn test_classic_template() {
        let template = DeckTemplate::classic();
        assert_eq!(template.block_size(), 20);
        assert_eq!(template.count_of(Card::King), 6);
        assert_eq!(template.count_of(Card::Joker), 2);
    }

    #[test]
    fn test_blocks_needed() {
        let template = DeckTemplate::classic();
        assert_eq!(template.blocks_needed(0), 1);
        assert_eq!(template.blocks_needed(5), 1);
        assert_eq!(template.blocks_needed(21), 2);
        assert_eq!(template.blocks_needed(40), 2);
        assert_eq!(template.blocks_needed(41), 3);

        let empty = DeckTemplate::new([]);
        assert_eq!(empty.blocks_needed(10), 0);
    }

    #[test]
    fn test_build_keeps_ratio() {
        let cards = DeckTemplate::classic().build(3);
        assert_eq!(cards.len(), 60);
        assert_eq!(cards.iter().filter(|&&c| c == Card::Queen).count(), 18);
        assert_eq!(cards.iter().filter(|&&c| c == Card::Joker).count(), 6);
    }

    #[test]
    fn test_deck_for_no_players_is_empty() {
        let mut rng = GameRng::new(1);
        let deck = Deck::for_table(&DeckTemplate::classic(), 0, 5, &mut rng);
        assert!(deck.is_empty());
        assert_eq!(deck.blocks(), 0);
    }

    #[test]
    fn test_draw_hand_sorted_and_short() {
        let mut rng = GameRng::new(7);
        let mut deck = Deck::shuffled(&DeckTemplate::new([(Card::Jack, 2), (Card::King, 1)]), 1, &mut rng);

        let hand = deck.draw_hand(5);
        assert_eq!(hand.len(), 3);
        assert!(hand.windows(2).all(|w| w[0] <= w[1]));
        assert!(deck.is_empty());
        assert!(deck.draw_hand(5).is_empty());
    }

    #[test]
    fn test_deal_four_players() {
        let mut rng = GameRng::new(42);
        let mut players = table(4);

        let report = deal_hands(players.iter_mut(), &DeckTemplate::classic(), 5, &mut rng);

        assert_eq!(report.blocks, 1);
        assert_eq!(report.deck_size, 20);
        assert_eq!(report.dealt, 20);
        assert_eq!(report.shortfall, 0);
        for player in &players {
            assert_eq!(player.hand.len(), 5);
            assert!(player.hand.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_deal_scales_blocks() {
        let mut rng = GameRng::new(42);
        let mut players = table(5);

        let report = deal_hands(players.iter_mut(), &DeckTemplate::classic(), 5, &mut rng);

        assert_eq!(report.blocks, 2);
        assert_eq!(report.deck_size, 40);
        assert_eq!(report.dealt, 25);
    }

    #[test]
    fn test_deal_reports_shortfall() {
        let mut rng = GameRng::new(42);
        let mut players = table(2);
        let tiny = DeckTemplate::new([]);

        let report = deal_hands(players.iter_mut(), &tiny, 5, &mut rng);

        assert_eq!(report.dealt, 0);
        assert_eq!(report.shortfall, 10);
        assert!(players.iter().all(|p| p.hand.is_empty()));
    }

    #[test]
    fn test_deal_replaces_old_hand() {
        let mut rng = GameRng::new(3);
        let mut players = table(2);
        players[0].hand.push(Card::Joker);
        players[0].hand.push(Card::Joker);

        deal_hands(players.iter_mut(), &DeckTemplate::classic(), 5, &mut rng);

        assert_eq!(players[0].hand.len(), 5);
    }
}
