//! Cards, deck construction and dealing.
//!
//! ## Key Types
//!
//! - `Card`: a card value (three base faces plus the wild Joker)
//! - `DeckTemplate`: the ratio one deck block is built from
//! - `Deck`: a shuffled draw pile sized for the table
//! - `deal_hands`: fresh fixed-size hands for a set of players

pub mod card;
pub mod deck;

pub use card::{count_matching, Card};
pub use deck::{deal_hands, DealReport, Deck, DeckTemplate};
