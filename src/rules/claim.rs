//! Play validation and legal play enumeration.
//!
//! A play is checked against the acting player's hand with a decrementing
//! lookup, so a hand holding one King cannot commit two.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{Event, Hand, MatchState, PlayerId};
use crate::error::{RuleResult, RuleViolation};

/// Check a proposed play and return the hand left after it.
///
/// Checks run in a fixed order: turn, phase, liveness, count, then cards.
/// The state is never touched.
pub fn validate_play(
    state: &MatchState,
    player: &PlayerId,
    cards: &[Card],
    max_claim: usize,
) -> RuleResult<Hand> {
    if !state.is_turn_of(player) {
        return Err(RuleViolation::NotYourTurn);
    }
    state.phase.transition(Event::Play)?;

    let holder = state
        .player(player)
        .ok_or_else(|| RuleViolation::UnknownPlayer(player.clone()))?;
    if !holder.alive {
        return Err(RuleViolation::NotAlive);
    }

    if cards.is_empty() || cards.len() > max_claim {
        return Err(RuleViolation::CountOutOfRange {
            count: cards.len(),
            max: max_claim,
        });
    }

    let mut available: FxHashMap<Card, usize> = FxHashMap::default();
    for &card in &holder.hand {
        *available.entry(card).or_default() += 1;
    }
    for &card in cards {
        match available.get_mut(&card) {
            Some(left) if *left > 0 => *left -= 1,
            _ => return Err(RuleViolation::CardNotInHand(card)),
        }
    }

    let mut remaining = holder.hand.clone();
    for card in cards {
        if let Some(pos) = remaining.iter().position(|c| c == card) {
            remaining.remove(pos);
        }
    }
    Ok(remaining)
}

/// Every distinct play a hand allows, up to `max_claim` cards.
///
/// Plays are multisets: two Kings in hand yield one "single King" play, not
/// two. Each returned play is sorted.
#[must_use]
pub fn distinct_plays(hand: &[Card], max_claim: usize) -> Vec<Hand> {
    let mut counts: SmallVec<[(Card, usize); 4]> = SmallVec::new();
    for &card in hand {
        match counts.iter_mut().find(|(c, _)| *c == card) {
            Some((_, n)) => *n += 1,
            None => counts.push((card, 1)),
        }
    }
    counts.sort_unstable();

    let mut plays = Vec::new();
    let mut current = Hand::new();
    collect_plays(&counts, max_claim, &mut current, &mut plays);
    plays
}

fn collect_plays(counts: &[(Card, usize)], max: usize, current: &mut Hand, out: &mut Vec<Hand>) {
    let Some((&(card, available), rest)) = counts.split_first() else {
        if !current.is_empty() {
            out.push(current.clone());
        }
        return;
    };

    let room = max.saturating_sub(current.len());
    for take in 0..=available.min(room) {
        current.extend(std::iter::repeat(card).take(take));
        collect_plays(rest, max, current, out);
        current.truncate(current.len() - take);
    }
}
