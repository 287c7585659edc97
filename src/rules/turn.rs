//! Turn rotation and actor eligibility.
//!
//! Rotation follows the round's `turn_order`, treating dead players as
//! absent. After a play or a belief the engine walks the rotation until it
//! finds someone who can actually act (alive and holding cards); the walk is
//! bounded so a table where nobody holds cards terminates.

use crate::core::{MatchState, Player, PlayerId};

/// Next alive player after `from` in `order`, wrapping around.
///
/// If `from` is not among the alive entries (for example because it was
/// just eliminated) the first alive entry is returned. `None` when nobody in
/// `order` is alive.
///
/// ```
/// use liars_bar::core::{Player, PlayerId};
/// use liars_bar::rules::next_active;
///
/// let ids: Vec<PlayerId> = ["a", "b", "c"].into_iter().map(PlayerId::from).collect();
/// let mut players: Vec<Player> = ids.iter().map(|id| Player::new(id.clone(), id.as_str())).collect();
/// players[1].alive = false;
///
/// assert_eq!(next_active(&ids, &players, &ids[0]), Some(ids[2].clone()));
/// assert_eq!(next_active(&ids, &players, &ids[2]), Some(ids[0].clone()));
/// assert_eq!(next_active(&ids, &players, &ids[1]), Some(ids[0].clone()));
/// ```
#[must_use]
pub fn next_active(order: &[PlayerId], players: &[Player], from: &PlayerId) -> Option<PlayerId> {
    let alive: Vec<&PlayerId> = order
        .iter()
        .filter(|id| players.iter().any(|p| &p.id == *id && p.alive))
        .collect();

    let first = *alive.first()?;
    let next = match alive.iter().position(|id| *id == from) {
        Some(idx) => alive[(idx + 1) % alive.len()],
        None => first,
    };
    Some(next.clone())
}

/// Why the engine is looking for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPurpose {
    /// Someone must respond to a fresh claim.
    Respond,
    /// Someone must commit cards.
    Play,
}

impl TurnPurpose {
    fn verb(self) -> &'static str {
        match self {
            TurnPurpose::Respond => "respond to the claim",
            TurnPurpose::Play => "play cards",
        }
    }
}

/// Result of walking the rotation for an eligible actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// This player can act and is now `current_turn`.
    Found(PlayerId),
    /// The starting candidate is missing or dead.
    NoAliveCandidate,
    /// The walk came back around without finding cards.
    NoCardHolder,
    /// The step bound was exceeded.
    Exhausted,
}

impl ScanOutcome {
    /// Did the scan install an actor?
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, ScanOutcome::Found(_))
    }
}

/// Walk forward from `current_turn` to the first alive player holding cards.
///
/// Players skipped for having no cards are logged. On success the player is
/// installed as `current_turn`; otherwise the state is left for the caller
/// to end.
pub fn settle_turn(state: &mut MatchState, limit: usize, purpose: TurnPurpose) -> ScanOutcome {
    let Some(first) = state.current_turn.clone() else {
        state.push_log(format!("No active player found to {}.", purpose.verb()));
        return ScanOutcome::NoAliveCandidate;
    };

    let mut candidate = first.clone();
    let mut steps = 0;

    loop {
        let Some(player) = state.player(&candidate).filter(|p| p.alive) else {
            state.push_log(format!("No active player found to {}.", purpose.verb()));
            return ScanOutcome::NoAliveCandidate;
        };

        if player.has_cards() {
            let line = format!("{} is up to {}.", player.name, purpose.verb());
            state.current_turn = Some(candidate.clone());
            state.push_log(line);
            return ScanOutcome::Found(candidate);
        }

        let line = format!(
            "{} has no cards and cannot {}. The turn moves on.",
            player.name,
            purpose.verb()
        );
        state.push_log(line);

        match next_active(&state.turn_order, &state.players, &candidate) {
            Some(next) if next != first => candidate = next,
            _ => {
                state.push_log(format!(
                    "Nobody holding cards is left to {}.",
                    purpose.verb()
                ));
                return ScanOutcome::NoCardHolder;
            }
        }

        steps += 1;
        if steps > limit {
            state.push_log("Turn scan did not terminate; stopping the match.");
            return ScanOutcome::Exhausted;
        }
    }
}
