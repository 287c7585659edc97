//! Win and forced-challenge detection.

use crate::core::{EndReason, MatchResult, MatchState, Phase, PlayerId};

/// What the table looks like after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WinVerdict {
    /// Play goes on.
    Continue,
    /// The match is decided.
    GameOver(MatchResult),
    /// The only card holder must call LIAR! on the pending claim.
    ForcedChallenge { caller: PlayerId },
}

/// Evaluate the table.
///
/// One survivor wins and nobody alive ends the match without a winner.
/// Otherwise, when a claim is pending from a claimant who just emptied their
/// hand and the current responder is the last player holding cards, that
/// responder is compelled to challenge: believing would leave nobody able
/// to play.
#[must_use]
pub fn check_win_condition(state: &MatchState) -> WinVerdict {
    let mut alive = state.alive_players();
    match (alive.next(), alive.next()) {
        (None, _) => WinVerdict::GameOver(MatchResult::without_winner(EndReason::AllEliminated)),
        (Some(survivor), None) => WinVerdict::GameOver(MatchResult::sole_survivor(survivor)),
        _ => forced_caller(state).map_or(WinVerdict::Continue, |caller| {
            WinVerdict::ForcedChallenge { caller }
        }),
    }
}

fn forced_caller(state: &MatchState) -> Option<PlayerId> {
    if state.phase != Phase::AwaitingChallenge {
        return None;
    }
    let pending = state.last_claim.as_ref()?;
    if state.card_holders().count() != 1 {
        return None;
    }

    let claimant = state.player(&pending.claim.player)?;
    if !claimant.alive || claimant.has_cards() {
        return None;
    }

    let responder = state.player(state.current_turn.as_ref()?)?;
    (responder.can_act() && responder.id != claimant.id).then(|| responder.id.clone())
}
