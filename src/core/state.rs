//! Match state.
//!
//! ## MatchState
//!
//! One record per active match, holding both public and private
//! information:
//! - Phase, round, target face, turn order and turn pointer
//! - Player records (including private hands)
//! - The public pile of claims and the private cards underneath it
//! - The single-shot reveal record and the audit log
//! - The match RNG
//!
//! Clients never see a `MatchState` directly; see `PlayerView`.
//!
//! `pile`, `log` and `history` use `im` persistent vectors so building one
//! view per recipient is O(1) per field.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{ActionRecord, PlayerAction};
use super::phase::Phase;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{count_matching, Card};

const UNKNOWN_PLAYER: &str = "Unknown player";

/// A public claim on the pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Who made the claim.
    pub player: PlayerId,
    /// The face claimed (always the round target).
    pub claimed: Card,
    /// How many cards were committed.
    pub count: usize,
}

/// The most recent claim together with the real cards behind it.
///
/// Never serialized: the real cards must not reach a client before a
/// challenge reveals them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastClaim {
    pub claim: Claim,
    pub player_name: String,
    pub cards: SmallVec<[Card; 5]>,
}

impl LastClaim {
    /// Committed cards that back up the claim.
    #[must_use]
    pub fn matching(&self) -> usize {
        count_matching(&self.cards, self.claim.claimed)
    }

    /// The claim is true iff every committed card matches the claimed face.
    #[must_use]
    pub fn is_truthful(&self) -> bool {
        self.matching() == self.claim.count
    }
}

/// Result of one dice throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceOutcome {
    /// Face shown.
    pub face: u8,
    /// 1-based attempt number of this throw.
    pub attempt: u8,
    /// Did the throw eliminate the roller?
    pub is_loss: bool,
}

/// Single-shot disclosure populated by a challenge or a dice roll.
///
/// Cleared by the next play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    pub is_revealed: bool,
    pub claimant: Option<PlayerId>,
    pub claimant_name: Option<String>,
    pub actual_cards: Vec<Card>,
    pub claim_was_true: Option<bool>,
    pub roller: Option<PlayerId>,
    pub outcome: Option<String>,
    pub dice: Option<DiceOutcome>,
}

impl RevealState {
    /// Nothing disclosed, only an outcome message.
    pub fn hidden_with_message(outcome: impl Into<String>) -> Self {
        Self {
            outcome: Some(outcome.into()),
            ..Self::default()
        }
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Exactly one player is left alive.
    SoleSurvivor,
    /// Nobody is left alive.
    AllEliminated,
    /// No remaining player can act.
    Stalled,
}

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<PlayerId>,
    pub winner_name: Option<String>,
    pub reason: EndReason,
}

impl MatchResult {
    /// `player` outlasted everyone.
    #[must_use]
    pub fn sole_survivor(player: &Player) -> Self {
        Self {
            winner: Some(player.id.clone()),
            winner_name: Some(player.name.clone()),
            reason: EndReason::SoleSurvivor,
        }
    }

    /// No winner.
    #[must_use]
    pub fn without_winner(reason: EndReason) -> Self {
        Self {
            winner: None,
            winner_name: None,
            reason,
        }
    }

    /// Did `player` win?
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.winner.as_ref() == Some(player)
    }
}

/// Full state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Lobby code the match belongs to.
    pub lobby_code: String,

    /// Face a truthful claim must match this round.
    pub target: Card,

    /// Players in join order.
    pub players: Vec<Player>,

    /// Rotation for the current round.
    pub turn_order: Vec<PlayerId>,

    /// Player who must act next.
    pub current_turn: Option<PlayerId>,

    /// Public claims since the last challenge.
    pub pile: Vector<Claim>,

    /// Real cards under the pile, in commit order.
    pub actual_pile: Vec<Card>,

    /// Top of `pile` together with the real cards behind it. Kept after a
    /// believe; cleared when a challenge empties the pile.
    pub last_claim: Option<LastClaim>,

    /// Disclosure from the last challenge or roll.
    pub reveal: RevealState,

    /// Current phase.
    pub phase: Phase,

    /// Human readable event log.
    pub log: Vector<String>,

    /// Round number (starts at 1 once the first hands are dealt).
    pub round: u32,

    /// Set once the match has ended.
    pub result: Option<MatchResult>,

    /// Accepted actions.
    pub history: Vector<ActionRecord>,

    /// Match RNG.
    pub rng: GameRng,

    sequence: u32,
}

impl MatchState {
    /// Create a match with the given roster and no cards dealt.
    ///
    /// The engine's `create_match` deals the first round; this constructor
    /// only lays out the records.
    pub fn new(
        lobby_code: impl Into<String>,
        roster: impl IntoIterator<Item = (PlayerId, String)>,
        rng: GameRng,
    ) -> Self {
        let players: Vec<Player> = roster
            .into_iter()
            .map(|(id, name)| Player::new(id, name))
            .collect();
        let turn_order = players.iter().map(|p| p.id.clone()).collect();

        Self {
            lobby_code: lobby_code.into(),
            target: Card::BASE[0],
            players,
            turn_order,
            current_turn: None,
            pile: Vector::new(),
            actual_pile: Vec::new(),
            last_claim: None,
            reveal: RevealState::default(),
            phase: Phase::AwaitingPlay,
            log: Vector::new(),
            round: 0,
            result: None,
            history: Vector::new(),
            rng,
            sequence: 0,
        }
    }

    /// Number of players in the match.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look up a player mutably.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// Display name of a player, or a placeholder if absent.
    #[must_use]
    pub fn name_of(&self, id: &PlayerId) -> &str {
        self.player(id).map_or(UNKNOWN_PLAYER, |p| p.name.as_str())
    }

    /// Is the player present and alive?
    #[must_use]
    pub fn is_alive(&self, id: &PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    /// Players still alive, in join order.
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Alive players still holding cards.
    pub fn card_holders(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.can_act())
    }

    /// Is it `id`'s turn?
    #[must_use]
    pub fn is_turn_of(&self, id: &PlayerId) -> bool {
        self.current_turn.as_ref() == Some(id)
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Append to the event log.
    pub fn push_log(&mut self, entry: impl Into<String>) {
        self.log.push_back(entry.into());
    }

    /// Take the top claim off the pile along with its cards.
    ///
    /// `last_claim` falls back to the claim now on top, if any.
    pub fn withdraw_last_claim(&mut self) -> Option<Claim> {
        let withdrawn = self.pile.pop_back()?;
        let keep = self.actual_pile.len().saturating_sub(withdrawn.count);
        self.actual_pile.truncate(keep);

        self.last_claim = self.pile.last().map(|claim| {
            let start = self.actual_pile.len().saturating_sub(claim.count);
            LastClaim {
                claim: claim.clone(),
                player_name: self.name_of(&claim.player).to_string(),
                cards: SmallVec::from_slice(&self.actual_pile[start..]),
            }
        });
        Some(withdrawn)
    }

    /// Append an accepted action to the history.
    pub fn record(&mut self, player: PlayerId, action: PlayerAction) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.round, sequence));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn roster() -> Vec<(PlayerId, String)> {
        vec![
            (PlayerId::new("a"), "Alice".to_string()),
            (PlayerId::new("b"), "Bob".to_string()),
        ]
    }

    fn claim(cards: &[Card], claimed: Card) -> LastClaim {
        LastClaim {
            claim: Claim {
                player: PlayerId::new("a"),
                claimed,
                count: cards.len(),
            },
            player_name: "Alice".to_string(),
            cards: SmallVec::from_slice(cards),
        }
    }

    #[test]
    fn test_withdraw_restores_previous_claim() {
        let mut state = MatchState::new("ABCD", roster(), GameRng::new(1));
        let first = claim(&[Card::King, Card::Joker], Card::King);
        let second = LastClaim {
            claim: Claim {
                player: PlayerId::new("b"),
                claimed: Card::King,
                count: 1,
            },
            player_name: "Bob".to_string(),
            cards: smallvec![Card::Queen],
        };
        for pending in [&first, &second] {
            state.pile.push_back(pending.claim.clone());
            state.actual_pile.extend_from_slice(&pending.cards);
        }
        state.last_claim = Some(second.clone());

        assert_eq!(state.withdraw_last_claim(), Some(second.claim));
        assert_eq!(state.actual_pile, vec![Card::King, Card::Joker]);
        assert_eq!(state.last_claim, Some(first.clone()));

        assert_eq!(state.withdraw_last_claim(), Some(first.claim));
        assert!(state.pile.is_empty());
        assert!(state.actual_pile.is_empty());
        assert!(state.last_claim.is_none());
        assert_eq!(state.withdraw_last_claim(), None);
    }

    #[test]
    fn test_new_match() {
        let state = MatchState::new("ABCD", roster(), GameRng::new(1));

        assert_eq!(state.lobby_code, "ABCD");
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.turn_order, vec![PlayerId::new("a"), PlayerId::new("b")]);
        assert_eq!(state.phase, Phase::AwaitingPlay);
        assert_eq!(state.round, 0);
        assert!(state.current_turn.is_none());
        assert!(state.pile.is_empty());
        assert!(!state.is_over());
    }

    #[test]
    fn test_lookup() {
        let mut state = MatchState::new("ABCD", roster(), GameRng::new(1));
        let bob = PlayerId::new("b");

        assert_eq!(state.name_of(&bob), "Bob");
        assert_eq!(state.name_of(&PlayerId::new("zz")), "Unknown player");
        assert!(state.is_alive(&bob));

        state.player_mut(&bob).unwrap().alive = false;
        assert!(!state.is_alive(&bob));
        assert_eq!(state.alive_players().count(), 1);
    }

    #[test]
    fn test_card_holders() {
        let mut state = MatchState::new("ABCD", roster(), GameRng::new(1));
        assert_eq!(state.card_holders().count(), 0);

        state.players[0].hand = smallvec![Card::King];
        assert_eq!(state.card_holders().count(), 1);

        state.players[0].alive = false;
        assert_eq!(state.card_holders().count(), 0);
    }

    #[test]
    fn test_claim_truth() {
        assert!(claim(&[Card::King, Card::Joker], Card::King).is_truthful());
        assert!(!claim(&[Card::King, Card::Queen], Card::King).is_truthful());
        assert_eq!(claim(&[Card::Jack, Card::Joker, Card::King], Card::Jack).matching(), 2);
    }

    #[test]
    fn test_record_sequence() {
        let mut state = MatchState::new("ABCD", roster(), GameRng::new(1));
        state.record(PlayerId::new("a"), PlayerAction::Challenge);
        state.record(PlayerId::new("b"), PlayerAction::RollDice);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].sequence, 0);
        assert_eq!(state.history[1].sequence, 1);
    }

    #[test]
    fn test_match_result() {
        let player = Player::new(PlayerId::new("a"), "Alice");
        let result = MatchResult::sole_survivor(&player);

        assert!(result.is_winner(&PlayerId::new("a")));
        assert!(!result.is_winner(&PlayerId::new("b")));
        assert_eq!(result.reason, EndReason::SoleSurvivor);

        let none = MatchResult::without_winner(EndReason::Stalled);
        assert!(none.winner.is_none());
    }
}
