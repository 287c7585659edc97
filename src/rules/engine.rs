//! The match engine.
//!
//! `RulesEngine` is the seam the repository and the benches drive a match
//! through: what a player may do, how an action changes the state, and
//! whether the match is over. `MatchEngine` is the Liar's Bar
//! implementation.
//!
//! ## Operation flow
//!
//! - `submit_play`: validate, commit the cards, pass the turn, find a
//!   responder, then resolve a forced challenge if one is due.
//! - `call_challenge`: reveal, adjudicate, hand the dice to the loser.
//! - `believe_claim`: accept without revealing, the believer plays next.
//! - `roll_dice`: throw, maybe eliminate, start the next round.
//!
//! Every operation either fails with a `RuleViolation` and leaves the state
//! as it was, or succeeds and has already run win detection.

use smallvec::SmallVec;

use super::claim::{distinct_plays, validate_play};
use super::dice::DiceRule;
use super::turn::{next_active, settle_turn, TurnPurpose};
use super::win::{check_win_condition, WinVerdict};
use crate::cards::{deal_hands, Card};
use crate::core::{
    ActionResponse, AttemptScope, Claim, DiceOutcome, EliminationPolicy, EndReason, Event,
    GameRng, LastClaim, MatchConfig, MatchResult, MatchState, Phase, PlayerAction, PlayerId,
    RevealState,
};
use crate::error::{ConfigError, RuleResult, RuleViolation};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty if the player cannot act
/// - `apply`: must be deterministic given the state's RNG
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// The configuration the engine enforces.
    fn config(&self) -> &MatchConfig;

    /// Every action `player` may take right now.
    fn legal_actions(&self, state: &MatchState, player: &PlayerId) -> Vec<PlayerAction>;

    /// Apply one action. On error the state is unchanged.
    fn apply(
        &self,
        state: &mut MatchState,
        player: &PlayerId,
        action: &PlayerAction,
    ) -> RuleResult<()>;

    /// `Some(result)` once the match has ended.
    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult>;

    /// Apply an action and report the outcome in transport form.
    fn dispatch(
        &self,
        state: &mut MatchState,
        player: &PlayerId,
        action: &PlayerAction,
    ) -> ActionResponse {
        match self.apply(state, player, action) {
            Ok(()) => ActionResponse::ok(action.success_message()),
            Err(violation) => ActionResponse::rejected(violation),
        }
    }
}

/// What a successful play led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The public claim that was pushed on the pile.
    pub claim: Claim,
    /// Who must respond, if anyone could be found.
    pub responder: Option<PlayerId>,
    /// Set when the responder was compelled to call LIAR! immediately.
    pub forced_challenge: Option<ChallengeOutcome>,
}

/// Result of adjudicating a claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub caller: PlayerId,
    pub claimant: PlayerId,
    pub claim_was_true: bool,
    /// The challenge loser, who must roll next.
    pub roller: PlayerId,
    /// The real cards behind the claim.
    pub cards: Vec<Card>,
}

/// Liar's Bar rules.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    dice: DiceRule,
}

impl Default for MatchEngine {
    fn default() -> Self {
        let config = MatchConfig::default();
        Self {
            dice: DiceRule::new(config.dice_faces),
            config,
        }
    }
}

impl MatchEngine {
    /// Engine enforcing `config`, which must validate.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            dice: DiceRule::new(config.dice_faces),
            config,
        })
    }

    #[must_use]
    pub fn dice(&self) -> DiceRule {
        self.dice
    }

    /// Set up a match for `roster` and deal the first round.
    ///
    /// The starting player is drawn from the match RNG.
    pub fn create_match(
        &self,
        lobby_code: impl Into<String>,
        roster: impl IntoIterator<Item = (PlayerId, String)>,
        rng: GameRng,
    ) -> MatchState {
        let mut state = MatchState::new(lobby_code, roster, rng);
        let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id.clone()).collect();

        state.push_log(format!(
            "Match started in lobby {} with {} players.",
            state.lobby_code,
            ids.len()
        ));
        tracing::info!(
            lobby = %state.lobby_code,
            players = ids.len(),
            seed = state.rng.seed(),
            "match created"
        );

        let starting = state.rng.choose(&ids).cloned();
        self.begin_round(&mut state, starting.as_ref());
        state
    }

    /// Commit `cards` face down as a claim about the round target.
    pub fn submit_play(
        &self,
        state: &mut MatchState,
        player: &PlayerId,
        cards: &[Card],
    ) -> RuleResult<PlayOutcome> {
        let remaining = validate_play(state, player, cards, self.config.max_claim)?;
        let name = state.name_of(player).to_string();
        if let Some(holder) = state.player_mut(player) {
            holder.hand = remaining;
        }

        let claim = Claim {
            player: player.clone(),
            claimed: state.target,
            count: cards.len(),
        };
        state.pile.push_back(claim.clone());
        state.actual_pile.extend_from_slice(cards);
        state.last_claim = Some(LastClaim {
            claim: claim.clone(),
            player_name: name.clone(),
            cards: SmallVec::from_slice(cards),
        });
        state.reveal = RevealState::default();
        state.phase = Event::Play.target();
        state.record(player.clone(), PlayerAction::play(cards));
        state.push_log(format!(
            "{name} plays {} card(s) and claims they are all {}.",
            claim.count, claim.claimed
        ));
        tracing::debug!(
            lobby = %state.lobby_code,
            player = %player,
            count = claim.count,
            target = %claim.claimed,
            "play accepted"
        );

        state.current_turn = next_active(&state.turn_order, &state.players, player);
        let mut outcome = PlayOutcome {
            claim,
            responder: None,
            forced_challenge: None,
        };
        if !self.settle(state, TurnPurpose::Respond) {
            return Ok(outcome);
        }
        outcome.responder = state.current_turn.clone();
        outcome.forced_challenge = self.enforce_verdict(state);
        Ok(outcome)
    }

    /// `caller` calls LIAR! on the pending claim.
    ///
    /// Any alive player other than the claimant may call.
    pub fn call_challenge(
        &self,
        state: &mut MatchState,
        caller: &PlayerId,
    ) -> RuleResult<ChallengeOutcome> {
        let challenger = state
            .player(caller)
            .ok_or_else(|| RuleViolation::UnknownPlayer(caller.clone()))?;
        if !challenger.alive {
            return Err(RuleViolation::NotAlive);
        }
        if state
            .last_claim
            .as_ref()
            .is_some_and(|pending| &pending.claim.player == caller)
        {
            return Err(RuleViolation::SelfChallenge);
        }
        let next = state.phase.transition(Event::Challenge)?;
        let pending = state.last_claim.take().ok_or(RuleViolation::NoClaimPending)?;

        let claim_was_true = pending.is_truthful();
        let claimant = pending.claim.player.clone();
        let roller = if claim_was_true {
            caller.clone()
        } else {
            claimant.clone()
        };
        let caller_name = state.name_of(caller).to_string();
        let roller_name = state.name_of(&roller).to_string();
        let shown = pending
            .cards
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");
        let verdict = if claim_was_true { "true" } else { "a lie" };
        let message = format!(
            "{} played {shown}: the claim was {verdict}. {roller_name} must roll the dice.",
            pending.player_name
        );

        state.reveal = RevealState {
            is_revealed: true,
            claimant: Some(claimant.clone()),
            claimant_name: Some(pending.player_name.clone()),
            actual_cards: pending.cards.to_vec(),
            claim_was_true: Some(claim_was_true),
            roller: Some(roller.clone()),
            outcome: Some(message.clone()),
            dice: None,
        };
        state.pile.clear();
        state.actual_pile.clear();
        state.current_turn = Some(roller.clone());
        state.phase = next;
        state.record(caller.clone(), PlayerAction::Challenge);
        state.push_log(format!("{caller_name} calls LIAR! on {}.", pending.player_name));
        state.push_log(message);
        tracing::debug!(
            lobby = %state.lobby_code,
            player = %caller,
            claimant = %claimant,
            claim_was_true,
            "challenge resolved"
        );

        Ok(ChallengeOutcome {
            caller: caller.clone(),
            claimant,
            claim_was_true,
            roller,
            cards: pending.cards.to_vec(),
        })
    }

    /// The current responder accepts the pending claim without looking.
    ///
    /// The pile and `last_claim` stay and the believer plays next.
    pub fn believe_claim(&self, state: &mut MatchState, believer: &PlayerId) -> RuleResult<()> {
        let holder = state
            .player(believer)
            .ok_or_else(|| RuleViolation::UnknownPlayer(believer.clone()))?;
        if !holder.alive {
            return Err(RuleViolation::NotAlive);
        }
        if !state.is_turn_of(believer) {
            return Err(RuleViolation::NotYourTurn);
        }
        let next = state.phase.transition(Event::Believe)?;
        let pending = state
            .last_claim
            .as_ref()
            .ok_or(RuleViolation::NoClaimPending)?;
        if &pending.claim.player == believer {
            return Err(RuleViolation::SelfBelieve);
        }
        let claim_was_true = pending.is_truthful();

        let message = format!(
            "{} believes the claim of {}.",
            state.name_of(believer),
            pending.player_name
        );
        state.reveal = RevealState::hidden_with_message(message.clone());
        state.phase = next;
        state.record(believer.clone(), PlayerAction::Believe);
        state.push_log(message);
        tracing::debug!(
            lobby = %state.lobby_code,
            player = %believer,
            claim_was_true,
            "claim believed"
        );

        self.settle(state, TurnPurpose::Play);
        Ok(())
    }

    /// The challenge loser throws the dice.
    ///
    /// Either way a new round follows: from the roller if they survived,
    /// from the next player if they were eliminated and the match goes on.
    pub fn roll_dice(&self, state: &mut MatchState, player: &PlayerId) -> RuleResult<DiceOutcome> {
        state.phase.transition(Event::RollDice)?;
        if !state.is_turn_of(player) {
            return Err(RuleViolation::NotYourTurn);
        }
        let roller = state
            .player(player)
            .ok_or_else(|| RuleViolation::UnknownPlayer(player.clone()))?;
        if !roller.alive {
            return Err(RuleViolation::NotAlive);
        }

        let attempt = roller.dice_risk.saturating_add(1);
        let name = roller.name.clone();
        let outcome = self.dice.roll(attempt, &mut state.rng);
        let successor = next_active(&state.turn_order, &state.players, player);

        if let Some(roller) = state.player_mut(player) {
            roller.dice_attempts = roller.dice_attempts.saturating_add(1);
            if outcome.is_loss {
                roller.alive = false;
                roller.dice_risk = 0;
            } else {
                roller.dice_risk = attempt;
            }
        }
        state.record(player.clone(), PlayerAction::RollDice);

        let message = if outcome.is_loss {
            format!(
                "{name} rolled a {} on attempt {attempt} and is eliminated!",
                outcome.face
            )
        } else {
            format!(
                "{name} rolled a {} on attempt {attempt} and survives.",
                outcome.face
            )
        };
        state.reveal.is_revealed = true;
        state.reveal.roller = Some(player.clone());
        state.reveal.dice = Some(outcome);
        state.reveal.outcome = Some(format!("Dice result for {name}: {message}"));
        state.push_log(message);

        if !outcome.is_loss {
            tracing::debug!(
                lobby = %state.lobby_code,
                player = %player,
                attempt,
                face = outcome.face,
                "survived dice roll"
            );
            self.begin_round(state, Some(player));
            return Ok(outcome);
        }

        tracing::info!(
            lobby = %state.lobby_code,
            player = %player,
            attempt,
            "player eliminated"
        );
        state.turn_order.retain(|id| id != player);
        if let WinVerdict::GameOver(result) = check_win_condition(state) {
            self.conclude(state, result);
            return Ok(outcome);
        }
        let successor = successor.filter(|id| id != player);
        self.begin_round(state, successor.as_ref());
        Ok(outcome)
    }

    /// Start a new round with `starting` to play first.
    ///
    /// Only allowed between rounds: while awaiting a play or after a
    /// challenge, before the dice were thrown.
    pub fn start_new_round(
        &self,
        state: &mut MatchState,
        starting: Option<&PlayerId>,
    ) -> RuleResult<()> {
        state.phase.transition(Event::StartRound)?;
        self.begin_round(state, starting);
        Ok(())
    }

    /// Take `player` out of the match after a disconnect.
    ///
    /// Returns `false` if the player was not in the match. A pending claim
    /// by the departed player is withdrawn; a pending dice roll by them
    /// skips straight to the next round.
    pub fn remove_player(&self, state: &mut MatchState, player: &PlayerId) -> bool {
        let Some(idx) = state.players.iter().position(|p| &p.id == player) else {
            return false;
        };
        let successor =
            next_active(&state.turn_order, &state.players, player).filter(|id| id != player);
        let had_turn = state.is_turn_of(player);
        let departed = state.players.remove(idx);
        state.turn_order.retain(|id| id != player);
        state.push_log(format!("{} has left the match.", departed.name));
        tracing::info!(lobby = %state.lobby_code, player = %player, "player left match");

        if state.is_over() {
            return true;
        }
        if had_turn {
            state.current_turn = successor.clone();
        }
        if let WinVerdict::GameOver(result) = check_win_condition(state) {
            self.conclude(state, result);
            return true;
        }

        let was_claimant = state
            .last_claim
            .as_ref()
            .is_some_and(|pending| &pending.claim.player == player);
        match state.phase {
            Phase::ResolvingDiceRoll if had_turn => self.begin_round(state, successor.as_ref()),
            Phase::AwaitingChallenge if was_claimant => {
                state.withdraw_last_claim();
                state.phase = Phase::AwaitingPlay;
                state.push_log(format!("The claim of {} is withdrawn.", departed.name));
                self.settle(state, TurnPurpose::Play);
            }
            Phase::AwaitingChallenge => {
                if self.settle(state, TurnPurpose::Respond) {
                    self.enforce_verdict(state);
                }
            }
            Phase::AwaitingPlay => {
                self.settle(state, TurnPurpose::Play);
            }
            Phase::ResolvingDiceRoll | Phase::GameOver => {}
        }
        true
    }

    fn begin_round(&self, state: &mut MatchState, starting: Option<&PlayerId>) {
        state.round += 1;
        let revive = self.config.elimination == EliminationPolicy::RoundScoped;
        let reset_risk = self.config.attempts == AttemptScope::Round;
        for player in &mut state.players {
            if revive {
                player.alive = true;
            }
            if reset_risk {
                player.dice_risk = 0;
            }
            player.dice_attempts = 0;
            player.hand.clear();
        }

        let report = deal_hands(
            state.players.iter_mut().filter(|p| p.alive),
            &self.config.deck,
            self.config.hand_size,
            &mut state.rng,
        );
        if report.shortfall > 0 {
            tracing::error!(
                lobby = %state.lobby_code,
                round = state.round,
                shortfall = report.shortfall,
                "deck too small for the table"
            );
            state.push_log(format!(
                "The deck ran {} card(s) short while dealing.",
                report.shortfall
            ));
            self.conclude(state, MatchResult::without_winner(EndReason::Stalled));
            return;
        }

        let mut order: Vec<PlayerId> = state.alive_players().map(|p| p.id.clone()).collect();
        state.rng.shuffle(&mut order);
        state.turn_order = order;
        state.target = state
            .rng
            .choose(&Card::BASE)
            .copied()
            .unwrap_or(Card::BASE[0]);
        state.pile.clear();
        state.actual_pile.clear();
        state.last_claim = None;
        state.current_turn = starting
            .filter(|id| state.turn_order.contains(id))
            .or_else(|| state.turn_order.first())
            .cloned();
        state.phase = Event::StartRound.target();

        state.push_log(format!(
            "Round {} begins. The target card is {}.",
            state.round, state.target
        ));
        tracing::info!(
            lobby = %state.lobby_code,
            round = state.round,
            target = %state.target,
            deck = report.deck_size,
            "round started"
        );

        if let WinVerdict::GameOver(result) = check_win_condition(state) {
            self.conclude(state, result);
            return;
        }
        self.settle(state, TurnPurpose::Play);
    }

    /// Find someone able to act; end the match as stalled if nobody is.
    fn settle(&self, state: &mut MatchState, purpose: TurnPurpose) -> bool {
        let limit = self.config.scan_limit(state.player_count());
        if settle_turn(state, limit, purpose).is_found() {
            return true;
        }
        tracing::warn!(lobby = %state.lobby_code, ?purpose, "no player can act");
        self.conclude(state, MatchResult::without_winner(EndReason::Stalled));
        false
    }

    /// Act on the win verdict after a claim has a responder.
    fn enforce_verdict(&self, state: &mut MatchState) -> Option<ChallengeOutcome> {
        match check_win_condition(state) {
            WinVerdict::Continue => None,
            WinVerdict::GameOver(result) => {
                self.conclude(state, result);
                None
            }
            WinVerdict::ForcedChallenge { caller } => {
                state.push_log(format!(
                    "{} is the only player left with cards and must call LIAR!",
                    state.name_of(&caller)
                ));
                match self.call_challenge(state, &caller) {
                    Ok(outcome) => Some(outcome),
                    Err(violation) => {
                        tracing::error!(
                            lobby = %state.lobby_code,
                            player = %caller,
                            %violation,
                            "forced challenge failed"
                        );
                        state.push_log(format!("The forced LIAR! call failed: {violation}"));
                        self.conclude(state, MatchResult::without_winner(EndReason::Stalled));
                        None
                    }
                }
            }
        }
    }

    fn conclude(&self, state: &mut MatchState, result: MatchResult) {
        let line = match (&result.winner_name, result.reason) {
            (Some(name), _) => format!("{name} wins the match!"),
            (None, EndReason::AllEliminated) => {
                "Everyone has been eliminated. Nobody wins.".to_string()
            }
            (None, _) => "No player can continue. The match ends without a winner.".to_string(),
        };
        state.push_log(line);
        tracing::info!(
            lobby = %state.lobby_code,
            winner = ?result.winner,
            reason = ?result.reason,
            rounds = state.round,
            "match over"
        );
        state.phase = Phase::GameOver;
        state.current_turn = None;
        state.result = Some(result);
    }
}

impl RulesEngine for MatchEngine {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn legal_actions(&self, state: &MatchState, player: &PlayerId) -> Vec<PlayerAction> {
        let Some(me) = state.player(player).filter(|p| p.alive) else {
            return Vec::new();
        };
        let my_turn = state.is_turn_of(player);

        match state.phase {
            Phase::AwaitingPlay if my_turn => distinct_plays(&me.hand, self.config.max_claim)
                .into_iter()
                .map(|cards| PlayerAction::Play { cards })
                .collect(),
            Phase::AwaitingChallenge => {
                let Some(pending) = &state.last_claim else {
                    return Vec::new();
                };
                let mut actions = Vec::with_capacity(2);
                if &pending.claim.player != player {
                    actions.push(PlayerAction::Challenge);
                }
                if my_turn {
                    actions.push(PlayerAction::Believe);
                }
                actions
            }
            Phase::ResolvingDiceRoll if my_turn => vec![PlayerAction::RollDice],
            _ => Vec::new(),
        }
    }

    fn apply(
        &self,
        state: &mut MatchState,
        player: &PlayerId,
        action: &PlayerAction,
    ) -> RuleResult<()> {
        match action {
            PlayerAction::Play { cards } => self.submit_play(state, player, cards).map(drop),
            PlayerAction::Challenge => self.call_challenge(state, player).map(drop),
            PlayerAction::Believe => self.believe_claim(state, player),
            PlayerAction::RollDice => self.roll_dice(state, player).map(drop),
        }
    }

    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult> {
        if state.is_over() {
            state.result.clone()
        } else {
            None
        }
    }
}
