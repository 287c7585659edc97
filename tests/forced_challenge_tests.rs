//! The mandatory LIAR! call when only one player still holds cards.

use liars_bar::core::{EndReason, Phase};
use liars_bar::rules::{MatchEngine, RulesEngine};
use liars_bar::{Card, GameRng, MatchState, PlayerId};
use smallvec::smallvec;

fn id(name: &str) -> PlayerId {
    PlayerId::new(name)
}

/// Three players with target King. `q` is to play holding a single Queen.
fn table(order: [&str; 3], x_cards: bool, r_cards: bool) -> (MatchEngine, MatchState) {
    let engine = MatchEngine::default();
    let roster = ["q", "x", "r"].map(|n| (id(n), n.to_uppercase()));
    let mut state = engine.create_match("FORC", roster, GameRng::new(17));

    state.target = Card::King;
    state.turn_order = order.iter().map(|n| id(n)).collect();
    state.current_turn = Some(id("q"));
    state.player_mut(&id("q")).unwrap().hand = smallvec![Card::Queen];
    state.player_mut(&id("x")).unwrap().hand = if x_cards {
        smallvec![Card::Jack, Card::Joker]
    } else {
        smallvec![]
    };
    state.player_mut(&id("r")).unwrap().hand = if r_cards {
        smallvec![Card::King, Card::Jack, Card::Queen]
    } else {
        smallvec![]
    };
    (engine, state)
}

#[test]
fn test_forced_after_skipping_empty_hand() {
    let (engine, mut state) = table(["q", "x", "r"], false, true);

    let outcome = engine.submit_play(&mut state, &id("q"), &[Card::Queen]).unwrap();

    assert_eq!(outcome.responder, Some(id("r")));
    let forced = outcome.forced_challenge.expect("r must be compelled to call");
    assert_eq!(forced.caller, id("r"));
    assert_eq!(forced.claimant, id("q"));
    assert!(!forced.claim_was_true);
    assert_eq!(forced.roller, id("q"));

    assert_eq!(state.phase, Phase::ResolvingDiceRoll);
    assert_eq!(state.current_turn, Some(id("q")));
    assert!(state.reveal.is_revealed);
    assert_eq!(state.reveal.actual_cards, vec![Card::Queen]);
    assert!(state.pile.is_empty());
    assert!(state.log.iter().any(|l| l.starts_with("X has no cards")));
    assert!(state.log.iter().any(|l| l.contains("must call LIAR!")));
}

#[test]
fn test_forced_with_direct_responder() {
    let (engine, mut state) = table(["q", "r", "x"], false, true);

    let outcome = engine.submit_play(&mut state, &id("q"), &[Card::Queen]).unwrap();

    let forced = outcome.forced_challenge.unwrap();
    assert_eq!(forced.caller, id("r"));
    assert_eq!(state.phase, Phase::ResolvingDiceRoll);
}

#[test]
fn test_forced_truthful_claim_sends_caller_to_dice() {
    let (engine, mut state) = table(["q", "x", "r"], false, true);
    state.player_mut(&id("q")).unwrap().hand = smallvec![Card::Joker];

    let outcome = engine.submit_play(&mut state, &id("q"), &[Card::Joker]).unwrap();

    let forced = outcome.forced_challenge.unwrap();
    assert!(forced.claim_was_true);
    assert_eq!(forced.roller, id("r"));
    assert_eq!(state.current_turn, Some(id("r")));
    assert_eq!(engine.legal_actions(&state, &id("r")).len(), 1);
}

#[test]
fn test_no_force_while_two_hold_cards() {
    let (engine, mut state) = table(["q", "x", "r"], true, true);

    let outcome = engine.submit_play(&mut state, &id("q"), &[Card::Queen]).unwrap();

    assert!(outcome.forced_challenge.is_none());
    assert_eq!(outcome.responder, Some(id("x")));
    assert_eq!(state.phase, Phase::AwaitingChallenge);
}

#[test]
fn test_no_card_holder_left_stalls_match() {
    let (engine, mut state) = table(["q", "x", "r"], false, false);

    let outcome = engine.submit_play(&mut state, &id("q"), &[Card::Queen]).unwrap();

    assert!(outcome.responder.is_none());
    assert!(outcome.forced_challenge.is_none());
    assert_eq!(state.phase, Phase::GameOver);
    let result = engine.is_terminal(&state).unwrap();
    assert_eq!(result.reason, EndReason::Stalled);
    assert!(result.winner.is_none());
}
