//! Match phases and the events that move between them.
//!
//! ```text
//!            Play                 Challenge
//! AwaitingPlay ──► AwaitingChallenge ──► ResolvingDiceRoll
//!      ▲                │ Believe               │ RollDice / StartRound
//!      └────────────────┘◄──────────────────────┘
//! ```
//!
//! `GameOver` is terminal and is entered from any phase when a verdict ends
//! the match or no player can act.

use serde::{Deserialize, Serialize};

use crate::error::RuleViolation;

/// Current stage of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The current player must commit cards.
    #[default]
    AwaitingPlay,
    /// The last claim may be challenged or believed.
    AwaitingChallenge,
    /// The loser of a challenge must roll the dice.
    ResolvingDiceRoll,
    /// The match has ended.
    GameOver,
}

impl Phase {
    /// Can `event` fire in this phase?
    #[must_use]
    pub fn accepts(self, event: Event) -> bool {
        event.sources().contains(&self)
    }

    /// Phase after `event`, or the violation if it cannot fire here.
    pub fn transition(self, event: Event) -> Result<Phase, RuleViolation> {
        if self.accepts(event) {
            Ok(event.target())
        } else {
            Err(RuleViolation::WrongPhase {
                event,
                actual: self,
            })
        }
    }

    /// Is the match over?
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::AwaitingPlay => "awaiting a play",
            Phase::AwaitingChallenge => "awaiting a challenge",
            Phase::ResolvingDiceRoll => "resolving a dice roll",
            Phase::GameOver => "over",
        })
    }
}

/// A named transition of the match state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Play,
    Challenge,
    Believe,
    RollDice,
    StartRound,
}

impl Event {
    /// Phases this event may fire from.
    #[must_use]
    pub const fn sources(self) -> &'static [Phase] {
        match self {
            Event::Play => &[Phase::AwaitingPlay],
            Event::Challenge | Event::Believe => &[Phase::AwaitingChallenge],
            Event::RollDice => &[Phase::ResolvingDiceRoll],
            Event::StartRound => &[Phase::AwaitingPlay, Phase::ResolvingDiceRoll],
        }
    }

    /// Phase the event leads to when the match continues.
    #[must_use]
    pub const fn target(self) -> Phase {
        match self {
            Event::Play => Phase::AwaitingChallenge,
            Event::Challenge => Phase::ResolvingDiceRoll,
            Event::Believe | Event::RollDice | Event::StartRound => Phase::AwaitingPlay,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Event::Play => "play cards",
            Event::Challenge => "call LIAR!",
            Event::Believe => "believe a claim",
            Event::RollDice => "roll the dice",
            Event::StartRound => "start a round",
        })
    }
}
