//! Lobbies before and after their match starts.

use im::Vector;

use crate::core::{GameRng, MatchState, PlayerId};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random uppercase code of `len` letters.
pub fn generate_code(len: usize, rng: &mut GameRng) -> String {
    (0..len)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range_usize(0..CODE_ALPHABET.len())]))
        .collect()
}

/// Canonical form of a code typed by a player.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Players gathered before a match starts. The first member is the host.
#[derive(Clone, Debug)]
pub struct WaitingRoom {
    pub code: String,
    pub members: Vec<(PlayerId, String)>,
    pub log: Vector<String>,
}

impl WaitingRoom {
    /// A room holding only its host.
    pub fn open(code: impl Into<String>, host: PlayerId, host_name: impl Into<String>) -> Self {
        let code = code.into();
        let host_name = host_name.into();
        let mut log = Vector::new();
        log.push_back(format!("{host_name} created lobby {code}."));
        Self {
            code,
            members: vec![(host, host_name)],
            log,
        }
    }

    /// Member names in join order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(_, name)| name.as_str())
    }
}

/// A lobby entry in the repository.
#[derive(Clone, Debug)]
pub enum Lobby {
    Waiting(WaitingRoom),
    InProgress(MatchState),
}

impl Lobby {
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Lobby::Waiting(room) => &room.code,
            Lobby::InProgress(state) => &state.lobby_code,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Lobby::InProgress(_))
    }

    /// Number of members (waiting) or remaining players (in progress).
    #[must_use]
    pub fn member_count(&self) -> usize {
        match self {
            Lobby::Waiting(room) => room.members.len(),
            Lobby::InProgress(state) => state.player_count(),
        }
    }

    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        match self {
            Lobby::Waiting(room) => room.members.iter().any(|(id, _)| id == player),
            Lobby::InProgress(state) => state.player(player).is_some(),
        }
    }

    /// The first member, who may start the match.
    #[must_use]
    pub fn host(&self) -> Option<&PlayerId> {
        match self {
            Lobby::Waiting(room) => room.members.first().map(|(id, _)| id),
            Lobby::InProgress(state) => state.players.first().map(|p| &p.id),
        }
    }

    /// The running match, if started.
    #[must_use]
    pub fn match_state(&self) -> Option<&MatchState> {
        match self {
            Lobby::InProgress(state) => Some(state),
            Lobby::Waiting(_) => None,
        }
    }
}
