//! Match repository.
//!
//! Owns every lobby keyed by its code, plus the display names of connected
//! sessions. The transport holds one repository and calls into it once per
//! inbound event; the repository serializes nothing itself, so callers that
//! share it across tasks wrap it in their own lock.

use rustc_hash::FxHashMap;

use super::room::{generate_code, normalize_code, Lobby, WaitingRoom};
use crate::core::{ActionResponse, GameRng, MatchResult, MatchState, PlayerAction, PlayerId, PlayerView};
use crate::error::LobbyError;
use crate::rules::{MatchEngine, RulesEngine};

/// What a disconnect changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisconnectReport {
    /// Lobby the player was in.
    pub lobby_code: String,
    /// The lobby became empty and was removed.
    pub lobby_deleted: bool,
    /// Set if the departure ended a running match.
    pub result: Option<MatchResult>,
}

/// All lobbies and sessions.
#[derive(Debug)]
pub struct MatchRepository {
    engine: MatchEngine,
    lobbies: FxHashMap<String, Lobby>,
    names: FxHashMap<PlayerId, String>,
    rng: GameRng,
}

impl Default for MatchRepository {
    fn default() -> Self {
        Self::new(MatchEngine::default(), GameRng::from_entropy())
    }
}

impl MatchRepository {
    /// Repository running matches with `engine`.
    ///
    /// Lobby codes come from `rng` and each match gets its own fork of it,
    /// so a seeded repository replays identically.
    #[must_use]
    pub fn new(engine: MatchEngine, rng: GameRng) -> Self {
        Self {
            engine,
            lobbies: FxHashMap::default(),
            names: FxHashMap::default(),
            rng,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Record the display name for a session.
    pub fn set_name(&mut self, player: &PlayerId, name: &str) -> Result<(), LobbyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LobbyError::EmptyName);
        }
        self.names.insert(player.clone(), name.to_string());
        Ok(())
    }

    #[must_use]
    pub fn name_of(&self, player: &PlayerId) -> Option<&str> {
        self.names.get(player).map(String::as_str)
    }

    #[must_use]
    pub fn lobby(&self, code: &str) -> Option<&Lobby> {
        self.lobbies.get(&normalize_code(code))
    }

    #[must_use]
    pub fn lobby_count(&self) -> usize {
        self.lobbies.len()
    }

    /// Code of the lobby `player` belongs to.
    #[must_use]
    pub fn lobby_of(&self, player: &PlayerId) -> Option<&str> {
        self.lobbies
            .values()
            .find(|lobby| lobby.contains(player))
            .map(Lobby::code)
    }

    /// The running match in `code`.
    #[must_use]
    pub fn match_state(&self, code: &str) -> Option<&MatchState> {
        self.lobby(code).and_then(Lobby::match_state)
    }

    /// Open a lobby with `host` as its first member and return its code.
    pub fn create_lobby(&mut self, host: &PlayerId) -> Result<String, LobbyError> {
        let name = self.names.get(host).cloned().ok_or(LobbyError::NoName)?;
        if let Some(code) = self.lobby_of(host) {
            return Err(LobbyError::InOtherLobby(code.to_string()));
        }

        let len = self.engine.config().lobby_code_len;
        let code = loop {
            let candidate = generate_code(len, &mut self.rng);
            if !self.lobbies.contains_key(&candidate) {
                break candidate;
            }
        };

        tracing::info!(lobby = %code, player = %host, "lobby created");
        self.lobbies.insert(
            code.clone(),
            Lobby::Waiting(WaitingRoom::open(code.clone(), host.clone(), name)),
        );
        Ok(code)
    }

    /// Join the lobby `code` (case-insensitive) and return its canonical code.
    pub fn join_lobby(&mut self, code: &str, player: &PlayerId) -> Result<String, LobbyError> {
        let code = normalize_code(code);
        let name = self.names.get(player).cloned().ok_or(LobbyError::NoName)?;
        let max_players = self.engine.config().max_players;
        let elsewhere = self
            .lobby_of(player)
            .filter(|other| *other != code)
            .map(str::to_string);

        let lobby = self
            .lobbies
            .get_mut(&code)
            .ok_or_else(|| LobbyError::LobbyNotFound(code.clone()))?;
        if lobby.contains(player) {
            return Err(LobbyError::AlreadyJoined);
        }
        if lobby.member_count() >= max_players {
            return Err(LobbyError::LobbyFull);
        }
        let Lobby::Waiting(room) = lobby else {
            return Err(LobbyError::AlreadyStarted);
        };
        if let Some(other) = elsewhere {
            return Err(LobbyError::InOtherLobby(other));
        }

        room.log.push_back(format!("{name} joined the lobby."));
        room.members.push((player.clone(), name));
        tracing::info!(lobby = %code, player = %player, members = room.members.len(), "lobby joined");
        Ok(code)
    }

    /// Member names of a lobby in join order.
    pub fn members(&self, code: &str) -> Result<Vec<String>, LobbyError> {
        let code = normalize_code(code);
        match self.lobbies.get(&code) {
            Some(Lobby::Waiting(room)) => Ok(room.names().map(str::to_string).collect()),
            Some(Lobby::InProgress(state)) => {
                Ok(state.players.iter().map(|p| p.name.clone()).collect())
            }
            None => Err(LobbyError::LobbyNotFound(code)),
        }
    }

    /// Start the match in `code`. Only the host may do this.
    pub fn start_match(&mut self, code: &str, requester: &PlayerId) -> Result<(), LobbyError> {
        let code = normalize_code(code);
        let min_players = self.engine.config().min_players;
        let lobby = self
            .lobbies
            .get(&code)
            .ok_or_else(|| LobbyError::LobbyNotFound(code.clone()))?;
        if lobby.host() != Some(requester) {
            return Err(LobbyError::NotHost);
        }
        if lobby.member_count() < min_players {
            return Err(LobbyError::NotEnoughPlayers(min_players));
        }
        let Lobby::Waiting(room) = lobby else {
            return Err(LobbyError::AlreadyStarted);
        };

        let roster = room.members.clone();
        let state = self.engine.create_match(code.clone(), roster, self.rng.fork());
        tracing::info!(lobby = %code, players = state.player_count(), "match started");
        self.lobbies.insert(code, Lobby::InProgress(state));
        Ok(())
    }

    /// Apply `action` for `player` in the match `code`.
    pub fn apply(
        &mut self,
        code: &str,
        player: &PlayerId,
        action: &PlayerAction,
    ) -> Result<(), LobbyError> {
        let code = normalize_code(code);
        match self.lobbies.get_mut(&code) {
            Some(Lobby::InProgress(state)) => Ok(self.engine.apply(state, player, action)?),
            Some(Lobby::Waiting(_)) => Err(LobbyError::NotStarted),
            None => Err(LobbyError::LobbyNotFound(code)),
        }
    }

    /// Apply `action` and report the outcome in transport form.
    pub fn dispatch(&mut self, code: &str, player: &PlayerId, action: &PlayerAction) -> ActionResponse {
        match self.apply(code, player, action) {
            Ok(()) => ActionResponse::ok(action.success_message()),
            Err(err) => {
                tracing::debug!(lobby = %code, player = %player, %err, "action rejected");
                ActionResponse::rejected(err)
            }
        }
    }

    /// What `player` may see of the match in `code`.
    pub fn view_for(&self, code: &str, player: &PlayerId) -> Result<PlayerView, LobbyError> {
        let code = normalize_code(code);
        match self.lobbies.get(&code) {
            Some(Lobby::InProgress(state)) => Ok(state.view_for(player)),
            Some(Lobby::Waiting(_)) => Err(LobbyError::NotStarted),
            None => Err(LobbyError::LobbyNotFound(code)),
        }
    }

    /// One view per remaining participant, for broadcasting.
    pub fn views(&self, code: &str) -> Result<Vec<PlayerView>, LobbyError> {
        let code = normalize_code(code);
        match self.lobbies.get(&code) {
            Some(Lobby::InProgress(state)) => Ok(state
                .players
                .iter()
                .map(|p| state.view_for(&p.id))
                .collect()),
            Some(Lobby::Waiting(_)) => Err(LobbyError::NotStarted),
            None => Err(LobbyError::LobbyNotFound(code)),
        }
    }

    /// Drop a session: forget its name and take it out of its lobby.
    ///
    /// Returns `None` if the player was in no lobby.
    pub fn disconnect(&mut self, player: &PlayerId) -> Option<DisconnectReport> {
        self.names.remove(player);
        let code = self.lobby_of(player)?.to_string();
        let lobby = self.lobbies.get_mut(&code)?;

        let mut result = None;
        match lobby {
            Lobby::Waiting(room) => {
                if let Some(idx) = room.members.iter().position(|(id, _)| id == player) {
                    let (_, name) = room.members.remove(idx);
                    room.log.push_back(format!("{name} left the lobby."));
                }
            }
            Lobby::InProgress(state) => {
                let was_over = state.is_over();
                self.engine.remove_player(state, player);
                if !was_over && state.is_over() {
                    result = state.result.clone();
                }
            }
        }

        let lobby_deleted = lobby.member_count() == 0;
        if lobby_deleted {
            self.lobbies.remove(&code);
            tracing::info!(lobby = %code, "empty lobby removed");
        }
        tracing::info!(lobby = %code, player = %player, "player disconnected");

        Some(DisconnectReport {
            lobby_code: code,
            lobby_deleted,
            result,
        })
    }
}
