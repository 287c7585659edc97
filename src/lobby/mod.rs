//! Lobby lifecycle and the repository of running matches.
//!
//! A lobby starts as a `WaitingRoom` that players join by code. When the
//! host starts it, the room is replaced by a `MatchState` built by the
//! engine. Empty lobbies are removed on disconnect.

pub mod repository;
pub mod room;

pub use repository::{DisconnectReport, MatchRepository};
pub use room::{generate_code, normalize_code, Lobby, WaitingRoom};
