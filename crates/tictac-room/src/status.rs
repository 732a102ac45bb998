//! Room lifecycle status.

use serde::{Deserialize, Serialize};

/// Maximum number of players in a room.
pub const MAX_PLAYERS: usize = 2;

/// The lifecycle status of a room.
///
/// ```text
/// Waiting ──(join)──→ Playing ──(winning/filling move)──→ Finished
///                        ↑                                   │
///                        └─────────────(restart)─────────────┘
/// ```
///
/// Any status ends with the room being destroyed once its last player
/// leaves; that is not a status, the room is simply gone.
///
/// - **Waiting**: one player, waiting for an opponent.
/// - **Playing**: moves are accepted from the symbol whose turn it is.
/// - **Finished**: someone won or the board filled up. Moves are
///   ignored until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if moves are currently accepted.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns `true` if moving from `self` to `target` is a legal
    /// lifecycle step.
    ///
    /// Restart is allowed from any status, so `* → Playing` is always
    /// legal; `Finished` is only reachable from `Playing`.
    pub fn can_transition_to(self, target: Self) -> bool {
        match target {
            Self::Playing => true,
            Self::Finished => self == Self::Playing,
            Self::Waiting => false,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Playing => write!(f, "playing"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_playing_accepts_moves() {
        assert!(!RoomStatus::Waiting.is_playing());
        assert!(RoomStatus::Playing.is_playing());
        assert!(!RoomStatus::Finished.is_playing());
    }

    #[test]
    fn test_room_status_transitions() {
        assert!(RoomStatus::Waiting.can_transition_to(RoomStatus::Playing));
        assert!(RoomStatus::Playing.can_transition_to(RoomStatus::Finished));
        assert!(RoomStatus::Finished.can_transition_to(RoomStatus::Playing));
        assert!(!RoomStatus::Waiting.can_transition_to(RoomStatus::Finished));
        assert!(!RoomStatus::Finished.can_transition_to(RoomStatus::Waiting));
        assert!(!RoomStatus::Playing.can_transition_to(RoomStatus::Waiting));
    }

    #[test]
    fn test_room_status_display_and_serde() {
        assert_eq!(RoomStatus::Waiting.to_string(), "waiting");
        assert_eq!(
            serde_json::to_string(&RoomStatus::Finished).unwrap(),
            "\"finished\""
        );
    }
}
