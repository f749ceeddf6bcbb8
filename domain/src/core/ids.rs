//! Opaque integer identifiers.
//!
//! Every record the engine touches is referenced by id only. Ids are
//! allocated monotonically by the store, so comparing two ids of the same
//! kind also compares creation order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }

            /// Human-readable record kind, used in error messages.
            pub const fn kind() -> &'static str {
                $kind
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::core::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|_| {
                    crate::core::error::DomainError::invalid_argument(format!(
                        "'{}' is not a valid {} id",
                        s, $kind
                    ))
                })
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Ballot`](crate::Ballot).
    BallotId,
    "ballot"
);
define_id!(
    /// Identifier of a [`BallotOption`](crate::BallotOption).
    OptionId,
    "option"
);
define_id!(
    /// Identifier of a [`Room`](crate::Room).
    RoomId,
    "room"
);
define_id!(
    /// Identifier of a [`VotingSession`](crate::VotingSession).
    ///
    /// Doubles as the session token handed out on "join".
    SessionId,
    "session"
);
define_id!(
    /// Identifier of a [`UserVote`](crate::UserVote).
    VoteId,
    "vote"
);

/// Resolve an optional raw session token into a [`SessionId`].
///
/// An absent token is an invalid-argument condition, not a not-found one.
pub fn parse_session_token(token: Option<&str>) -> Result<SessionId, crate::DomainError> {
    match token {
        None => Err(crate::DomainError::invalid_argument("Token is required")),
        Some(raw) if raw.trim().is_empty() => {
            Err(crate::DomainError::invalid_argument("Token is required"))
        }
        Some(raw) => raw.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_order_by_creation() {
        assert!(OptionId::new(1) < OptionId::new(2));
    }

    #[test]
    fn test_parse_id() {
        let id: SessionId = " 17 ".parse().unwrap();
        assert_eq!(id.get(), 17);

        let err = "abc".parse::<SessionId>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("session"));
    }

    #[test]
    fn test_parse_session_token() {
        assert!(parse_session_token(None).unwrap_err().is_invalid_argument());
        assert!(parse_session_token(Some("")).unwrap_err().is_invalid_argument());
        assert_eq!(parse_session_token(Some("3")).unwrap(), SessionId::new(3));
    }

    #[test]
    fn test_serialize_transparent() {
        let json = serde_json::to_string(&OptionId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
