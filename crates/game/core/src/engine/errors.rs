//! Errors surfaced by the engine for a rejected submission.

use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::MatchId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitError {
    #[error("illegal action: {0}")]
    Illegal(#[from] ActionError),

    #[error("{match_id} has already ended")]
    MatchEnded { match_id: MatchId },
}

impl GameError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Illegal(err) => err.severity(),
            Self::MatchEnded { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Illegal(err) => err.error_code(),
            Self::MatchEnded { .. } => "MATCH_ENDED",
        }
    }
}
