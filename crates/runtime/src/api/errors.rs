//! Unified error types surfaced by the runtime API.
//!
//! Engine rejections, optimistic-concurrency conflicts and worker plumbing
//! failures all surface as [`RuntimeError`]. [`ErrorKind`] is the coarse
//! classification callers branch on.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{
    ActionError, ErrorSeverity, GameError, MatchId, MatchVersion, RosterError, SubmitError,
};

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Public rejection taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong owner, wrong phase or an action-specific rule. Retry with a
    /// legal action.
    IllegalAction,
    /// The submission carried an outdated version. Refetch and retry.
    StaleSubmission,
    /// The match is terminal. Final for that match.
    MatchEnded,
    /// Match creation input was malformed. No match was created.
    RosterMaterialization,
    /// Runtime plumbing failure.
    Internal,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("illegal action: {0}")]
    IllegalAction(#[source] ActionError),

    #[error("stale submission: expected {expected}, current version is {current}")]
    StaleSubmission {
        expected: MatchVersion,
        current: MatchVersion,
    },

    #[error("{match_id} has already ended")]
    MatchEnded { match_id: MatchId },

    #[error("roster materialization failed: {0}")]
    Roster(#[from] RosterError),

    #[error("{0} not found")]
    MatchNotFound(MatchId),

    #[error("{0} already exists")]
    MatchAlreadyExists(MatchId),

    #[error("{0} is still in progress")]
    MatchNotTerminal(MatchId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl From<SubmitError> for RuntimeError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Illegal(err) => RuntimeError::IllegalAction(err),
            SubmitError::MatchEnded { match_id } => RuntimeError::MatchEnded { match_id },
        }
    }
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalAction(_) => ErrorKind::IllegalAction,
            Self::StaleSubmission { .. } => ErrorKind::StaleSubmission,
            Self::MatchEnded { .. } => ErrorKind::MatchEnded,
            Self::Roster(_) => ErrorKind::RosterMaterialization,
            Self::MatchNotFound(_)
            | Self::MatchAlreadyExists(_)
            | Self::MatchNotTerminal(_)
            | Self::InvalidConfig(_)
            | Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_) => ErrorKind::Internal,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IllegalAction(err) => err.severity(),
            Self::StaleSubmission { .. } => ErrorSeverity::Recoverable,
            Self::MatchEnded { .. } | Self::Roster(_) => ErrorSeverity::Fatal,
            Self::MatchNotFound(_)
            | Self::MatchAlreadyExists(_)
            | Self::MatchNotTerminal(_)
            | Self::InvalidConfig(_) => ErrorSeverity::Validation,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalAction(err) => err.error_code(),
            Self::StaleSubmission { .. } => "STALE_SUBMISSION",
            Self::MatchEnded { .. } => "MATCH_ENDED",
            Self::Roster(err) => err.error_code(),
            Self::MatchNotFound(_) => "MATCH_NOT_FOUND",
            Self::MatchAlreadyExists(_) => "MATCH_ALREADY_EXISTS",
            Self::MatchNotTerminal(_) => "MATCH_NOT_TERMINAL",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::CommandChannelClosed => "COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
        }
    }
}
