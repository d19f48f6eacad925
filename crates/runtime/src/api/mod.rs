//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the orchestration and worker layers stay internal.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{ErrorKind, Result, RuntimeError};
pub use handle::{Accepted, MatchHandle, Rejection, SubmissionResponse};
pub use providers::{ActionProvider, EndTurnProvider};
