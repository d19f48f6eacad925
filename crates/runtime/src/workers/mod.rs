//! Background tasks owned by the runtime.
mod match_worker;

pub use match_worker::{Command, MatchWorker};
