//! Player actions and their legality rules.
mod available;
mod error;
mod types;
mod validation;

pub use available::available_actions;
pub use error::ActionError;
pub use types::{ActionKind, PlayerAction};
pub use validation::validate_action;
