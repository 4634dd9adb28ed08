//! Pure state machine core.
//!
//! This module contains the pure functional core of the feed lifecycle:
//! - The [`Record`] value a loader produces
//! - The [`AppState`] / [`AppInput`] / [`Transition`] types
//! - The total transition function [`next_state`]
//!
//! All logic in this module is pure (no side effects); the imperative shell
//! around it lives in [`crate::machine`].

mod record;
mod state;

pub use record::Record;
pub use state::{next_state, AppInput, AppState, Transition};
