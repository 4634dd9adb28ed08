//! Imperative shell around the pure core.
//!
//! This module provides:
//!
//! - [`AppMachine`]: the single owner of the current state, applying the
//!   transition table, publishing committed transitions, and dispatching
//!   loading actions on every entry into `Loading`
//! - [`LoadingAction`]: the side-effect capability the machine invokes
//! - [`Subscription`]: RAII handle for a subscriber registration
//!
//! The transition function itself stays pure ([`crate::core::next_state`]);
//! the machine only adds the commit/publish/dispatch choreography.

mod action;
mod app_machine;
mod subscription;

pub use action::{LoadingAction, SendFn};
pub use app_machine::AppMachine;
pub use subscription::Subscription;
