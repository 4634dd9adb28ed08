//! Foodwatch: the application core of a food-inspection feed browser.
//!
//! The crate follows a "pure core, imperative shell" split. The core is a
//! plain transition function over a small state space; the shell wraps it in
//! a thread-safe machine that publishes committed transitions to subscribers
//! and dispatches asynchronous loading actions whenever the feed enters the
//! loading state.
//!
//! # Core Concepts
//!
//! - **State**: the feed is always in exactly one of `Loading`, `Loaded`, or
//!   `Failed` ([`AppState`])
//! - **Input**: state changes only in response to an [`AppInput`] passed to
//!   [`AppMachine::send`]; inputs that make no sense for the current state are
//!   silently ignored
//! - **Loading actions**: side effects registered at construction, invoked on
//!   every entry into `Loading`; the stock [`LoaderAction`] adapts any
//!   [`RecordsLoader`] into one
//!
//! # Example
//!
//! ```rust
//! use foodwatch::{AppInput, AppMachine, AppState, Record};
//!
//! // No loading actions: state only changes through explicit inputs.
//! let machine = AppMachine::new(Vec::new());
//! let _sub = machine.subscribe(|transition| {
//!     println!("feed is now {}", transition.state.name());
//! });
//!
//! machine.send(AppInput::Load(vec![Record {
//!     title: "Corner Bakery".into(),
//!     address: "1 N State St".into(),
//!     inspection_date: None,
//! }]));
//!
//! assert!(matches!(machine.current().state, AppState::Loaded(_)));
//! ```

pub mod core;
pub mod error;
pub mod loader;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{next_state, AppInput, AppState, Record, Transition};
pub use crate::error::LoadError;
pub use crate::loader::{FakeLoader, LoaderAction, RecordsLoader, SodaLoader};
pub use crate::machine::{AppMachine, LoadingAction, SendFn, Subscription};
