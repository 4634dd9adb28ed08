//! Feed lifecycle states, inputs, and the pure transition function.

use std::sync::Arc;

use crate::core::record::Record;
use crate::error::LoadError;

/// Where the feed currently is in its load lifecycle.
///
/// Exactly one variant is active at any time. The payload of `Loaded` is the
/// most recent successful fetch result in loader-supplied order; grouping and
/// sorting for display are presentation concerns.
#[derive(Clone, Debug)]
pub enum AppState {
    /// A fetch is in flight (or about to be dispatched).
    Loading,
    /// The most recent fetch succeeded.
    Loaded(Vec<Record>),
    /// The most recent fetch failed.
    Failed(Arc<LoadError>),
}

impl AppState {
    /// State name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Loaded(_) => "Loaded",
            Self::Failed(_) => "Failed",
        }
    }

    /// The loaded records, if any.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Self::Loaded(records) => Some(records),
            _ => None,
        }
    }

    /// The failure cause, if any.
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// An input fed into the machine via `send`.
#[derive(Clone, Debug)]
pub enum AppInput {
    /// A fetch completed with these records.
    Load(Vec<Record>),
    /// A fetch failed.
    Fail(Arc<LoadError>),
    /// The user asked for a fresh fetch.
    Refresh,
}

impl AppInput {
    /// Input name for display and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "Load",
            Self::Fail(_) => "Fail",
            Self::Refresh => "Refresh",
        }
    }
}

/// A committed state change: the input that caused it paired with the state
/// it produced.
///
/// Published as one atomic unit so subscribers always see input and state
/// together. `input` is `None` only for the initial transition a machine
/// seeds itself with.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The triggering input, absent for the initial state
    pub input: Option<AppInput>,
    /// The resulting state
    pub state: AppState,
}

/// The pure transition function.
///
/// Returns `Some(next)` when the pair is covered by the transition table and
/// `None` when the input must be ignored. Ignoring is deliberate policy, not
/// an error: a `Load`/`Fail` only means something while the feed is loading,
/// and a `Refresh` only while it is settled. The function is total and never
/// panics.
///
/// | current   | input     | next        |
/// |-----------|-----------|-------------|
/// | `Loading` | `Fail(e)` | `Failed(e)` |
/// | `Loading` | `Load(r)` | `Loaded(r)` |
/// | `Loaded`  | `Refresh` | `Loading`   |
/// | `Failed`  | `Refresh` | `Loading`   |
/// | anything else         | ignored     |
///
/// # Example
///
/// ```rust
/// use foodwatch::{next_state, AppInput, AppState};
///
/// let next = next_state(&AppState::Loaded(Vec::new()), &AppInput::Refresh);
/// assert!(matches!(next, Some(AppState::Loading)));
///
/// // A refresh while already loading is ignored.
/// assert!(next_state(&AppState::Loading, &AppInput::Refresh).is_none());
/// ```
pub fn next_state(current: &AppState, input: &AppInput) -> Option<AppState> {
    match (current, input) {
        (AppState::Loading, AppInput::Fail(error)) => Some(AppState::Failed(Arc::clone(error))),
        (AppState::Loading, AppInput::Load(records)) => Some(AppState::Loaded(records.clone())),
        (AppState::Loaded(_), AppInput::Refresh) | (AppState::Failed(_), AppInput::Refresh) => {
            Some(AppState::Loading)
        }
        _ => None,
    }
}
