//! The loading-action capability invoked on entry into `Loading`.

use std::sync::Arc;

use crate::core::AppInput;

/// Callback handed to a loading action; equivalent to
/// [`AppMachine::send`](crate::AppMachine::send) and safe to call from any
/// thread or task.
pub type SendFn = Arc<dyn Fn(AppInput) + Send + Sync>;

/// A side effect the machine fires every time a committed transition enters
/// the `Loading` state, including the implicit initial one.
///
/// Invocation is fire-and-forget: the machine never awaits an action and
/// never deduplicates concurrent invocations. An action is expected to do its
/// work asynchronously and feed the outcome back through `send`; whether that
/// outcome still matters is decided by the transition table, not the action.
///
/// Implementations adapt some record source into this shape; see
/// [`LoaderAction`](crate::LoaderAction) for the stock adapter around a
/// [`RecordsLoader`](crate::RecordsLoader).
pub trait LoadingAction: Send + Sync {
    /// Start the effect. Must not block the caller.
    fn run(&self, send: SendFn);
}
