//! The feed state machine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::{next_state, AppInput, AppState, Transition};
use crate::machine::action::{LoadingAction, SendFn};
use crate::machine::subscription::Subscription;

pub(super) type Subscriber = Arc<dyn Fn(&Transition) + Send + Sync>;

/// State cell guarded by the machine's single lock: the current transition
/// plus the subscriber registry. Computing the next state, committing it, and
/// publishing to subscribers happen under one acquisition, so subscribers
/// observe transitions in commit order and never partially applied.
pub(super) struct Inner {
    pub(super) current: Transition,
    pub(super) subscribers: HashMap<u64, Subscriber>,
    pub(super) next_id: u64,
}

pub(super) fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // A panicking subscriber must not wedge the machine.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    inner: Arc<Mutex<Inner>>,
    actions: Vec<Arc<dyn LoadingAction>>,
}

/// The single owner of the feed state.
///
/// Created once per process with an initial state of `Loading`; every
/// registered [`LoadingAction`] is invoked once for that initial entry and
/// again on every later transition into `Loading`. The handle is cheap to
/// clone and all clones drive the same machine.
///
/// [`send`](Self::send) may be called from any thread or task. Subscriber
/// callbacks run synchronously on the committing thread and must not call
/// back into the machine.
///
/// # Example
///
/// ```rust
/// use foodwatch::{AppInput, AppMachine, AppState};
///
/// let machine = AppMachine::new(Vec::new());
/// machine.send(AppInput::Load(Vec::new()));
/// assert!(matches!(machine.current().state, AppState::Loaded(_)));
///
/// // Inputs that make no sense for the current state are ignored.
/// machine.send(AppInput::Load(Vec::new()));
/// assert!(matches!(machine.current().state, AppState::Loaded(_)));
/// ```
#[derive(Clone)]
pub struct AppMachine {
    shared: Arc<Shared>,
}

impl AppMachine {
    /// Create a machine in the `Loading` state and dispatch every loading
    /// action once for that initial entry.
    pub fn new(loading_actions: Vec<Arc<dyn LoadingAction>>) -> Self {
        let machine = Self {
            shared: Arc::new(Shared {
                inner: Arc::new(Mutex::new(Inner {
                    current: Transition {
                        input: None,
                        state: AppState::Loading,
                    },
                    subscribers: HashMap::new(),
                    next_id: 0,
                })),
                actions: loading_actions,
            }),
        };
        machine.dispatch_loading_actions();
        machine
    }

    /// Feed an input into the machine.
    ///
    /// Applies the transition table against whatever state is current at the
    /// moment of processing. On a covered pair the new transition is
    /// committed and published atomically; on an uncovered pair nothing
    /// happens and nothing is published. After a commit that entered
    /// `Loading`, every loading action is dispatched.
    pub fn send(&self, input: AppInput) {
        let entered_loading = {
            let mut inner = lock(&self.shared.inner);
            let Some(state) = next_state(&inner.current.state, &input) else {
                tracing::trace!(
                    state = inner.current.state.name(),
                    input = input.name(),
                    "input ignored"
                );
                return;
            };
            tracing::debug!(
                from = inner.current.state.name(),
                to = state.name(),
                input = input.name(),
                "transition committed"
            );
            let entered_loading = matches!(state, AppState::Loading);
            inner.current = Transition {
                input: Some(input),
                state,
            };
            for subscriber in inner.subscribers.values() {
                subscriber(&inner.current);
            }
            entered_loading
        };

        // Actions are dispatched outside the lock: they may call send
        // synchronously, and the machine never waits for them.
        if entered_loading {
            self.dispatch_loading_actions();
        }
    }

    /// Register a subscriber.
    ///
    /// The current transition is replayed synchronously before this returns;
    /// afterwards the callback sees every committed transition in commit
    /// order until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, on_transition: F) -> Subscription
    where
        F: Fn(&Transition) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Arc::new(on_transition);
        let mut inner = lock(&self.shared.inner);
        let id = inner.next_id;
        inner.next_id += 1;
        subscriber(&inner.current);
        inner.subscribers.insert(id, subscriber);
        Subscription::new(Arc::downgrade(&self.shared.inner), id)
    }

    /// Snapshot of the most recently committed transition.
    pub fn current(&self) -> Transition {
        lock(&self.shared.inner).current.clone()
    }

    fn dispatch_loading_actions(&self) {
        for action in &self.shared.actions {
            let handle = self.clone();
            let send: SendFn = Arc::new(move |input| handle.send(input));
            action.run(send);
        }
    }
}
