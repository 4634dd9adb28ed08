//! Adapter from a [`RecordsLoader`] to a [`LoadingAction`].

use std::sync::Arc;

use crate::core::AppInput;
use crate::loader::RecordsLoader;
use crate::machine::{LoadingAction, SendFn};

/// The stock loading action: awaits a loader on a spawned task and feeds the
/// outcome back into the machine.
///
/// A successful fetch becomes a `Load` input, any loader error a `Fail`
/// input; nothing escapes past this boundary. Each invocation runs
/// independently, so several `LoaderAction`s registered on one machine race
/// freely and the transition table decides which result counts.
///
/// `run` spawns onto the ambient Tokio runtime and therefore must be invoked
/// from within one. In practice that means constructing the [`AppMachine`]
/// (and sending `Refresh`) inside the runtime.
///
/// [`AppMachine`]: crate::AppMachine
pub struct LoaderAction {
    loader: Arc<dyn RecordsLoader>,
}

impl LoaderAction {
    pub fn new(loader: Arc<dyn RecordsLoader>) -> Self {
        Self { loader }
    }
}

impl LoadingAction for LoaderAction {
    fn run(&self, send: SendFn) {
        let loader = Arc::clone(&self.loader);
        tokio::spawn(async move {
            match loader.fetch().await {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "record fetch succeeded");
                    send(AppInput::Load(records));
                }
                Err(error) => {
                    tracing::warn!(error = %error, "record fetch failed");
                    send(AppInput::Fail(Arc::new(error)));
                }
            }
        });
    }
}
