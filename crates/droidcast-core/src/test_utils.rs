//! Shared test helpers
//!
//! Available to other crates via the `test-helpers` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::dispatch::IntentEmitter;
use crate::error::{Error, Result};
use crate::types::BroadcastIntent;

/// An [`IntentEmitter`] that replays a scripted sequence of outcomes and
/// records every intent it was handed.
///
/// State is shared: clone a handle before moving the emitter into a
/// dispatcher to inspect recordings afterwards. Once the script runs
/// out, further emissions succeed.
#[derive(Clone)]
pub struct ScriptedEmitter {
    script: Arc<Mutex<VecDeque<std::result::Result<(), String>>>>,
    emitted: Arc<Mutex<Vec<BroadcastIntent>>>,
    sticky_failure: Option<String>,
}

impl ScriptedEmitter {
    /// Emitter whose every emission succeeds.
    pub fn healthy() -> Self {
        Self::script(Vec::new())
    }

    /// Emitter whose every emission fails with `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        let mut emitter = Self::script(Vec::new());
        emitter.sticky_failure = Some(detail.into());
        emitter
    }

    /// Emitter that replays `outcomes` in order, then succeeds.
    pub fn script(outcomes: Vec<std::result::Result<(), String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            emitted: Arc::new(Mutex::new(Vec::new())),
            sticky_failure: None,
        }
    }

    /// Intents handed to `emit` so far, in order.
    pub fn emitted(&self) -> Vec<BroadcastIntent> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn emit_count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }
}

impl IntentEmitter for ScriptedEmitter {
    async fn emit(&self, intent: &BroadcastIntent) -> Result<()> {
        self.emitted.lock().unwrap().push(intent.clone());

        if let Some(detail) = &self.sticky_failure {
            return Err(Error::broadcast(detail.clone()));
        }

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(())) | None => Ok(()),
            Some(Err(detail)) => Err(Error::broadcast(detail)),
        }
    }
}
