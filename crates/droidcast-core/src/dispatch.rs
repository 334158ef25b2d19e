//! Broadcast dispatch over an injected platform capability
//!
//! The dispatcher owns the request/response contract: validate the action,
//! attempt exactly one emission through the [`IntentEmitter`] it was built
//! with, and fold every outcome into a [`DispatchReport`]. Nothing here
//! knows about adb; the concrete emitter lives in `droidcast-adb`.

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{BroadcastIntent, DispatchReport};

/// The host platform's broadcast facility, as seen by the dispatcher.
///
/// One operation: submit an intent system-wide. Implementations decide
/// what "the system" is — a real device behind adb in production, a
/// scripted recorder in tests.
#[trait_variant::make(IntentEmitter: Send)]
pub trait LocalIntentEmitter {
    /// Submit the intent to the platform. `Ok(())` means the platform
    /// accepted it for delivery; any error means submission failed.
    async fn emit(&self, intent: &BroadcastIntent) -> Result<()>;
}

/// Validates requests and translates emitter outcomes into reports.
///
/// Stateless between calls; each `dispatch` is atomic and independent.
pub struct BroadcastDispatcher<E> {
    emitter: E,
}

impl<E: IntentEmitter> BroadcastDispatcher<E> {
    pub fn new(emitter: E) -> Self {
        Self { emitter }
    }

    /// Dispatch a broadcast with the given action.
    ///
    /// Never returns an error: invalid input and platform failures both
    /// come back as a failed [`DispatchReport`]. An invalid action short-
    /// circuits before the emitter is touched; a valid one gets exactly
    /// one emission attempt, never retried.
    pub async fn dispatch(&self, action: &str, device: Option<&str>) -> DispatchReport {
        let intent = match BroadcastIntent::new(action) {
            Ok(intent) => match device {
                Some(serial) => intent.with_device(serial),
                None => intent,
            },
            Err(e) => {
                warn!("Rejected broadcast request: {}", e);
                return DispatchReport::failure(e.to_string());
            }
        };

        debug!(action = intent.action(), device = ?intent.device(), "Submitting broadcast");

        match self.emitter.emit(&intent).await {
            Ok(()) => {
                debug!(action = intent.action(), "Broadcast submitted");
                DispatchReport::success()
            }
            Err(e) => {
                warn!(action = intent.action(), "Broadcast failed: {}", e);
                DispatchReport::failure(format!("Failed to send broadcast: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedEmitter;

    #[tokio::test]
    async fn test_dispatch_success() {
        let dispatcher = BroadcastDispatcher::new(ScriptedEmitter::healthy());

        let report = dispatcher.dispatch("com.example.ACTION_REFRESH", None).await;

        assert!(report.is_success());
        assert_eq!(report.message, None);
    }

    #[tokio::test]
    async fn test_dispatch_records_exactly_one_emission() {
        let emitter = ScriptedEmitter::healthy();
        let dispatcher = BroadcastDispatcher::new(emitter);

        dispatcher.dispatch("com.example.A", None).await;
        dispatcher.dispatch("com.example.A", None).await;

        // No dedup: same action twice means two independent attempts.
        let emitted = dispatcher.emitter.emitted();
        assert_eq!(emitted.len(), 2);
        assert!(emitted.iter().all(|i| i.action() == "com.example.A"));
    }

    #[tokio::test]
    async fn test_dispatch_empty_action_skips_emitter() {
        let emitter = ScriptedEmitter::healthy();
        let dispatcher = BroadcastDispatcher::new(emitter);

        let report = dispatcher.dispatch("", None).await;

        assert!(!report.is_success());
        assert_eq!(report.message.as_deref(), Some("Action is required"));
        assert_eq!(dispatcher.emitter.emit_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_whitespace_action_skips_emitter() {
        let emitter = ScriptedEmitter::healthy();
        let dispatcher = BroadcastDispatcher::new(emitter);

        let report = dispatcher.dispatch("   ", None).await;

        assert!(!report.is_success());
        assert_eq!(report.message.as_deref(), Some("Action is required"));
        assert_eq!(dispatcher.emitter.emit_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_platform_failure_is_translated() {
        let dispatcher = BroadcastDispatcher::new(ScriptedEmitter::failing("permission denied"));

        let report = dispatcher.dispatch("com.example.A", None).await;

        assert!(!report.is_success());
        assert_eq!(
            report.message.as_deref(),
            Some("Failed to send broadcast: permission denied")
        );
    }

    #[tokio::test]
    async fn test_dispatch_forwards_device_serial() {
        let emitter = ScriptedEmitter::healthy();
        let dispatcher = BroadcastDispatcher::new(emitter);

        dispatcher
            .dispatch("com.tasker.SCREEN_OFF", Some("emulator-5554"))
            .await;

        let emitted = dispatcher.emitter.emitted();
        assert_eq!(emitted[0].device(), Some("emulator-5554"));
    }

    #[tokio::test]
    async fn test_failure_then_success_are_independent() {
        let emitter = ScriptedEmitter::script(vec![Err("device offline".into()), Ok(())]);
        let dispatcher = BroadcastDispatcher::new(emitter);

        let first = dispatcher.dispatch("com.example.A", None).await;
        let second = dispatcher.dispatch("com.example.A", None).await;

        assert!(!first.is_success());
        assert_eq!(
            first.message.as_deref(),
            Some("Failed to send broadcast: device offline")
        );
        assert!(second.is_success());
        assert_eq!(dispatcher.emitter.emit_count(), 2);
    }
}
