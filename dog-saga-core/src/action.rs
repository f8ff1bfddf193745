//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe an intended state change. They should be:
/// - Clone: Actions are observed by middleware and effect watchers after the reducer
/// - Debug: For logging
/// - Send + 'static: Async tasks send result actions back across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Concise one-line description used in logs
    ///
    /// Defaults to the `Debug` output. Override for actions carrying large payloads.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
