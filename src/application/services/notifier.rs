//! Named toast entry points over [`NotificationStore`].

use std::future::Future;
use std::time::Duration;

use super::notification_store::{NotificationHandle, NotificationStore};
use crate::domain::notification::{NotificationDurations, NotificationKind};

/// Messages shown by [`Notifier::track`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMessages {
    /// Shown while the operation runs.
    pub loading: String,
    /// Shown when the operation succeeds.
    pub success: String,
    /// Shown when the operation fails.
    pub error: String,
}

impl Default for TrackMessages {
    fn default() -> Self {
        Self {
            loading: "Loading...".to_string(),
            success: "Success!".to_string(),
            error: "Something went wrong".to_string(),
        }
    }
}

impl TrackMessages {
    /// Creates all three messages.
    #[must_use]
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// Toast facade handed to callers.
#[derive(Clone)]
pub struct Notifier {
    store: NotificationStore,
    durations: NotificationDurations,
}

impl Notifier {
    /// Creates a facade with the stock durations.
    #[must_use]
    pub fn new(store: NotificationStore) -> Self {
        Self {
            store,
            durations: NotificationDurations::default(),
        }
    }

    /// Overrides the per-kind default durations.
    #[must_use]
    pub const fn with_durations(mut self, durations: NotificationDurations) -> Self {
        self.durations = durations;
        self
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Success toast, 3s by default.
    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(NotificationKind::Success, message)
    }

    /// Error toast, 5s by default.
    pub fn error(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(NotificationKind::Error, message)
    }

    /// Warning toast, 4s by default.
    pub fn warning(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(NotificationKind::Warning, message)
    }

    /// Info toast, 3s by default.
    pub fn info(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(NotificationKind::Info, message)
    }

    /// Loading toast. Never expires; dismiss it through the handle.
    pub fn loading(&self, message: impl Into<String>) -> NotificationHandle {
        self.show(NotificationKind::Loading, message)
    }

    /// Success toast with an explicit duration.
    pub fn success_for(&self, message: impl Into<String>, duration: Duration) -> NotificationHandle {
        self.store.add(NotificationKind::Success, message, duration)
    }

    /// Error toast with an explicit duration.
    pub fn error_for(&self, message: impl Into<String>, duration: Duration) -> NotificationHandle {
        self.store.add(NotificationKind::Error, message, duration)
    }

    /// Warning toast with an explicit duration.
    pub fn warning_for(&self, message: impl Into<String>, duration: Duration) -> NotificationHandle {
        self.store.add(NotificationKind::Warning, message, duration)
    }

    /// Info toast with an explicit duration.
    pub fn info_for(&self, message: impl Into<String>, duration: Duration) -> NotificationHandle {
        self.store.add(NotificationKind::Info, message, duration)
    }

    fn show(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationHandle {
        self.store.add(kind, message, self.durations.for_kind(kind))
    }

    /// Shows a loading toast while `operation` runs, then replaces it with
    /// a success or error toast. The operation's result is returned as is.
    ///
    /// # Errors
    /// Returns the operation's error unchanged.
    pub async fn track<T, E, F>(&self, operation: F, messages: TrackMessages) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let loading = self.loading(messages.loading);
        let result = operation.await;
        loading.dismiss();

        match &result {
            Ok(_) => self.success(messages.success),
            Err(_) => self.error(messages.error),
        };

        result
    }
}
