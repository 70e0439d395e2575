//! Toast notification model.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned toast id. Strictly increasing, never reused.
pub type NotificationId = u64;

/// Toast category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Completed operation.
    Success,
    /// Failed operation.
    Error,
    /// Needs attention.
    Warning,
    /// Neutral information.
    Info,
    /// Operation in progress. Persists until dismissed.
    Loading,
}

/// Visual treatment of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationStyle {
    /// Background colour (hex).
    pub background: &'static str,
    /// Leading glyph.
    pub icon: &'static str,
    /// Border colour (hex).
    pub border: &'static str,
}

impl NotificationKind {
    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Loading => "loading",
        }
    }

    /// Colours and icon used to render this kind.
    #[must_use]
    pub const fn style(self) -> NotificationStyle {
        match self {
            Self::Success => NotificationStyle {
                background: "#10b981",
                icon: "✓",
                border: "#059669",
            },
            Self::Error => NotificationStyle {
                background: "#ef4444",
                icon: "✕",
                border: "#dc2626",
            },
            Self::Warning => NotificationStyle {
                background: "#f59e0b",
                icon: "⚠",
                border: "#d97706",
            },
            Self::Info => NotificationStyle {
                background: "#3b82f6",
                icon: "ℹ",
                border: "#2563eb",
            },
            Self::Loading => NotificationStyle {
                background: "#6366f1",
                icon: "⟳",
                border: "#4f46e5",
            },
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auto-dismiss delays per kind. `loading` always persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDurations {
    /// Success toast lifetime.
    pub success: Duration,
    /// Error toast lifetime.
    pub error: Duration,
    /// Warning toast lifetime.
    pub warning: Duration,
    /// Info toast lifetime.
    pub info: Duration,
}

impl Default for NotificationDurations {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(3000),
            error: Duration::from_millis(5000),
            warning: Duration::from_millis(4000),
            info: Duration::from_millis(3000),
        }
    }
}

impl NotificationDurations {
    /// Lifetime for `kind`. Zero for loading.
    #[must_use]
    pub const fn for_kind(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Warning => self.warning,
            NotificationKind::Info => self.info,
            NotificationKind::Loading => Duration::ZERO,
        }
    }
}

/// A toast as seen by subscribers. A zero `duration` persists until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique id.
    pub id: NotificationId,
    /// Category.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// Time until auto-removal.
    pub duration: Duration,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates toast stamped with the current time.
    #[must_use]
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            duration,
            created_at: Utc::now(),
        }
    }

    /// Whether the toast stays until dismissed.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(1, NotificationKind::Info, "Course created", Duration::from_secs(3));
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.message, "Course created");
        assert!(!n.is_persistent());
    }

    #[test]
    fn test_default_durations() {
        let durations = NotificationDurations::default();
        assert_eq!(durations.for_kind(NotificationKind::Success), Duration::from_millis(3000));
        assert_eq!(durations.for_kind(NotificationKind::Error), Duration::from_millis(5000));
        assert_eq!(durations.for_kind(NotificationKind::Warning), Duration::from_millis(4000));
        assert_eq!(durations.for_kind(NotificationKind::Info), Duration::from_millis(3000));
        assert_eq!(durations.for_kind(NotificationKind::Loading), Duration::ZERO);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(NotificationKind::Loading.style().icon, "⟳");
    }
}
