//! Headless presentation adapters
//!
//! These adapters render notifications, dialogs, routing and the loading
//! indicator as tracing events. They back the command-line client and any
//! host without a UI.

use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use courier_application::ports::{
    ConfirmDialog, LoadingHandle, LoadingIndicator, Navigator, Notifier,
};

/// Logs notifications and dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier {
    auto_confirm: bool,
}

impl TracingNotifier {
    /// Creates a notifier that leaves dialogs unacknowledged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auto_confirm: false,
        }
    }

    /// Creates a notifier that acknowledges every dialog as soon as it is
    /// shown, for hosts with nobody to click the button.
    #[must_use]
    pub const fn auto_confirming() -> Self {
        Self { auto_confirm: true }
    }
}

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(target: "courier::notify", "{message}");
    }

    fn confirm(&self, dialog: ConfirmDialog) {
        warn!(
            target: "courier::notify",
            title = %dialog.title,
            confirm = %dialog.confirm_text,
            "{}",
            dialog.message
        );
        if self.auto_confirm {
            (dialog.on_confirm)();
        }
    }
}

/// Records the current route and logs every navigation.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    current: RwLock<Option<String>>,
}

impl TracingNavigator {
    /// Creates a navigator with no route yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last route navigated to.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }
}

impl Navigator for TracingNavigator {
    fn navigate_to(&self, path: &str) {
        info!(target: "courier::navigate", path, "navigating");
        *self.current.write() = Some(path.to_string());
    }
}

/// Logs when an indicator is shown and how long it stayed up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoadingIndicator;

impl TracingLoadingIndicator {
    /// Creates the indicator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

struct TracingLoadingHandle {
    shown_at: Instant,
}

impl LoadingHandle for TracingLoadingHandle {
    fn close(self: Box<Self>) {
        debug!(
            target: "courier::loading",
            elapsed_ms = self.shown_at.elapsed().as_millis(),
            "loading indicator closed"
        );
    }
}

impl LoadingIndicator for TracingLoadingIndicator {
    fn show(&self, text: &str) -> Box<dyn LoadingHandle> {
        info!(target: "courier::loading", "{text}");
        Box::new(TracingLoadingHandle {
            shown_at: Instant::now(),
        })
    }
}
