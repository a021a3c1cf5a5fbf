//! User notification port

use std::fmt;

/// A blocking dialog with a single acknowledgement button.
pub struct ConfirmDialog {
    /// Dialog body.
    pub message: String,
    /// Dialog title.
    pub title: String,
    /// Label of the acknowledgement button.
    pub confirm_text: String,
    /// Invoked once the user acknowledges the dialog.
    pub on_confirm: Box<dyn FnOnce() + Send>,
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("message", &self.message)
            .field("title", &self.title)
            .field("confirm_text", &self.confirm_text)
            .finish_non_exhaustive()
    }
}

/// Port for user-facing notifications. Presentation is fire-and-forget.
pub trait Notifier: Send + Sync {
    /// Shows a transient error notification.
    fn notify_error(&self, message: &str);

    /// Presents a modal dialog.
    fn confirm(&self, dialog: ConfirmDialog);
}
