//! Transport failure classification
//!
//! The classifier is the single place where failures turn into user-visible
//! notifications and the only writer of the session-expiry flag. It returns
//! a [`Verdict`] telling the dispatcher whether to emit an error or abandon
//! the call.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use courier_domain::{ErrorCategory, Messages, NormalizedError, TransportFailure};

use crate::channel::AbandonReason;
use crate::ports::{ConfirmDialog, Navigator, Notifier};
use crate::session::SessionState;

/// What the dispatcher does with a classified failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Emit this error on the call's channel.
    Fail(NormalizedError),
    /// End the call without emitting anything.
    Abandon(AbandonReason),
}

/// Handling rule selected by the status of an HTTP failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRule {
    /// 400: notify each field error, emit them joined.
    FieldErrors,
    /// 403: session expiry.
    SessionExpired,
    /// 500: generic server notification, emit the default error.
    ServerFault,
    /// Any other status: emit the default error silently.
    Passthrough,
}

impl StatusRule {
    /// Selects the rule for `status`.
    #[must_use]
    pub const fn for_status(status: u16) -> Self {
        match status {
            400 => Self::FieldErrors,
            403 => Self::SessionExpired,
            500 => Self::ServerFault,
            _ => Self::Passthrough,
        }
    }
}

/// Turns transport failures into verdicts, performing their side effects.
pub struct ErrorClassifier {
    session: Arc<SessionState>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    messages: Messages,
    login_path: String,
}

impl ErrorClassifier {
    /// Creates a classifier.
    #[must_use]
    pub fn new(
        session: Arc<SessionState>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        messages: Messages,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
            messages,
            login_path: login_path.into(),
        }
    }

    /// Classifies `failure` for a call with the given `skip_auth` option.
    pub fn classify(&self, failure: TransportFailure, skip_auth: bool) -> Verdict {
        let category = ErrorCategory::of(&failure);
        match failure {
            TransportFailure::NoRequest { message, detail } => {
                error!(category = category.as_str(), %message, %detail, "request was never sent");
                self.notifier.notify_error(&self.messages.system_error);
                let error = NormalizedError::new(message).with_params(detail);
                Verdict::Abandon(AbandonReason::SystemFault(error))
            }
            TransportFailure::NoResponse { message } => {
                warn!(category = category.as_str(), %message, "no response received");
                Verdict::Fail(NormalizedError::new(&self.messages.network_error))
            }
            TransportFailure::Http { status, body } => {
                warn!(category = category.as_str(), status, "request failed");
                let error = NormalizedError::new(&self.messages.server_side_error).with_data(body);
                match StatusRule::for_status(status) {
                    StatusRule::FieldErrors => self.field_errors(error),
                    StatusRule::SessionExpired => self.session_expired(error, skip_auth),
                    StatusRule::ServerFault => self.server_fault(error),
                    StatusRule::Passthrough => Verdict::Fail(error),
                }
            }
        }
    }

    fn field_errors(&self, mut error: NormalizedError) -> Verdict {
        let entries = error
            .data
            .get("errors")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for message in entries.iter().filter_map(default_message) {
            self.notifier.notify_error(message);
        }

        error.msg.clear();
        error.params = entries
            .iter()
            .map(describe_field_error)
            .collect::<Vec<_>>()
            .join(";");
        Verdict::Fail(error)
    }

    /// Only the call that flips the session flag notifies. Whether the call
    /// is abandoned depends on `skip_auth` alone; a skip-auth call that
    /// flips the flag is handled like a server fault.
    fn session_expired(&self, error: NormalizedError, skip_auth: bool) -> Verdict {
        let first_in_episode = self.session.try_expire();

        if !skip_auth {
            if first_in_episode {
                info!("session expired, asking the user to log in again");
                self.present_login_dialog();
            }
            return Verdict::Abandon(AbandonReason::SessionExpired);
        }

        if first_in_episode {
            return self.server_fault(error);
        }
        Verdict::Fail(error)
    }

    fn server_fault(&self, error: NormalizedError) -> Verdict {
        self.notifier.notify_error(&self.messages.server_error);
        Verdict::Fail(error)
    }

    fn present_login_dialog(&self) {
        let navigator = Arc::clone(&self.navigator);
        let login_path = self.login_path.clone();
        self.notifier.confirm(ConfirmDialog {
            message: self.messages.session_expired.clone(),
            title: self.messages.session_expired_title.clone(),
            confirm_text: self.messages.confirm_text.clone(),
            on_confirm: Box::new(move || navigator.navigate_to(&login_path)),
        });
    }
}

fn default_message(entry: &Value) -> Option<&str> {
    entry
        .get("defaultMessage")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

fn describe_field_error(entry: &Value) -> String {
    if let Some(message) = default_message(entry) {
        return message.to_string();
    }
    match entry {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        notices: Mutex<Vec<String>>,
        dialogs: Mutex<Vec<ConfirmDialog>>,
        routes: Mutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify_error(&self, message: &str) {
            self.notices.lock().push(message.to_string());
        }

        fn confirm(&self, dialog: ConfirmDialog) {
            self.dialogs.lock().push(dialog);
        }
    }

    impl Navigator for Recorder {
        fn navigate_to(&self, path: &str) {
            self.routes.lock().push(path.to_string());
        }
    }

    fn classifier() -> (ErrorClassifier, Arc<Recorder>, Arc<SessionState>) {
        let recorder = Arc::new(Recorder::default());
        let session = Arc::new(SessionState::new());
        let classifier = ErrorClassifier::new(
            Arc::clone(&session),
            recorder.clone(),
            recorder.clone(),
            Messages::default(),
            "/login",
        );
        (classifier, recorder, session)
    }

    fn http(status: u16, body: Value) -> TransportFailure {
        TransportFailure::Http { status, body }
    }

    #[test]
    fn test_status_rules() {
        assert_eq!(StatusRule::for_status(400), StatusRule::FieldErrors);
        assert_eq!(StatusRule::for_status(403), StatusRule::SessionExpired);
        assert_eq!(StatusRule::for_status(500), StatusRule::ServerFault);
        assert_eq!(StatusRule::for_status(502), StatusRule::Passthrough);
        assert_eq!(StatusRule::for_status(401), StatusRule::Passthrough);
    }

    #[test]
    fn test_no_request_is_abandoned_with_system_notice() {
        let (classifier, recorder, _) = classifier();
        let verdict = classifier.classify(
            TransportFailure::NoRequest {
                message: "invalid header".into(),
                detail: "builder error".into(),
            },
            false,
        );
        let expected = NormalizedError::new("invalid header").with_params("builder error");
        assert_eq!(verdict, Verdict::Abandon(AbandonReason::SystemFault(expected)));
        assert_eq!(*recorder.notices.lock(), vec![Messages::default().system_error]);
    }

    #[test]
    fn test_no_response_fails_silently() {
        let (classifier, recorder, _) = classifier();
        let verdict = classifier.classify(
            TransportFailure::NoResponse {
                message: "connection refused".into(),
            },
            false,
        );
        assert_eq!(
            verdict,
            Verdict::Fail(NormalizedError::new(Messages::default().network_error))
        );
        assert!(recorder.notices.lock().is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let (classifier, recorder, _) = classifier();
        let body = json!({"errors": [
            {"defaultMessage": "name required", "field": "name"},
            {"code": "Min", "field": "age"}
        ]});
        let Verdict::Fail(error) = classifier.classify(http(400, body.clone()), false) else {
            panic!("expected a failure");
        };
        assert_eq!(error.msg, "");
        assert_eq!(
            error.params,
            r#"name required;{"code":"Min","field":"age"}"#
        );
        assert_eq!(error.data, body);
        assert_eq!(*recorder.notices.lock(), vec!["name required".to_string()]);
    }

    #[test]
    fn test_validation_without_errors_array() {
        let (classifier, recorder, _) = classifier();
        let Verdict::Fail(error) = classifier.classify(http(400, json!("bad")), false) else {
            panic!("expected a failure");
        };
        assert_eq!(error.params, "");
        assert!(recorder.notices.lock().is_empty());
    }

    #[test]
    fn test_first_403_shows_dialog_and_abandons() {
        let (classifier, recorder, session) = classifier();
        let verdict = classifier.classify(http(403, Value::Null), false);
        assert_eq!(verdict, Verdict::Abandon(AbandonReason::SessionExpired));
        assert!(session.is_expired());

        let dialog = recorder.dialogs.lock().pop();
        let Some(dialog) = dialog else {
            panic!("expected a dialog");
        };
        assert_eq!(dialog.message, Messages::default().session_expired);
        assert!(recorder.routes.lock().is_empty());
        (dialog.on_confirm)();
        assert_eq!(*recorder.routes.lock(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_repeated_403_abandons_without_dialog() {
        let (classifier, recorder, _) = classifier();
        classifier.classify(http(403, Value::Null), false);
        let verdict = classifier.classify(http(403, Value::Null), false);
        assert_eq!(verdict, Verdict::Abandon(AbandonReason::SessionExpired));
        assert_eq!(recorder.dialogs.lock().len(), 1);
    }

    #[test]
    fn test_skip_auth_403_falls_through_to_server_fault() {
        let (classifier, recorder, session) = classifier();
        let verdict = classifier.classify(http(403, json!({"error": "Forbidden"})), true);
        let expected = NormalizedError::new(Messages::default().server_side_error)
            .with_data(json!({"error": "Forbidden"}));
        assert_eq!(verdict, Verdict::Fail(expected));
        assert!(session.is_expired());
        assert!(recorder.dialogs.lock().is_empty());
        assert_eq!(*recorder.notices.lock(), vec![Messages::default().server_error]);

        let verdict = classifier.classify(http(403, Value::Null), true);
        assert!(matches!(verdict, Verdict::Fail(_)));
        assert_eq!(recorder.notices.lock().len(), 1);
    }

    #[test]
    fn test_500_notifies_and_other_statuses_do_not() {
        let (classifier, recorder, _) = classifier();
        let verdict = classifier.classify(http(500, json!({"message": "boom"})), false);
        let Verdict::Fail(error) = verdict else {
            panic!("expected a failure");
        };
        assert_eq!(error.msg, Messages::default().server_side_error);
        assert_eq!(error.data, json!({"message": "boom"}));
        assert_eq!(recorder.notices.lock().len(), 1);

        let verdict = classifier.classify(http(404, json!("missing")), false);
        assert!(matches!(verdict, Verdict::Fail(ref e) if e.data == json!("missing")));
        assert_eq!(recorder.notices.lock().len(), 1);
    }
}
