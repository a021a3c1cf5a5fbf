//! Process-wide session state

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether the auth token has been observed as expired.
///
/// Starts unexpired. Only the error classifier marks it expired; clearing
/// it is the re-login flow's job.
#[derive(Debug, Default)]
pub struct SessionState {
    token_expired: AtomicBool,
}

impl SessionState {
    /// Creates an unexpired session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token_expired: AtomicBool::new(false),
        }
    }

    /// Marks the token expired.
    ///
    /// Returns true only for the caller that performed the transition; every
    /// later caller in the same expiry episode gets false.
    pub fn try_expire(&self) -> bool {
        self.token_expired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns true if the token has been marked expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.token_expired.load(Ordering::Acquire)
    }

    /// Starts a new episode, typically after a successful login.
    pub fn reset(&self) {
        self.token_expired.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_single_transition_per_episode() {
        let session = SessionState::new();
        assert!(!session.is_expired());
        assert!(session.try_expire());
        assert!(!session.try_expire());
        assert!(session.is_expired());

        session.reset();
        assert!(!session.is_expired());
        assert!(session.try_expire());
    }

    #[test]
    fn test_racing_threads_have_one_winner() {
        let session = Arc::new(SessionState::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || session.try_expire())
            })
            .collect();
        let winners = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
