//! Time-bounded "currently unlocked" state, owned by a `Gatekeeper`.

use crate::domain::errors::SessionError;
use serde::{Deserialize, Serialize};
use shared_types::{SessionId, Timestamp};
use std::time::Duration;

/// A session is active from `start` until `duration` has passed since the
/// later of its start and its last renewal, unless finished earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    started_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
    duration: Duration,
}

impl Session {
    /// Create an unstarted session.
    pub fn new(duration: Duration) -> Self {
        Self {
            id: SessionId::new(),
            started_at: None,
            ended_at: None,
            updated_at: None,
            duration,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&mut self, now: Timestamp) {
        self.started_at = Some(now);
        self.ended_at = None;
        self.updated_at = None;
    }

    /// Moment the session stops being active, if it was ever started.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.updated_at
            .or(self.started_at)
            .map(|from| from.saturating_add(self.duration))
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        match self.expires_at() {
            Some(expiry) => now < expiry,
            None => false,
        }
    }

    /// Extend the session so it expires `duration` after `now`.
    pub fn renew(&mut self, now: Timestamp) -> Result<(), SessionError> {
        if !self.is_active(now) {
            return Err(SessionError::NotActive);
        }
        self.updated_at = Some(now);
        Ok(())
    }

    /// End the session explicitly (sign-out). No-op for an unstarted session.
    pub fn finish(&mut self, now: Timestamp) {
        if self.started_at.is_some() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    #[test]
    fn test_new_session_is_inactive() {
        let session = Session::new(Duration::from_secs(10));
        assert!(!session.is_active(at(0)));
        assert_eq!(session.expires_at(), None);
    }

    #[test]
    fn test_active_until_duration_elapses() {
        let mut session = Session::new(Duration::from_secs(10));
        session.start(at(100));

        assert!(session.is_active(at(100)));
        assert!(session.is_active(Timestamp::from_millis(109_999)));
        assert!(!session.is_active(at(110)));
        assert!(!session.is_active(at(500)));
    }

    #[test]
    fn test_renew_extends_expiry() {
        let mut session = Session::new(Duration::from_secs(10));
        session.start(at(0));
        session.renew(at(8)).unwrap();

        assert!(session.is_active(at(17)));
        assert!(!session.is_active(at(18)));
    }

    #[test]
    fn test_renew_inactive_fails() {
        let mut session = Session::new(Duration::from_secs(10));
        assert_eq!(session.renew(at(0)), Err(SessionError::NotActive));

        session.start(at(0));
        assert_eq!(session.renew(at(10)), Err(SessionError::NotActive));
    }

    #[test]
    fn test_finish_ends_session() {
        let mut session = Session::new(Duration::from_secs(10));
        session.start(at(0));
        session.finish(at(3));

        assert!(!session.is_active(at(4)));
        assert_eq!(session.ended_at(), Some(at(3)));
    }

    #[test]
    fn test_restart_clears_end() {
        let mut session = Session::new(Duration::from_secs(10));
        session.start(at(0));
        session.finish(at(1));
        session.start(at(2));

        assert!(session.is_active(at(5)));
        assert_eq!(session.ended_at(), None);
    }
}
