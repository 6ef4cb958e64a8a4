//! # Gatekeeper
//!
//! Aggregate root owning the `Session` and `AuthenticationPolicy` of the
//! single device user. Counts failed authentications and blocks access once
//! the policy's threshold is reached.
//!
//! The persisted fields are `(session, failed_attempt_count, access_denied_at)`;
//! decisions go through [`Gatekeeper::state`], which folds them into one
//! [`GatekeeperState`] so a caller never reads a half-updated combination.

use crate::domain::errors::{GatekeeperError, PolicyError, SessionError};
use crate::domain::policy::AuthenticationPolicy;
use crate::domain::session::Session;
use serde::{Deserialize, Serialize};
use shared_types::{GatekeeperId, SessionId, Timestamp};
use std::time::Duration;

/// Access state derived from the gatekeeper's fields at a point in time.
///
/// State Machine:
/// ```text
/// [FRESH] ──success──→ [AUTHENTICATED] ──time passes──→ [SESSION_EXPIRED]
///    │                       ↑                                 │
///    │                       └────────── success ──────────────┤
///    │                                                         │
///    └──── failures reach max ────→ [BLOCKED {until}] ←─────────┘
///                                          │
///                                  block duration elapses
///                                          ↓
///                                    [UNBLOCKED] ──success──→ [AUTHENTICATED]
///                                          │
///                                          └──failure──→ [BLOCKED {until}]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatekeeperState {
    /// No session started and the failure threshold not reached
    Fresh,
    /// Session active
    Authenticated,
    /// A session was started earlier but is no longer active
    SessionExpired,
    /// Failure threshold reached; authentication refused until `until`
    Blocked { until: Timestamp },
    /// Failure threshold reached but the block period has elapsed
    Unblocked,
}

/// Enforces the authentication policy for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gatekeeper {
    id: GatekeeperId,
    session: Option<Session>,
    policy: AuthenticationPolicy,
    failed_attempt_count: u32,
    access_denied_at: Option<Timestamp>,
}

impl Gatekeeper {
    /// Create a gatekeeper with a fresh, unstarted session.
    pub fn new(id: GatekeeperId, policy: AuthenticationPolicy) -> Self {
        Self {
            id,
            session: Some(Session::new(policy.session_duration())),
            policy,
            failed_attempt_count: 0,
            access_denied_at: None,
        }
    }

    /// Rebuild from persisted fields.
    pub fn restore(
        id: GatekeeperId,
        session: Option<Session>,
        policy: AuthenticationPolicy,
        failed_attempt_count: u32,
        access_denied_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            session,
            policy,
            failed_attempt_count,
            access_denied_at,
        }
    }

    pub fn id(&self) -> GatekeeperId {
        self.id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn policy(&self) -> &AuthenticationPolicy {
        &self.policy
    }

    pub fn failed_attempt_count(&self) -> u32 {
        self.failed_attempt_count
    }

    pub fn access_denied_at(&self) -> Option<Timestamp> {
        self.access_denied_at
    }

    fn threshold_reached(&self) -> bool {
        self.failed_attempt_count >= self.policy.max_failed_attempts()
    }

    /// End of the current block, if one is in force at `now`.
    fn blocked_until(&self, now: Timestamp) -> Option<Timestamp> {
        if !self.threshold_reached() {
            return None;
        }
        let until = self
            .access_denied_at?
            .saturating_add(self.policy.block_duration());
        (now < until).then_some(until)
    }

    /// Derive the access state at `now`.
    pub fn state(&self, now: Timestamp) -> GatekeeperState {
        if let Some(until) = self.blocked_until(now) {
            return GatekeeperState::Blocked { until };
        }
        match &self.session {
            Some(session) if session.is_active(now) => GatekeeperState::Authenticated,
            _ if self.threshold_reached() => GatekeeperState::Unblocked,
            Some(session) if session.started_at().is_some() => GatekeeperState::SessionExpired,
            _ => GatekeeperState::Fresh,
        }
    }

    pub fn is_blocked(&self, now: Timestamp) -> bool {
        matches!(self.state(now), GatekeeperState::Blocked { .. })
    }

    /// Whether an authentication attempt may be made at `now`.
    pub fn is_access_possible(&self, now: Timestamp) -> bool {
        !self.is_blocked(now)
    }

    /// Reset the failure counter and start a new session.
    ///
    /// A new `SessionId` is issued every time, so ids handed out for earlier
    /// sessions stop granting access.
    pub fn record_successful_authentication(
        &mut self,
        now: Timestamp,
    ) -> Result<SessionId, GatekeeperError> {
        if self.is_blocked(now) {
            return Err(GatekeeperError::AccessBlocked);
        }
        let mut session = Session::new(self.policy.session_duration());
        session.start(now);
        let session_id = session.id();
        self.session = Some(session);
        self.failed_attempt_count = 0;
        self.access_denied_at = None;
        Ok(session_id)
    }

    /// Count a failed attempt. Reaching the threshold (again) starts a block
    /// at `now`. Any active session is ended.
    pub fn record_failed_authentication(&mut self, now: Timestamp) {
        if let Some(session) = self.session.as_mut() {
            session.finish(now);
        }
        self.failed_attempt_count = self.failed_attempt_count.saturating_add(1);
        if self.threshold_reached() {
            self.access_denied_at = Some(now);
        }
    }

    /// Whether `session_id` names the current session and it is active.
    pub fn has_access(&self, session_id: SessionId, now: Timestamp) -> bool {
        match &self.session {
            Some(session) => session.id() == session_id && session.is_active(now),
            None => false,
        }
    }

    /// Record use of the wallet, renewing the current session.
    pub fn use_access(&mut self, now: Timestamp) -> Result<(), GatekeeperError> {
        if self.is_blocked(now) {
            return Err(GatekeeperError::AccessBlocked);
        }
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        session.renew(now)?;
        Ok(())
    }

    /// End the current session (sign-out).
    pub fn finish_session(&mut self, now: Timestamp) {
        if let Some(session) = self.session.as_mut() {
            session.finish(now);
        }
    }

    /// Drop the session and clear failure bookkeeping.
    pub fn reset(&mut self) {
        self.session = None;
        self.failed_attempt_count = 0;
        self.access_denied_at = None;
    }

    /// Replace the policy. Failure count and block timestamp are kept and the
    /// new thresholds apply from the next check. A changed session duration
    /// replaces the session with a fresh, unstarted one.
    pub fn update_policy(&mut self, policy: AuthenticationPolicy) {
        if policy.session_duration() != self.policy.session_duration() {
            self.session = Some(Session::new(policy.session_duration()));
        }
        self.policy = policy;
    }

    pub fn change_session_duration(&mut self, duration: Duration) -> Result<(), PolicyError> {
        let policy = self.policy.with_session_duration(duration)?;
        self.update_policy(policy);
        Ok(())
    }

    pub fn change_max_failed_attempts(&mut self, max_failed_attempts: u32) -> Result<(), PolicyError> {
        let policy = self.policy.with_max_failed_attempts(max_failed_attempts)?;
        self.update_policy(policy);
        Ok(())
    }

    pub fn change_block_duration(&mut self, duration: Duration) -> Result<(), PolicyError> {
        let policy = self.policy.with_block_duration(duration)?;
        self.update_policy(policy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    fn gatekeeper(session_secs: u64, max: u32, block_secs: u64) -> Gatekeeper {
        let policy = AuthenticationPolicy::new(
            Duration::from_secs(session_secs),
            max,
            Duration::from_secs(block_secs),
        )
        .unwrap();
        Gatekeeper::new(GatekeeperId::new(), policy)
    }

    #[test]
    fn test_fresh_gatekeeper() {
        let gk = gatekeeper(10, 3, 5);
        assert_eq!(gk.state(at(0)), GatekeeperState::Fresh);
        assert!(gk.is_access_possible(at(0)));
        assert!(gk.session().is_some());
    }

    #[test]
    fn test_success_starts_session() {
        let mut gk = gatekeeper(10, 3, 5);
        let session_id = gk.record_successful_authentication(at(0)).unwrap();

        assert_eq!(gk.state(at(1)), GatekeeperState::Authenticated);
        assert!(gk.has_access(session_id, at(9)));
        assert!(!gk.has_access(session_id, at(10)));
        assert_eq!(gk.state(at(10)), GatekeeperState::SessionExpired);
    }

    #[test]
    fn test_new_session_id_per_success() {
        let mut gk = gatekeeper(10, 3, 5);
        let first = gk.record_successful_authentication(at(0)).unwrap();
        let second = gk.record_successful_authentication(at(1)).unwrap();

        assert_ne!(first, second);
        assert!(!gk.has_access(first, at(2)));
        assert!(gk.has_access(second, at(2)));
    }

    #[test]
    fn test_blocks_after_max_failures() {
        let mut gk = gatekeeper(10, 3, 5);
        gk.record_failed_authentication(at(0));
        gk.record_failed_authentication(at(1));
        assert!(gk.is_access_possible(at(1)));
        assert_eq!(gk.access_denied_at(), None);

        gk.record_failed_authentication(at(2));
        assert_eq!(gk.access_denied_at(), Some(at(2)));
        assert_eq!(gk.state(at(3)), GatekeeperState::Blocked { until: at(7) });
        assert!(!gk.is_access_possible(at(6)));
        assert!(gk.is_access_possible(at(7)));
        assert_eq!(gk.state(at(7)), GatekeeperState::Unblocked);
    }

    #[test]
    fn test_success_refused_while_blocked() {
        let mut gk = gatekeeper(10, 1, 5);
        gk.record_failed_authentication(at(0));

        assert_eq!(
            gk.record_successful_authentication(at(1)),
            Err(GatekeeperError::AccessBlocked)
        );
        assert_eq!(gk.failed_attempt_count(), 1);
    }

    #[test]
    fn test_success_resets_failures() {
        let mut gk = gatekeeper(10, 3, 5);
        gk.record_failed_authentication(at(0));
        gk.record_failed_authentication(at(0));
        gk.record_successful_authentication(at(1)).unwrap();

        assert_eq!(gk.failed_attempt_count(), 0);
        assert_eq!(gk.access_denied_at(), None);
    }

    #[test]
    fn test_failure_after_unblock_blocks_again() {
        let mut gk = gatekeeper(10, 2, 5);
        gk.record_failed_authentication(at(0));
        gk.record_failed_authentication(at(0));
        assert!(gk.is_blocked(at(4)));

        gk.record_failed_authentication(at(5));
        assert_eq!(gk.state(at(6)), GatekeeperState::Blocked { until: at(10) });
    }

    #[test]
    fn test_failure_ends_active_session() {
        let mut gk = gatekeeper(10, 3, 5);
        let session_id = gk.record_successful_authentication(at(0)).unwrap();
        gk.record_failed_authentication(at(1));

        assert!(!gk.has_access(session_id, at(2)));
        assert_eq!(gk.state(at(2)), GatekeeperState::SessionExpired);
    }

    #[test]
    fn test_use_access_renews() {
        let mut gk = gatekeeper(10, 3, 5);
        let session_id = gk.record_successful_authentication(at(0)).unwrap();
        gk.use_access(at(9)).unwrap();

        assert!(gk.has_access(session_id, at(18)));
    }

    #[test]
    fn test_use_access_without_session() {
        let mut gk = gatekeeper(10, 3, 5);
        assert_eq!(
            gk.use_access(at(0)),
            Err(GatekeeperError::Session(SessionError::NotActive))
        );

        gk.reset();
        assert_eq!(
            gk.use_access(at(0)),
            Err(GatekeeperError::Session(SessionError::NotActive))
        );
    }

    #[test]
    fn test_update_policy_preserves_counters() {
        let mut gk = gatekeeper(10, 2, 5);
        gk.record_failed_authentication(at(0));
        gk.record_failed_authentication(at(0));

        gk.change_block_duration(Duration::from_secs(60)).unwrap();
        assert_eq!(gk.failed_attempt_count(), 2);
        assert_eq!(gk.state(at(30)), GatekeeperState::Blocked { until: at(60) });

        gk.change_max_failed_attempts(5).unwrap();
        assert!(gk.is_access_possible(at(30)));
    }

    #[test]
    fn test_session_duration_change_replaces_session() {
        let mut gk = gatekeeper(10, 3, 5);
        let session_id = gk.record_successful_authentication(at(0)).unwrap();

        gk.change_session_duration(Duration::from_secs(60)).unwrap();
        assert!(!gk.has_access(session_id, at(1)));
        assert_eq!(
            gk.session().map(Session::duration),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_change_rejects_invalid_values() {
        let mut gk = gatekeeper(10, 3, 5);
        assert_eq!(
            gk.change_session_duration(Duration::ZERO),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert_eq!(
            gk.change_max_failed_attempts(0),
            Err(PolicyError::InvalidMaxFailedAttempts)
        );
        assert_eq!(gk.policy().max_failed_attempts(), 3);
    }

    #[test]
    fn test_reset() {
        let mut gk = gatekeeper(10, 1, 5);
        gk.record_failed_authentication(at(0));
        gk.reset();

        assert_eq!(gk.state(at(1)), GatekeeperState::Fresh);
        assert!(gk.session().is_none());
    }

    #[test]
    fn test_serde_roundtrip_keeps_state() {
        let mut gk = gatekeeper(10, 2, 5);
        gk.record_successful_authentication(at(0)).unwrap();
        gk.record_failed_authentication(at(1));

        let json = serde_json::to_string(&gk).unwrap();
        let restored: Gatekeeper = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, gk);
    }
}
