//! Authentication policy value object.

use crate::domain::errors::PolicyError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session length used when nothing else is configured.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::from_secs(300);
/// Failed attempts allowed before access is blocked.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;
/// How long access stays blocked once the threshold is reached.
pub const DEFAULT_BLOCK_DURATION: Duration = Duration::from_secs(15);
/// Shortest session a policy accepts. Timestamps have millisecond
/// resolution, so anything shorter would expire the moment it starts.
pub const MIN_SESSION_DURATION: Duration = Duration::from_millis(1);

/// Immutable thresholds governing sessions and lockout.
///
/// Every constructor validates, so an `AuthenticationPolicy` in hand is
/// always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationPolicy {
    session_duration: Duration,
    max_failed_attempts: u32,
    block_duration: Duration,
}

impl AuthenticationPolicy {
    /// Create a policy. `session_duration` must be at least
    /// [`MIN_SESSION_DURATION`] and `max_failed_attempts` positive; a zero
    /// block duration is allowed.
    pub fn new(
        session_duration: Duration,
        max_failed_attempts: u32,
        block_duration: Duration,
    ) -> Result<Self, PolicyError> {
        if session_duration < MIN_SESSION_DURATION {
            return Err(PolicyError::InvalidSessionDuration);
        }
        if max_failed_attempts == 0 {
            return Err(PolicyError::InvalidMaxFailedAttempts);
        }
        Ok(Self {
            session_duration,
            max_failed_attempts,
            block_duration,
        })
    }

    /// Create from fractional seconds, as settings screens and config files
    /// express them. NaN, infinite and negative values are rejected.
    pub fn from_secs_f64(
        session_secs: f64,
        max_failed_attempts: u32,
        block_secs: f64,
    ) -> Result<Self, PolicyError> {
        if !session_secs.is_finite() || session_secs <= 0.0 {
            return Err(PolicyError::InvalidSessionDuration);
        }
        let session_duration = Duration::try_from_secs_f64(session_secs)
            .map_err(|_| PolicyError::InvalidSessionDuration)?;
        let block_duration =
            Duration::try_from_secs_f64(block_secs).map_err(|_| PolicyError::InvalidBlockDuration)?;
        Self::new(session_duration, max_failed_attempts, block_duration)
    }

    pub fn session_duration(&self) -> Duration {
        self.session_duration
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }

    pub fn block_duration(&self) -> Duration {
        self.block_duration
    }

    /// Copy with a different session duration.
    pub fn with_session_duration(&self, session_duration: Duration) -> Result<Self, PolicyError> {
        Self::new(session_duration, self.max_failed_attempts, self.block_duration)
    }

    /// Copy with a different failed-attempt threshold.
    pub fn with_max_failed_attempts(&self, max_failed_attempts: u32) -> Result<Self, PolicyError> {
        Self::new(self.session_duration, max_failed_attempts, self.block_duration)
    }

    /// Copy with a different block duration.
    pub fn with_block_duration(&self, block_duration: Duration) -> Result<Self, PolicyError> {
        Self::new(self.session_duration, self.max_failed_attempts, block_duration)
    }
}

impl Default for AuthenticationPolicy {
    fn default() -> Self {
        Self {
            session_duration: DEFAULT_SESSION_DURATION,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            block_duration: DEFAULT_BLOCK_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_policy() {
        let policy =
            AuthenticationPolicy::new(Duration::from_secs(2), 2, Duration::from_secs(1)).unwrap();
        assert_eq!(policy.session_duration(), Duration::from_secs(2));
        assert_eq!(policy.max_failed_attempts(), 2);
        assert_eq!(policy.block_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_sub_millisecond_session_rejected() {
        assert_eq!(
            AuthenticationPolicy::new(Duration::from_micros(500), 3, Duration::from_secs(1)),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert_eq!(
            AuthenticationPolicy::from_secs_f64(0.0009, 3, 1.0),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert!(AuthenticationPolicy::new(MIN_SESSION_DURATION, 3, Duration::ZERO).is_ok());
    }

    #[test]
    fn test_zero_session_duration_rejected() {
        assert_eq!(
            AuthenticationPolicy::new(Duration::ZERO, 3, Duration::from_secs(1)),
            Err(PolicyError::InvalidSessionDuration)
        );
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert_eq!(
            AuthenticationPolicy::new(Duration::from_secs(1), 0, Duration::from_secs(1)),
            Err(PolicyError::InvalidMaxFailedAttempts)
        );
    }

    #[test]
    fn test_zero_block_duration_allowed() {
        assert!(AuthenticationPolicy::new(Duration::from_secs(1), 1, Duration::ZERO).is_ok());
    }

    #[test]
    fn test_from_secs_f64_rejects_non_finite() {
        assert_eq!(
            AuthenticationPolicy::from_secs_f64(f64::NAN, 3, 1.0),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert_eq!(
            AuthenticationPolicy::from_secs_f64(-1.0, 3, 1.0),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert_eq!(
            AuthenticationPolicy::from_secs_f64(1.0, 3, f64::INFINITY),
            Err(PolicyError::InvalidBlockDuration)
        );
        assert_eq!(
            AuthenticationPolicy::from_secs_f64(1.0, 3, -0.5),
            Err(PolicyError::InvalidBlockDuration)
        );
    }

    #[test]
    fn test_from_secs_f64_fractional() {
        let policy = AuthenticationPolicy::from_secs_f64(1.5, 3, 0.25).unwrap();
        assert_eq!(policy.session_duration(), Duration::from_millis(1500));
        assert_eq!(policy.block_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_with_builders_validate() {
        let policy = AuthenticationPolicy::default();
        assert_eq!(
            policy.with_session_duration(Duration::ZERO),
            Err(PolicyError::InvalidSessionDuration)
        );
        assert_eq!(
            policy.with_max_failed_attempts(0),
            Err(PolicyError::InvalidMaxFailedAttempts)
        );

        let changed = policy.with_block_duration(Duration::from_secs(60)).unwrap();
        assert_eq!(changed.block_duration(), Duration::from_secs(60));
        assert_eq!(changed.session_duration(), policy.session_duration());
    }

    #[test]
    fn test_default_values() {
        let policy = AuthenticationPolicy::default();
        assert_eq!(policy.session_duration(), Duration::from_secs(300));
        assert_eq!(policy.max_failed_attempts(), 5);
        assert_eq!(policy.block_duration(), Duration::from_secs(15));
    }
}
