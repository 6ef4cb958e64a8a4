//! # Identity & Access Flows
//!
//! Registration, lockout and session scenarios run against the services the
//! runtime container wires, on a manual clock.

#[cfg(test)]
mod tests {
    use shared_types::{ManualClock, Timestamp};
    use std::sync::Arc;
    use std::time::Duration;
    use sw_01_identity_access::{
        BiometryKind, GatekeeperState, IdentityApi, IdentityError, MockBiometricService,
        PasswordError,
    };
    use wallet_runtime::{WalletConfig, WalletContainer};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PASSWORD: &str = "MyPassword1";

    struct Wallet {
        container: WalletContainer<ManualClock>,
        clock: Arc<ManualClock>,
    }

    /// Container with a (session, attempts, block) policy in seconds.
    fn wallet_with_policy(session_secs: u64, attempts: u32, block_secs: u64) -> Wallet {
        let mut config = WalletConfig::default();
        config.security.password_hmac_secret = [7u8; 32];
        config.authentication.session_duration_secs = session_secs;
        config.authentication.max_failed_attempts = attempts;
        config.authentication.block_duration_secs = block_secs;

        let clock = Arc::new(ManualClock::new(Timestamp::from_secs(10_000)));
        let biometrics = Arc::new(MockBiometricService::new(BiometryKind::TouchId));
        let container =
            WalletContainer::with_collaborators(&config, Arc::clone(&clock), biometrics).unwrap();
        Wallet { container, clock }
    }

    fn wallet() -> Wallet {
        wallet_with_policy(300, 5, 15)
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_lockout_and_recovery() {
        let w = wallet_with_policy(2, 2, 1);
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();

        assert_eq!(identity.authenticate_user("Wrong1").unwrap(), None);
        assert_eq!(identity.authenticate_user("Wrong2").unwrap(), None);

        // Correct password is refused while blocked.
        assert_eq!(identity.authenticate_user(PASSWORD).unwrap(), None);
        assert!(matches!(
            identity.access_state().unwrap(),
            GatekeeperState::Blocked { .. }
        ));
        assert!(!identity.is_user_authenticated().unwrap());

        w.clock.advance(Duration::from_secs(1));
        assert!(!matches!(
            identity.access_state().unwrap(),
            GatekeeperState::Blocked { .. }
        ));
        assert!(identity.authenticate_user(PASSWORD).unwrap().is_some());
        assert!(identity.is_user_authenticated().unwrap());
    }

    #[test]
    fn test_password_rules_on_registration() {
        let w = wallet();
        let identity = &w.container.identity;

        assert!(matches!(
            identity.register_user(""),
            Err(IdentityError::Password(PasswordError::EmptyPassword))
        ));
        assert!(matches!(
            identity.register_user("123456"),
            Err(IdentityError::Password(PasswordError::PasswordMissingLetter))
        ));
        assert!(matches!(
            identity.register_user("abcabC"),
            Err(IdentityError::Password(PasswordError::PasswordMissingDigit))
        ));
        assert!(identity.register_user(PASSWORD).is_ok());
    }

    #[test]
    fn test_update_password_on_fresh_wallet() {
        let w = wallet();
        assert!(matches!(
            w.container.identity.update_primary_user_password("NewPassword2"),
            Err(IdentityError::PrimaryUserNotFound)
        ));
    }

    #[test]
    fn test_second_registration_rejected() {
        let w = wallet();
        let identity = &w.container.identity;

        identity.register_user(PASSWORD).unwrap();
        assert!(matches!(
            identity.register_user(PASSWORD),
            Err(IdentityError::UserAlreadyRegistered)
        ));
        assert_eq!(w.container.users.len(), 1);
    }

    // =============================================================================
    // SESSIONS
    // =============================================================================

    #[test]
    fn test_session_expires_after_duration() {
        let w = wallet_with_policy(2, 5, 15);
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();
        identity.authenticate_user(PASSWORD).unwrap();

        w.clock.advance(Duration::from_millis(1_999));
        assert!(identity.is_user_authenticated().unwrap());

        w.clock.advance(Duration::from_millis(1));
        assert!(!identity.is_user_authenticated().unwrap());
        assert_eq!(identity.access_state().unwrap(), GatekeeperState::SessionExpired);
    }

    #[test]
    fn test_renewed_session_outlives_original_expiry() {
        let w = wallet_with_policy(2, 5, 15);
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();
        identity.authenticate_user(PASSWORD).unwrap();

        w.clock.advance(Duration::from_millis(1_500));
        identity.renew_session().unwrap();
        w.clock.advance(Duration::from_millis(1_500));
        assert!(identity.is_user_authenticated().unwrap());

        identity.sign_out().unwrap();
        assert!(!identity.is_user_authenticated().unwrap());
    }

    #[test]
    fn test_changed_password_takes_effect() {
        let w = wallet();
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();

        identity.update_primary_user_password("NewPassword2").unwrap();
        assert_eq!(identity.authenticate_user(PASSWORD).unwrap(), None);
        assert!(identity.authenticate_user("NewPassword2").unwrap().is_some());
    }

    #[test]
    fn test_biometric_unlock_activated_at_registration() {
        let w = wallet();
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();

        assert_eq!(w.container.biometrics.activation_count(), 1);
        assert!(identity.authenticate_user_biometrically().unwrap().is_some());
        assert!(identity.is_user_authenticated().unwrap());
    }

    #[test]
    fn test_reset_all_allows_registering_again() {
        let w = wallet();
        let identity = &w.container.identity;
        identity.register_user(PASSWORD).unwrap();

        identity.reset_all().unwrap();
        assert!(w.container.users.is_empty());
        assert!(identity.register_user("Another1").is_ok());
    }
}
