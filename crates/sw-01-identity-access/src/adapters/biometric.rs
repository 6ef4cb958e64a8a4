//! Scriptable biometric adapter for tests and headless runs.

use crate::domain::errors::BiometricError;
use crate::ports::outbound::{BiometricAuthenticationService, BiometryKind};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Biometric service whose answers are set by the caller.
pub struct MockBiometricService {
    kind: BiometryKind,
    outcome: RwLock<Result<bool, BiometricError>>,
    activation_failure: RwLock<Option<BiometricError>>,
    activations: AtomicUsize,
    prompts: AtomicUsize,
}

impl MockBiometricService {
    /// A sensor of `kind`; `BiometryKind::None` means unavailable.
    /// Prompts succeed until told otherwise.
    pub fn new(kind: BiometryKind) -> Self {
        Self {
            kind,
            outcome: RwLock::new(Ok(true)),
            activation_failure: RwLock::new(None),
            activations: AtomicUsize::new(0),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(BiometryKind::None)
    }

    /// Result returned by the next prompts.
    pub fn set_outcome(&self, outcome: Result<bool, BiometricError>) {
        *self.outcome.write() = outcome;
    }

    pub fn fail_activation(&self, error: BiometricError) {
        *self.activation_failure.write() = Some(error);
    }

    pub fn activation_count(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl Default for MockBiometricService {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl BiometricAuthenticationService for MockBiometricService {
    fn is_available(&self) -> bool {
        self.kind != BiometryKind::None
    }

    fn biometry_kind(&self) -> BiometryKind {
        self.kind
    }

    fn activate(&self) -> Result<(), BiometricError> {
        if let Some(err) = self.activation_failure.read().clone() {
            return Err(err);
        }
        self.activations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn authenticate(&self) -> Result<bool, BiometricError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.outcome.read().clone()
    }
}
