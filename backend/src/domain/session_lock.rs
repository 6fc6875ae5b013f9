//! Session lock domain logic for the shop books tracker.
//!
//! A 6-digit PIN gates the UI independently of account login. The machine
//! has two states, `Unlocked` and `Locked`, with the locked state split into
//! a `Verify` sub-mode (a PIN exists and must be entered) and a `Set`
//! sub-mode (no PIN exists yet, or it was reset, and a new one must be
//! entered twice). An idle timeout re-locks the screen: user activity resets
//! the activity timestamp, and a periodic poll locks once the idle threshold
//! is crossed.
//!
//! The stored PIN is a plaintext per-user value on device, matching the
//! product's low-friction local gate. The verified-PIN marker lives only in
//! process memory, the session analogue of the original design.

use anyhow::{anyhow, Result};
use log::{info, warn};
use shared::{LockStatusResponse, PinMode, SubmitPinResponse};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::storage::file::{FileConnection, PinRepository};
use crate::storage::traits::PinStorage;

/// Inactivity threshold after which the session re-locks
pub const IDLE_TIMEOUT_MILLIS: u64 = 5 * 60 * 1000;

/// Period of the idle-check poll
pub const IDLE_POLL_SECONDS: u64 = 10;

/// How long the client shows a PIN failure before clearing the input
pub const ERROR_DISPLAY_MILLIS: u64 = 2000;

const PIN_LENGTH: usize = 6;

/// Current state of the lock machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked(PinMode),
}

#[derive(Debug)]
struct LockInner {
    state: LockState,
    last_activity_millis: u64,
    /// The session's verified-PIN marker; cleared on idle lock
    pin_verified: bool,
    /// First entry of the set flow, awaiting confirmation
    pending_set: Option<String>,
    /// True while a change-PIN flow is in progress
    changing_pin: bool,
}

/// Service owning the transient lock state for one user session
#[derive(Clone)]
pub struct SessionLockService {
    pin_repository: PinRepository,
    username: String,
    inner: Arc<Mutex<LockInner>>,
}

impl SessionLockService {
    /// Create the lock machine for a fresh session. A fresh session has no
    /// verified-PIN marker, so the initial state is `Locked`: `Verify` when
    /// a PIN was previously registered for this user, `Set` otherwise.
    pub async fn new(connection: Arc<FileConnection>, username: &str, now_millis: u64) -> Result<Self> {
        let pin_repository = PinRepository::new((*connection).clone());
        let state = match pin_repository.get_pin(username).await? {
            Some(_) => LockState::Locked(PinMode::Verify),
            None => LockState::Locked(PinMode::Set),
        };
        info!("Session lock initialized for '{}' in state {:?}", username, state);

        Ok(Self {
            pin_repository,
            username: username.to_string(),
            inner: Arc::new(Mutex::new(LockInner {
                state,
                last_activity_millis: now_millis,
                pin_verified: false,
                pending_set: None,
                changing_pin: false,
            })),
        })
    }

    /// Current epoch time in milliseconds
    pub fn epoch_millis() -> Result<u64> {
        Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64)
    }

    /// Current lock status for the presentation layer
    pub fn status(&self) -> LockStatusResponse {
        let inner = self.inner.lock().unwrap();
        match inner.state {
            LockState::Unlocked => LockStatusResponse { locked: false, mode: None },
            LockState::Locked(mode) => LockStatusResponse { locked: true, mode: Some(mode) },
        }
    }

    /// Record user activity (pointer move, key press, click, touch).
    /// Only meaningful while unlocked; activity never unlocks the screen.
    pub fn record_activity(&self, now_millis: u64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == LockState::Unlocked {
            inner.last_activity_millis = now_millis;
        }
    }

    /// Idle check, driven by a periodic poll. Locks into `Verify` and clears
    /// the verified-PIN marker once the idle threshold is crossed; returns
    /// true only on the poll that performs the transition.
    pub fn poll_idle(&self, now_millis: u64) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == LockState::Unlocked
            && now_millis.saturating_sub(inner.last_activity_millis) >= IDLE_TIMEOUT_MILLIS
        {
            info!("Idle timeout reached, locking session for '{}'", self.username);
            inner.state = LockState::Locked(PinMode::Verify);
            inner.pin_verified = false;
            return true;
        }
        false
    }

    /// Submit a 6-digit PIN in the current locked sub-mode.
    ///
    /// In `Verify`, a match unlocks (or moves to `Set` during a change-PIN
    /// flow); a mismatch stays in `Verify` with a transient error. In `Set`,
    /// the first submission is held as the pending entry and the second must
    /// confirm it before the PIN is persisted and the screen unlocks.
    pub async fn submit_pin(&self, pin: &str, now_millis: u64) -> Result<SubmitPinResponse> {
        if pin.len() != PIN_LENGTH || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Ok(self.failure_response("PIN must be exactly 6 digits"));
        }

        let state = self.inner.lock().unwrap().state;
        match state {
            LockState::Unlocked => Ok(SubmitPinResponse {
                success: false,
                locked: false,
                mode: None,
                message: "Screen is not locked".to_string(),
                error_display_millis: None,
            }),
            LockState::Locked(PinMode::Verify) => self.verify_pin(pin, now_millis).await,
            LockState::Locked(PinMode::Set) => self.set_pin(pin, now_millis).await,
        }
    }

    async fn verify_pin(&self, pin: &str, now_millis: u64) -> Result<SubmitPinResponse> {
        let stored = self.pin_repository.get_pin(&self.username).await?;

        let Some(stored) = stored else {
            // The stored PIN is gone (cleared device storage); re-provision
            warn!("No stored PIN for '{}' while verifying, entering set mode", self.username);
            let mut inner = self.inner.lock().unwrap();
            inner.state = LockState::Locked(PinMode::Set);
            inner.pending_set = None;
            return Ok(SubmitPinResponse {
                success: false,
                locked: true,
                mode: Some(PinMode::Set),
                message: "No PIN is set. Create a new 6-digit PIN.".to_string(),
                error_display_millis: None,
            });
        };

        if stored != pin {
            info!("PIN verification failed for '{}'", self.username);
            return Ok(self.failure_response("Incorrect PIN"));
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.changing_pin {
            inner.state = LockState::Locked(PinMode::Set);
            inner.pending_set = None;
            info!("PIN verified for '{}', awaiting new PIN", self.username);
            Ok(SubmitPinResponse {
                success: true,
                locked: true,
                mode: Some(PinMode::Set),
                message: "PIN correct. Set your new PIN.".to_string(),
                error_display_millis: None,
            })
        } else {
            inner.state = LockState::Unlocked;
            inner.pin_verified = true;
            inner.last_activity_millis = now_millis;
            info!("PIN verified for '{}', session unlocked", self.username);
            Ok(SubmitPinResponse {
                success: true,
                locked: false,
                mode: None,
                message: "Welcome back".to_string(),
                error_display_millis: None,
            })
        }
    }

    async fn set_pin(&self, pin: &str, now_millis: u64) -> Result<SubmitPinResponse> {
        let pending = self.inner.lock().unwrap().pending_set.clone();

        match pending {
            None => {
                self.inner.lock().unwrap().pending_set = Some(pin.to_string());
                Ok(SubmitPinResponse {
                    success: true,
                    locked: true,
                    mode: Some(PinMode::Set),
                    message: "Confirm your new PIN".to_string(),
                    error_display_millis: None,
                })
            }
            Some(first) if first == pin => {
                self.pin_repository.set_pin(&self.username, pin).await?;
                let mut inner = self.inner.lock().unwrap();
                inner.state = LockState::Unlocked;
                inner.pin_verified = true;
                inner.pending_set = None;
                inner.changing_pin = false;
                inner.last_activity_millis = now_millis;
                info!("New PIN stored for '{}', session unlocked", self.username);
                Ok(SubmitPinResponse {
                    success: true,
                    locked: false,
                    mode: None,
                    message: "PIN set".to_string(),
                    error_display_millis: None,
                })
            }
            Some(_) => {
                self.inner.lock().unwrap().pending_set = None;
                info!("PIN confirmation mismatch for '{}'", self.username);
                Ok(SubmitPinResponse {
                    success: false,
                    locked: true,
                    mode: Some(PinMode::Set),
                    message: "PINs do not match. Start over.".to_string(),
                    error_display_millis: Some(ERROR_DISPLAY_MILLIS),
                })
            }
        }
    }

    /// Destructive PIN reset from the verify screen. Requires explicit
    /// confirmation; clears the stored PIN and the verified-PIN marker and
    /// re-enters the set sub-mode.
    pub async fn reset_pin(&self, confirm: bool) -> Result<LockStatusResponse> {
        if !confirm {
            return Err(anyhow!("PIN reset requires explicit confirmation"));
        }
        {
            let inner = self.inner.lock().unwrap();
            if inner.state != LockState::Locked(PinMode::Verify) {
                return Err(anyhow!("PIN reset is only available from the verify screen"));
            }
        }

        self.pin_repository.clear_pin(&self.username).await?;
        let mut inner = self.inner.lock().unwrap();
        inner.state = LockState::Locked(PinMode::Set);
        inner.pin_verified = false;
        inner.pending_set = None;
        inner.changing_pin = false;
        warn!("PIN reset for '{}', re-provisioning required", self.username);

        Ok(LockStatusResponse { locked: true, mode: Some(PinMode::Set) })
    }

    /// Begin a change-PIN flow. Only available while unlocked; the current
    /// PIN must be verified before a new one can be set, so the screen locks
    /// into `Verify` (or straight into `Set` when no PIN survives on disk).
    pub async fn begin_change_pin(&self) -> Result<LockStatusResponse> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.state != LockState::Unlocked {
                return Err(anyhow!("Change PIN is only available while unlocked"));
            }
        }

        let mode = match self.pin_repository.get_pin(&self.username).await? {
            Some(_) => PinMode::Verify,
            None => PinMode::Set,
        };

        let mut inner = self.inner.lock().unwrap();
        inner.state = LockState::Locked(mode);
        inner.pin_verified = false;
        inner.pending_set = None;
        inner.changing_pin = true;
        info!("Change-PIN flow started for '{}'", self.username);

        Ok(LockStatusResponse { locked: true, mode: Some(mode) })
    }

    fn failure_response(&self, message: &str) -> SubmitPinResponse {
        let inner = self.inner.lock().unwrap();
        let mode = match inner.state {
            LockState::Locked(mode) => Some(mode),
            LockState::Unlocked => None,
        };
        SubmitPinResponse {
            success: false,
            locked: inner.state != LockState::Unlocked,
            mode,
            message: message.to_string(),
            error_display_millis: Some(ERROR_DISPLAY_MILLIS),
        }
    }

    #[cfg(test)]
    fn state(&self) -> LockState {
        self.inner.lock().unwrap().state
    }

    #[cfg(test)]
    fn verified_marker(&self) -> bool {
        self.inner.lock().unwrap().pin_verified
    }
}
