//! Cooperative cancellation for long-running actions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::ActionError;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Shared flag an action polls to stop early.
///
/// Clones observe the same flag, so a signal handler can hold one clone
/// while the action holds another.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use kubepizza_core::{ActionError, CancelToken};
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
///
/// assert!(token.is_cancelled());
/// assert!(matches!(token.sleep(Duration::from_secs(5)), Err(ActionError::Cancelled)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns [`ActionError::Cancelled`] once the flag is set.
    pub fn check(&self) -> Result<(), ActionError> {
        if self.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleeps for `duration`, waking early if cancelled.
    pub fn sleep(&self, duration: Duration) -> Result<(), ActionError> {
        let deadline = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
