//! Client-side request throttling.
//!
//! [`RateLimiter`] enforces the configured requests-per-second ceiling for
//! one client instance. Slots are spaced `1s / max_rps` apart, so no
//! one-second window ever admits more than `max_rps` requests. Requests over
//! the ceiling wait; they are never dropped. Waiters are admitted through a FIFO async mutex, so concurrent
//! callers take turns instead of racing for the next slot.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::Quota;
use tokio::sync::Mutex;

type DirectRateLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Throttles outgoing requests to a fixed rate.
///
/// Cloning is cheap and clones share state, so every call made through one
/// client draws from the same budget.
///
/// # Example
///
/// ```rust
/// use yookassa_api::clients::RateLimiter;
///
/// # tokio_test::block_on(async {
/// let limiter = RateLimiter::new(5);
/// limiter.admit().await;
/// assert_eq!(limiter.max_rps(), 5);
/// # });
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectRateLimiter>,
    turn: Arc<Mutex<()>>,
    max_rps: NonZeroU32,
}

impl RateLimiter {
    /// Creates a limiter admitting `max_rps` requests per second.
    ///
    /// The first request passes at once and each following one waits for the
    /// next `1s / max_rps` slot. With a ceiling of 5 the sixth request is
    /// admitted one second after the first. A value of zero is treated as one.
    #[must_use]
    pub fn new(max_rps: u32) -> Self {
        let max_rps = NonZeroU32::new(max_rps).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(DirectRateLimiter::direct(Self::quota(max_rps))),
            turn: Arc::new(Mutex::new(())),
            max_rps,
        }
    }

    // A burst of one keeps the sustained rate and the per-window count equal.
    fn quota(max_rps: NonZeroU32) -> Quota {
        let period = Duration::from_secs(1) / max_rps.get();
        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(max_rps))
            .allow_burst(NonZeroU32::MIN)
    }

    /// Returns the configured ceiling.
    #[must_use]
    pub const fn max_rps(&self) -> u32 {
        self.max_rps.get()
    }

    /// Waits until a request slot is available, then consumes it.
    pub async fn admit(&self) {
        let _turn = self.turn.lock().await;
        self.limiter.until_ready().await;
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_rps", &self.max_rps)
            .finish_non_exhaustive()
    }
}
