//! A fixed-interval rate limiter shared by every outbound call.
//!
//! Every search and every check-in acquires one tick from the same
//! [RateLimiter], so the combined workload never exceeds the configured rate.

use std::fmt;
use std::future::Future;

use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

const HOUR: Duration = Duration::from_secs(60 * 60);

/// A gate which suspends the caller until it is allowed to make another call.
///
/// The worker is generic over this so that a wall-clock limiter can be swapped
/// for something which releases immediately or records how often it was hit.
pub trait Throttle {
    /// Wait until the next call is permitted.
    fn acquire(&mut self) -> impl Future<Output = ()> + Send + '_;
}

/// Builder for a [RateLimiter].
pub struct Builder {
    interval: Option<Duration>,
}

impl Builder {
    /// Set the interval between two consecutive ticks.
    ///
    /// Defaults to one second.
    #[inline(always)]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Construct a new rate limiter.
    ///
    /// The first tick is released one full interval after this is called.
    ///
    /// # Panics
    ///
    /// Panics if the interval is zero or if this is called outside of a Tokio
    /// runtime.
    pub fn build(self) -> RateLimiter {
        const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

        let period = self.interval.unwrap_or(DEFAULT_INTERVAL);
        let mut interval = time::interval_at(Instant::now() + period, period);
        // A slow caller gets at most one missed tick back, then the schedule
        // realigns instead of bursting.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        RateLimiter { period, interval }
    }
}

/// A ticker releasing one call per interval.
///
/// # Example
///
/// ```
/// use tokio::time::{Duration, Instant};
/// use venue_checkin::RateLimiter;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let mut limiter = RateLimiter::builder()
///     .interval(Duration::from_millis(100))
///     .build();
///
/// let start = Instant::now();
///
/// for _ in 0..3 {
///     limiter.acquire_one().await;
/// }
///
/// assert_eq!(Instant::now().duration_since(start), Duration::from_millis(300));
/// # }
/// ```
pub struct RateLimiter {
    period: Duration,
    interval: Interval,
}

impl RateLimiter {
    /// Construct a new builder for a rate limiter.
    pub fn builder() -> Builder {
        Builder { interval: None }
    }

    /// Construct a rate limiter releasing `rate` calls every hour.
    ///
    /// A rate of 475 gives a tick roughly every 7.58 seconds.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is zero.
    pub fn per_hour(rate: u32) -> Self {
        assert!(rate > 0, "rate must be non-zero");
        Self::builder().interval(HOUR / rate).build()
    }

    /// The period between two ticks.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick.
    pub async fn acquire_one(&mut self) {
        self.interval.tick().await;
    }
}

impl Throttle for RateLimiter {
    fn acquire(&mut self) -> impl Future<Output = ()> + Send + '_ {
        self.acquire_one()
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("period", &self.period)
            .finish()
    }
}
