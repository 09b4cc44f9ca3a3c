use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Start a cycle now.
    Fire,
    /// Nothing due yet.
    Wait(Duration),
    /// A tick came due while a cycle was running and was dropped.
    Coalesced,
}

/// Interval timer for refresh cycles. Ticks never queue behind a running cycle.
pub struct RefreshScheduler {
    interval: Duration,
    last_tick: Option<Instant>,
    force: bool,
    coalesced: u64,
}

impl RefreshScheduler {
    /// The first poll fires immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            force: true,
            coalesced: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn coalesced_ticks(&self) -> u64 {
        self.coalesced
    }

    /// Make the next poll fire regardless of the timer.
    pub fn request_now(&mut self) {
        self.force = true;
    }

    pub fn poll(&mut self, now: Instant, in_flight: bool) -> TickDecision {
        let remaining = match self.last_tick {
            Some(last) if !self.force => self.interval.saturating_sub(now.saturating_duration_since(last)),
            _ => Duration::ZERO,
        };
        if !remaining.is_zero() {
            return TickDecision::Wait(remaining);
        }

        self.last_tick = Some(now);
        if in_flight {
            // a forced request survives until it can actually run
            self.coalesced += 1;
            log::debug!("Refresh tick dropped, cycle still running");
            return TickDecision::Coalesced;
        }

        self.force = false;
        TickDecision::Fire
    }
}
