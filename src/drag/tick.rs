use std::time::{Duration, Instant};

/// Handle to one scheduled tick. Handles are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub u64);

/// Something that can run a callback later on the same thread.
pub trait TickScheduler {
    fn schedule(&mut self, delay: Duration) -> TickHandle;
    /// Cancel a pending tick. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Single-threaded timer queue polled by the event loop.
///
/// `now` is supplied by the caller so the queue can be driven by a real
/// clock or stepped deterministically in tests.
#[derive(Debug)]
pub struct TickQueue {
    next_id: u64,
    now: Instant,
    pending: Vec<(TickHandle, Instant)>,
}

impl TickQueue {
    pub fn new(now: Instant) -> Self {
        TickQueue {
            next_id: 1,
            now,
            pending: Vec::new(),
        }
    }

    /// Number of ticks not yet fired or cancelled
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the clock
    pub fn set_now(&mut self, now: Instant) {
        self.now = self.now.max(now);
    }

    /// How long until the earliest pending tick is due
    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, due)| due.saturating_duration_since(self.now))
            .min()
    }

    /// Remove and return the ticks due at the current time, earliest first
    pub fn take_due(&mut self) -> Vec<TickHandle> {
        let now = self.now;
        let mut due: Vec<(TickHandle, Instant)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(handle, at)| (*at, *handle));
        due.into_iter().map(|(handle, _)| handle).collect()
    }
}

impl TickScheduler for TickQueue {
    fn schedule(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, self.now + delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}
