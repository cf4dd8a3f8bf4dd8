use std::{cmp::Reverse, collections::BinaryHeap, time::Duration};

/// Virtual-clock timer queue.
///
/// Timers fire in due-time order; timers due at the same instant fire in the
/// order they were scheduled. The clock only moves when the owner advances it,
/// so tests can drive a cascade without real time passing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rowfall_engine::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(Duration::from_millis(20), "late");
/// scheduler.schedule(Duration::from_millis(10), "early");
///
/// let deadline = Duration::from_millis(15);
/// assert_eq!(scheduler.pop_due(deadline), Some("early"));
/// assert_eq!(scheduler.pop_due(deadline), None);
/// assert_eq!(scheduler.now(), Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    timers: BinaryHeap<Reverse<Timer<E>>>,
}

#[derive(Debug)]
struct Timer<E> {
    due: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Timer<E> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl<E> Eq for Timer<E> {}

impl<E> PartialOrd for Timer<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Timer<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            timers: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(timer)| timer.due)
    }

    /// Schedules `event` to fire `delay` after the current time. Due times
    /// saturate at [`Duration::MAX`].
    pub fn schedule(&mut self, delay: Duration, event: E) {
        let timer = Timer {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.timers.push(Reverse(timer));
    }

    /// Pops the earliest timer due at or before `deadline`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        if self.next_due()? > deadline {
            return None;
        }
        let Reverse(timer) = self.timers.pop()?;
        self.now = self.now.max(timer.due);
        Some(timer.event)
    }

    /// Moves the clock forward to `time`. Never moves it backward.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}
