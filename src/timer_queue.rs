use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`]. Cancelling a handle whose
/// callback already fired, or was already cancelled, does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A callback that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<K> {
    pub handle: TimerHandle,
    pub kind: K,
    pub due: Duration,
}

#[derive(Debug, Clone)]
struct Scheduled<K> {
    seq: u64,
    kind: K,
    due: Duration,
}

/// Deferred-callback queue on a logical clock.
///
/// Entries fire in `(due, kind, seq)` order, so two callbacks due at the same
/// instant resolve by the ordering of `K` and then by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled<K>>,
}

impl<K: Ord + Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, kind: K) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            seq,
            kind,
            due: self.now + delay,
        });
        TimerHandle(seq)
    }

    /// Returns true if a pending callback was removed
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.seq != handle.0);
        before != self.pending.len()
    }

    #[cfg(test)]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|s| s.seq == handle.0)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time from now until the earliest pending callback
    pub fn next_due(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|s| s.due)
            .min()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Remove and return the earliest callback due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<K>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.kind, s.seq))
            .map(|(idx, _)| idx)?;

        let entry = self.pending.swap_remove(idx);
        if entry.due > self.now {
            self.now = entry.due;
        }
        Some(Fired {
            handle: TimerHandle(entry.seq),
            kind: entry.kind,
            due: entry.due,
        })
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}

impl<K: Ord + Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Kind {
        First,
        Second,
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(secs(2), Kind::First);
        q.schedule(secs(1), Kind::Second);

        let a = q.pop_due(secs(5)).unwrap();
        let b = q.pop_due(secs(5)).unwrap();
        assert_eq!((a.kind, a.due), (Kind::Second, secs(1)));
        assert_eq!((b.kind, b.due), (Kind::First, secs(2)));
        assert!(q.pop_due(secs(5)).is_none());
        assert_eq!(q.now(), secs(2));
    }

    #[test]
    fn same_instant_resolves_by_kind_then_sequence() {
        let mut q = TimerQueue::new();
        q.schedule(secs(1), Kind::Second);
        q.schedule(secs(1), Kind::First);
        let h = q.schedule(secs(1), Kind::First);

        assert_eq!(q.pop_due(secs(1)).unwrap().kind, Kind::First);
        let second = q.pop_due(secs(1)).unwrap();
        assert_eq!((second.kind, second.handle), (Kind::First, h));
        assert_eq!(q.pop_due(secs(1)).unwrap().kind, Kind::Second);
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut q = TimerQueue::new();
        q.schedule(secs(1), Kind::First);
        assert!(q.pop_due(Duration::from_millis(999)).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let h = q.schedule(secs(1), Kind::First);
        assert!(q.is_pending(h));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(!q.is_pending(h));
        assert!(q.pop_due(secs(10)).is_none());
    }

    #[test]
    fn cancel_after_fire_is_a_no_op() {
        let mut q = TimerQueue::new();
        let h = q.schedule(secs(1), Kind::First);
        let keep = q.schedule(secs(3), Kind::Second);
        q.pop_due(secs(1)).unwrap();
        assert!(!q.cancel(h));
        assert!(q.is_pending(keep));
    }

    #[test]
    fn schedule_is_relative_to_the_clock() {
        let mut q = TimerQueue::new();
        q.advance_to(secs(10));
        q.schedule(secs(1), Kind::First);
        assert_eq!(q.next_due(), Some(secs(1)));
        assert_eq!(q.pop_due(secs(11)).unwrap().due, secs(11));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<Kind> = TimerQueue::new();
        q.advance_to(secs(4));
        q.advance_to(secs(2));
        assert_eq!(q.now(), secs(4));
    }
}
