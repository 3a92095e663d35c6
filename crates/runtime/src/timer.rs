use foundation::time::Time;

/// One-shot timer polled against an externally supplied clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Timeout {
    deadline: Time,
    fired: bool,
}

impl Timeout {
    pub fn new(now: Time, delay_s: f64) -> Self {
        Self {
            deadline: now.after(delay_s.max(0.0)),
            fired: false,
        }
    }

    pub fn deadline(&self) -> Time {
        self.deadline
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Time) -> bool {
        if self.fired || now.0 < self.deadline.0 {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Periodic timer polled against an externally supplied clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    period_s: f64,
    next: Time,
}

impl Interval {
    pub fn new(now: Time, period_s: f64) -> Self {
        // A zero period would report unbounded ticks.
        let period_s = if period_s.is_finite() && period_s > 0.0 {
            period_s
        } else {
            1.0
        };
        Self {
            period_s,
            next: now.after(period_s),
        }
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }

    /// Returns the number of whole periods elapsed since the last poll.
    pub fn poll(&mut self, now: Time) -> u32 {
        if now.0 < self.next.0 {
            return 0;
        }
        let elapsed = ((now.0 - self.next.0) / self.period_s).floor() as u32 + 1;
        self.next = self.next.after(elapsed as f64 * self.period_s);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::{Interval, Timeout};
    use foundation::time::Time;

    #[test]
    fn timeout_fires_once() {
        let mut t = Timeout::new(Time(1.0), 1.5);
        assert!(!t.poll(Time(2.0)));
        assert!(t.poll(Time(2.5)));
        assert!(t.has_fired());
        assert!(!t.poll(Time(10.0)));
    }

    #[test]
    fn interval_catches_up() {
        let mut i = Interval::new(Time(0.0), 0.15);
        assert_eq!(i.poll(Time(0.1)), 0);
        assert_eq!(i.poll(Time(0.16)), 1);
        assert_eq!(i.poll(Time(0.61)), 3);
        assert_eq!(i.poll(Time(0.62)), 0);
    }

    #[test]
    fn interval_rejects_non_positive_period() {
        let i = Interval::new(Time(0.0), 0.0);
        assert_eq!(i.period_s(), 1.0);
    }
}
