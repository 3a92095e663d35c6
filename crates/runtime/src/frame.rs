use foundation::time::Time;

/// Deterministic UI tick metadata.
///
/// Every handled UI event (pointer, resize, storage notification) advances the
/// frame by one, so event logs can be replayed in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Time at which the event was handled.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    pub fn first() -> Self {
        Self::new(0, Time::ZERO)
    }

    /// Advances to the next tick, never moving time backwards.
    pub fn next(self, now: Time) -> Self {
        let time = if now.0 > self.time.0 { now } else { self.time };
        Self::new(self.index + 1, time)
    }
}
