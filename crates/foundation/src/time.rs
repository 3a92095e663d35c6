/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn after(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn millis_round_trip() {
        let t = Time::from_millis(1500.0);
        assert_eq!(t, Time(1.5));
        assert_eq!(t.as_millis(), 1500.0);
        assert_eq!(t.after(2.0), Time(3.5));
    }
}
