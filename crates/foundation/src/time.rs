use std::time::Duration;

/// Session clock reading in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn after(self, delay: Duration) -> Self {
        Time(self.0 + delay.as_secs_f64())
    }
}
