use foundation::time::Time;

/// Per-frame timing handed to animated subsystems.
///
/// Frames carry the measured delta rather than a fixed step, so replays and
/// live sessions drive the same code.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    /// Accumulated session time at the end of this frame.
    pub time: Time,
}

impl Frame {
    pub fn first(dt_s: f64) -> Self {
        let dt_s = sanitize_dt(dt_s);
        Self {
            index: 0,
            dt_s,
            time: Time(dt_s),
        }
    }

    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = sanitize_dt(dt_s);
        Self {
            index: self.index + 1,
            dt_s,
            time: Time(self.time.0 + dt_s),
        }
    }
}

fn sanitize_dt(dt_s: f64) -> f64 {
    if dt_s.is_finite() {
        dt_s.max(0.0)
    } else {
        0.0
    }
}
