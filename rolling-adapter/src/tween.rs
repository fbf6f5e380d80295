/// Interpolates the scroll offset between two signed positions over a fixed duration.
///
/// Offsets can grow large after long histories are prepended, so interpolation runs on the
/// distance in `f64` and is added back to `from` as an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: i64,
    pub to: i64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    /// A zero duration is stored as one millisecond.
    pub fn new(from: i64, to: i64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }

    /// Offset at `now_ms`; exactly `to` once the duration has passed.
    pub fn sample(&self, now_ms: u64) -> i64 {
        let elapsed = self.elapsed(now_ms);
        if elapsed >= self.duration_ms {
            return self.to;
        }
        let progress = self.easing.sample(elapsed as f64 / self.duration_ms as f64);
        let distance = self.to.saturating_sub(self.from);
        self.from.saturating_add((distance as f64 * progress) as i64)
    }

    /// Restarts from the current sample towards `new_to`.
    pub fn retarget(&mut self, now_ms: u64, new_to: i64, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }

    /// Moves both ends by `delta`, e.g. after content was prepended above the viewport.
    pub fn shift(&mut self, delta: i64) {
        self.from = self.from.saturating_add(delta);
        self.to = self.to.saturating_add(delta);
    }

    fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in `0.0..=1.0` to eased progress.
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic if t < 0.5 => 4.0 * t * t * t,
            Self::EaseInOutCubic => {
                let u = 2.0 - 2.0 * t;
                1.0 - u * u * u / 2.0
            }
        }
    }
}
