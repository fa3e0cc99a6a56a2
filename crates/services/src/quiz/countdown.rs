/// Per-question countdown in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            total: total_secs,
            remaining: total_secs,
        }
    }

    /// Back to the full round time.
    pub fn restart(&mut self) {
        self.remaining = self.total;
    }

    /// Take one second off. Returns true once the countdown has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_expired()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Fraction of the round left, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn proportion(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.remaining as f32 / self.total as f32
    }
}
