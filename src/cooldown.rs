use rand::Rng;

/// Convert a duration in milliseconds into a frame count at `fps`.
///
/// Rounds up so a nonzero duration always lasts at least one frame.
pub fn frames_from_millis(ms: u32, fps: u32) -> u32 {
    (ms as u64 * fps as u64).div_ceil(1000) as u32
}

/// Frame-counted timer.
///
/// A fresh cooldown is already finished; `reset` starts a new countdown and
/// `tick` advances it by one frame. Variable cooldowns pick a new duration in
/// `base ± variance` on every reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cooldown {
    base: u32,
    variance: u32,
    remaining: u32,
}

impl Cooldown {
    pub fn new(frames: u32) -> Self {
        Self {
            base: frames,
            variance: 0,
            remaining: 0,
        }
    }

    pub fn variable(frames: u32, variance: u32) -> Self {
        Self {
            base: frames,
            variance: variance.min(frames),
            remaining: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Restart a fixed cooldown
    pub fn reset(&mut self) {
        self.remaining = self.base;
    }

    /// Restart, rolling a fresh duration for variable cooldowns
    pub fn reset_with<R: Rng>(&mut self, rng: &mut R) {
        self.remaining = if self.variance == 0 {
            self.base
        } else {
            rng.random_range(self.base - self.variance..=self.base + self.variance)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_frames_from_millis() {
        assert_eq!(frames_from_millis(1000, 60), 60);
        assert_eq!(frames_from_millis(750, 60), 45);
        assert_eq!(frames_from_millis(10, 60), 1);
        assert_eq!(frames_from_millis(0, 60), 0);
    }

    #[test]
    fn test_new_cooldown_is_finished() {
        let cooldown = Cooldown::new(10);
        assert!(cooldown.is_finished());
    }

    #[test]
    fn test_reset_and_tick() {
        let mut cooldown = Cooldown::new(3);
        cooldown.reset();
        assert!(!cooldown.is_finished());
        cooldown.tick();
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 1);
        cooldown.tick();
        assert!(cooldown.is_finished());

        // Ticking a finished cooldown stays finished
        cooldown.tick();
        assert!(cooldown.is_finished());
    }

    #[test]
    fn test_zero_length_cooldown_never_blocks() {
        let mut cooldown = Cooldown::new(0);
        cooldown.reset();
        assert!(cooldown.is_finished());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_variable_reset_stays_in_range(
                base in 1u32..500,
                variance in 0u32..200,
                seed in any::<u64>()
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut cooldown = Cooldown::variable(base, variance);
                cooldown.reset_with(&mut rng);
                let variance = variance.min(base);
                prop_assert!(cooldown.remaining() >= base - variance);
                prop_assert!(cooldown.remaining() <= base + variance);
            }
        }
    }
}
