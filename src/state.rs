/// Progress of a play session, carried from one level to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub bullets_shot: u32,
    pub ships_destroyed: u32,
}

impl GameState {
    pub fn new(level: u32, score: u32, lives: u32, bullets_shot: u32, ships_destroyed: u32) -> Self {
        Self {
            level,
            score,
            lives,
            bullets_shot,
            ships_destroyed,
        }
    }

    /// Fresh session at level 1
    pub fn start(lives: u32) -> Self {
        Self::new(1, 0, lives, 0, 0)
    }

    /// Fraction of player shots that destroyed something
    pub fn accuracy(&self) -> f32 {
        if self.bullets_shot == 0 {
            0.0
        } else {
            self.ships_destroyed as f32 / self.bullets_shot as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        let state = GameState::start(3);
        assert_eq!(state, GameState::new(1, 0, 3, 0, 0));
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(GameState::start(3).accuracy(), 0.0);

        let state = GameState::new(2, 100, 3, 8, 2);
        assert!((state.accuracy() - 0.25).abs() < f32::EPSILON);
    }
}
