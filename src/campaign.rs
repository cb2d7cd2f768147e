use crate::screen::GameScreen;
use crate::settings::{GameSettings, ScreenConfig};
use crate::state::GameState;

/// Every this many levels the player may get a bonus life
pub const EXTRA_LIFE_FREQUENCY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStep {
    NextLevel,
    GameOver { victory: bool },
}

/// Runs levels back to back, carrying the [`GameState`] between them
#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<GameSettings>,
    config: ScreenConfig,
    state: GameState,
}

impl Campaign {
    /// Panics if `levels` is empty.
    pub fn new(levels: Vec<GameSettings>, config: ScreenConfig) -> Self {
        assert!(!levels.is_empty(), "campaign needs at least one level");
        let state = GameState::start(config.max_lives);
        Self {
            levels,
            config,
            state,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// A bonus life is granted on every third level while below max lives
    pub fn bonus_life(&self) -> bool {
        self.state.level % EXTRA_LIFE_FREQUENCY == 0 && self.state.lives < self.config.max_lives
    }

    /// Build the screen for the current level
    pub fn start_level(&self) -> GameScreen {
        let index = (self.state.level as usize)
            .saturating_sub(1)
            .min(self.levels.len() - 1);
        let mut config = self.config.clone();
        // Distinct but reproducible randomness per level
        config.seed = config.seed.map(|seed| seed.wrapping_add(self.state.level as u64));
        GameScreen::new(self.state, self.levels[index], self.bonus_life(), config)
    }

    /// Take the results of a finished screen and move to the next level
    pub fn finish_level(&mut self, screen: &GameScreen) -> CampaignStep {
        let played = screen.game_state();
        self.state = GameState {
            level: played.level + 1,
            ..played
        };

        if self.state.lives == 0 {
            log::info!("Game over at level {}, score {}", played.level, played.score);
            CampaignStep::GameOver { victory: false }
        } else if self.state.level as usize > self.levels.len() {
            log::info!("All {} levels cleared, score {}", self.levels.len(), played.score);
            CampaignStep::GameOver { victory: true }
        } else {
            CampaignStep::NextLevel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::FrameInput;

    fn campaign(levels: usize) -> Campaign {
        let config = ScreenConfig {
            start_delay_ms: 0,
            ..ScreenConfig::default().with_seed(11)
        };
        Campaign::new(vec![GameSettings::new(1, 1, 60, 60_000); levels], config)
    }

    /// Clear the single-ship level by shooting the enemy point blank
    fn win(screen: &mut GameScreen) {
        let enemy = screen.formation().get(0).unwrap().entity.clone();
        screen.bullets_mut().spawn(enemy.x, enemy.y, -1);
        screen.update(&FrameInput::default());
        assert!(screen.is_level_finished());
    }

    #[test]
    fn test_campaign_starts_at_level_one() {
        let campaign = campaign(3);
        assert_eq!(campaign.state(), GameState::start(3));
        assert!(!campaign.bonus_life());
        assert_eq!(campaign.start_level().lives(), 3);
    }

    #[test]
    fn test_winning_advances_level_and_keeps_score() {
        let mut campaign = campaign(3);
        let mut screen = campaign.start_level();
        win(&mut screen);

        assert_eq!(campaign.finish_level(&screen), CampaignStep::NextLevel);
        assert_eq!(campaign.state().level, 2);
        assert_eq!(campaign.state().score, 30);
        assert_eq!(campaign.state().ships_destroyed, 1);
    }

    #[test]
    fn test_last_level_is_victory() {
        let mut campaign = campaign(1);
        let mut screen = campaign.start_level();
        win(&mut screen);
        assert_eq!(
            campaign.finish_level(&screen),
            CampaignStep::GameOver { victory: true }
        );
    }

    #[test]
    fn test_no_lives_is_defeat() {
        let mut campaign = campaign(3);
        let mut screen = campaign.start_level();
        for _ in 0..3 {
            let (x, y) = (screen.ship().x(), screen.ship().y());
            screen.bullets_mut().spawn(x, y, 1);
            screen.manage_collisions();
            // Wait out the destruction timer before the next hit
            for _ in 0..60 {
                screen.ship_mut().update();
            }
        }
        screen.update(&FrameInput::default());
        assert_eq!(screen.lives(), 0);

        assert_eq!(
            campaign.finish_level(&screen),
            CampaignStep::GameOver { victory: false }
        );
    }

    #[test]
    fn test_bonus_life_on_third_level_when_hurt() {
        let mut campaign = campaign(5);
        campaign.state = GameState::new(3, 500, 2, 20, 15);
        assert!(campaign.bonus_life());
        assert_eq!(campaign.start_level().lives(), 3);

        // Full health gets nothing extra
        campaign.state = GameState::new(3, 500, 3, 20, 15);
        assert!(!campaign.bonus_life());
        assert_eq!(campaign.start_level().lives(), 3);

        campaign.state = GameState::new(4, 500, 2, 20, 15);
        assert!(!campaign.bonus_life());
    }
}
