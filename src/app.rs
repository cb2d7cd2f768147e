use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};

use crate::campaign::{Campaign, CampaignStep};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::screen::{FrameInput, GameScreen};
use crate::settings::{ScreenConfig, level_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Playing,
    Paused,
    GameOver { victory: bool },
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    state: AppState,
    config: ScreenConfig,
    campaign: Campaign,
    screen: GameScreen,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: ScreenConfig, release_events: bool) -> Self {
        let campaign = Campaign::new(level_table(), config.clone());
        let screen = campaign.start_level();
        Self {
            running: true,
            state: AppState::Playing,
            config,
            campaign,
            screen,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn screen(&self) -> &GameScreen {
        &self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the application's main loop at the configured frame rate.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let frame_budget = Duration::from_secs(1) / self.config.fps;

        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    app_state: self.state,
                    screen: &self.screen,
                    session: self.campaign.state(),
                    level_count: self.campaign.level_count(),
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.state)?;
            let actions = self.input_manager.get_actions(self.state);
            self.process_actions(&actions);

            if self.state == AppState::Playing {
                self.tick(&FrameInput::from_actions(&actions));
            }

            let elapsed = now.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
        Ok(())
    }

    /// Process input actions and update app state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    self.state = AppState::Paused;
                }
                InputAction::Resume => {
                    self.state = AppState::Playing;
                }
                InputAction::Restart => {
                    log::info!("Restarting game");
                    self.campaign = Campaign::new(level_table(), self.config.clone());
                    self.screen = self.campaign.start_level();
                    self.state = AppState::Playing;
                }
                // Ship intents go to the screen through FrameInput
                InputAction::MoveLeft | InputAction::MoveRight | InputAction::Fire => {}
            }
        }
    }

    /// Advance the current level by one frame and switch levels when it closes
    pub fn tick(&mut self, input: &FrameInput) {
        self.screen.update(input);
        if self.screen.is_running() {
            return;
        }

        match self.campaign.finish_level(&self.screen) {
            CampaignStep::NextLevel => {
                self.screen = self.campaign.start_level();
            }
            CampaignStep::GameOver { victory } => {
                let session = self.campaign.state();
                log::info!(
                    "Final score {}, accuracy {:.1}%",
                    session.score,
                    session.accuracy() * 100.0
                );
                self.state = AppState::GameOver { victory };
            }
        }
    }
}
