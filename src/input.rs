use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::AppState;
use crate::screen::FrameInput;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
}

impl FrameInput {
    /// Collect the ship intents out of a frame's actions
    pub fn from_actions(actions: &[InputAction]) -> Self {
        let mut input = FrameInput::default();
        for action in actions {
            match action {
                InputAction::MoveLeft => input.move_left = true,
                InputAction::MoveRight => input.move_right = true,
                InputAction::Fire => input.fire = true,
                _ => {}
            }
        }
        input
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Without key release events, held keys are cleared every frame
    release_events: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, app_state: AppState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();
        if !self.release_events {
            self.key_state = KeyState::default();
        }

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, app_state);
            }
        }

        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, app_state: AppState) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, app_state);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, app_state: AppState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match app_state {
            AppState::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
            }
            AppState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                }
                return;
            }
            AppState::GameOver { .. } => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.oneshot_actions.push(InputAction::Restart);
                }
                return;
            }
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, app_state: AppState) -> Vec<InputAction> {
        let mut actions = self.oneshot_actions.clone();

        if app_state == AppState::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_held_keys_repeat_until_released() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Left), AppState::Playing);
        input.handle_key_event(press(KeyCode::Char(' ')), AppState::Playing);
        let actions = input.get_actions(AppState::Playing);
        assert_eq!(actions, vec![InputAction::MoveLeft, InputAction::Fire]);

        input.handle_key_event(release(KeyCode::Left), AppState::Playing);
        assert_eq!(input.get_actions(AppState::Playing), vec![InputAction::Fire]);
    }

    #[test]
    fn test_opposite_direction_replaces() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('a')), AppState::Playing);
        input.handle_key_event(press(KeyCode::Char('d')), AppState::Playing);
        assert_eq!(
            input.get_actions(AppState::Playing),
            vec![InputAction::MoveRight]
        );
    }

    #[test]
    fn test_pause_and_quit() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('p')), AppState::Playing);
        assert_eq!(input.get_actions(AppState::Playing), vec![InputAction::Pause]);

        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('p')), AppState::Paused);
        input.handle_key_event(press(KeyCode::Esc), AppState::Paused);
        assert_eq!(
            input.get_actions(AppState::Paused),
            vec![InputAction::Resume, InputAction::Quit]
        );
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('r')), AppState::Playing);
        assert!(input.get_actions(AppState::Playing).is_empty());

        let over = AppState::GameOver { victory: false };
        input.handle_key_event(press(KeyCode::Char('r')), over);
        assert_eq!(input.get_actions(over), vec![InputAction::Restart]);
    }

    #[test]
    fn test_frame_input_from_actions() {
        let input = FrameInput::from_actions(&[
            InputAction::MoveRight,
            InputAction::Fire,
            InputAction::Pause,
        ]);
        assert_eq!(
            input,
            FrameInput {
                move_left: false,
                move_right: true,
                fire: true
            }
        );
    }
}
