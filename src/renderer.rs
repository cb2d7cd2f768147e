use crate::app::AppState;
use crate::entities::{BulletOwner, EnemyKind, EnemyShip, SpriteState};
use crate::screen::{GameScreen, Outcome, SEPARATION_LINE_HEIGHT};
use crate::state::GameState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub app_state: AppState,
    pub screen: &'a GameScreen,
    /// Session totals once the game is over
    pub session: GameState,
    pub level_count: usize,
    pub area: Rect,
    pub fps: u32,
}

/// Maps playfield pixels onto terminal cells
#[derive(Debug, Clone, Copy)]
struct Viewport {
    area: Rect,
    width: i32,
    height: i32,
}

impl Viewport {
    fn new(area: Rect, width: i32, height: i32) -> Self {
        Self {
            area,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Cell for a playfield point, or None when it falls outside the area
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let column = x as i64 * self.area.width as i64 / self.width as i64;
        let row = y as i64 * self.area.height as i64 / self.height as i64;
        Some((self.area.x + column as u16, self.area.y + row as u16))
    }
}

fn enemy_sprite(enemy: &EnemyShip) -> &'static str {
    if enemy.sprite() == SpriteState::Exploding {
        return "\\*/";
    }
    match (enemy.kind, enemy.alternate_frame) {
        (EnemyKind::A, false) => "<o>",
        (EnemyKind::A, true) => ">o<",
        (EnemyKind::B, false) => "{#}",
        (EnemyKind::B, true) => "}#{",
        (EnemyKind::C, false) => "/M\\",
        (EnemyKind::C, true) => "\\M/",
        (EnemyKind::Special, _) => "<=O=>",
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::A => Color::Cyan,
        EnemyKind::B => Color::Magenta,
        EnemyKind::C => Color::Yellow,
        EnemyKind::Special => Color::Red,
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.app_state {
            AppState::Playing => self.render_game(frame, view),
            AppState::Paused => self.render_paused(frame, view),
            AppState::GameOver { victory } => self.render_game_over(frame, view, victory),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let screen = view.screen;

        // Stats line on top, controls hint at the bottom, playfield between
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);

        let config = screen.config();
        let viewport = Viewport::new(
            inner,
            config.width,
            config.height - SEPARATION_LINE_HEIGHT,
        );
        // The HUD strip above the separation line is not part of the field
        let to_field = |x: i32, y: i32| viewport.cell(x, y - SEPARATION_LINE_HEIGHT);

        let buffer = frame.buffer_mut();

        for enemy in screen.formation().iter().chain(screen.special_ship()) {
            if let Some((column, row)) = to_field(enemy.x(), enemy.y()) {
                let text = enemy_sprite(enemy);
                let width = (inner.x + inner.width).saturating_sub(column) as usize;
                let color = if enemy.is_destroyed() {
                    Color::White
                } else {
                    enemy_color(enemy.kind)
                };
                buffer.set_stringn(
                    column,
                    row,
                    text,
                    width,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        let ship = screen.ship();
        if let Some((column, row)) = to_field(ship.x(), ship.y()) {
            let (text, color) = if ship.is_destroyed() {
                ("x*x", Color::Red)
            } else {
                ("/^\\", Color::Green)
            };
            let width = (inner.x + inner.width).saturating_sub(column) as usize;
            buffer.set_stringn(
                column,
                row,
                text,
                width,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        for (_, bullet) in screen.bullets().iter() {
            let entity = &bullet.entity;
            if let Some((column, row)) = to_field(entity.center_x(), entity.y) {
                let (symbol, color) = match bullet.owner() {
                    BulletOwner::Player => ("|", Color::Yellow),
                    BulletOwner::Enemy => ("!", Color::Magenta),
                };
                buffer.set_string(column, row, symbol, Style::default().fg(color));
            }
        }

        // Stats overlay at the top
        let lives_style = if screen.lives() > 1 {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", screen.score()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", screen.lives()), lives_style),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", screen.level(), view.level_count),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", screen.formation().remaining()),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);

        let banner = if screen.is_starting() {
            Some(Line::from(format!("GET READY - LEVEL {}", screen.level())).yellow())
        } else {
            match screen.outcome() {
                Some(Outcome::Win) => Some(Line::from("LEVEL CLEARED").green()),
                Some(Outcome::Loss) | None => None,
            }
        };
        if let Some(banner) = banner {
            let banner_area = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1.min(inner.height),
            };
            frame.render_widget(Paragraph::new(banner.bold()).centered(), banner_area);
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = 30.min(area.width);
        let height = 6.min(area.height);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView, victory: bool) {
        let session = view.session;
        let title = if victory {
            Line::from("ALL LEVELS CLEARED!").centered().green().bold()
        } else {
            Line::from("GAME OVER!").centered().red().bold()
        };

        let game_over_text = vec![
            Line::from(""),
            title,
            Line::from(""),
            Line::from(format!("Final Score: {}", session.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!(
                "Ships destroyed: {}  Accuracy: {:.1}%",
                session.ships_destroyed,
                session.accuracy() * 100.0
            ))
            .centered()
            .cyan()
            .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scales_pixels_to_cells() {
        let viewport = Viewport::new(Rect::new(1, 2, 112, 48), 448, 480);
        assert_eq!(viewport.cell(0, 0), Some((1, 2)));
        assert_eq!(viewport.cell(224, 240), Some((57, 26)));
        assert_eq!(viewport.cell(447, 479), Some((112, 49)));
    }

    #[test]
    fn test_viewport_clips_outside_points() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 24), 448, 480);
        assert_eq!(viewport.cell(-32, 25), None);
        assert_eq!(viewport.cell(448, 10), None);
        assert_eq!(viewport.cell(10, 480), None);
    }
}
