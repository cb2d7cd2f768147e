//! One level of play.
//!
//! [`GameScreen`] owns every entity of a level and advances them one frame
//! per [`GameScreen::update`] call. The caller drives it from a fixed-rate
//! clock and reads the resulting [`GameState`] back once the level is over.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cooldown::Cooldown;
use crate::entities::{BulletId, BulletOwner, BulletPool, EnemyShip, EnemyShipFormation, Ship};
use crate::settings::{GameSettings, ScreenConfig};
use crate::state::GameState;

/// Bullets above this line (the HUD) are gone
pub const SEPARATION_LINE_HEIGHT: i32 = 40;
/// Distance between the player ship and the bottom of the playfield
const SHIP_BOTTOM_OFFSET: i32 = 30;
const SPECIAL_SHIP_SPEED: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every enemy destroyed
    Win,
    /// Out of lives
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Running,
    Finished(Outcome),
}

/// Player intents for one frame, already debounced by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

pub struct GameScreen {
    config: ScreenConfig,
    settings: GameSettings,
    level: u32,
    score: u32,
    lives: u32,
    bullets_shot: u32,
    ships_destroyed: u32,
    ship: Ship,
    formation: EnemyShipFormation,
    bullets: BulletPool,
    special_ship: Option<EnemyShip>,
    special_cooldown: Cooldown,
    start_delay: Cooldown,
    finish_delay: Cooldown,
    status: LevelStatus,
    frame: u64,
    rng: StdRng,
}

impl GameScreen {
    /// Set up a level from the session so far.
    ///
    /// With `bonus_life` the player starts with one extra life.
    /// Panics on a zero frame rate or an empty formation.
    pub fn new(
        state: GameState,
        settings: GameSettings,
        bonus_life: bool,
        config: ScreenConfig,
    ) -> Self {
        assert!(config.fps > 0, "frame rate must be positive");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let lives = state.lives + u32::from(bonus_life);
        let ship = Ship::new(
            config.width / 2,
            config.height - SHIP_BOTTOM_OFFSET,
            &config,
        );
        let formation = EnemyShipFormation::new(&settings, state.level, &config);

        let mut special_cooldown = Cooldown::variable(
            config.frames(config.special_ship_interval_ms),
            config.frames(config.special_ship_variance_ms),
        );
        special_cooldown.reset_with(&mut rng);
        let mut start_delay = Cooldown::new(config.frames(config.start_delay_ms));
        start_delay.reset();
        let finish_delay = Cooldown::new(config.frames(config.finish_delay_ms));

        log::info!(
            "Level {} starting: {}x{} formation, {} lives",
            state.level,
            settings.formation_width,
            settings.formation_height,
            lives
        );

        Self {
            config,
            settings,
            level: state.level,
            score: state.score,
            lives,
            bullets_shot: state.bullets_shot,
            ships_destroyed: state.ships_destroyed,
            ship,
            formation,
            bullets: BulletPool::new(),
            special_ship: None,
            special_cooldown,
            start_delay,
            finish_delay,
            status: LevelStatus::Running,
            frame: 0,
            rng,
        }
    }

    /// Advance the level by one frame.
    pub fn update(&mut self, input: &FrameInput) {
        self.frame += 1;

        if self.status != LevelStatus::Running {
            // Everything holds still until the screen closes, a wrecked ship included
            self.finish_delay.tick();
            return;
        }

        for bullet in self.bullets.iter_mut() {
            bullet.update();
        }

        self.start_delay.tick();
        let started = self.start_delay.is_finished();
        if started {
            self.update_enemies();
            self.update_ship(input);
        }
        self.ship.update();

        self.manage_collisions();
        self.clean_bullets();
        self.check_level_finished();
    }

    fn update_enemies(&mut self) {
        self.formation.update();
        self.formation.shoot(&mut self.bullets, &mut self.rng);
        self.update_special_ship();
    }

    fn update_special_ship(&mut self) {
        self.special_cooldown.tick();

        if let Some(special) = self.special_ship.as_mut() {
            if special.is_destroyed() {
                special.update();
            } else {
                special.entity.move_by(SPECIAL_SHIP_SPEED, 0);
            }
        }

        let width = self.config.width;
        let exploded = self
            .special_ship
            .as_ref()
            .is_some_and(|special| special.is_explosion_over());
        let escaped = self
            .special_ship
            .as_ref()
            .is_some_and(|special| !special.is_destroyed() && special.x() > width);

        if exploded {
            self.special_ship = None;
        } else if escaped {
            log::info!("The special ship has escaped");
            self.special_ship = None;
        } else if self.special_ship.is_none() && self.special_cooldown.is_finished() {
            log::info!("A special ship appears");
            self.special_ship = Some(EnemyShip::special(&self.config));
            self.special_cooldown.reset_with(&mut self.rng);
        }
    }

    fn update_ship(&mut self, input: &FrameInput) {
        if self.ship.is_destroyed() {
            return;
        }
        if input.move_right {
            self.ship.move_right(self.config.width - 1);
        }
        if input.move_left {
            self.ship.move_left(1);
        }
        if input.fire && self.ship.shoot(&mut self.bullets) {
            self.bullets_shot += 1;
        }
    }

    /// Resolve bullet hits against the player ship and the enemies.
    ///
    /// Enemy bullets only test the player ship, player bullets only test
    /// live enemies (formation order first, then the special ship). Each
    /// bullet scores at most one hit and is consumed by it.
    pub fn manage_collisions(&mut self) {
        let level_finished = self.is_level_finished();
        let mut consumed: Vec<BulletId> = Vec::new();

        for (id, bullet) in self.bullets.iter() {
            match bullet.owner() {
                BulletOwner::Enemy => {
                    if level_finished || !bullet.entity.overlaps(&self.ship.entity) {
                        continue;
                    }
                    consumed.push(id);
                    if !self.ship.is_destroyed() {
                        self.ship.destroy();
                        self.lives = self.lives.saturating_sub(1);
                        log::debug!("Player ship hit, {} lives left", self.lives);
                    }
                }
                BulletOwner::Player => {
                    if let Some(index) = self.formation.find_hit(&bullet.entity) {
                        if let Some(points) = self.formation.destroy(index) {
                            self.score += points;
                            self.ships_destroyed += 1;
                        }
                        consumed.push(id);
                        continue;
                    }

                    if let Some(special) = self.special_ship.as_mut()
                        && !special.is_destroyed()
                        && special.entity.overlaps(&bullet.entity)
                    {
                        special.destroy();
                        self.score += special.points();
                        self.ships_destroyed += 1;
                        log::info!("Special ship destroyed");
                        consumed.push(id);
                    }
                }
            }
        }

        for id in consumed {
            self.bullets.recycle(id);
        }
    }

    /// Return bullets that left the playfield to the pool
    fn clean_bullets(&mut self) {
        let gone: Vec<BulletId> = self
            .bullets
            .iter()
            .filter(|(_, bullet)| bullet.is_out_of_bounds(SEPARATION_LINE_HEIGHT, self.config.height))
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            self.bullets.recycle(id);
        }
    }

    fn check_level_finished(&mut self) {
        let outcome = if self.lives == 0 {
            Outcome::Loss
        } else if self.formation.is_empty() {
            Outcome::Win
        } else {
            return;
        };

        self.status = LevelStatus::Finished(outcome);
        self.finish_delay.reset();
        log::info!(
            "Level {} finished ({:?}): score {}, {} lives left",
            self.level,
            outcome,
            self.score,
            self.lives
        );
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn is_level_finished(&self) -> bool {
        matches!(self.status, LevelStatus::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            LevelStatus::Finished(outcome) => Some(outcome),
            LevelStatus::Running => None,
        }
    }

    /// False once the level is finished and its closing delay has passed
    pub fn is_running(&self) -> bool {
        !(self.is_level_finished() && self.finish_delay.is_finished())
    }

    /// True while the opening delay holds everything still
    pub fn is_starting(&self) -> bool {
        !self.start_delay.is_finished()
    }

    /// Snapshot of the session after this level's progress
    pub fn game_state(&self) -> GameState {
        GameState::new(
            self.level,
            self.score,
            self.lives,
            self.bullets_shot,
            self.ships_destroyed,
        )
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn bullets_shot(&self) -> u32 {
        self.bullets_shot
    }

    pub fn ships_destroyed(&self) -> u32 {
        self.ships_destroyed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn formation(&self) -> &EnemyShipFormation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut EnemyShipFormation {
        &mut self.formation
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut BulletPool {
        &mut self.bullets
    }

    pub fn special_ship(&self) -> Option<&EnemyShip> {
        self.special_ship.as_ref()
    }
}
