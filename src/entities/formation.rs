use rand::Rng;

use super::bullet::BulletPool;
use super::enemy::{EnemyKind, EnemyShip};
use super::entity::Entity;
use crate::cooldown::Cooldown;
use crate::settings::{GameSettings, ScreenConfig};

/// Top left corner of the formation when a level starts
pub const INIT_POS_X: i32 = 20;
pub const INIT_POS_Y: i32 = 100;
/// Distance between neighbouring ships, in both axes
pub const SEPARATION_DISTANCE: i32 = 40;
/// Pixels per horizontal step
pub const X_SPEED: i32 = 8;
/// Pixels per downward step
pub const Y_SPEED: i32 = 4;
/// Height of one row of descent
pub const DESCENT_DISTANCE: i32 = 20;
pub const SIDE_MARGIN: i32 = 20;
pub const BOTTOM_MARGIN: i32 = 80;
/// Frames between steps with a single ship left
pub const MINIMUM_SPEED: u32 = 10;

const PROPORTION_C: f32 = 0.2;
const PROPORTION_B: f32 = 0.4;
const SHOOTING_VARIANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
}

/// Box around the live ships of a formation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// The grid of enemies for one level. It moves as a rigid block, sweeping
/// sideways and stepping down one row at each screen edge.
#[derive(Debug, Clone)]
pub struct EnemyShipFormation {
    /// Column-major; never grows during a level
    ships: Vec<EnemyShip>,
    total: usize,
    base_speed: u32,
    movement_interval: u32,
    movement_counter: u32,
    direction: Direction,
    previous_direction: Direction,
    shooting: Cooldown,
    screen_width: i32,
    screen_height: i32,
}

impl EnemyShipFormation {
    /// Lay out the grid for a level.
    ///
    /// Panics when either formation dimension is zero.
    pub fn new(settings: &GameSettings, level: u32, config: &ScreenConfig) -> Self {
        assert!(
            settings.formation_width > 0 && settings.formation_height > 0,
            "formation needs at least one ship, got {}x{}",
            settings.formation_width,
            settings.formation_height
        );

        let rows = settings.formation_height;
        let mut ships = Vec::with_capacity(settings.ship_count());
        for column in 0..settings.formation_width {
            for row in 0..rows {
                let proportion = row as f32 / rows as f32;
                let kind = if proportion < PROPORTION_C {
                    EnemyKind::C
                } else if proportion < PROPORTION_B + PROPORTION_C {
                    EnemyKind::B
                } else {
                    EnemyKind::A
                };

                let mut ship = EnemyShip::new(
                    INIT_POS_X + SEPARATION_DISTANCE * column as i32,
                    INIT_POS_Y + SEPARATION_DISTANCE * row as i32,
                    kind,
                    level,
                    config,
                );
                ship.slot = (column, row);
                ships.push(ship);
            }
        }

        let interval = config.frames(settings.shooting_interval_ms);
        let variance = config.frames(
            (settings.shooting_interval_ms as f32 * SHOOTING_VARIANCE) as u32,
        );
        let mut shooting = Cooldown::variable(interval, variance);
        shooting.reset();

        Self {
            total: ships.len(),
            ships,
            base_speed: settings.base_speed,
            movement_interval: settings.base_speed + MINIMUM_SPEED,
            movement_counter: 0,
            direction: Direction::Right,
            previous_direction: Direction::Right,
            shooting,
            screen_width: config.width,
            screen_height: config.height,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyShip> {
        self.ships.iter()
    }

    pub fn get(&self, index: usize) -> Option<&EnemyShip> {
        self.ships.get(index)
    }

    /// Ships still present, exploding ones included
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Ships not yet destroyed
    pub fn remaining(&self) -> usize {
        self.ships.iter().filter(|ship| !ship.is_destroyed()).count()
    }

    /// True once every ship has been destroyed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Frames between steps at the current strength
    pub fn movement_interval(&self) -> u32 {
        self.movement_interval
    }

    /// Extent of the live ships; wrecks ride along but never turn the block.
    /// None once every ship is destroyed.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut ships = self.ships.iter().filter(|ship| !ship.is_destroyed());
        let first = &ships.next()?.entity;
        let mut bounds = Bounds {
            left: first.x,
            top: first.y,
            right: first.right(),
            bottom: first.bottom(),
        };
        for ship in ships {
            bounds.left = bounds.left.min(ship.entity.x);
            bounds.top = bounds.top.min(ship.entity.y);
            bounds.right = bounds.right.max(ship.entity.right());
            bounds.bottom = bounds.bottom.max(ship.entity.bottom());
        }
        Some(bounds)
    }

    /// Index of the first live ship overlapping `target`, in formation order
    pub fn find_hit(&self, target: &Entity) -> Option<usize> {
        self.ships
            .iter()
            .position(|ship| !ship.is_destroyed() && ship.entity.overlaps(target))
    }

    /// Destroy a live ship and return its points. The wreck stays in place
    /// until its explosion ends but no longer counts for anything else.
    pub fn destroy(&mut self, index: usize) -> Option<u32> {
        let ship = self.ships.get_mut(index)?;
        if !ship.destroy() {
            return None;
        }
        log::debug!(
            "Destroyed {:?} ship at ({}, {})",
            ship.kind,
            ship.entity.x,
            ship.entity.y
        );
        Some(ship.points())
    }

    /// Lowest live ship of each column, left to right
    pub fn shooters(&self) -> Vec<usize> {
        let mut shooters: Vec<usize> = Vec::new();
        for (index, ship) in self.ships.iter().enumerate() {
            if ship.is_destroyed() {
                continue;
            }
            match shooters.last_mut() {
                Some(last) if self.ships[*last].slot.0 == ship.slot.0 => {
                    if ship.slot.1 > self.ships[*last].slot.1 {
                        *last = index;
                    }
                }
                _ => shooters.push(index),
            }
        }
        shooters
    }

    /// Advance one frame: timers, wreck cleanup and, when due, one step
    pub fn update(&mut self) {
        self.shooting.tick();
        for ship in &mut self.ships {
            ship.update();
        }
        self.ships.retain(|ship| !ship.is_explosion_over());

        let ratio = self.remaining() as f32 / self.total as f32;
        self.movement_interval = (ratio * ratio * self.base_speed as f32) as u32 + MINIMUM_SPEED;

        self.movement_counter += 1;
        if self.movement_counter < self.movement_interval {
            return;
        }
        self.movement_counter = 0;

        let Some(bounds) = self.bounds() else {
            return;
        };
        let (dx, dy) = self.step(bounds);
        for ship in &mut self.ships {
            ship.entity.move_by(dx, dy);
        }
    }

    /// Pick the next direction and return the movement for this step
    fn step(&mut self, bounds: Bounds) -> (i32, i32) {
        let at_bottom = bounds.bottom > self.screen_height - BOTTOM_MARGIN;
        let at_right_side = bounds.right >= self.screen_width - SIDE_MARGIN;
        let at_left_side = bounds.left <= SIDE_MARGIN;
        let at_row = bounds.top % DESCENT_DISTANCE == 0;

        match self.direction {
            Direction::Down => {
                if at_row {
                    self.direction = match self.previous_direction {
                        Direction::Right => Direction::Left,
                        _ => Direction::Right,
                    };
                }
            }
            Direction::Left => {
                if at_left_side {
                    if at_bottom {
                        self.direction = Direction::Right;
                    } else {
                        self.previous_direction = Direction::Left;
                        self.direction = Direction::Down;
                    }
                }
            }
            Direction::Right => {
                if at_right_side {
                    if at_bottom {
                        self.direction = Direction::Left;
                    } else {
                        self.previous_direction = Direction::Right;
                        self.direction = Direction::Down;
                    }
                }
            }
        }

        match self.direction {
            Direction::Right => (X_SPEED, 0),
            Direction::Left => (-X_SPEED, 0),
            Direction::Down => (0, Y_SPEED),
        }
    }

    /// Let a random front-line ship fire if the shooting cooldown is over.
    /// Returns whether anything was fired.
    pub fn shoot<R: Rng>(&mut self, bullets: &mut BulletPool, rng: &mut R) -> bool {
        if !self.shooting.is_finished() {
            return false;
        }
        self.shooting.reset_with(rng);

        let shooters = self.shooters();
        if shooters.is_empty() {
            return false;
        }
        let shooter = shooters[rng.random_range(0..shooters.len())];
        self.ships[shooter].shoot(bullets) > 0
    }
}
