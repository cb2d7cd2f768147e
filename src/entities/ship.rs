use super::bullet::{BulletId, BulletPool};
use super::entity::{Entity, SpriteState};
use crate::cooldown::Cooldown;
use crate::settings::ScreenConfig;

pub const SHIP_WIDTH: i32 = 26;
pub const SHIP_HEIGHT: i32 = 16;
/// Horizontal pixels per move
pub const SHIP_SPEED: i32 = 2;
pub const SHIP_BULLET_SPEED: i32 = -6;
pub const SHOOTING_INTERVAL_MS: u32 = 750;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub entity: Entity,
    shooting: Cooldown,
    destruction: Cooldown,
}

impl Ship {
    pub fn new(x: i32, y: i32, config: &ScreenConfig) -> Self {
        Self {
            entity: Entity::new(x, y, SHIP_WIDTH, SHIP_HEIGHT),
            shooting: Cooldown::new(config.frames(SHOOTING_INTERVAL_MS)),
            destruction: Cooldown::new(config.frames(config.ship_destruction_ms)),
        }
    }

    pub fn x(&self) -> i32 {
        self.entity.x
    }

    pub fn y(&self) -> i32 {
        self.entity.y
    }

    pub fn sprite(&self) -> SpriteState {
        self.entity.sprite
    }

    /// Move left unless that would cross `min_x`
    pub fn move_left(&mut self, min_x: i32) {
        if self.entity.x - SHIP_SPEED >= min_x {
            self.entity.x -= SHIP_SPEED;
        }
    }

    /// Move right unless the right edge would cross `max_x`
    pub fn move_right(&mut self, max_x: i32) {
        if self.entity.right() + SHIP_SPEED <= max_x {
            self.entity.x += SHIP_SPEED;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shooting.is_finished()
    }

    /// Fire if the shooting cooldown allows it.
    /// Returns whether a bullet was added.
    pub fn shoot(&mut self, bullets: &mut BulletPool) -> bool {
        if !self.can_shoot() {
            return false;
        }
        self.shooting.reset();
        self.fire(bullets);
        true
    }

    /// Add one bullet from the ship's nose, ignoring the cooldown
    pub fn fire(&self, bullets: &mut BulletPool) -> BulletId {
        bullets.spawn(self.entity.center_x(), self.entity.y, SHIP_BULLET_SPEED)
    }

    /// Advance timers by one frame and refresh the sprite
    pub fn update(&mut self) {
        self.shooting.tick();
        self.destruction.tick();
        self.entity.sprite = if self.destruction.is_finished() {
            SpriteState::Normal
        } else {
            SpriteState::Destroyed
        };
    }

    /// Wreck the ship. It stays wrecked until the destruction timer runs out.
    pub fn destroy(&mut self) {
        self.destruction.reset();
        if !self.destruction.is_finished() {
            self.entity.sprite = SpriteState::Destroyed;
        }
    }

    pub fn is_destroyed(&self) -> bool {
        !self.destruction.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::bullet::BulletOwner;

    fn ship_at(x: i32, y: i32) -> Ship {
        Ship::new(x, y, &ScreenConfig::default())
    }

    #[test]
    fn test_ship_new() {
        let ship = ship_at(224, 490);
        assert_eq!(ship.x(), 224);
        assert_eq!(ship.y(), 490);
        assert_eq!(ship.sprite(), SpriteState::Normal);
        assert!(!ship.is_destroyed());
        assert!(ship.can_shoot());
    }

    #[test]
    fn test_ship_movement_left() {
        let mut ship = ship_at(10, 490);
        ship.move_left(1);
        assert_eq!(ship.x(), 8);

        // Test boundary
        ship.entity.x = 2;
        ship.move_left(1);
        assert_eq!(ship.x(), 2);
    }

    #[test]
    fn test_ship_movement_right() {
        let mut ship = ship_at(100, 490);
        ship.move_right(447);
        assert_eq!(ship.x(), 102);

        // Test boundary
        ship.entity.x = 447 - SHIP_WIDTH - 1;
        ship.move_right(447);
        assert_eq!(ship.x(), 447 - SHIP_WIDTH - 1);
    }

    #[test]
    fn test_ship_shoot_from_center() {
        let mut ship = ship_at(100, 490);
        let mut bullets = BulletPool::new();
        assert!(ship.shoot(&mut bullets));

        let (_, bullet) = bullets.iter().next().unwrap();
        assert_eq!(bullet.entity.x, 100 + SHIP_WIDTH / 2);
        assert_eq!(bullet.entity.y, 490);
        assert_eq!(bullet.speed, SHIP_BULLET_SPEED);
        assert_eq!(bullet.owner(), BulletOwner::Player);
    }

    #[test]
    fn test_ship_cooldown_prevents_shooting() {
        let mut ship = ship_at(100, 490);
        let mut bullets = BulletPool::new();
        assert!(ship.shoot(&mut bullets));
        assert!(!ship.shoot(&mut bullets));
        assert_eq!(bullets.len(), 1);

        // 750 ms at 60 fps
        for _ in 0..45 {
            ship.update();
        }
        assert!(ship.shoot(&mut bullets));
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_fire_ignores_cooldown() {
        let mut ship = ship_at(100, 490);
        let mut bullets = BulletPool::new();
        ship.shoot(&mut bullets);
        ship.fire(&mut bullets);
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_ship_destruction_timer() {
        let mut ship = ship_at(100, 490);
        ship.destroy();
        assert!(ship.is_destroyed());
        assert_eq!(ship.sprite(), SpriteState::Destroyed);

        for _ in 0..59 {
            ship.update();
        }
        assert!(ship.is_destroyed());
        assert_eq!(ship.sprite(), SpriteState::Destroyed);

        ship.update();
        assert!(!ship.is_destroyed());
        assert_eq!(ship.sprite(), SpriteState::Normal);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_ship_stays_in_bounds(
                initial_x in 1i32..420,
                moves in prop::collection::vec(prop::bool::ANY, 0..400)
            ) {
                let mut ship = ship_at(initial_x, 490);
                for move_right in moves {
                    if move_right {
                        ship.move_right(447);
                    } else {
                        ship.move_left(1);
                    }
                }
                prop_assert!(ship.x() >= 1);
                prop_assert!(ship.entity.right() <= 447.max(initial_x + SHIP_WIDTH));
            }
        }
    }
}
