use super::bullet::BulletPool;
use super::entity::{Entity, SpriteState};
use crate::cooldown::Cooldown;
use crate::settings::ScreenConfig;

pub const ENEMY_WIDTH: i32 = 24;
pub const ENEMY_HEIGHT: i32 = 16;
pub const SPECIAL_WIDTH: i32 = 32;
pub const SPECIAL_HEIGHT: i32 = 14;
/// Where the special ship enters the playfield
pub const SPECIAL_START: (i32, i32) = (-32, 65);

const ANIMATION_INTERVAL_MS: u32 = 500;
const BASE_ENEMY_BULLET_SPEED: i32 = 4;
const MAX_ENEMY_BULLET_SPEED: i32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    A,
    B,
    C,
    /// Bonus ship crossing the top of the screen
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPattern {
    /// No shots at all
    Silent,
    /// One bullet from the center
    Single,
    /// Two bullets from the quarter points
    Twin,
}

/// How an enemy shoots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotProfile {
    pub bullet_speed: i32,
    pub pattern: ShotPattern,
}

impl EnemyKind {
    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::A => 10,
            EnemyKind::B => 20,
            EnemyKind::C => 30,
            EnemyKind::Special => 100,
        }
    }

    /// Shots get faster with the enemy's rank and the level number
    pub fn shot_profile(&self, level: u32) -> ShotProfile {
        let rank_bonus = match self {
            EnemyKind::A => 0,
            EnemyKind::B => 1,
            EnemyKind::C => 2,
            EnemyKind::Special => {
                return ShotProfile {
                    bullet_speed: 0,
                    pattern: ShotPattern::Silent,
                };
            }
        };
        let level_bonus = level.saturating_sub(1) as i32 / 2;
        let pattern = match self {
            EnemyKind::C => ShotPattern::Twin,
            _ => ShotPattern::Single,
        };

        ShotProfile {
            bullet_speed: (BASE_ENEMY_BULLET_SPEED + rank_bonus + level_bonus)
                .min(MAX_ENEMY_BULLET_SPEED),
            pattern,
        }
    }

    fn size(&self) -> (i32, i32) {
        match self {
            EnemyKind::Special => (SPECIAL_WIDTH, SPECIAL_HEIGHT),
            _ => (ENEMY_WIDTH, ENEMY_HEIGHT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub shot: ShotProfile,
    /// Column and row in the formation grid
    pub slot: (usize, usize),
    /// Which of the two animation frames is showing
    pub alternate_frame: bool,
    destroyed: bool,
    animation: Cooldown,
    explosion: Cooldown,
}

impl EnemyShip {
    pub fn new(x: i32, y: i32, kind: EnemyKind, level: u32, config: &ScreenConfig) -> Self {
        let (width, height) = kind.size();
        let mut animation = Cooldown::new(config.frames(ANIMATION_INTERVAL_MS));
        animation.reset();

        Self {
            entity: Entity::new(x, y, width, height),
            kind,
            shot: kind.shot_profile(level),
            slot: (0, 0),
            alternate_frame: false,
            destroyed: false,
            animation,
            explosion: Cooldown::new(config.frames(config.enemy_explosion_ms)),
        }
    }

    pub fn special(config: &ScreenConfig) -> Self {
        let (x, y) = SPECIAL_START;
        Self::new(x, y, EnemyKind::Special, 0, config)
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

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroyed and done exploding, ready to be dropped
    pub fn is_explosion_over(&self) -> bool {
        self.destroyed && self.explosion.is_finished()
    }

    /// Mark the ship destroyed and start its explosion.
    /// Returns false if it was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.entity.sprite = SpriteState::Exploding;
        self.explosion.reset();
        true
    }

    /// Advance animation and explosion timers by one frame
    pub fn update(&mut self) {
        if self.destroyed {
            self.explosion.tick();
            return;
        }
        self.animation.tick();
        if self.animation.is_finished() {
            self.animation.reset();
            self.alternate_frame = !self.alternate_frame;
        }
    }

    /// Add this ship's bullets to the pool. Returns how many were added.
    pub fn shoot(&self, bullets: &mut BulletPool) -> usize {
        let speed = self.shot.bullet_speed;
        let entity = &self.entity;
        match self.shot.pattern {
            ShotPattern::Silent => 0,
            ShotPattern::Single => {
                bullets.spawn(entity.center_x(), entity.y, speed);
                1
            }
            ShotPattern::Twin => {
                bullets.spawn(entity.x + entity.width / 4, entity.y, speed);
                bullets.spawn(entity.x + entity.width * 3 / 4, entity.y, speed);
                2
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(kind: EnemyKind, level: u32) -> EnemyShip {
        EnemyShip::new(20, 100, kind, level, &ScreenConfig::default())
    }

    #[test]
    fn test_enemy_points_by_kind() {
        assert_eq!(enemy(EnemyKind::A, 1).points(), 10);
        assert_eq!(enemy(EnemyKind::B, 1).points(), 20);
        assert_eq!(enemy(EnemyKind::C, 1).points(), 30);
        assert_eq!(EnemyShip::special(&ScreenConfig::default()).points(), 100);
    }

    #[test]
    fn test_shot_profile_by_kind_and_level() {
        assert_eq!(
            EnemyKind::A.shot_profile(1),
            ShotProfile {
                bullet_speed: 4,
                pattern: ShotPattern::Single
            }
        );
        assert_eq!(EnemyKind::B.shot_profile(1).bullet_speed, 5);
        assert_eq!(EnemyKind::C.shot_profile(1).pattern, ShotPattern::Twin);
        assert_eq!(EnemyKind::A.shot_profile(5).bullet_speed, 6);
        assert_eq!(EnemyKind::C.shot_profile(99).bullet_speed, MAX_ENEMY_BULLET_SPEED);
        assert_eq!(EnemyKind::Special.shot_profile(3).pattern, ShotPattern::Silent);
    }

    #[test]
    fn test_single_shot_from_center() {
        let ship = enemy(EnemyKind::A, 1);
        let mut bullets = BulletPool::new();
        assert_eq!(ship.shoot(&mut bullets), 1);

        let (_, bullet) = bullets.iter().next().unwrap();
        assert_eq!(bullet.entity.x, 20 + ENEMY_WIDTH / 2);
        assert_eq!(bullet.entity.y, 100);
        assert_eq!(bullet.speed, 4);
    }

    #[test]
    fn test_twin_shot() {
        let ship = enemy(EnemyKind::C, 1);
        let mut bullets = BulletPool::new();
        assert_eq!(ship.shoot(&mut bullets), 2);

        let xs: Vec<i32> = bullets.iter().map(|(_, b)| b.entity.x).collect();
        assert_eq!(xs, vec![26, 38]);
        assert!(bullets.iter().all(|(_, b)| b.speed == 6));
    }

    #[test]
    fn test_special_ship_never_shoots() {
        let ship = EnemyShip::special(&ScreenConfig::default());
        let mut bullets = BulletPool::new();
        assert_eq!(ship.shoot(&mut bullets), 0);
        assert!(bullets.is_empty());
        assert_eq!((ship.x(), ship.y()), SPECIAL_START);
        assert_eq!(ship.entity.width, SPECIAL_WIDTH);
    }

    #[test]
    fn test_destroy_starts_explosion() {
        let mut ship = enemy(EnemyKind::B, 1);
        assert!(!ship.is_destroyed());
        assert!(ship.destroy());
        assert!(ship.is_destroyed());
        assert_eq!(ship.sprite(), SpriteState::Exploding);
        assert!(!ship.is_explosion_over());

        // Destroying twice is a no-op
        assert!(!ship.destroy());

        // 500 ms at 60 fps
        for _ in 0..30 {
            ship.update();
        }
        assert!(ship.is_explosion_over());
        assert_eq!(ship.sprite(), SpriteState::Exploding);
    }

    #[test]
    fn test_animation_alternates() {
        let mut ship = enemy(EnemyKind::A, 1);
        assert!(!ship.alternate_frame);
        for _ in 0..30 {
            ship.update();
        }
        assert!(ship.alternate_frame);
        for _ in 0..30 {
            ship.update();
        }
        assert!(!ship.alternate_frame);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_bullets_always_move_down(
                kind in prop::sample::select(vec![EnemyKind::A, EnemyKind::B, EnemyKind::C]),
                level in 1u32..50
            ) {
                let ship = enemy(kind, level);
                let mut bullets = BulletPool::new();
                ship.shoot(&mut bullets);
                prop_assert!(!bullets.is_empty());
                for (_, bullet) in bullets.iter() {
                    prop_assert!(bullet.speed > 0);
                    prop_assert!(bullet.speed <= MAX_ENEMY_BULLET_SPEED);
                }
            }
        }
    }
}
