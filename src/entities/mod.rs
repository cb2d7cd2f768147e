mod bullet;
mod enemy;
mod entity;
mod formation;
mod ship;

// Re-export all public types
pub use bullet::{BULLET_HEIGHT, BULLET_WIDTH, Bullet, BulletId, BulletOwner, BulletPool};
pub use enemy::{
    ENEMY_HEIGHT, ENEMY_WIDTH, EnemyKind, EnemyShip, SPECIAL_HEIGHT, SPECIAL_START, SPECIAL_WIDTH,
    ShotPattern, ShotProfile,
};
pub use entity::{Entity, SpriteState};
pub use formation::{Bounds, Direction, EnemyShipFormation};
pub use ship::{SHIP_BULLET_SPEED, SHIP_HEIGHT, SHIP_SPEED, SHIP_WIDTH, Ship};
