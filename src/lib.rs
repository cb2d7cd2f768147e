// Library exports for testing
pub use app::{App, AppState};
pub use campaign::{Campaign, CampaignStep};
pub use cooldown::Cooldown;
pub use entities::{
    Bullet, BulletId, BulletOwner, BulletPool, EnemyKind, EnemyShip, EnemyShipFormation, Entity,
    Ship, SpriteState,
};
pub use screen::{FrameInput, GameScreen, LevelStatus, Outcome};
pub use settings::{GameSettings, ScreenConfig, level_table};
pub use state::GameState;

pub mod app;
pub mod campaign;
pub mod cooldown;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod state;
