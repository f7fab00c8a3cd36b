mod movement;
mod collision;
mod manager;

pub use self::movement::MovementSystem;
pub use self::collision::{CollisionStats, CollisionSystem};
pub use self::manager::{System, SystemFn, SystemManager};
