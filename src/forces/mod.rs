mod gravity;
mod drag;

pub use self::gravity::total_acceleration;
pub use self::drag::{damping_factor, friction_acceleration, FRICTION_SPEED_THRESHOLD};
