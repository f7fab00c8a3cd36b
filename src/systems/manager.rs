use std::fmt;

use crate::core::{FixedTimestep, World};
use crate::systems::{CollisionSystem, MovementSystem};

/// Signature of a user-supplied system
pub type SystemFn = Box<dyn FnMut(&mut World, f32) + Send>;

/// One entry in the update order
pub enum System {
    Movement(MovementSystem),
    Collision(CollisionSystem),
    Custom { name: String, update: SystemFn },
}

impl System {
    /// Wraps a closure as a system
    pub fn custom<F>(name: impl Into<String>, update: F) -> Self
    where
        F: FnMut(&mut World, f32) + Send + 'static,
    {
        Self::Custom {
            name: name.into(),
            update: Box::new(update),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Movement(system) => system.name(),
            Self::Collision(system) => system.name(),
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn update(&mut self, world: &mut World, dt: f32) {
        match self {
            Self::Movement(system) => system.update(world, dt),
            Self::Collision(system) => system.update(world, dt),
            Self::Custom { update, .. } => update(world, dt),
        }
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement(system) => f.debug_tuple("Movement").field(system).finish(),
            Self::Collision(system) => f.debug_tuple("Collision").field(system).finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish_non_exhaustive(),
        }
    }
}

impl From<MovementSystem> for System {
    fn from(system: MovementSystem) -> Self {
        Self::Movement(system)
    }
}

impl From<CollisionSystem> for System {
    fn from(system: CollisionSystem) -> Self {
        Self::Collision(system)
    }
}

/// Runs its systems once per tick, in registration order.
///
/// The order is observable: integrate-then-collide and collide-then-integrate
/// give different results on the first tick.
#[derive(Debug, Default)]
pub struct SystemManager {
    systems: Vec<System>,
}

impl SystemManager {
    /// Creates a manager with no systems
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement followed by collision
    pub fn standard() -> Self {
        let mut manager = Self::new();
        manager.add_system(MovementSystem::new());
        manager.add_system(CollisionSystem::new());
        manager
    }

    /// Appends a system and returns its position in the update order
    pub fn add_system(&mut self, system: impl Into<System>) -> usize {
        let system = system.into();
        log::debug!("registered system '{}' at position {}", system.name(), self.systems.len());
        self.systems.push(system);
        self.systems.len() - 1
    }

    /// Runs one tick of `dt` seconds through every system, then advances the world clock
    pub fn update(&mut self, world: &mut World, dt: f32) {
        for system in &mut self.systems {
            system.update(world, dt);
        }
        world.advance_clock(dt);
    }

    /// Runs one tick of the world's configured time step
    pub fn step(&mut self, world: &mut World) {
        let dt = world.get_time_step();
        self.update(world, dt);
    }

    /// Banks `frame_time` in `stepper` and runs as many whole ticks as it releases.
    /// Returns the number of ticks run.
    pub fn run_frame(&mut self, world: &mut World, stepper: &mut FixedTimestep, frame_time: f32) -> u32 {
        let ticks = stepper.accumulate(frame_time);
        let dt = stepper.time_step();
        for _ in 0..ticks {
            self.update(world, dt);
        }
        ticks
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(System::name).collect()
    }

    /// The first registered collision system, for diagnostics
    pub fn collision_system(&self) -> Option<&CollisionSystem> {
        self.systems.iter().find_map(|system| match system {
            System::Collision(collision) => Some(collision),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn clear(&mut self) {
        self.systems.clear();
    }
}
