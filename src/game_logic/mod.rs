pub mod constants;
pub mod components;
pub mod obstacles;
pub mod collisions;
pub mod physics;
pub mod lap_system;
pub mod track;

pub use constants::*;
pub use components::*;
pub use obstacles::*;
pub use collisions::*;
pub use physics::*;
pub use lap_system::*;
pub use track::*;
