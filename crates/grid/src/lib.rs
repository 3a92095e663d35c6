pub mod config;
pub mod interaction;
pub mod minimap;
pub mod picking;
pub mod project;
pub mod render;
pub mod sync;
pub mod viewport;
pub mod world;

pub use config::GridConfig;
pub use viewport::{Direction, Viewport};
pub use world::ProjectWorld;
