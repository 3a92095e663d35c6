pub mod bounds;
pub mod color;
pub mod ids;
pub mod time;
pub mod world_space;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use color::*;
pub use ids::*;
pub use time::*;
pub use world_space::*;
