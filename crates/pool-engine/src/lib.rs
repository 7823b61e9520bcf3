pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{GameConfig, PoolGame};
pub use components::ball::{rack_positions, Ball, BallId};
pub use components::table::{Pocket, TableGeometry};
pub use core::physics::{BallHandle, BallMaterial, PhysicsWorld, PolygonHandle};
pub use core::registry::BallRegistry;
pub use core::session::GameSession;
pub use core::time::FrameLimiter;
pub use error::PoolError;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{sprites, RenderBuffer, RenderInstance};
pub use renderer::traits::{FrameData, HudState, HudText, NullRenderer, Renderer, TextSize};
pub use systems::pockets::{PocketDistance, PocketResolver, PotEvent};
pub use systems::shot::{PowerMeter, ShotController, ShotPhase, ShotState};
