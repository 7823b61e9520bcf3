pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{sprites, Origin, RenderBuffer, RenderInstance};
pub use traits::{FrameData, HudState, HudText, NullRenderer, Renderer, TextSize};
