pub mod autopilot;
pub mod runner;

pub use autopilot::Autopilot;
pub use runner::{GameRunner, HeadlessRenderer, InputSource, NoInput, RunSummary};
