pub mod physics;
pub mod registry;
pub mod session;
pub mod time;
