pub mod pockets;
pub mod render;
pub mod shot;
