pub mod energy;
pub mod frame;
pub mod play;
