pub mod board_state;
pub mod kv;

pub use board_state::*;
pub use kv::*;
