pub mod buffer;

pub use buffer::{PositionBuffer, PositionInstance};
