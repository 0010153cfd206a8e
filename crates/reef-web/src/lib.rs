pub mod dom;
pub mod frames;
pub mod runner;

pub use dom::DomHost;
pub use frames::RafFrames;
pub use runner::{js_error, ReefRunner};

