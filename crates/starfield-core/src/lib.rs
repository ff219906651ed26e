pub mod animation;
pub mod constants;
pub mod error;
pub mod field;
pub mod links;
pub mod nav;
pub mod pointer;
pub mod resize;
pub mod stage;
pub mod state;

pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

pub use animation::*;
pub use error::ConfigError;
pub use field::*;
pub use links::*;
pub use nav::*;
pub use pointer::*;
pub use resize::*;
pub use stage::*;
pub use state::*;
