pub mod links;
pub mod pointer;

pub use links::wire_links;
pub use pointer::{wire_pointer_move, wire_resize};
