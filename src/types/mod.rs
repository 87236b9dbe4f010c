//! Plain data types shared by every engine component.

mod coord;
mod merge;
mod selection;

pub use coord::*;
pub use merge::*;
pub use selection::*;
