//! Command implementations for shopscore CLI

mod misc;
mod search;

pub use misc::*;
pub use search::*;
