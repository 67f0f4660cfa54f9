//! Error types

mod column;
mod config;
mod grid;
mod load;

pub use column::*;
pub use config::*;
pub use grid::*;
pub use load::*;
