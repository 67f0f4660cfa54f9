//! Grid data model

mod catalog;
mod column;
mod row;
mod value;

pub use catalog::*;
pub use column::*;
pub use row::*;
pub use value::*;
