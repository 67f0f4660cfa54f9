//! Grid engine: query construction, dispatch and response mapping

mod controller;
mod mapper;
pub mod query;

pub use controller::*;
pub use mapper::*;
