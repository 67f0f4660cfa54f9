//! Remote-data grid engine for market quotes
//!
//! Turns paginated, sorted and filtered view state into quote-endpoint
//! requests, keeps only the outcome of the most recently submitted request,
//! and projects loaded rows into formatted, sign-classified cells.

pub mod api;
pub mod error;
pub mod model;
pub mod render;
pub mod transport;
pub mod view;

mod client;
mod config;

pub use client::*;
pub use config::*;
