//! VBB departures client.
//!
//! Looks up upcoming public-transit departures for a station in the
//! Berlin/Brandenburg network and renders them as a table.

pub mod cli;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod transit;

pub use error::AppError;
