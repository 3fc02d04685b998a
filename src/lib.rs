pub mod arc;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod sheet;
pub mod sig;
pub mod skeleton;

#[cfg(test)]
mod test_support;

pub use error::{Result, ScorearcError};
