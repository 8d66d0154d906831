//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod swap;
pub mod units;

pub use swap::*;
pub use units::*;
