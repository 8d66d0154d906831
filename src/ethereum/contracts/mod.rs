//! Smart contract bindings.

pub mod erc20;
pub mod swap;

pub use erc20::IERC20;
pub use swap::ISatSwap;
