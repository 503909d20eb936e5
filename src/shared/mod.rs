/// Shared kernel - errors, result alias and filesystem guards used across layers
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
