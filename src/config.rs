//! Configuration loader and schema types.
//!
//! Settings cover the shelf location and loading strategy, HTTP
//! timeouts, startup volume and key step sizes. Loading helpers resolve
//! the TOML file from XDG paths and apply environment overrides.

mod load;
mod schema;

pub use schema::*;
