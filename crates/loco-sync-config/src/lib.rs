//! Configuration types for loco-sync.
//!
//! Settings come from an optional `.loco-sync.yaml` file; credentials come
//! from the environment (optionally seeded from a `.env` file).

pub mod types;
pub mod loader;
pub mod env;

pub use types::*;
pub use loader::*;
pub use env::*;
