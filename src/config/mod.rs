// src/config/mod.rs
pub mod runtime;
pub mod sources;

pub use runtime::RuntimeSettings;
pub use sources::{load_sources_default, load_sources_from};
