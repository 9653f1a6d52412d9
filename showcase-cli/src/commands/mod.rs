//! Command implementations for the showcase CLI

pub mod config;
pub mod roles;
pub mod seed;
pub mod serve;

pub use config::run_config;
pub use roles::run_roles;
pub use seed::run_seed;
pub use serve::run_serve;
