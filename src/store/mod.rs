//! Flat-file data stores
//!
//! Users and actions are loaded once from JSON files at startup and held
//! immutable in memory. Everything above this layer is read-only.

pub mod actions;
pub mod users;

pub use actions::ActionStore;
pub use users::UserStore;

/// Store loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read data file: {0}")]
    Io(String),

    #[error("failed to parse data file: {0}")]
    Parse(String),
}
