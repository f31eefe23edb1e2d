// Core error types shared by metrics, visualization and configuration
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
