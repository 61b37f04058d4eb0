//! # Tokenizer Config
//!
//! Configuration types for the tokenizer, loaded from environment variables.
//!
//! - [`jwt`]: token secret and lifetimes
//!
//! # Example
//!
//! ```ignore
//! use tokenizer_config::JwtConfig;
//!
//! let jwt_config = JwtConfig::from_env();
//! let expires_at = jwt_config.access_expires_at(chrono::Utc::now());
//! assert!(expires_at.is_some());
//! ```

pub mod jwt;

// Re-export commonly used types at crate root
pub use jwt::{JwtConfig, expires_after};
