//! # Tokenizer Core
//!
//! Core types shared by the tokenizer crates.
//!
//! - [`errors`]: the [`TokenError`] enum returned by every token operation
//!
//! # Example
//!
//! ```ignore
//! use tokenizer_core::{Result, TokenError};
//!
//! fn check(len: usize) -> Result<()> {
//!     if len < 32 {
//!         return Err(TokenError::key(format!("{len} bytes is too short")));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{Result, TokenError};
