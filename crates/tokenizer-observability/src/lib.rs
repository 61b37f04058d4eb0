//! Tokenizer Observability
//!
//! Console logging for tokenizer binaries. Library crates only emit
//! `tracing` events; a binary calls [`init_logging`] once at startup.
//!
//! # Examples
//!
//! ```no_run
//! tokenizer_observability::init_logging();
//! tracing::info!("ready");
//! ```

pub mod logging;

pub use logging::{LogFormat, init_logging};
