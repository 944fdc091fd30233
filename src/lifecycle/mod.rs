//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C or Shutdown::trigger
//!     → wait_for_shutdown resolves
//!     → axum stops accepting, drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_shutdown, Shutdown};
