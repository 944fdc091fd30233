//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, request ID, limits, timeout, tracing)
//!     → request.rs (collect body, build TransportContext)
//!     → NotificationController entry point
//!     → response.rs (OperationResult → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{extract_transport, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
