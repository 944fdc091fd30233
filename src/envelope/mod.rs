//! Request normalization subsystem.
//!
//! # Data Flow
//! ```text
//! RawRequest (headers, body bytes, path params)
//!     → builder.rs (structural checks, JSON parse, correlation headers)
//!     → Ok(RequestEnvelope)  | Err(DispatchError)
//! ```
//!
//! # Design Decisions
//! - The builder is a pure function: no I/O, no shared state
//! - An envelope is never observable half-built
//! - Field-level requirements belong to the backend, not the builder

pub mod builder;
pub mod error;
pub mod raw;
pub mod types;

pub use builder::build_envelope;
pub use error::{DispatchError, ErrorKind};
pub use raw::{RawRequest, TransportContext};
pub use types::{DeliveryMode, RequestContext, RequestEnvelope, DELIVERY_MODE_HEADER};
