//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! EntryPoint (body source, sync flag, operation, path injection)
//!     → entry.rs (shared pipeline)
//!     → envelope::build_envelope
//!         Ok  → dispatcher.rs → OperationHandler::handle → ResultFuture
//!         Err → failure.rs    → ready ResultFuture
//! ```
//!
//! # Design Decisions
//! - Both branches return the same boxed future type
//! - The operation set is a closed enum; entry points are a static table
//! - Exactly one backend attempt per request, no retry here

pub mod dispatcher;
pub mod entry;
pub mod failure;
pub mod operation;
pub mod result;

pub use dispatcher::{Dispatcher, SubIdentifier};
pub use entry::{BodySource, EntryPoint, ENTRY_POINTS};
pub use operation::{OperationId, OperationParseError};
pub use result::{OperationResult, ResponseCode, ResultFuture};
