//! Notification gateway library.
//!
//! Inbound edge of the notification service: turns HTTP requests into
//! normalized [`envelope::RequestEnvelope`]s and dispatches them to an
//! asynchronous backend [`backend::OperationHandler`].

pub mod backend;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use controller::NotificationController;
pub use dispatch::Dispatcher;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
