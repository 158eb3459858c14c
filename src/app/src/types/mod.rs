//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - config: Device configuration snapshot and its wire decoding
//! - form: Form values, fields and validation
//! - message: Inbound and outbound socket frames
//! - scan: Network scan state machine and selection list
//! - session: Connection and page state

pub mod config;
pub mod form;
pub mod message;
pub mod scan;
pub mod session;

pub use config::*;
pub use form::*;
pub use message::*;
pub use scan::*;
pub use session::*;
