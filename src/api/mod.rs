//! Blocking client for the business backend's REST API

pub mod client;
pub mod envelope;
pub mod error;
pub mod permissions;

pub use client::{ApiClient, Session};
#[allow(unused_imports)]
pub use envelope::Envelope;
#[allow(unused_imports)]
pub use error::ApiError;
pub use permissions::Permissions;
