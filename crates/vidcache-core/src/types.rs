//! Core domain types for vidcache.

pub mod endpoint;
pub mod request;
pub mod response;
pub mod status;

pub use endpoint::{Endpoint, QueryStrategy};
pub use request::{ContentId, TrackedRequest};
pub use response::{extract_field, ServiceResponse};
pub use status::Status;
