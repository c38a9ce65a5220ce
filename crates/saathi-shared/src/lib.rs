// Shared types for the saathi client crates: ids, the REST envelope,
// the error taxonomy, and application-wide constants.

pub mod constants;
pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{Envelope, Pagination};
pub use error::{ApiError, Result};
pub use types::{MessageId, NotificationId, OrderId, UserId};
