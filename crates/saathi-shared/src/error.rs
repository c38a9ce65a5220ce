use thiserror::Error;

/// Failures surfaced by client operations, grouped by origin rather than by
/// type name. Every operation resolves to `Result<T, ApiError>`; reducers
/// only ever record the rendered string.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with `success: false` and a human-readable
    /// message, surfaced verbatim.
    #[error("{0}")]
    Api(String),

    /// The response body did not match the expected envelope or payload.
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// A request was rejected with 401 even after the retried attempt.
    #[error("Not authorised")]
    Unauthorized,

    /// The refresh token was missing, expired, or rejected. The credential
    /// store has already been cleared; the caller must drive the application
    /// to the logged-out state.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Rejected client-side before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// Local file I/O failure (receipt generation).
    #[error("File error: {0}")]
    Io(String),
}

/// Convenience alias used throughout the client crates.
pub type Result<T> = std::result::Result<T, ApiError>;
