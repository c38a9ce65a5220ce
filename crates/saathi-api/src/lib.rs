// HTTP layer for the saathi backend: a configured request client that
// attaches the bearer token to every call and performs the single
// refresh-and-retry dance on 401.

pub mod client;
pub mod tokens;
pub mod transport;

pub use client::ApiClient;
pub use tokens::CredentialStore;
pub use transport::{HttpTransport, Method, RawResponse, ReqwestTransport, TransportError};
