// crates/network/src/lib.rs
//! HTTP plumbing for the synchronization engine
//!
//! - `request`: layered request configuration and the prepared request a transport sends
//! - `transport`: the transport seam shared by both HTTP implementations
//! - `fetch` / `streaming`: reqwest transports without and with progress reporting
//! - `progress`: maps raw transport progress to directional progress events
//! - `normalize`: turns a raw response into `{ values, error }`

mod client;
mod error;
mod fetch;
mod headers;
mod normalize;
mod progress;
mod request;
mod response;
mod streaming;
mod transport;

pub use client::{ClientConfig, HttpClient, DEFAULT_UPLOAD_CHUNK_SIZE};
pub use error::{BoxError, NetworkError, NetworkResult, TransportError};
pub use fetch::FetchTransport;
pub use headers::Headers;
pub use normalize::{
    is_truthy, network_error, ErrorHandler, NormalizedResponse, ResponseAdaptor,
    ResponseStrategy, NETWORK_ERROR,
};
pub use progress::{emit_progress, RawProgress};
pub use request::{
    CredentialsMode, Method, PreparedRequest, RequestConfig, RequestDescriptor, RequestOverrides,
};
pub use response::RawResponse;
pub use streaming::ProgressTransport;
pub use transport::{Exchange, Transport};
