/// Photo API access
///
/// - `client.rs` - HTTP client for `GET /photos` and thumbnail downloads
/// - `error.rs` - error type shared by every API call

pub mod client;
pub mod error;

pub use client::PhotoClient;
pub use error::ApiError;
