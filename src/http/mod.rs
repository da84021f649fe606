//! Protocol vocabulary shared by the client and the server.
//!
//! Both sides speak plain HTTP/1.0: one request per connection, the server
//! closes after answering, and no header beyond the handful each side needs is
//! ever interpreted.
//!
//! - **`method`**: request verbs (only `GET` is served)
//! - **`status`**: the status codes the server emits

pub mod method;
pub mod status;

pub use method::Method;
pub use status::StatusCode;

/// Version token used on both request and status lines.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Line terminator for everything this crate writes.
pub const CRLF: &str = "\r\n";
