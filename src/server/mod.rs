//! Static file server.
//!
//! Each accepted connection carries exactly one request:
//!
//! ```text
//! request line ──► PathResolver ──► ServedPath ──► ResponseWriter ──► close
//!       │                 │
//!       └── not GET ──────┴── Forbidden / NotFound ──► 404
//! ```
//!
//! Traversal is refused twice: any `..` in the raw path, and any canonical
//! path that does not sit under the canonical root. Both look like a plain
//! 404 to the client.

pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod listing;
pub mod mime;
pub mod path;
pub mod writer;

pub use dispatcher::{RequestDispatcher, RequestLine, parse_request_line};
pub use error::ServeError;
pub use listing::DirListingEntry;
pub use path::{PathResolver, ServedKind, ServedPath};
pub use writer::ResponseWriter;
