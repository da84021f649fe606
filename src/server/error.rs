use std::io;

/// Per-request failures on the server.
///
/// None of these outlive the connection. All but `Io` are answered with the
/// same 404; `Io` means the peer can no longer be written to, so the
/// connection is just dropped.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("request path escapes the served root")]
    Forbidden,

    #[error("no such file or directory")]
    NotFound,

    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("unsupported method `{0}`")]
    UnsupportedMethod(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
