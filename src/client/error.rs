use std::io;

/// Everything that can end a client exchange.
///
/// All of these are fatal for `courier-get`: the binary prints the message
/// and exits non-zero. A body that ends before its advertised length is not
/// an error and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unsupported URL scheme `{0}` (only http:// is supported)")]
    UnsupportedScheme(String),

    #[error("failed to connect to {addr}: {source}")]
    TransportConnect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send request: {0}")]
    TransportWrite(#[source] io::Error),

    #[error("failed to read response: {0}")]
    TransportRead(#[source] io::Error),

    #[error("server closed the connection without a response")]
    EmptyResponse,

    #[error("response head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("HTTP error: {0}")]
    HttpError(u32),

    #[error("chunked transfer encoding is not supported")]
    ChunkedUnsupported,

    #[error("failed to write output file: {0}")]
    Output(#[source] io::Error),
}
