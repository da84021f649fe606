use super::ClientError;

/// Port used when the URL does not name one.
pub const DEFAULT_PORT: &str = "80";

/// Name used for the saved body when the path ends in `/`.
pub const INDEX_FILE: &str = "index.html";

/// Where a single GET goes.
///
/// Parsed once from the command-line URL. The port is kept as the raw text
/// after `:` and the path is opaque: no percent-decoding, the query string is
/// just more path characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: String,
    /// Always starts with `/`.
    pub path: String,
}

impl Target {
    /// Parses `http://host[:port][/path]`.
    ///
    /// Any scheme other than `http` is refused before anything touches the
    /// network. A URL with no `scheme://` prefix at all is read as a bare
    /// `host[:port][/path]`.
    ///
    /// ```
    /// # use courier::client::Target;
    /// let t = Target::parse("http://example.com:8080/docs/a.html").unwrap();
    /// assert_eq!(t.host, "example.com");
    /// assert_eq!(t.port, "8080");
    /// assert_eq!(t.path, "/docs/a.html");
    /// ```
    pub fn parse(url: &str) -> Result<Self, ClientError> {
        let rest = match url.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") => rest,
            Some((scheme, _)) => return Err(ClientError::UnsupportedScheme(scheme.to_string())),
            None => url,
        };

        let (authority, path) = match rest.find('/') {
            Some(slash) => (&rest[..slash], &rest[slash..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, port),
            None => (authority, DEFAULT_PORT),
        };

        Ok(Self {
            host: host.to_string(),
            port: port.to_string(),
            path: path.to_string(),
        })
    }

    /// `host:port`, as handed to the connector.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Local file name for the body: the last path segment, or
    /// `index.html` when that segment is empty.
    pub fn output_file_name(&self) -> &str {
        match self.path.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment,
            _ => INDEX_FILE,
        }
    }
}
