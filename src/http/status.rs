/// Status codes the server emits.
///
/// The server only ever answers `200 OK` or `404 Not Found`; every rejection
/// collapses into the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// Formats the `HTTP/1.0 <code> <reason>` status line including its CRLF.
    pub fn status_line(&self) -> String {
        format!(
            "{} {} {}{}",
            super::HTTP_VERSION,
            self.as_u16(),
            self.reason_phrase(),
            super::CRLF
        )
    }
}
