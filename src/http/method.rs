use std::fmt;
use std::str::FromStr;

/// Request methods the server accepts. Only `GET` is ever served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
}

/// Returned for any request-line token other than a served method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    /// Parses an HTTP method token. Matching is case-sensitive.
    ///
    /// ```
    /// # use courier::http::Method;
    /// assert_eq!("GET".parse::<Method>(), Ok(Method::GET));
    /// assert!("get".parse::<Method>().is_err());
    /// assert!("POST".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
