//! HTTP message primitives the header parsers work against:
//! [`Method`], [`Headers`] and [`Request`].

use std::fmt;

use serde::Serialize;

pub mod headers;
pub mod request;

pub use headers::{HasHeaders, Headers};
pub use request::{Request, RequestError};

/// An HTTP request method.
///
/// Registered methods are unit variants; any other token seen on the wire is
/// kept in `Custom`.
///
/// # Examples
///
/// ```
/// use http_message::http::Method;
///
/// let method: Method = "PURGE".parse().unwrap();
/// assert_eq!(method, Method::Purge);
/// assert_eq!(method.to_string(), "PURGE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Method {
    Head,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    /// Cache invalidation, as understood by Varnish, Fastly and friends.
    Purge,
    Options,
    Trace,
    Connect,
    Custom(String),
}

impl Method {
    /// The method token as sent on the request line.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Purge => "PURGE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for String {
    fn from(method: Method) -> String {
        match method {
            Method::Custom(s) => s,
            other => other.as_str().to_owned(),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "HEAD" => Self::Head,
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "PURGE" => Self::Purge,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            "CONNECT" => Self::Connect,
            other => Self::Custom(other.to_owned()),
        })
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_registered_and_custom() {
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert_eq!("get".parse::<Method>(), Ok(Method::Custom("get".to_owned())));
        assert_eq!(Method::Custom("PROPFIND".to_owned()).as_str(), "PROPFIND");
    }

    #[test]
    fn tokens_round_trip_through_string() {
        for token in [
            "HEAD", "GET", "POST", "PUT", "PATCH", "DELETE", "PURGE", "OPTIONS", "TRACE",
            "CONNECT", "PROPFIND",
        ] {
            let method: Method = token.parse().unwrap();
            assert_eq!(String::from(method), token);
        }
    }
}
