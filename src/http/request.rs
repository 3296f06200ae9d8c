//! A minimal HTTP/1.x request: just enough to carry headers into the typed
//! header parsers. Request heads are parsed with [`httparse`].

use bytes::Bytes;
use thiserror::Error;

use super::{HasHeaders, Headers, Method};
use crate::header::{
    AuthorizationCredential, ContentEncoding, ContentType, TransferEncoding, negotiate,
};

/// Errors that can occur while parsing an HTTP/1.x request head.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request is incomplete, more data needed")]
    Incomplete,

    #[error("HTTP parse error: {0}")]
    Parse(#[from] httparse::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// An HTTP request: method, target, headers and body.
///
/// # Examples
///
/// ```
/// use http_message::header::{Accept, ContentEncoding};
/// use http_message::http::Request;
///
/// let raw = b"GET /report HTTP/1.1\r\n\
///             Accept: text/html;q=0.5, application/json\r\n\
///             Accept-Encoding: gzip;q=0, br\r\n\
///             Authorization: Bearer abc123\r\n\r\n";
/// let (request, _offset) = Request::parse(raw).unwrap();
///
/// assert_eq!(request.preferred(&[Accept::TextHtml, Accept::ApplicationJson]), Some(&Accept::ApplicationJson));
/// assert!(!request.accepts_encoding(ContentEncoding::Gzip));
/// assert!(request.authorization().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    /// HTTP minor version: 0 for HTTP/1.0, 1 for HTTP/1.1.
    version: u8,
    headers: Headers,
    body: Bytes,
}

impl Request {
    /// Maximum number of headers accepted in one request head.
    const MAX_HEADERS: usize = 64;

    /// Creates an HTTP/1.1 request with no headers and an empty body.
    ///
    /// `target` may include a query string.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = split_target(target);
        Self {
            method,
            path,
            query,
            version: 1,
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Parses a request head from `buf`.
    ///
    /// Returns the request and the offset at which the body begins. Bytes after
    /// the head are copied into the request body as-is; header values that are
    /// not valid UTF-8 are dropped.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Incomplete`]: the head is not terminated yet.
    /// - [`RequestError::Parse`]: the head is malformed.
    /// - [`RequestError::MissingField`]: method, path or version is absent.
    pub fn parse(buf: &[u8]) -> Result<(Self, usize), RequestError> {
        let mut headers = [httparse::EMPTY_HEADER; Self::MAX_HEADERS];
        let mut raw = httparse::Request::new(&mut headers);

        let body_offset = match raw.parse(buf)? {
            httparse::Status::Complete(offset) => offset,
            httparse::Status::Partial => return Err(RequestError::Incomplete),
        };

        let method = match raw.method {
            Some(m) => m.parse::<Method>().unwrap_or_else(|never| match never {}),
            None => return Err(RequestError::MissingField { field: "method" }),
        };
        let target = raw.path.ok_or(RequestError::MissingField { field: "path" })?;
        let version = raw
            .version
            .ok_or(RequestError::MissingField { field: "version" })?;

        let mut header_map = Headers::with_capacity(raw.headers.len());
        header_map.extend(raw.headers.iter().filter_map(|header| {
            let value = std::str::from_utf8(header.value).ok()?;
            Some((header.name, value))
        }));

        let (path, query) = split_target(target);

        Ok((
            Self {
                method,
                path,
                query,
                version,
                headers: header_map,
                body: Bytes::copy_from_slice(&buf[body_offset..]),
            },
            body_offset,
        ))
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string (without the leading `?`), if any.
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// HTTP minor version (0 = HTTP/1.0, 1 = HTTP/1.1).
    pub fn version(&self) -> u8 {
        self.version
    }

    /// All header fields, in the order received.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Whatever followed the head in the parsed buffer, or the builder body.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// `Content-Length` parsed as a `usize`, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.headers.get("content-length")?.trim().parse().ok()
    }

    /// The credential in the `Authorization` header, if it parses.
    pub fn authorization(&self) -> Option<AuthorizationCredential> {
        AuthorizationCredential::from_request(self)
    }

    /// Negotiates the `Accept` header against `supported`.
    ///
    /// A request without `Accept` is treated as `*/*`, so the first supported
    /// entry is chosen.
    pub fn preferred<'a, T: AsRef<str>>(&self, supported: &'a [T]) -> Option<&'a T> {
        negotiate(self.headers.get("accept").unwrap_or("*/*"), supported)
    }

    /// Whether a response in `encoding` satisfies `Accept-Encoding`.
    ///
    /// A missing header accepts everything.
    pub fn accepts_encoding(&self, encoding: ContentEncoding) -> bool {
        encoding.is_acceptable(self.headers.get("accept-encoding").unwrap_or_default())
    }

    /// The known base type of the `Content-Type` header.
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_header_str(self.headers.get("content-type")?)
    }

    /// Whether `Transfer-Encoding` lists `chunked`.
    pub fn is_chunked(&self) -> bool {
        self.headers
            .get_all("transfer-encoding")
            .any(TransferEncoding::is_chunked)
    }
}

impl HasHeaders for Request {
    fn headers(&self) -> &Headers {
        &self.headers
    }
}

fn split_target(target: &str) -> (String, Option<String>) {
    match target.split_once('?') {
        Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
        None => (target.to_owned(), None),
    }
}
