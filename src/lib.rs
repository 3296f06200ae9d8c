//! # http-message
//!
//! Typed HTTP header values on top of a small request model.
//!
//! - [`header::AuthorizationCredential`] parses `Authorization` into one of
//!   five scheme-specific credentials (ApiKey, Basic, Bearer, Digest, AWS SigV4).
//! - [`header::Accept`] / [`header::negotiate`] pick a response media type from
//!   an `Accept` header.
//! - [`header::ContentEncoding`] decides whether a coding satisfies
//!   `Accept-Encoding`.
//!
//! Every parser is a pure function of its input: nothing is cached, nothing is
//! shared, and failures are reported as `None` (or a typed error through the
//! `try_*` variants) rather than panics.
//!
//! ## Quick Start
//!
//! ```rust
//! use http_message::header::{Accept, AuthorizationCredential, ContentEncoding};
//! use http_message::http::Request;
//!
//! let request = Request::new("GET".parse().unwrap(), "/users")
//!     .header("Authorization", "Basic dXNlcjpwYXNz")
//!     .header("Accept", "application/json, */*;q=0.8")
//!     .header("Accept-Encoding", "gzip, *;q=0");
//!
//! match request.authorization() {
//!     Some(AuthorizationCredential::Basic(basic)) => assert_eq!(basic.username(), "user"),
//!     other => panic!("unexpected credential: {other:?}"),
//! }
//!
//! let supported = [Accept::TextHtml, Accept::ApplicationJson];
//! assert_eq!(request.preferred(&supported), Some(&Accept::ApplicationJson));
//! assert!(!request.accepts_encoding(ContentEncoding::Brotli));
//! ```

pub mod header;
pub mod http;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use header::{
    Accept, AuthorizationCredential, AuthorizationError, AuthorizationScheme, ContentEncoding,
    ContentType, TransferEncoding, UnknownToken,
};
pub use http::{HasHeaders, Headers, Method, Request};
