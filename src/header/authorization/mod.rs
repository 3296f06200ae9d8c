//! `Authorization` header parsing.
//!
//! A header value is `<scheme> <credentials>`: the scheme token runs up to the
//! first space and is matched exactly (case-sensitive) against
//! [`AuthorizationScheme`]. The remainder goes to that scheme's grammar.
//!
//! | Scheme             | Credentials grammar                                  |
//! |--------------------|------------------------------------------------------|
//! | `ApiKey`           | opaque, taken verbatim                               |
//! | `Basic`            | base64 of `username:password`, padding optional      |
//! | `Bearer`           | opaque, taken verbatim                               |
//! | `Digest`           | `key=value` list, values optionally double-quoted    |
//! | `AWS4-HMAC-SHA256` | `Credential=…, SignedHeaders=…, Signature=<64 hex>`  |
//!
//! [`AuthorizationCredential::parse`] folds every failure into `None`;
//! [`AuthorizationCredential::try_parse`] reports why as an
//! [`AuthorizationError`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::http::{Headers, HasHeaders};

mod credential;
mod schemes;

pub use credential::{
    ApiKeyCredential, AuthorizationCredential, AwsCredential, BasicCredential, BearerCredential,
    DigestCredential, REDACTED, Sensitive,
};

/// Header name looked up by [`AuthorizationCredential::from_headers`].
pub const AUTHORIZATION: &str = "authorization";

/// The closed set of supported authorization schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuthorizationScheme {
    ApiKey,
    Basic,
    Bearer,
    Digest,
    /// AWS Signature Version 4.
    #[serde(rename = "AWS4-HMAC-SHA256")]
    Aws,
}

impl AuthorizationScheme {
    pub const ALL: [AuthorizationScheme; 5] = [
        Self::ApiKey,
        Self::Basic,
        Self::Bearer,
        Self::Digest,
        Self::Aws,
    ];

    /// Returns the scheme token as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "ApiKey",
            Self::Basic => "Basic",
            Self::Bearer => "Bearer",
            Self::Digest => "Digest",
            Self::Aws => "AWS4-HMAC-SHA256",
        }
    }

    /// Resolves a wire token. Matching is exact: `bearer` is not `Bearer`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scheme| scheme.as_str() == token)
    }
}

impl fmt::Display for AuthorizationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationScheme {
    type Err = AuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| AuthorizationError::UnknownScheme {
            scheme: s.to_owned(),
        })
    }
}

/// Why an `Authorization` header value did not yield a credential.
///
/// Messages never include credential material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("authorization header is empty")]
    Empty,

    #[error("authorization header has no space between scheme and credentials")]
    MissingCredentials,

    /// Carries the raw token; the message omits it.
    #[error("unsupported authorization scheme")]
    UnknownScheme { scheme: String },

    #[error("Basic credentials are not valid base64")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Basic credentials are not valid UTF-8")]
    InvalidUtf8,

    #[error("Basic credentials have no ':' between username and password")]
    MissingColon,

    #[error("malformed {scheme} parameter at position {position}")]
    MalformedParameter {
        scheme: AuthorizationScheme,
        position: usize,
    },

    #[error("{scheme} credentials missing required parameter: {name}")]
    MissingParameter {
        scheme: AuthorizationScheme,
        name: &'static str,
    },

    #[error("AWS signature must be exactly 64 hexadecimal characters")]
    InvalidSignature,
}

impl AuthorizationCredential {
    /// Parses a raw `Authorization` header value, reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`AuthorizationError::Empty`]: `header` is the empty string.
    /// - [`AuthorizationError::MissingCredentials`]: no space follows the scheme.
    /// - [`AuthorizationError::UnknownScheme`]: the scheme token is not supported.
    /// - any scheme-specific error from the credentials grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_message::header::{AuthorizationCredential, AuthorizationError};
    ///
    /// let credential = AuthorizationCredential::try_parse("Basic dXNlcjpwYXNz").unwrap();
    /// let AuthorizationCredential::Basic(basic) = credential else { unreachable!() };
    /// assert_eq!(basic.username(), "user");
    /// assert_eq!(basic.password(), "pass");
    ///
    /// assert_eq!(
    ///     AuthorizationCredential::try_parse("NoSpaceToken"),
    ///     Err(AuthorizationError::MissingCredentials)
    /// );
    /// ```
    pub fn try_parse(header: &str) -> Result<Self, AuthorizationError> {
        if header.is_empty() {
            return Err(AuthorizationError::Empty);
        }

        let (token, credentials) = header
            .split_once(' ')
            .ok_or(AuthorizationError::MissingCredentials)?;
        let scheme: AuthorizationScheme = token.parse()?;

        Ok(match scheme {
            AuthorizationScheme::ApiKey => Self::ApiKey(schemes::api_key(credentials)),
            AuthorizationScheme::Basic => Self::Basic(schemes::basic(credentials)?),
            AuthorizationScheme::Bearer => Self::Bearer(schemes::bearer(credentials)),
            AuthorizationScheme::Digest => Self::Digest(schemes::digest(credentials)?),
            AuthorizationScheme::Aws => Self::Aws(schemes::aws(credentials)?),
        })
    }

    /// Parses a raw `Authorization` header value, or returns `None` if it is
    /// empty, uses an unknown scheme, or breaks its scheme's grammar.
    ///
    /// ```
    /// use http_message::header::AuthorizationCredential;
    ///
    /// assert!(AuthorizationCredential::parse("Bearer abc.def.ghi").is_some());
    /// assert!(AuthorizationCredential::parse("").is_none());
    /// assert!(AuthorizationCredential::parse("UnknownScheme xyz").is_none());
    /// ```
    pub fn parse(header: &str) -> Option<Self> {
        match Self::try_parse(header) {
            Ok(credential) => Some(credential),
            Err(AuthorizationError::UnknownScheme { scheme }) => {
                debug!(
                    scheme_len = scheme.len(),
                    "authorization header rejected: unknown scheme"
                );
                None
            }
            Err(e) => {
                debug!(error = %e, "authorization header rejected");
                None
            }
        }
    }

    /// Looks up `Authorization` in `headers` (case-insensitive) and parses its
    /// first value.
    pub fn from_headers(headers: &Headers) -> Option<Self> {
        headers.get(AUTHORIZATION).and_then(Self::parse)
    }

    /// Parses the `Authorization` header carried by `request`.
    pub fn from_request<R>(request: &R) -> Option<Self>
    where
        R: HasHeaders + ?Sized,
    {
        Self::from_headers(request.headers())
    }
}

impl FromStr for AuthorizationCredential {
    type Err = AuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "Digest username=\"Mufasa\", realm=\"testrealm@host.com\", \
        nonce=\"dcd98b7102dd2f0e8b11d0f600bfb0c093\", uri=\"/dir/index.html\", qop=auth, \
        nc=0000000000000001, cnonce=\"0a4f113b\", response=\"6629fae49393a05397450978507c43ef\", \
        opaque=\"5ccc069c403eb9f0171a9517f4041dbb\", algorithm=MD5";

    const AWS: &str = "AWS4-HMAC-SHA256 \
        Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
        SignedHeaders=content-type;host;x-amz-date, \
        Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7";

    #[test]
    fn api_key() {
        let Some(AuthorizationCredential::ApiKey(c)) =
            AuthorizationCredential::parse("ApiKey my-super-secret-key")
        else {
            panic!("expected ApiKey credential");
        };
        assert_eq!(c.key(), "my-super-secret-key");
    }

    #[test]
    fn basic() {
        let Some(AuthorizationCredential::Basic(c)) =
            AuthorizationCredential::parse("Basic dXNlcjpwYXNz")
        else {
            panic!("expected Basic credential");
        };
        assert_eq!(c.username(), "user");
        assert_eq!(c.password(), "pass");
    }

    #[test]
    fn basic_empty_password() {
        let Some(AuthorizationCredential::Basic(c)) =
            AuthorizationCredential::parse("Basic dXNlcjo=")
        else {
            panic!("expected Basic credential");
        };
        assert_eq!(c.username(), "user");
        assert_eq!(c.password(), "");
    }

    #[test]
    fn basic_without_padding_or_with_whitespace() {
        let Some(AuthorizationCredential::Basic(c)) =
            AuthorizationCredential::parse("Basic dXNlcjo")
        else {
            panic!("expected Basic credential");
        };
        assert_eq!(c.username(), "user");
        assert_eq!(c.password(), "");

        let Some(AuthorizationCredential::Basic(c)) =
            AuthorizationCredential::parse("Basic  dXNlcjpwYXNz")
        else {
            panic!("expected Basic credential");
        };
        assert_eq!(c.username(), "user");
        assert_eq!(c.password(), "pass");
    }

    #[test]
    fn basic_failures() {
        assert_eq!(AuthorizationCredential::parse("Basic"), None);
        assert_eq!(AuthorizationCredential::parse("Basic invalid-base64"), None);
        assert_eq!(AuthorizationCredential::parse("Basic not-base64!!"), None);
        assert_eq!(
            AuthorizationCredential::try_parse("Basic dXNlcg=="),
            Err(AuthorizationError::MissingColon)
        );
        assert_eq!(
            AuthorizationCredential::try_parse("Basic "),
            Err(AuthorizationError::MissingColon)
        );
    }

    #[test]
    fn bearer() {
        let Some(AuthorizationCredential::Bearer(c)) =
            AuthorizationCredential::parse("Bearer my-secret-token")
        else {
            panic!("expected Bearer credential");
        };
        assert_eq!(c.token(), "my-secret-token");
    }

    #[test]
    fn bearer_keeps_remainder_verbatim() {
        let Some(AuthorizationCredential::Bearer(c)) =
            AuthorizationCredential::parse("Bearer  spaced token ")
        else {
            panic!("expected Bearer credential");
        };
        assert_eq!(c.token(), " spaced token ");
    }

    #[test]
    fn digest() {
        let Some(AuthorizationCredential::Digest(c)) = AuthorizationCredential::parse(DIGEST)
        else {
            panic!("expected Digest credential");
        };
        assert_eq!(c.username(), "Mufasa");
        assert_eq!(c.realm(), "testrealm@host.com");
        assert_eq!(c.nonce(), "dcd98b7102dd2f0e8b11d0f600bfb0c093");
        assert_eq!(c.uri(), "/dir/index.html");
        assert_eq!(c.response(), "6629fae49393a05397450978507c43ef");
        assert_eq!(c.qop(), "auth");
        assert_eq!(c.nc(), "0000000000000001");
        assert_eq!(c.cnonce(), "0a4f113b");
        assert_eq!(c.opaque(), Some("5ccc069c403eb9f0171a9517f4041dbb"));
        assert_eq!(c.algorithm(), Some("MD5"));
    }

    #[test]
    fn digest_without_optional_fields() {
        let header = "Digest username=u, realm=r, nonce=n, uri=/, response=x, qop=auth, nc=1, cnonce=c";
        let Some(AuthorizationCredential::Digest(c)) = AuthorizationCredential::parse(header)
        else {
            panic!("expected Digest credential");
        };
        assert_eq!(c.opaque(), None);
        assert_eq!(c.algorithm(), None);
    }

    #[test]
    fn digest_missing_any_required_key() {
        for key in ["username", "realm", "nonce", "uri", "response", "qop", "nc", "cnonce"] {
            let header = DIGEST
                .split(", ")
                .filter(|part| !part.trim_start_matches("Digest ").starts_with(&format!("{key}=")))
                .collect::<Vec<_>>()
                .join(", ");
            let header = if header.starts_with("Digest ") {
                header
            } else {
                format!("Digest {header}")
            };
            assert_eq!(
                AuthorizationCredential::try_parse(&header),
                Err(AuthorizationError::MissingParameter {
                    scheme: AuthorizationScheme::Digest,
                    name: key
                }),
                "header without {key}: {header}"
            );
        }
    }

    #[test]
    fn digest_trailing_garbage_part() {
        let header = format!("{DIGEST}, invalid_part");
        assert_eq!(AuthorizationCredential::parse(&header), None);
    }

    #[test]
    fn digest_quoted_comma_is_not_supported() {
        let header = "Digest username=\"a,b\", realm=r, nonce=n, uri=/, response=x, qop=auth, nc=1, cnonce=c";
        assert!(matches!(
            AuthorizationCredential::try_parse(header),
            Err(AuthorizationError::MalformedParameter { position: 0, .. })
        ));
    }

    #[test]
    fn aws() {
        let Some(AuthorizationCredential::Aws(c)) = AuthorizationCredential::parse(AWS) else {
            panic!("expected AWS credential");
        };
        assert_eq!(c.algorithm(), "AWS4-HMAC-SHA256");
        assert_eq!(
            c.credential_scope(),
            "AKIDEXAMPLE/20150830/us-east-1/service/aws4_request"
        );
        assert_eq!(c.signed_headers(), "content-type;host;x-amz-date");
        assert_eq!(
            c.signature(),
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn aws_failures() {
        let missing = AWS.replace("Signature=", "MissingSignature=");
        assert_eq!(
            AuthorizationCredential::try_parse(&missing),
            Err(AuthorizationError::MissingParameter {
                scheme: AuthorizationScheme::Aws,
                name: "Signature"
            })
        );

        let no_equals = AWS.replace(
            "Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7",
            "Signature-invalid-format-no-equals",
        );
        assert_eq!(AuthorizationCredential::parse(&no_equals), None);

        let split_value = AWS.replace(
            "Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7",
            "Signature=invalid,format",
        );
        assert!(matches!(
            AuthorizationCredential::try_parse(&split_value),
            Err(AuthorizationError::MalformedParameter { position: 3, .. })
        ));
    }

    #[test]
    fn aws_signature_must_be_64_hex() {
        let short = AWS.replace("b5d7", "b5d");
        assert_eq!(
            AuthorizationCredential::try_parse(&short),
            Err(AuthorizationError::InvalidSignature)
        );

        let non_hex = AWS.replace("b5d7", "b5dz");
        assert_eq!(
            AuthorizationCredential::try_parse(&non_hex),
            Err(AuthorizationError::InvalidSignature)
        );
    }

    #[test]
    fn dispatch_failures() {
        assert_eq!(AuthorizationCredential::try_parse(""), Err(AuthorizationError::Empty));
        assert_eq!(
            AuthorizationCredential::try_parse("NoSpaceToken"),
            Err(AuthorizationError::MissingCredentials)
        );
        assert_eq!(
            AuthorizationCredential::try_parse("Unknown scheme"),
            Err(AuthorizationError::UnknownScheme {
                scheme: "Unknown".to_owned()
            })
        );
        assert_eq!(AuthorizationCredential::parse("bearer token"), None);
    }

    #[test]
    fn error_messages_do_not_leak_credentials() {
        let err = AuthorizationCredential::try_parse("Basic c2VjcmV0").unwrap_err();
        assert!(!err.to_string().contains("secret"));
        assert!(!err.to_string().contains("c2VjcmV0"));

        let err = AuthorizationCredential::try_parse("sk-live-1234 trailing").unwrap_err();
        assert_eq!(
            err,
            AuthorizationError::UnknownScheme {
                scheme: "sk-live-1234".to_owned()
            }
        );
        assert!(!err.to_string().contains("sk-live-1234"));
    }

    #[test]
    fn from_headers_is_case_insensitive() {
        for name in ["authorization", "Authorization", "AuthORizAtion"] {
            let mut headers = Headers::new();
            headers.insert(name, "ApiKey my-key");
            let Some(AuthorizationCredential::ApiKey(c)) =
                AuthorizationCredential::from_headers(&headers)
            else {
                panic!("expected ApiKey credential for header name {name}");
            };
            assert_eq!(c.key(), "my-key");
        }
    }

    #[test]
    fn from_headers_uses_first_value() {
        let headers: Headers = [
            ("Authorization", "Bearer my-secret-token"),
            ("Authorization", "another-token"),
        ]
        .into_iter()
        .collect();
        let Some(AuthorizationCredential::Bearer(c)) =
            AuthorizationCredential::from_headers(&headers)
        else {
            panic!("expected Bearer credential");
        };
        assert_eq!(c.token(), "my-secret-token");
    }

    #[test]
    fn from_headers_absent_or_invalid() {
        let mut headers = Headers::new();
        assert_eq!(AuthorizationCredential::from_headers(&headers), None);

        headers.insert("X-Custom-Header", "value");
        assert_eq!(AuthorizationCredential::from_headers(&headers), None);

        headers.insert("Authorization", "");
        assert_eq!(AuthorizationCredential::from_headers(&headers), None);

        let mut headers = Headers::new();
        headers.insert("Authorization", "Basic");
        assert_eq!(AuthorizationCredential::from_headers(&headers), None);
    }

    #[test]
    fn from_request_delegates_to_headers() {
        let mut headers = Headers::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz");
        let credential = AuthorizationCredential::from_request(&headers).unwrap();
        assert_eq!(credential.scheme(), AuthorizationScheme::Basic);
    }

    #[test]
    fn parsing_is_pure() {
        assert_eq!(AuthorizationCredential::parse(AWS), AuthorizationCredential::parse(AWS));
        assert_eq!(
            AuthorizationCredential::parse(DIGEST),
            AuthorizationCredential::parse(DIGEST)
        );
    }

    #[test]
    fn scheme_tokens() {
        for scheme in AuthorizationScheme::ALL {
            assert_eq!(AuthorizationScheme::from_token(scheme.as_str()), Some(scheme));
        }
        assert_eq!(AuthorizationScheme::from_token("basic"), None);
        assert_eq!("AWS4-HMAC-SHA256".parse(), Ok(AuthorizationScheme::Aws));
    }
}
