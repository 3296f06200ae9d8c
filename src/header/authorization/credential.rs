//! Structured credentials produced by the `Authorization` parser.
//!
//! Every credential is immutable once built: fields are private and exposed
//! through read-only accessors. Secret material is held in [`Sensitive`], whose
//! `Debug` and `Serialize` output never reveals the value.

use std::fmt;

use serde::{Serialize, Serializer};

use super::AuthorizationScheme;

/// Placeholder written wherever a [`Sensitive`] value would be formatted.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never reach logs or diagnostic output.
///
/// `Debug` prints [`REDACTED`] and `Serialize` emits the same placeholder.
/// It has no `Display` impl; call [`expose`](Self::expose) to read the value.
///
/// # Examples
///
/// ```
/// use http_message::header::Sensitive;
///
/// let secret = Sensitive::new(String::from("hunter2"));
/// assert_eq!(format!("{secret:?}"), "[REDACTED]");
/// assert_eq!(secret.expose(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wraps `value` so formatting and serialization hide it.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrows the protected value.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Unwraps the protected value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// `Authorization: ApiKey <key>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyCredential {
    key: Sensitive<String>,
}

impl ApiKeyCredential {
    /// Wraps an opaque API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Sensitive::new(key.into()),
        }
    }

    /// The key exactly as it followed `ApiKey `.
    pub fn key(&self) -> &str {
        self.key.expose()
    }
}

/// `Authorization: Basic <base64(username:password)>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicCredential {
    username: String,
    password: Sensitive<String>,
}

impl BasicCredential {
    /// Builds a credential from an already-decoded pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Sensitive::new(password.into()),
        }
    }

    /// Everything before the first `:` of the decoded payload.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// May be empty: `user:` is a valid credential.
    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// `Authorization: Bearer <token>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BearerCredential {
    token: Sensitive<String>,
}

impl BearerCredential {
    /// Wraps an opaque bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Sensitive::new(token.into()),
        }
    }

    /// The token exactly as it followed `Bearer `.
    pub fn token(&self) -> &str {
        self.token.expose()
    }
}

/// `Authorization: Digest ...` (RFC 7616).
///
/// The eight fields passed to [`new`](Self::new) are mandatory on the wire;
/// `opaque` and `algorithm` are attached with the `with_*` methods, each of
/// which returns a new credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestCredential {
    username: String,
    realm: String,
    nonce: Sensitive<String>,
    uri: String,
    response: Sensitive<String>,
    qop: String,
    nc: Sensitive<String>,
    cnonce: Sensitive<String>,
    opaque: Option<String>,
    algorithm: Option<String>,
}

impl DigestCredential {
    /// Builds a credential from the mandatory fields, unquoted.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        username: impl Into<String>,
        realm: impl Into<String>,
        nonce: impl Into<String>,
        uri: impl Into<String>,
        response: impl Into<String>,
        qop: impl Into<String>,
        nc: impl Into<String>,
        cnonce: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            realm: realm.into(),
            nonce: Sensitive::new(nonce.into()),
            uri: uri.into(),
            response: Sensitive::new(response.into()),
            qop: qop.into(),
            nc: Sensitive::new(nc.into()),
            cnonce: Sensitive::new(cnonce.into()),
            opaque: None,
            algorithm: None,
        }
    }

    /// Returns a copy carrying the server's `opaque` value.
    #[must_use]
    pub fn with_opaque(self, opaque: impl Into<String>) -> Self {
        Self {
            opaque: Some(opaque.into()),
            ..self
        }
    }

    /// Returns a copy carrying the `algorithm` parameter, e.g. `MD5`.
    #[must_use]
    pub fn with_algorithm(self, algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            ..self
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Protection space the client is authenticating against.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn nonce(&self) -> &str {
        self.nonce.expose()
    }

    /// The request target the digest covers.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The client's request digest, as sent.
    pub fn response(&self) -> &str {
        self.response.expose()
    }

    pub fn qop(&self) -> &str {
        &self.qop
    }

    /// Nonce count, as sent (not validated as hex).
    pub fn nc(&self) -> &str {
        self.nc.expose()
    }

    pub fn cnonce(&self) -> &str {
        self.cnonce.expose()
    }

    /// `None` unless the client echoed one back.
    pub fn opaque(&self) -> Option<&str> {
        self.opaque.as_deref()
    }

    /// `None` when the parameter was absent; RFC 7616 then implies `MD5`.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }
}

/// `Authorization: AWS4-HMAC-SHA256 Credential=..., SignedHeaders=..., Signature=...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwsCredential {
    algorithm: String,
    credential_scope: Sensitive<String>,
    signed_headers: String,
    signature: Sensitive<String>,
}

impl AwsCredential {
    /// Builds a credential from the parsed header parameters.
    pub fn new(
        algorithm: impl Into<String>,
        credential_scope: impl Into<String>,
        signed_headers: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            credential_scope: Sensitive::new(credential_scope.into()),
            signed_headers: signed_headers.into(),
            signature: Sensitive::new(signature.into()),
        }
    }

    /// Always `AWS4-HMAC-SHA256` for parsed credentials.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// `<access-key>/<date>/<region>/<service>/aws4_request`, unparsed.
    pub fn credential_scope(&self) -> &str {
        self.credential_scope.expose()
    }

    /// `;`-separated header names, unparsed.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// 64 hex digits; case is preserved.
    pub fn signature(&self) -> &str {
        self.signature.expose()
    }
}

/// A parsed `Authorization` header, one variant per supported scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scheme")]
pub enum AuthorizationCredential {
    ApiKey(ApiKeyCredential),
    Basic(BasicCredential),
    Bearer(BearerCredential),
    Digest(DigestCredential),
    #[serde(rename = "AWS4-HMAC-SHA256")]
    Aws(AwsCredential),
}

impl AuthorizationCredential {
    /// The scheme this credential was parsed from.
    pub fn scheme(&self) -> AuthorizationScheme {
        match self {
            Self::ApiKey(_) => AuthorizationScheme::ApiKey,
            Self::Basic(_) => AuthorizationScheme::Basic,
            Self::Bearer(_) => AuthorizationScheme::Bearer,
            Self::Digest(_) => AuthorizationScheme::Digest,
            Self::Aws(_) => AuthorizationScheme::Aws,
        }
    }
}
