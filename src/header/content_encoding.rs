//! Content codings and `Accept-Encoding` acceptability.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UnknownToken;

/// A content coding as registered for `Content-Encoding` / `Accept-Encoding`.
///
/// # Examples
///
/// ```
/// use http_message::header::ContentEncoding;
///
/// assert!(!ContentEncoding::Gzip.is_acceptable("gzip;q=0, deflate"));
/// assert!(ContentEncoding::Gzip.is_acceptable("x-gzip, deflate"));
/// assert!(ContentEncoding::Deflate.is_acceptable("gzip, br"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    Gzip,
    Compress,
    Deflate,
    #[serde(rename = "br")]
    Brotli,
    Zstd,
    Identity,
    /// Dictionary-compressed Brotli.
    Dcb,
    /// Dictionary-compressed Zstandard.
    Dcz,
}

impl ContentEncoding {
    pub const ALL: [ContentEncoding; 8] = [
        Self::Gzip,
        Self::Compress,
        Self::Deflate,
        Self::Brotli,
        Self::Zstd,
        Self::Identity,
        Self::Dcb,
        Self::Dcz,
    ];

    /// Returns the registered coding token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Compress => "compress",
            Self::Deflate => "deflate",
            Self::Brotli => "br",
            Self::Zstd => "zstd",
            Self::Identity => "identity",
            Self::Dcb => "dcb",
            Self::Dcz => "dcz",
        }
    }

    /// Legacy tokens clients may send for the same coding.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Gzip => &["x-gzip"],
            _ => &[],
        }
    }

    /// Decides whether a response in this coding is acceptable to a client
    /// that sent `accept_encoding`.
    ///
    /// The canonical token is looked up first, then each alias; the first one
    /// listed decides (`q > 0`). Failing that, a `*` entry decides. A coding the
    /// header does not mention at all is acceptable, as is every coding when the
    /// header is empty.
    pub fn is_acceptable(self, accept_encoding: &str) -> bool {
        let preferences = EncodingPreferences::parse(accept_encoding);

        let named = std::iter::once(self.as_str())
            .chain(self.aliases().iter().copied())
            .find_map(|name| preferences.quality(name).map(|q| (name, q)));

        if let Some((name, quality)) = named {
            tracing::trace!(encoding = self.as_str(), matched = name, quality, "accept-encoding entry");
            return quality > 0.0;
        }

        if let Some(quality) = preferences.quality("*") {
            tracing::trace!(encoding = self.as_str(), quality, "accept-encoding wildcard");
            return quality > 0.0;
        }

        true
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ContentEncoding {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ContentEncoding {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| UnknownToken::new("Content-Encoding", s))
    }
}

/// Coding name → quality, as declared by one `Accept-Encoding` header.
///
/// Names are stored lowercased; when a name is listed twice the later entry
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodingPreferences {
    qualities: HashMap<String, f64>,
}

impl EncodingPreferences {
    /// Parses a raw `Accept-Encoding` header. Entries with an empty coding
    /// name are dropped.
    pub fn parse(header: &str) -> Self {
        let qualities = header
            .split(',')
            .map(super::split_weighted)
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, quality)| (name.to_ascii_lowercase(), quality))
            .collect();

        Self { qualities }
    }

    /// Returns the quality declared for `name` (case-insensitive).
    pub fn quality(&self, name: &str) -> Option<f64> {
        self.qualities.get(&name.to_ascii_lowercase()).copied()
    }

    /// Distinct coding names declared, `*` included.
    pub fn len(&self) -> usize {
        self.qualities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualities.is_empty()
    }
}
