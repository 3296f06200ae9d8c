//! Transfer codings (hop-by-hop).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UnknownToken;

/// A transfer coding as it appears in `Transfer-Encoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferEncoding {
    Chunked,
    Compress,
    Deflate,
    Gzip,
}

impl TransferEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chunked => "chunked",
            Self::Compress => "compress",
            Self::Deflate => "deflate",
            Self::Gzip => "gzip",
        }
    }

    /// Returns `true` if `chunked` is among the codings listed in a raw
    /// `Transfer-Encoding` header (case-insensitive).
    ///
    /// ```
    /// use http_message::header::TransferEncoding;
    ///
    /// assert!(TransferEncoding::is_chunked("gzip, chunked"));
    /// assert!(!TransferEncoding::is_chunked("gzip, deflate"));
    /// ```
    pub fn is_chunked(header: &str) -> bool {
        header
            .split(',')
            .any(|coding| coding.trim().eq_ignore_ascii_case(Self::Chunked.as_str()))
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TransferEncoding {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for TransferEncoding {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chunked" => Ok(Self::Chunked),
            "compress" => Ok(Self::Compress),
            "deflate" => Ok(Self::Deflate),
            "gzip" => Ok(Self::Gzip),
            _ => Err(UnknownToken::new("Transfer-Encoding", s)),
        }
    }
}
