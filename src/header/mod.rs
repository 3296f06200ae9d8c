//! Typed header values and the parsing / negotiation logic built on them.
//!
//! - [`Accept`] and [`negotiate`]: `Accept` content negotiation.
//! - [`ContentEncoding`]: `Accept-Encoding` acceptability checks.
//! - [`AuthorizationCredential`]: `Authorization` header parsing.
//! - [`ContentType`] and [`TransferEncoding`]: supporting value enums.

pub mod accept;
pub mod authorization;
pub mod content_encoding;
pub mod content_type;
pub mod transfer_encoding;

pub use accept::{Accept, MimeTypePreference, Specificity, negotiate};
pub use authorization::{
    ApiKeyCredential, AuthorizationCredential, AuthorizationError, AuthorizationScheme,
    AwsCredential, BasicCredential, BearerCredential, DigestCredential, Sensitive,
};
pub use content_encoding::{ContentEncoding, EncodingPreferences};
pub use content_type::ContentType;
pub use transfer_encoding::TransferEncoding;

use thiserror::Error;

/// A string that names none of an enum's known wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} value: {token:?}")]
pub struct UnknownToken {
    kind: &'static str,
    token: String,
}

impl UnknownToken {
    pub(crate) fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_owned(),
        }
    }

    /// Which value set was searched, e.g. `"Content-Type"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input, as given.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Default weight for a list entry that carries no usable `q` parameter.
pub(crate) const DEFAULT_QUALITY: f64 = 1.0;

/// Splits one comma-separated list entry into its trimmed head and the
/// quality declared by its parameters.
///
/// A parameter counts as the weight when its trimmed text starts with `q=`;
/// the last such parameter wins. Everything else after the head is ignored.
pub(crate) fn split_weighted(entry: &str) -> (&str, f64) {
    let mut segments = entry.split(';');
    let head = segments.next().unwrap_or_default().trim();

    let quality = segments
        .filter_map(|param| param.trim_start().strip_prefix("q="))
        .last()
        .map_or(DEFAULT_QUALITY, parse_quality);

    (head, quality)
}

/// Parses the text following `q=`.
///
/// Only the leading run of digits and dots is considered. An empty run is
/// unparsable and falls back to [`DEFAULT_QUALITY`]; otherwise the longest
/// numeric prefix (at most one dot) is taken, so `0.8.1` reads as `0.8` and a
/// bare `.` reads as `0.0`. Values are not clamped.
pub(crate) fn parse_quality(raw: &str) -> f64 {
    let run_len = raw
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    if run_len == 0 {
        return DEFAULT_QUALITY;
    }

    let run = &raw[..run_len];
    let numeric = match run.match_indices('.').nth(1) {
        Some((second_dot, _)) => &run[..second_dot],
        None => run,
    };

    numeric.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_entry_without_params() {
        assert_eq!(split_weighted(" text/html "), ("text/html", 1.0));
    }

    #[test]
    fn weighted_entry_ignores_other_params() {
        assert_eq!(split_weighted("text/html;level=1; q=0.4"), ("text/html", 0.4));
        assert_eq!(split_weighted("text/html;q=0.2;q=0.7"), ("text/html", 0.7));
    }

    #[test]
    fn quality_prefixes() {
        assert_eq!(parse_quality("0.5"), 0.5);
        assert_eq!(parse_quality("1"), 1.0);
        assert_eq!(parse_quality("0.8.1"), 0.8);
        assert_eq!(parse_quality("0.3xyz"), 0.3);
        assert_eq!(parse_quality("."), 0.0);
        assert_eq!(parse_quality("abc"), DEFAULT_QUALITY);
        assert_eq!(parse_quality(""), DEFAULT_QUALITY);
    }

    #[test]
    fn quality_is_not_clamped() {
        assert_eq!(parse_quality("3.5"), 3.5);
    }
}
