//! `Accept` header parsing and content negotiation.
//!
//! Client preferences are ordered by quality factor first and by
//! [`Specificity`] second; the server's supported list breaks any remaining
//! tie because it is scanned in caller order for each preference.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UnknownToken;

/// Media types this crate knows how to negotiate by name.
///
/// Arbitrary media types can be negotiated with [`negotiate`]; this enum is a
/// convenience for the common cases.
///
/// # Examples
///
/// ```
/// use http_message::header::Accept;
///
/// let supported = [Accept::ApplicationJson, Accept::ApplicationXml, Accept::TextHtml];
/// let best = Accept::best_match("text/html;q=0.8, application/json;q=0.9", &supported);
/// assert_eq!(best, Some(Accept::ApplicationJson));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Accept {
    #[serde(rename = "application/json")]
    ApplicationJson,
    #[serde(rename = "application/xml")]
    ApplicationXml,
    #[serde(rename = "text/html")]
    TextHtml,
    #[serde(rename = "text/plain")]
    TextPlain,
}

impl Accept {
    /// Returns the media type string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationJson => "application/json",
            Self::ApplicationXml => "application/xml",
            Self::TextHtml => "text/html",
            Self::TextPlain => "text/plain",
        }
    }

    /// Picks the best supported type for the raw `Accept` header, or `None`
    /// when nothing the client listed is supported.
    pub fn best_match(accept_header: &str, supported: &[Accept]) -> Option<Accept> {
        negotiate(accept_header, supported).copied()
    }
}

impl fmt::Display for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Accept {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Accept {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application/json" => Ok(Self::ApplicationJson),
            "application/xml" => Ok(Self::ApplicationXml),
            "text/html" => Ok(Self::TextHtml),
            "text/plain" => Ok(Self::TextPlain),
            _ => Err(UnknownToken::new("Accept", s)),
        }
    }
}

/// How narrowly a media range pins down a type.
///
/// Ordered so that a more specific range compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// `*/*`
    Any = 0,
    /// `type/*`
    Type = 1,
    /// `type/subtype`
    Exact = 2,
}

impl Specificity {
    fn of(media_range: &str) -> Self {
        if media_range == "*/*" {
            Self::Any
        } else if media_range.ends_with("/*") {
            Self::Type
        } else {
            Self::Exact
        }
    }
}

/// One client preference parsed from an `Accept` header entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MimeTypePreference {
    media_type: String,
    quality: f64,
    specificity: Specificity,
}

impl MimeTypePreference {
    /// Parses a raw `Accept` header into preferences, most preferred first.
    ///
    /// Entries are stably sorted by descending quality, then descending
    /// specificity. Entries with an empty media type are dropped; a missing or
    /// unparsable `q` counts as `1.0`.
    ///
    /// ```
    /// use http_message::header::{MimeTypePreference, Specificity};
    ///
    /// let prefs = MimeTypePreference::parse_header("*/*;q=0.8, text/*;q=0.8, text/html");
    /// let order: Vec<_> = prefs.iter().map(|p| p.media_type()).collect();
    /// assert_eq!(order, ["text/html", "text/*", "*/*"]);
    /// assert_eq!(prefs[2].specificity(), Specificity::Any);
    /// ```
    pub fn parse_header(header: &str) -> Vec<Self> {
        let mut preferences: Vec<Self> = header
            .split(',')
            .filter_map(|entry| {
                let (media_type, quality) = super::split_weighted(entry);
                if media_type.is_empty() {
                    return None;
                }
                Some(Self {
                    media_type: media_type.to_owned(),
                    quality,
                    specificity: Specificity::of(media_type),
                })
            })
            .collect();

        preferences.sort_by(|a, b| {
            b.quality
                .partial_cmp(&a.quality)
                .unwrap_or(Ordering::Equal)
                .then(b.specificity.cmp(&a.specificity))
        });

        preferences
    }

    /// The media range as written by the client, trimmed.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The declared `q` value (not clamped).
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Tie-breaker among equal qualities: exact beats `type/*` beats `*/*`.
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Returns `true` if this preference admits `supported`.
    ///
    /// `*/*` admits everything, an exact string admits itself and `type/*`
    /// admits anything starting with `type/`.
    pub fn matches(&self, supported: &str) -> bool {
        if self.specificity == Specificity::Any || self.media_type == supported {
            return true;
        }

        match self.media_type.strip_suffix('*') {
            Some(prefix) if self.specificity == Specificity::Type => supported.starts_with(prefix),
            _ => false,
        }
    }
}

/// Returns the first entry of `supported` that satisfies the highest-ranked
/// client preference in `accept_header` that anything satisfies.
///
/// `supported` is scanned in the order given for every preference, so it acts
/// as the final tie-break. A preference with `q=0` still matches.
///
/// ```
/// use http_message::header::negotiate;
///
/// let supported = ["application/json", "text/csv"];
/// assert_eq!(negotiate("text/*", &supported), Some(&"text/csv"));
/// assert_eq!(negotiate("image/png", &supported), None);
/// ```
pub fn negotiate<'a, T>(accept_header: &str, supported: &'a [T]) -> Option<&'a T>
where
    T: AsRef<str>,
{
    let preferences = MimeTypePreference::parse_header(accept_header);

    for preference in &preferences {
        if let Some(found) = supported
            .iter()
            .find(|candidate| preference.matches(candidate.as_ref()))
        {
            let selected: &str = found.as_ref();
            tracing::trace!(
                preference = preference.media_type(),
                quality = preference.quality(),
                selected,
                "accept negotiated"
            );
            return Some(found);
        }
    }

    tracing::trace!(
        preferences = preferences.len(),
        supported = supported.len(),
        "accept negotiation found no match"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Accept; 3] = [Accept::ApplicationJson, Accept::ApplicationXml, Accept::TextHtml];

    #[test]
    fn simple_matches() {
        assert_eq!(Accept::best_match("application/json", &ALL), Some(Accept::ApplicationJson));
        assert_eq!(Accept::best_match("text/html", &ALL), Some(Accept::TextHtml));
    }

    #[test]
    fn quality_orders_preferences() {
        assert_eq!(
            Accept::best_match("text/html;q=0.8, application/json;q=0.9", &ALL),
            Some(Accept::ApplicationJson)
        );
        assert_eq!(
            Accept::best_match("text/html;q=0.9, application/json;q=0.8", &ALL),
            Some(Accept::TextHtml)
        );
    }

    #[test]
    fn specific_type_beats_lower_wildcard() {
        assert_eq!(
            Accept::best_match("application/json, */*;q=0.8", &ALL),
            Some(Accept::ApplicationJson)
        );
    }

    #[test]
    fn full_wildcard_takes_first_supported() {
        let supported = [Accept::TextPlain, Accept::ApplicationJson];
        assert_eq!(Accept::best_match("*/*", &supported), Some(Accept::TextPlain));
    }

    #[test]
    fn type_wildcard() {
        let supported = [Accept::ApplicationJson, Accept::TextPlain];
        assert_eq!(Accept::best_match("text/*", &supported), Some(Accept::TextPlain));
    }

    #[test]
    fn no_match() {
        assert_eq!(Accept::best_match("image/png", &ALL), None);
        assert_eq!(Accept::best_match("", &ALL), None);
    }

    #[test]
    fn browser_header() {
        let header = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
        let supported = [Accept::ApplicationJson, Accept::ApplicationXml];
        assert_eq!(Accept::best_match(header, &supported), Some(Accept::ApplicationXml));
    }

    #[test]
    fn unsupported_high_quality_type_is_skipped() {
        let supported = [Accept::ApplicationJson, Accept::TextHtml];
        assert_eq!(
            Accept::best_match("image/webp;q=1.0, application/json;q=0.8", &supported),
            Some(Accept::ApplicationJson)
        );
    }

    #[test]
    fn equal_quality_keeps_header_order() {
        let header = "text/html, application/xml;q=0.9, application/json;q=0.9";
        let supported = [Accept::ApplicationJson, Accept::ApplicationXml];
        assert_eq!(Accept::best_match(header, &supported), Some(Accept::ApplicationXml));
    }

    #[test]
    fn zero_quality_still_matches() {
        assert_eq!(
            Accept::best_match("application/json;q=0", &ALL),
            Some(Accept::ApplicationJson)
        );
    }

    #[test]
    fn wildcard_prefix_requires_slash() {
        let pref = &MimeTypePreference::parse_header("text/*")[0];
        assert!(pref.matches("text/plain"));
        assert!(!pref.matches("textual/plain"));
        assert!(!pref.matches("application/json"));
    }

    #[test]
    fn sort_is_stable_within_equal_rank() {
        let prefs = MimeTypePreference::parse_header("b/b;q=0.5, a/a;q=0.5, c/*;q=0.5");
        let order: Vec<_> = prefs.iter().map(MimeTypePreference::media_type).collect();
        assert_eq!(order, ["b/b", "a/a", "c/*"]);
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let prefs = MimeTypePreference::parse_header(", ;q=0.3, text/plain;q=abc");
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].media_type(), "text/plain");
        assert_eq!(prefs[0].quality(), 1.0);
    }

    #[test]
    fn generic_supported_list() {
        let supported = vec![String::from("text/csv"), String::from("application/pdf")];
        let found = negotiate("application/*;q=0.9, text/csv;q=0.5", &supported);
        assert_eq!(found.map(String::as_str), Some("application/pdf"));
    }

    #[test]
    fn negotiation_is_pure() {
        let header = "text/*;q=0.4, application/xml";
        assert_eq!(Accept::best_match(header, &ALL), Accept::best_match(header, &ALL));
        assert_eq!(
            MimeTypePreference::parse_header(header),
            MimeTypePreference::parse_header(header)
        );
    }

    #[test]
    fn parse_round_trips_known_values() {
        assert_eq!("text/plain".parse::<Accept>(), Ok(Accept::TextPlain));
        let err = "text/PLAIN".parse::<Accept>().unwrap_err();
        assert_eq!(err.kind(), "Accept");
        assert_eq!(err.token(), "text/PLAIN");
    }
}
