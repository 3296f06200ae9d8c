//! Common `Content-Type` media types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::UnknownToken;

/// A known `Content-Type` base type.
///
/// # Examples
///
/// ```
/// use http_message::header::ContentType;
///
/// let ct = ContentType::from_header_str("application/json; charset=utf-8");
/// assert_eq!(ct, Some(ContentType::ApplicationJson));
/// assert_eq!(ContentType::charset("text/html; CharSet=ISO-8859-1").as_deref(), Some("ISO-8859-1"));
/// assert_eq!(ContentType::TextHtml.with_charset("utf-8"), "text/html; charset=utf-8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    // Text
    #[serde(rename = "text/plain")]
    TextPlain,
    #[serde(rename = "text/html")]
    TextHtml,
    #[serde(rename = "text/css")]
    TextCss,
    #[serde(rename = "text/csv")]
    TextCsv,
    #[serde(rename = "text/xml")]
    TextXml,

    // Application
    #[serde(rename = "application/json")]
    ApplicationJson,
    #[serde(rename = "application/xml")]
    ApplicationXml,
    #[serde(rename = "application/x-www-form-urlencoded")]
    ApplicationFormUrlencoded,
    #[serde(rename = "application/pdf")]
    ApplicationPdf,
    #[serde(rename = "application/javascript")]
    ApplicationJavascript,
    #[serde(rename = "application/octet-stream")]
    ApplicationOctetStream,

    // Multipart
    #[serde(rename = "multipart/form-data")]
    MultipartFormData,

    // Image
    #[serde(rename = "image/jpeg")]
    ImageJpeg,
    #[serde(rename = "image/png")]
    ImagePng,
    #[serde(rename = "image/gif")]
    ImageGif,
    #[serde(rename = "image/svg+xml")]
    ImageSvg,
}

impl ContentType {
    pub const ALL: [ContentType; 16] = [
        Self::TextPlain,
        Self::TextHtml,
        Self::TextCss,
        Self::TextCsv,
        Self::TextXml,
        Self::ApplicationJson,
        Self::ApplicationXml,
        Self::ApplicationFormUrlencoded,
        Self::ApplicationPdf,
        Self::ApplicationJavascript,
        Self::ApplicationOctetStream,
        Self::MultipartFormData,
        Self::ImageJpeg,
        Self::ImagePng,
        Self::ImageGif,
        Self::ImageSvg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::TextHtml => "text/html",
            Self::TextCss => "text/css",
            Self::TextCsv => "text/csv",
            Self::TextXml => "text/xml",
            Self::ApplicationJson => "application/json",
            Self::ApplicationXml => "application/xml",
            Self::ApplicationFormUrlencoded => "application/x-www-form-urlencoded",
            Self::ApplicationPdf => "application/pdf",
            Self::ApplicationJavascript => "application/javascript",
            Self::ApplicationOctetStream => "application/octet-stream",
            Self::MultipartFormData => "multipart/form-data",
            Self::ImageJpeg => "image/jpeg",
            Self::ImagePng => "image/png",
            Self::ImageGif => "image/gif",
            Self::ImageSvg => "image/svg+xml",
        }
    }

    /// Resolves the base type of a raw `Content-Type` header value.
    ///
    /// The base type is the first non-empty `;`-delimited segment, compared
    /// exactly (no trimming, case-sensitive).
    pub fn from_header_str(header: &str) -> Option<Self> {
        let base = header.split(';').find(|segment| !segment.is_empty())?;
        base.parse().ok()
    }

    /// Extracts the `charset` parameter from a raw `Content-Type` header value.
    ///
    /// The parameter name is matched case-insensitively anywhere in the value;
    /// the charset runs to the next `;` and is trimmed.
    pub fn charset(header: &str) -> Option<String> {
        const KEY: &[u8] = b"charset=";

        let bytes = header.as_bytes();
        let mut from = 0;
        while let Some(offset) = bytes[from..]
            .windows(KEY.len())
            .position(|window| window.eq_ignore_ascii_case(KEY))
        {
            let start = from + offset + KEY.len();
            let rest = &header[start..];
            let value = rest.split(';').next().unwrap_or_default();
            if !value.is_empty() {
                return Some(value.trim().to_owned());
            }
            from = start;
        }

        None
    }

    /// Formats this type with a `charset` parameter.
    pub fn with_charset(self, charset: &str) -> String {
        format!("{}; charset={charset}", self.as_str())
    }

    /// `application/json` only.
    pub fn is_json(self) -> bool {
        self == Self::ApplicationJson
    }

    /// `application/xml` or `text/xml`.
    pub fn is_xml(self) -> bool {
        matches!(self, Self::ApplicationXml | Self::TextXml)
    }

    /// Any `text/*` type.
    pub fn is_text(self) -> bool {
        self.as_str().starts_with("text/")
    }

    /// Any `multipart/*` type.
    pub fn is_multipart(self) -> bool {
        self.as_str().starts_with("multipart/")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ContentType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| UnknownToken::new("Content-Type", s))
    }
}
