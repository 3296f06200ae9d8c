//! The header collection the typed header helpers read from.
//!
//! Names compare ASCII case-insensitively ([RFC 9110 §5.1]). A name may
//! repeat; single-value lookups see the first occurrence, which is also what
//! the `Authorization`, `Accept` and `Accept-Encoding` helpers use.
//!
//! [RFC 9110 §5.1]: https://www.rfc-editor.org/rfc/rfc9110#section-5.1

use std::fmt;

/// One `name: value` line, stored as received.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    value: String,
}

impl Field {
    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered header fields with case-insensitive lookup.
///
/// # Examples
///
/// ```
/// use http_message::http::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("Accept-Encoding", "gzip, br");
/// headers.insert("X-Custom", "first");
/// headers.insert("x-custom", "second");
///
/// assert_eq!(headers.get("accept-encoding"), Some("gzip, br"));
/// let all: Vec<_> = headers.get_all("X-CUSTOM").collect();
/// assert_eq!(all, ["first", "second"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<Field>,
}

impl Headers {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty collection with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field; earlier values for the same name are kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
    }

    /// The first value stored under `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.is(name))
            .map(|field| field.value.as_str())
    }

    /// Every value stored under `name`, in insertion order.
    pub fn get_all<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.fields
            .iter()
            .filter(move |field| field.is(name))
            .map(|field| field.value.as_str())
    }

    /// Drops every field stored under `name`; `true` if anything went.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| !field.is(name));
        self.fields.len() != before
    }

    /// Whether at least one field is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.is(name))
    }

    /// Field count; a repeated name counts once per occurrence.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(name, value)` pairs in insertion order, names as received.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.extend(iter);
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}

/// Anything that carries a header collection, such as a [`Request`].
///
/// Header-driven helpers like
/// [`AuthorizationCredential::from_request`](crate::header::AuthorizationCredential::from_request)
/// accept any implementor.
///
/// [`Request`]: crate::http::Request
pub trait HasHeaders {
    fn headers(&self) -> &Headers;
}

impl HasHeaders for Headers {
    fn headers(&self) -> &Headers {
        self
    }
}
