//! Outbound request types: method, header map, entity and the request itself.

use crate::network::error::Error;
use heapless::{FnvIndexMap, String};

/// Maximum number of distinct headers a [`HeaderMap`] can hold.
pub const MAX_HEADERS: usize = 16;
/// Maximum length of a header name in bytes.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value in bytes.
pub const MAX_HEADER_VALUE_LEN: usize = 256;

/// Content type attached to text entities.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=UTF-8";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Returns the method name as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Method {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// A fixed-capacity mapping from header name to header value.
///
/// Keys are unique and compared exactly as given; inserting an existing name
/// replaces its value. Iteration order is insertion order, but callers should
/// not rely on it.
///
/// # Examples
///
/// ```rust
/// use libhttp::network::application::http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("Accept", "text/plain").unwrap();
/// headers.insert("Accept", "application/json").unwrap();
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get("Accept"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: FnvIndexMap<String<MAX_HEADER_NAME_LEN>, String<MAX_HEADER_VALUE_LEN>, MAX_HEADERS>,
}

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a header map from name/value pairs. Later pairs win.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, Error> {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name, value)?;
        }
        Ok(headers)
    }

    /// Sets `name` to `value`, returning the previous value if there was one.
    ///
    /// Fails with [`Error::InvalidHeader`] when the name is not a token or the
    /// value contains CR, LF or NUL, and with [`Error::CapacityExceeded`] when
    /// the name or value is too long or the map is full.
    pub fn insert(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<Option<String<MAX_HEADER_VALUE_LEN>>, Error> {
        if !is_valid_header_name(name) || !is_valid_header_value(value) {
            return Err(Error::InvalidHeader);
        }
        let name = String::try_from(name).map_err(|_| Error::CapacityExceeded)?;
        let value = String::try_from(value).map_err(|_| Error::CapacityExceeded)?;
        self.entries
            .insert(name, value)
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Returns the value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Returns `true` if a header with this name exists, ignoring ASCII case.
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A header name must be a non-empty token (RFC 9110 section 5.6.2).
pub(crate) fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^'
                        | b'_' | b'`' | b'|' | b'~'
                )
        })
}

/// A header value must not break out of its line.
pub(crate) fn is_valid_header_value(value: &str) -> bool {
    !value.bytes().any(|b| matches!(b, b'\r' | b'\n' | b'\0'))
}

/// A request body together with its declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    content: &'a [u8],
    content_type: &'a str,
}

impl<'a> Entity<'a> {
    /// A `text/plain; charset=UTF-8` entity.
    pub fn text(body: &'a str) -> Self {
        Self {
            content: body.as_bytes(),
            content_type: TEXT_PLAIN_UTF8,
        }
    }

    /// The raw entity bytes.
    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    /// The value of the `Content-Type` header for this entity.
    pub fn content_type(&self) -> &'a str {
        self.content_type
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` for a zero-length entity.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A fully formed outbound request, handed to a
/// [`Transport`](super::transport::Transport) for execution.
///
/// The target is carried verbatim; no normalization is applied.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    method: Method,
    target: &'a str,
    headers: HeaderMap,
    entity: Option<Entity<'a>>,
}

impl<'a> Request<'a> {
    /// A `GET` request for `target` without headers.
    pub fn get(target: &'a str) -> Self {
        Self {
            method: Method::Get,
            target,
            headers: HeaderMap::new(),
            entity: None,
        }
    }

    /// A `POST` request for `target`, carrying `entity` when present.
    pub fn post(target: &'a str, entity: Option<Entity<'a>>) -> Self {
        Self {
            method: Method::Post,
            target,
            headers: HeaderMap::new(),
            entity,
        }
    }

    /// Replaces the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The target exactly as supplied by the caller.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Headers to send with the request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request entity, if any.
    pub fn entity(&self) -> Option<&Entity<'a>> {
        self.entity.as_ref()
    }
}
