//! Credentials and credential stores for HTTP Basic authentication.
//!
//! A credential store maps an [`AuthScope`] to a username/password pair. The
//! [`Client`](super::client::Client) builds a store scoped to
//! [`AuthScope::ANY`] when credentials are supplied and hands it to the
//! transport, which consults it when it is challenged (or up front, if
//! configured for preemptive authentication).
//!
//! ```rust
//! use libhttp::network::application::http::{
//!     AuthScope, BasicCredentialsProvider, Credentials, CredentialsProvider,
//! };
//!
//! let mut store = BasicCredentialsProvider::new();
//! store
//!     .set_credentials(AuthScope::ANY, Credentials::new("alice", "secret").unwrap())
//!     .unwrap();
//!
//! let scope = AuthScope::new().with_host("example.com").unwrap().with_port(80);
//! let credentials = store.credentials(&scope).unwrap();
//! assert_eq!(credentials.username(), "alice");
//! ```

use crate::network::error::Error;
use base64ct::{Base64, Encoding as B64Encoding};
use heapless::{String, Vec};

/// Maximum length of a username or password in bytes.
pub const MAX_CREDENTIAL_LEN: usize = 64;
/// Maximum length of a host name or realm inside an [`AuthScope`].
pub const MAX_SCOPE_FIELD_LEN: usize = 64;
/// Maximum number of entries held by a [`BasicCredentialsProvider`].
pub const MAX_CREDENTIAL_ENTRIES: usize = 4;

// "user:pass" encoded, plus the "Basic " prefix
const RAW_PAIR_LEN: usize = 2 * MAX_CREDENTIAL_LEN + 1;
const ENCODED_PAIR_LEN: usize = 4 * RAW_PAIR_LEN.div_ceil(3);
/// Maximum length of a Basic `Authorization` header value.
pub const MAX_AUTHORIZATION_LEN: usize = "Basic ".len() + ENCODED_PAIR_LEN;

/// Authentication scheme named in a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// RFC 7617 Basic authentication.
    Basic,
}

impl AuthScheme {
    /// The scheme token as it appears in `WWW-Authenticate`/`Authorization`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Basic => "Basic",
        }
    }

    /// Parses a scheme token, ignoring ASCII case. Unsupported schemes yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("basic") {
            Some(AuthScheme::Basic)
        } else {
            None
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AuthScheme {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// The scope an entry in a credential store applies to.
///
/// Every field is optional; an unset field matches any value. [`AuthScope::ANY`]
/// leaves all fields unset and therefore matches every host, port, realm and
/// scheme.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthScope {
    host: Option<String<MAX_SCOPE_FIELD_LEN>>,
    port: Option<u16>,
    realm: Option<String<MAX_SCOPE_FIELD_LEN>>,
    scheme: Option<AuthScheme>,
}

impl AuthScope {
    /// Matches any host, port, realm and scheme.
    pub const ANY: AuthScope = AuthScope {
        host: None,
        port: None,
        realm: None,
        scheme: None,
    };

    /// Same as [`AuthScope::ANY`]; narrow it with the `with_*` builders.
    pub fn new() -> Self {
        Self::ANY
    }

    /// Restricts the scope to `host`.
    pub fn with_host(mut self, host: &str) -> Result<Self, Error> {
        self.host = Some(String::try_from(host).map_err(|_| Error::CapacityExceeded)?);
        Ok(self)
    }

    /// Restricts the scope to `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Restricts the scope to `realm`.
    pub fn with_realm(mut self, realm: &str) -> Result<Self, Error> {
        self.realm = Some(String::try_from(realm).map_err(|_| Error::CapacityExceeded)?);
        Ok(self)
    }

    /// Restricts the scope to `scheme`.
    pub fn with_scheme(mut self, scheme: AuthScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// The host, if restricted.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The port, if restricted.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The realm, if restricted.
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// The scheme, if restricted.
    pub fn scheme(&self) -> Option<AuthScheme> {
        self.scheme
    }

    /// Two scopes match unless some field is set on both and differs.
    ///
    /// Hosts compare ignoring ASCII case; realms compare exactly.
    pub fn matches(&self, other: &AuthScope) -> bool {
        fn field<T: ?Sized>(a: Option<&T>, b: Option<&T>, eq: impl Fn(&T, &T) -> bool) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => eq(a, b),
                _ => true,
            }
        }

        field(self.host(), other.host(), |a: &str, b: &str| {
            a.eq_ignore_ascii_case(b)
        }) && field(self.port.as_ref(), other.port.as_ref(), |a, b| a == b)
            && field(self.realm(), other.realm(), |a: &str, b: &str| a == b)
            && field(self.scheme.as_ref(), other.scheme.as_ref(), |a, b| a == b)
    }

    /// Number of restricted fields; higher is more specific.
    fn specificity(&self) -> u8 {
        self.host.is_some() as u8
            + self.port.is_some() as u8
            + self.realm.is_some() as u8
            + self.scheme.is_some() as u8
    }
}

/// A username/password pair.
///
/// The `Debug` output never includes the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String<MAX_CREDENTIAL_LEN>,
    password: String<MAX_CREDENTIAL_LEN>,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: &str, password: &str) -> Result<Self, Error> {
        Ok(Self {
            username: String::try_from(username).map_err(|_| Error::CapacityExceeded)?,
            password: String::try_from(password).map_err(|_| Error::CapacityExceeded)?,
        })
    }

    /// Builds credentials from two independently optional halves.
    ///
    /// Both absent yields `Ok(None)` and both present yields the pair.
    /// Exactly one present is rejected with [`Error::IncompleteCredentials`];
    /// a missing half is never treated as an empty string.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Result<Option<Self>, Error> {
        match (username, password) {
            (Some(username), Some(password)) => Self::new(username, password).map(Some),
            (None, None) => Ok(None),
            _ => Err(Error::IncompleteCredentials),
        }
    }

    /// The user principal name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The value of a Basic `Authorization` header for this pair.
    ///
    /// ```rust
    /// use libhttp::network::application::http::Credentials;
    ///
    /// let credentials = Credentials::new("Aladdin", "open sesame").unwrap();
    /// assert_eq!(
    ///     credentials.basic_authorization().unwrap().as_str(),
    ///     "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
    /// );
    /// ```
    pub fn basic_authorization(&self) -> Result<String<MAX_AUTHORIZATION_LEN>, Error> {
        let mut raw: Vec<u8, RAW_PAIR_LEN> = Vec::new();
        raw.extend_from_slice(self.username.as_bytes())
            .map_err(|_| Error::CapacityExceeded)?;
        raw.push(b':').map_err(|_| Error::CapacityExceeded)?;
        raw.extend_from_slice(self.password.as_bytes())
            .map_err(|_| Error::CapacityExceeded)?;

        let mut encoded = [0u8; ENCODED_PAIR_LEN];
        let encoded = Base64::encode(&raw, &mut encoded).map_err(|_| Error::CapacityExceeded)?;

        let mut value = String::new();
        value
            .push_str(AuthScheme::Basic.as_str())
            .map_err(|_| Error::CapacityExceeded)?;
        value.push(' ').map_err(|_| Error::CapacityExceeded)?;
        value.push_str(encoded).map_err(|_| Error::CapacityExceeded)?;
        Ok(value)
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &"***")
            .finish()
    }
}

/// A credential store consulted by transports.
pub trait CredentialsProvider {
    /// Returns the credentials that apply to `scope`, if any.
    fn credentials(&self, scope: &AuthScope) -> Option<&Credentials>;
}

/// A store holding exactly one entry.
///
/// This is what the [`Client`](super::client::Client) attaches to each
/// authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedCredentials {
    scope: AuthScope,
    credentials: Credentials,
}

impl ScopedCredentials {
    /// A store answering for `scope` only.
    pub fn new(scope: AuthScope, credentials: Credentials) -> Self {
        Self { scope, credentials }
    }

    /// A store answering for every scope.
    pub fn any(credentials: Credentials) -> Self {
        Self::new(AuthScope::ANY, credentials)
    }

    /// The scope this store answers for.
    pub fn scope(&self) -> &AuthScope {
        &self.scope
    }
}

impl CredentialsProvider for ScopedCredentials {
    fn credentials(&self, scope: &AuthScope) -> Option<&Credentials> {
        self.scope.matches(scope).then_some(&self.credentials)
    }
}

/// A small multi-entry credential store.
///
/// Lookups return the most specific matching entry. Setting credentials for a
/// scope that is already present replaces that entry.
#[derive(Debug, Clone, Default)]
pub struct BasicCredentialsProvider {
    entries: Vec<(AuthScope, Credentials), MAX_CREDENTIAL_ENTRIES>,
}

impl BasicCredentialsProvider {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `credentials` for `scope`.
    pub fn set_credentials(&mut self, scope: AuthScope, credentials: Credentials) -> Result<(), Error> {
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == scope) {
            entry.1 = credentials;
            return Ok(());
        }
        self.entries
            .push((scope, credentials))
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialsProvider for BasicCredentialsProvider {
    fn credentials(&self, scope: &AuthScope) -> Option<&Credentials> {
        self.entries
            .iter()
            .filter(|(s, _)| s.matches(scope))
            .max_by_key(|(s, _)| s.specificity())
            .map(|(_, c)| c)
    }
}
