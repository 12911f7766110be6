//! HTTP status classification for failed upstream searches.

/// HTTP status code carried by a failed search.
///
/// Stored directly rather than parsed back out of error messages, so the
/// presentation layer can tell a rejected key (4xx) from an upstream outage (5xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx: bad key, bad parameters, rate limited.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx: the search API itself failed.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// The Marvel gateway answers 401/403 for unknown or unauthorized keys.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.0, 401 | 403)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
