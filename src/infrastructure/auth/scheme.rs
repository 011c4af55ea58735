use std::fmt;

/// Separator that marks a structured two-part credential (`user:secret`).
const CREDENTIAL_SEPARATOR: char = ':';

/// Authentication scheme understood by the talks API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Structured two-part credential, sent verbatim after `Basic`
    Basic,
    /// Opaque token, sent verbatim after `Bearer`
    Bearer,
}

impl AuthScheme {
    /// Pick the scheme from the shape of the credential alone
    pub fn for_credential(credential: &str) -> Self {
        if credential.contains(CREDENTIAL_SEPARATOR) {
            AuthScheme::Basic
        } else {
            AuthScheme::Bearer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Basic => "Basic",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ready-to-send `authorization` header value.
///
/// `Debug` never prints the credential.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    scheme: AuthScheme,
    value: String,
}

impl AuthHeader {
    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeader")
            .field("scheme", &self.scheme)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Build the `authorization` header for a credential.
///
/// Purely syntactic: any string is accepted, including an empty one.
pub fn select_auth_header(credential: &str) -> AuthHeader {
    let scheme = AuthScheme::for_credential(credential);
    AuthHeader {
        scheme,
        value: format!("{} {}", scheme, credential),
    }
}
