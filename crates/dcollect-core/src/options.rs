//! Per-call fetch options.

use serde::{Deserialize, Serialize};

/// User/password pair for HTTP basic auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Options recognized by `Loader::load`. All fields default to "off".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Basic auth. Checked before `bearer_token`.
    pub credentials: Option<Credentials>,
    /// Bearer token, with or without the `Bearer ` prefix.
    pub bearer_token: Option<String>,
    /// Disable certificate and host verification for `https` locators.
    pub skip_tls_verify: bool,
    /// Content type override; skips header and MIME detection.
    pub content_type: Option<String>,
    /// Return the payload unparsed.
    pub raw: bool,
}

impl FetchOptions {
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn skip_tls_verify(mut self) -> Self {
        self.skip_tls_verify = true;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let o = FetchOptions::default();
        assert!(o.credentials.is_none());
        assert!(o.bearer_token.is_none());
        assert!(!o.skip_tls_verify);
        assert!(!o.raw);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml = r#"
            bearer_token = "abc"
            raw = true

            [credentials]
            user = "me"
            password = "secret"
        "#;
        let o: FetchOptions = toml::from_str(toml).unwrap();
        assert_eq!(o.bearer_token.as_deref(), Some("abc"));
        assert!(o.raw);
        assert_eq!(o.credentials.unwrap().user, "me");
        assert!(o.content_type.is_none());
    }
}
