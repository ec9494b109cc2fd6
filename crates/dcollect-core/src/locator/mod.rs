//! Source locators: the address string a load starts from.
//!
//! A locator is HTML-unescaped, parsed as a URL and classified into a
//! network or filesystem scheme. `http` and `https` share one scheme; the
//! URL's own scheme is still available through [`Locator::is_secure`].

mod path;
mod unescape;

pub use path::{file_name_from_url, file_path_from_url};
pub use unescape::unescape_html;

use crate::error::LoadError;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// How a locator is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `http://` or `https://`.
    Network,
    /// `file://`.
    File,
}

/// A parsed, immutable locator.
#[derive(Debug, Clone)]
pub struct Locator {
    scheme: Scheme,
    url: Url,
}

impl Locator {
    /// Unescape `source` and parse it.
    ///
    /// Fails with `UnsupportedScheme` for anything other than http, https
    /// and file, and with `InvalidLocator` when the text is not a URL.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let text = unescape_html(source.trim());
        let url = Url::parse(&text).map_err(|source| match source {
            url::ParseError::RelativeUrlWithoutBase => LoadError::UnsupportedScheme(text.clone()),
            _ => LoadError::InvalidLocator {
                locator: text.clone(),
                source,
            },
        })?;
        let scheme = match url.scheme() {
            "http" | "https" => Scheme::Network,
            "file" => Scheme::File,
            _ => return Err(LoadError::UnsupportedScheme(text)),
        };
        Ok(Self { scheme, url })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// True for `https://` locators; TLS options only apply to these.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Last path segment, used for MIME guessing.
    pub fn file_name(&self) -> Option<String> {
        file_name_from_url(&self.url)
    }

    /// Filesystem path for `file://` locators.
    pub fn file_path(&self) -> Option<std::io::Result<PathBuf>> {
        match self.scheme {
            Scheme::File => Some(file_path_from_url(&self.url)),
            Scheme::Network => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
